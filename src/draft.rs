//! Property edits to one layer, held back until the user is done editing.
//!
//! Widgets like a text field or a dragged number report a change every frame.
//! Staging those changes here and committing once keeps each finished edit to
//! a single undo step and a single storage write.

use crate::layer::{DesignLayer, LayerId, LayerPatch, Side};
use crate::store::DesignStore;

#[derive(Debug, Clone, PartialEq)]
pub struct LayerDraft {
    layer_id: LayerId,
    side: Side,
    patch: LayerPatch,
}

impl LayerDraft {
    pub fn new(layer_id: LayerId, side: Side) -> Self {
        Self {
            layer_id,
            side,
            patch: LayerPatch::default(),
        }
    }

    pub fn layer_id(&self) -> &LayerId {
        &self.layer_id
    }

    pub fn is_for(&self, id: &LayerId, side: Side) -> bool {
        &self.layer_id == id && self.side == side
    }

    pub fn is_empty(&self) -> bool {
        self.patch.is_empty()
    }

    pub fn stage(&mut self, patch: LayerPatch) {
        self.patch.merge(patch);
    }

    /// `layer` with the staged changes applied
    pub fn preview(&self, layer: &DesignLayer) -> DesignLayer {
        patched(layer, &self.patch)
    }

    /// Apply everything staged as one store update. Returns false when
    /// nothing would change or the layer is gone.
    pub fn commit(&mut self, store: &mut DesignStore) -> bool {
        let patch = std::mem::take(&mut self.patch);
        let Some(layer) = store.layer(&self.layer_id, self.side) else {
            log::debug!("Dropping draft for missing layer {}", self.layer_id);
            return false;
        };
        if patch.is_empty() || patched(layer, &patch) == *layer {
            return false;
        }
        store.update_layer(&self.layer_id, &patch, self.side)
    }
}

fn patched(layer: &DesignLayer, patch: &LayerPatch) -> DesignLayer {
    let mut preview = layer.clone();
    patch.apply(&mut preview);
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Pos2, Vec2};

    use crate::layer::LayerContent;

    fn text_layer() -> DesignLayer {
        DesignLayer::new(
            LayerId::new("t"),
            LayerContent::Text {
                text: "PYTH".into(),
                font_family: "Arial".into(),
                font_size: 24.0,
                fill: "#ffffff".into(),
            },
            Pos2::new(300.0, 300.0),
            Vec2::new(100.0, 30.0),
            0,
        )
    }

    #[test]
    fn later_stages_win() {
        let mut draft = LayerDraft::new(LayerId::new("t"), Side::Front);
        draft.stage(LayerPatch::text("H"));
        draft.stage(LayerPatch::font_size(30.0));
        draft.stage(LayerPatch::text("Hi"));

        let preview = draft.preview(&text_layer());
        match preview.content {
            LayerContent::Text { text, font_size, .. } => {
                assert_eq!(text, "Hi");
                assert_eq!(font_size, 30.0);
            }
            LayerContent::Image { .. } => panic!("variant changed"),
        }
    }
}
