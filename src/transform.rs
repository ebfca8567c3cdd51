//! Commits finished drag, resize and rotate gestures back into the store.
//!
//! Scales are stored as absolute values. A negative horizontal scale only
//! ever comes from the `flipped` flag, which the renderer applies.

use egui::{Pos2, Rect, Vec2};

use crate::config::CanvasConfig;
use crate::error::TransformError;
use crate::layer::{DesignLayer, LayerId, LayerPatch, Side};
use crate::store::{DesignStore, LayerOrder};

/// Final state of an interactive node when a gesture ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub position: Pos2,
    pub scale: Vec2,
    /// Degrees
    pub rotation: f32,
}

impl NodeTransform {
    pub fn from_layer(layer: &DesignLayer) -> Self {
        Self {
            position: layer.position(),
            scale: Vec2::new(layer.scale_x, layer.scale_y),
            rotation: layer.rotation,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformHandler {
    min_size: f32,
}

impl Default for TransformHandler {
    fn default() -> Self {
        Self::new(CanvasConfig::default().min_layer_size)
    }
}

impl TransformHandler {
    pub fn new(min_size: f32) -> Self {
        Self { min_size }
    }

    pub fn min_size(&self) -> f32 {
        self.min_size
    }

    /// Guard for live resizing: keep `old` when `new` would be too small
    pub fn bound_box(&self, old: Rect, new: Rect) -> Rect {
        if new.width() < self.min_size || new.height() < self.min_size {
            old
        } else {
            new
        }
    }

    /// Drag end: store the new position
    pub fn commit_drag(
        &self,
        store: &mut DesignStore,
        side: Side,
        id: &LayerId,
        position: Pos2,
    ) -> Result<(), TransformError> {
        if store.update_layer(id, &LayerPatch::position(position), side) {
            Ok(())
        } else {
            Err(TransformError::LayerNotFound(id.clone()))
        }
    }

    /// Resize/rotate end: store position, absolute scale and rotation.
    /// A result below the minimum size leaves the layer untouched.
    pub fn commit_transform(
        &self,
        store: &mut DesignStore,
        side: Side,
        id: &LayerId,
        node: NodeTransform,
    ) -> Result<(), TransformError> {
        let layer = store
            .layer(id, side)
            .ok_or_else(|| TransformError::LayerNotFound(id.clone()))?;

        let scale = Vec2::new(node.scale.x.abs(), node.scale.y.abs());
        let size = Vec2::new(layer.width * scale.x, layer.height * scale.y);
        if size.x < self.min_size || size.y < self.min_size {
            log::debug!("Rejected resize of {id} to {}x{}", size.x, size.y);
            return Err(TransformError::BelowMinimumSize {
                width: size.x,
                height: size.y,
                min: self.min_size,
            });
        }

        let patch = LayerPatch {
            x: Some(node.position.x),
            y: Some(node.position.y),
            scale_x: Some(scale.x),
            scale_y: Some(scale.y),
            rotation: Some(node.rotation),
            ..Default::default()
        };
        store.update_layer(id, &patch, side);
        Ok(())
    }

    /// Toggle the horizontal flip, shifting x so the visual box stays put.
    /// Returns the new flag.
    pub fn toggle_flip(&self, store: &mut DesignStore, side: Side, id: &LayerId) -> Result<bool, TransformError> {
        let layer = store
            .layer(id, side)
            .ok_or_else(|| TransformError::LayerNotFound(id.clone()))?;

        let shift = layer.width * layer.scale_x;
        let flipped = !layer.flipped;
        let x = if layer.flipped { layer.x - shift } else { layer.x + shift };

        let patch = LayerPatch {
            x: Some(x),
            flipped: Some(flipped),
            ..Default::default()
        };
        store.update_layer(id, &patch, side);
        Ok(flipped)
    }

    pub fn move_up(&self, store: &mut DesignStore, side: Side, id: &LayerId) -> bool {
        store.move_layer(id, side, LayerOrder::Up)
    }

    pub fn move_down(&self, store: &mut DesignStore, side: Side, id: &LayerId) -> bool {
        store.move_layer(id, side, LayerOrder::Down)
    }
}
