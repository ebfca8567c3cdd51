//! Turns drops on the canvas into new layers.
//!
//! Image drops are two-phase: the resolver hands back a [`PendingImageLoad`]
//! and the caller reports the image's intrinsic size once it is known. Each
//! drop opens a new session and a completion from an older session is ignored.
//! Files released together in one drop share that drop's session.

use egui::{Pos2, Rect, Vec2};
use serde::Deserialize;

use crate::config::CanvasConfig;
use crate::error::DropError;
use crate::id_generator::generate_layer_id;
use crate::layer::{DesignLayer, LayerContent, LayerId, Side};
use crate::store::DesignStore;

/// What was dropped onto the canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPayload {
    Text,
    Image { src: String },
}

#[derive(Deserialize)]
struct RawPayload {
    #[serde(rename = "type")]
    kind: Option<String>,
    src: Option<String>,
}

impl DropPayload {
    /// Parse `{"type":"text"}` or `{"src":"..."}`
    pub fn parse(json: &str) -> Result<Self, DropError> {
        let raw: RawPayload = serde_json::from_str(json)?;
        if raw.kind.as_deref() == Some("text") {
            return Ok(DropPayload::Text);
        }
        match raw.src {
            Some(src) if !src.trim().is_empty() => Ok(DropPayload::Image { src }),
            Some(_) => Err(DropError::EmptySource),
            None => Err(DropError::UnknownAsset),
        }
    }

    /// The drag-data form asset sources hand to the canvas
    pub fn to_json(&self) -> String {
        match self {
            DropPayload::Text => serde_json::json!({ "type": "text" }).to_string(),
            DropPayload::Image { src } => serde_json::json!({ "src": src }).to_string(),
        }
    }
}

/// An image drop waiting for its intrinsic size
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImageLoad {
    pub session: u64,
    pub src: String,
    pub drop_point: Pos2,
    /// Side that was active when the drop happened
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Placed(LayerId),
    PendingImage(PendingImageLoad),
    Rejected,
}

/// Clamp a box's top-left corner so the whole box stays inside `area`.
/// Each axis is bounded by `[area.min, area.max - size]`; a box larger than
/// the area on an axis is pinned to `area.min` there.
pub fn clamp_to_area(top_left: Pos2, size: Vec2, area: Rect) -> Pos2 {
    Pos2::new(
        top_left.x.min(area.max.x - size.x).max(area.min.x),
        top_left.y.min(area.max.y - size.y).max(area.min.y),
    )
}

#[derive(Debug, Clone)]
pub struct PlacementResolver {
    config: CanvasConfig,
    session: u64,
}

impl Default for PlacementResolver {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl PlacementResolver {
    pub fn new(config: CanvasConfig) -> Self {
        Self { config, session: 0 }
    }

    pub fn design_area(&self) -> Rect {
        self.config.design_area()
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn current_session(&self) -> u64 {
        self.session
    }

    /// Invalidate any image load still in flight
    pub fn cancel_pending(&mut self) {
        self.session += 1;
    }

    /// Handle raw drag data dropped at `drop_point` (canvas coordinates).
    /// Malformed payloads are logged and rejected.
    pub fn handle_drop(&mut self, store: &mut DesignStore, payload_json: &str, drop_point: Pos2) -> DropOutcome {
        match DropPayload::parse(payload_json) {
            Ok(payload) => self.place(store, payload, drop_point),
            Err(err) => {
                log::error!("Error processing dropped item: {err}");
                DropOutcome::Rejected
            }
        }
    }

    pub fn place(&mut self, store: &mut DesignStore, payload: DropPayload, drop_point: Pos2) -> DropOutcome {
        self.session += 1;
        match payload {
            DropPayload::Text => {
                let top_left = clamp_to_area(drop_point, self.config.default_text_size, self.design_area());
                DropOutcome::Placed(self.insert_text(store, top_left))
            }
            DropPayload::Image { src } => DropOutcome::PendingImage(self.pending_image(store, src, drop_point)),
        }
    }

    /// Open one drop session for several images released together
    pub fn place_images(
        &mut self,
        store: &DesignStore,
        sources: Vec<String>,
        drop_point: Pos2,
    ) -> Vec<PendingImageLoad> {
        if sources.is_empty() {
            return Vec::new();
        }
        self.session += 1;
        sources
            .into_iter()
            .map(|src| self.pending_image(store, src, drop_point))
            .collect()
    }

    fn pending_image(&self, store: &DesignStore, src: String, drop_point: Pos2) -> PendingImageLoad {
        log::debug!("Waiting for {src} to load (session {})", self.session);
        PendingImageLoad {
            session: self.session,
            src,
            drop_point,
            side: store.active_side(),
        }
    }

    /// Finish an image drop once its intrinsic size is known.
    /// Stale sessions and unusable sizes create nothing.
    pub fn complete_image_load(
        &mut self,
        store: &mut DesignStore,
        pending: &PendingImageLoad,
        intrinsic_size: Vec2,
    ) -> Option<LayerId> {
        if pending.session != self.session {
            log::warn!(
                "Ignoring load of {}: drop session {} superseded by {}",
                pending.src,
                pending.session,
                self.session
            );
            return None;
        }
        if !(intrinsic_size.x > 0.0 && intrinsic_size.y > 0.0) {
            let err = DropError::InvalidImageSize {
                src: pending.src.clone(),
                width: intrinsic_size.x,
                height: intrinsic_size.y,
            };
            log::error!("Error processing dropped item: {err}");
            return None;
        }

        let aspect_ratio = intrinsic_size.x / intrinsic_size.y;
        let width = self.config.default_image_width;
        let size = Vec2::new(width, width / aspect_ratio);
        let centered = pending.drop_point - size / 2.0;
        let top_left = clamp_to_area(centered, size, self.design_area());

        let id = generate_layer_id();
        let z_index = store.layers(pending.side).len() as u32;
        let layer = DesignLayer::new(
            id.clone(),
            LayerContent::Image {
                src: pending.src.clone(),
            },
            top_left,
            size,
            z_index,
        );
        store.add_layer(layer, pending.side);
        if store.active_side() == pending.side {
            store.set_selected_id(Some(id.clone()));
        }
        log::info!("Placed image {} as layer {}", pending.src, id);
        Some(id)
    }

    /// The toolbar's "add text" action: a default text layer centered in the design area
    pub fn add_text_layer(&mut self, store: &mut DesignStore) -> LayerId {
        let size = self.config.default_text_size;
        let top_left = clamp_to_area(self.design_area().center() - size / 2.0, size, self.design_area());
        self.insert_text(store, top_left)
    }

    fn insert_text(&self, store: &mut DesignStore, top_left: Pos2) -> LayerId {
        let side = store.active_side();
        let id = generate_layer_id();
        let layer = DesignLayer::new(
            id.clone(),
            LayerContent::Text {
                text: self.config.default_text.to_owned(),
                font_family: self.config.default_font_family.to_owned(),
                font_size: self.config.default_font_size,
                fill: self.config.default_text_fill.to_owned(),
            },
            top_left,
            self.config.default_text_size,
            store.layers(side).len() as u32,
        );
        store.add_layer(layer, side);
        store.set_selected_id(Some(id.clone()));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_marker_wins_over_src() {
        let payload = DropPayload::parse(r#"{"type":"text","src":"/assets/a.png"}"#).unwrap();
        assert_eq!(payload, DropPayload::Text);
    }

    #[test]
    fn payload_json_parses_back() {
        let image = DropPayload::Image {
            src: "/assets/gallery/flock.png".into(),
        };
        assert_eq!(DropPayload::parse(&image.to_json()).unwrap(), image);
        assert!(matches!(DropPayload::parse("{}"), Err(DropError::UnknownAsset)));
        assert!(matches!(DropPayload::parse("nope"), Err(DropError::Malformed(_))));
    }
}
