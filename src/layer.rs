use egui::{Pos2, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A unique identifier for a layer, stable for the layer's lifetime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two garment canvases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Front,
    Back,
}

impl Side {
    pub fn from_back_view(is_back_view: bool) -> Self {
        if is_back_view { Side::Back } else { Side::Front }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Front => "front",
            Side::Back => "back",
        }
    }
}

/// What a layer paints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerContent {
    Image {
        src: String,
    },
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        font_family: String,
        font_size: f32,
        /// `#rrggbb`
        fill: String,
    },
}

/// A placed graphic primitive on one side of the garment.
///
/// `z_index` is written once at creation and kept for storage compatibility.
/// Paint order is the layer's position in its side's sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignLayer {
    pub id: LayerId,
    #[serde(flatten)]
    pub content: LayerContent,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Degrees
    pub rotation: f32,
    #[serde(default)]
    pub z_index: u32,
    #[serde(default)]
    pub flipped: bool,
}

/// Layers are shared between the live sequences and history snapshots.
/// Mutation goes through `Arc::make_mut`, so unchanged layers are never copied.
pub type LayerRef = Arc<DesignLayer>;

impl DesignLayer {
    pub fn new(id: LayerId, content: LayerContent, position: Pos2, size: Vec2, z_index: u32) -> Self {
        Self {
            id,
            content,
            x: position.x,
            y: position.y,
            width: size.x,
            height: size.y,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            z_index,
            flipped: false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.content {
            LayerContent::Image { .. } => "image",
            LayerContent::Text { .. } => "text",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.content, LayerContent::Text { .. })
    }

    pub fn position(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    /// Size on screen once scale is applied, ignoring the flip sign
    pub fn visual_size(&self) -> Vec2 {
        Vec2::new(
            self.width * self.scale_x.abs(),
            self.height * self.scale_y.abs(),
        )
    }
}

/// A subset of layer attributes to merge into an existing layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub scale_x: Option<f32>,
    pub scale_y: Option<f32>,
    pub rotation: Option<f32>,
    pub flipped: Option<bool>,
    pub src: Option<String>,
    pub text: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub fill: Option<String>,
}

impl LayerPatch {
    pub fn position(pos: Pos2) -> Self {
        Self {
            x: Some(pos.x),
            y: Some(pos.y),
            ..Default::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn font_family(family: impl Into<String>) -> Self {
        Self {
            font_family: Some(family.into()),
            ..Default::default()
        }
    }

    pub fn font_size(size: f32) -> Self {
        Self {
            font_size: Some(size),
            ..Default::default()
        }
    }

    pub fn fill(fill: impl Into<String>) -> Self {
        Self {
            fill: Some(fill.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fold `later` into this patch; its fields win where both are set
    pub fn merge(&mut self, later: LayerPatch) {
        self.x = later.x.or(self.x);
        self.y = later.y.or(self.y);
        self.width = later.width.or(self.width);
        self.height = later.height.or(self.height);
        self.scale_x = later.scale_x.or(self.scale_x);
        self.scale_y = later.scale_y.or(self.scale_y);
        self.rotation = later.rotation.or(self.rotation);
        self.flipped = later.flipped.or(self.flipped);
        self.src = later.src.or(self.src.take());
        self.text = later.text.or(self.text.take());
        self.font_family = later.font_family.or(self.font_family.take());
        self.font_size = later.font_size.or(self.font_size);
        self.fill = later.fill.or(self.fill.take());
    }

    /// Merge into `layer`. Attributes that don't exist on the layer's variant are skipped.
    pub fn apply(&self, layer: &mut DesignLayer) {
        if let Some(x) = self.x {
            layer.x = x;
        }
        if let Some(y) = self.y {
            layer.y = y;
        }
        if let Some(width) = self.width {
            layer.width = width;
        }
        if let Some(height) = self.height {
            layer.height = height;
        }
        if let Some(scale_x) = self.scale_x {
            layer.scale_x = scale_x;
        }
        if let Some(scale_y) = self.scale_y {
            layer.scale_y = scale_y;
        }
        if let Some(rotation) = self.rotation {
            layer.rotation = rotation;
        }
        if let Some(flipped) = self.flipped {
            layer.flipped = flipped;
        }

        match &mut layer.content {
            LayerContent::Image { src } => {
                if let Some(new_src) = &self.src {
                    *src = new_src.clone();
                }
                if self.text.is_some()
                    || self.font_family.is_some()
                    || self.font_size.is_some()
                    || self.fill.is_some()
                {
                    log::debug!("Ignoring text attributes on image layer {}", layer.id);
                }
            }
            LayerContent::Text {
                text,
                font_family,
                font_size,
                fill,
            } => {
                if let Some(new_text) = &self.text {
                    *text = new_text.clone();
                }
                if let Some(family) = &self.font_family {
                    *font_family = family.clone();
                }
                if let Some(size) = self.font_size {
                    *font_size = size;
                }
                if let Some(new_fill) = &self.fill {
                    *fill = new_fill.clone();
                }
                if self.src.is_some() {
                    log::debug!("Ignoring src on text layer {}", layer.id);
                }
            }
        }
    }
}

/// The ordered layer sequences of both sides. Position is paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SideLayers {
    #[serde(default)]
    pub front: Vec<LayerRef>,
    #[serde(default)]
    pub back: Vec<LayerRef>,
}

impl SideLayers {
    pub fn get(&self, side: Side) -> &[LayerRef] {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Vec<LayerRef> {
        match side {
            Side::Front => &mut self.front,
            Side::Back => &mut self.back,
        }
    }

    pub fn find(&self, side: Side, id: &LayerId) -> Option<&LayerRef> {
        self.get(side).iter().find(|layer| &layer.id == id)
    }

    pub fn position_of(&self, side: Side, id: &LayerId) -> Option<usize> {
        self.get(side).iter().position(|layer| &layer.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.back.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_layer() -> DesignLayer {
        DesignLayer::new(
            LayerId::new("t1"),
            LayerContent::Text {
                text: "PYTH".into(),
                font_family: "Arial".into(),
                font_size: 24.0,
                fill: "#ffffff".into(),
            },
            Pos2::new(10.0, 20.0),
            Vec2::new(100.0, 30.0),
            0,
        )
    }

    #[test]
    fn serializes_flat_tagged_shape() {
        let json = serde_json::to_value(text_layer()).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["fontFamily"], "Arial");
        assert_eq!(json["scaleX"], 1.0);
        assert_eq!(json["zIndex"], 0);
        assert!(json.get("content").is_none());
    }

    #[test]
    fn reads_legacy_layer_without_flip_flag() {
        let json = r#"{"id":"1700000000000","type":"image","src":"/a.png",
            "x":200,"y":150,"width":150,"height":75,"scaleX":1,"scaleY":1,"rotation":0}"#;
        let layer: DesignLayer = serde_json::from_str(json).unwrap();
        assert!(!layer.flipped);
        assert_eq!(layer.z_index, 0);
        assert_eq!(layer.content, LayerContent::Image { src: "/a.png".into() });
    }

    #[test]
    fn patch_skips_attributes_of_the_other_variant() {
        let mut layer = text_layer();
        let patch = LayerPatch {
            src: Some("/ignored.png".into()),
            fill: Some("#000000".into()),
            ..Default::default()
        };
        patch.apply(&mut layer);
        match &layer.content {
            LayerContent::Text { fill, .. } => assert_eq!(fill, "#000000"),
            LayerContent::Image { .. } => panic!("variant changed"),
        }
    }
}
