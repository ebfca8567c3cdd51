use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::layer::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentStyle {
    Oversized,
    Slim,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentColor {
    White,
    Black,
}

impl GarmentStyle {
    pub const ALL: [GarmentStyle; 2] = [GarmentStyle::Oversized, GarmentStyle::Slim];

    pub fn label(&self) -> &'static str {
        match self {
            GarmentStyle::Oversized => "oversized",
            GarmentStyle::Slim => "slim",
        }
    }
}

impl GarmentColor {
    pub const ALL: [GarmentColor; 2] = [GarmentColor::White, GarmentColor::Black];

    pub fn label(&self) -> &'static str {
        match self {
            GarmentColor::White => "white",
            GarmentColor::Black => "black",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPreviews {
    pub front: String,
    pub back: String,
}

/// A style × color garment entry with its mockup images
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TShirtModel {
    pub id: String,
    pub name: String,
    pub style: GarmentStyle,
    pub color: GarmentColor,
    pub previews: ModelPreviews,
}

impl TShirtModel {
    fn new(style: GarmentStyle, color: GarmentColor) -> Self {
        let (style_label, color_label) = (style.label(), color.label());
        Self {
            id: format!("{style_label}-{color_label}"),
            name: format!("{} {}", capitalize(style_label), capitalize(color_label)),
            style,
            color,
            previews: ModelPreviews {
                front: format!("./assets/{color_label}/{style_label}/front.png"),
                back: format!("./assets/{color_label}/{style_label}/back.png"),
            },
        }
    }

    pub fn preview(&self, side: Side) -> &str {
        match side {
            Side::Front => &self.previews.front,
            Side::Back => &self.previews.back,
        }
    }
}

impl Default for TShirtModel {
    fn default() -> Self {
        default_model().clone()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

static MODELS: OnceLock<Vec<TShirtModel>> = OnceLock::new();

/// The fixed garment catalog. Index 0 is the default model.
pub fn models() -> &'static [TShirtModel] {
    MODELS.get_or_init(|| {
        vec![
            TShirtModel::new(GarmentStyle::Oversized, GarmentColor::White),
            TShirtModel::new(GarmentStyle::Oversized, GarmentColor::Black),
            TShirtModel::new(GarmentStyle::Slim, GarmentColor::White),
            TShirtModel::new(GarmentStyle::Slim, GarmentColor::Black),
        ]
    })
}

pub fn default_model() -> &'static TShirtModel {
    &models()[0]
}

pub fn find_model(id: &str) -> Option<&'static TShirtModel> {
    models().iter().find(|model| model.id == id)
}

pub fn find_variant(style: GarmentStyle, color: GarmentColor) -> Option<&'static TShirtModel> {
    models()
        .iter()
        .find(|model| model.style == style && model.color == color)
}
