use egui::{Pos2, Rect, Vec2};

/// Canvas and placement settings shared by the store, the placement resolver
/// and the transform handler.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Full canvas size in canvas units
    pub canvas_size: Vec2,
    /// Design-safe area as fractions of the canvas: (left, top, width, height)
    pub design_area_fractions: [f32; 4],
    /// Width given to a freshly dropped image; height follows the aspect ratio
    pub default_image_width: f32,
    /// Geometry of a freshly created text layer
    pub default_text_size: Vec2,
    pub default_text: &'static str,
    pub default_font_family: &'static str,
    pub default_font_size: f32,
    pub default_text_fill: &'static str,
    /// Smallest visual box a transform may produce
    pub min_layer_size: f32,
}

impl CanvasConfig {
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 1000.0;
    pub const MAX_HISTORY: usize = 50;
    pub const STORAGE_KEY: &'static str = "design-store";
    pub const SAVED_DESIGNS_KEY: &'static str = "savedDesigns";

    /// The rectangle layers are allowed to occupy
    pub fn design_area(&self) -> Rect {
        let [left, top, width, height] = self.design_area_fractions;
        Rect::from_min_size(
            Pos2::new(self.canvas_size.x * left, self.canvas_size.y * top),
            Vec2::new(self.canvas_size.x * width, self.canvas_size.y * height),
        )
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            canvas_size: Vec2::new(Self::CANVAS_WIDTH, Self::CANVAS_HEIGHT),
            design_area_fractions: [0.25, 0.15, 0.5, 0.7],
            default_image_width: 150.0,
            default_text_size: Vec2::new(100.0, 30.0),
            default_text: "PYTH",
            default_font_family: "Arial",
            default_font_size: 24.0,
            default_text_fill: "#ffffff",
            min_layer_size: 10.0,
        }
    }
}

/// Fonts offered by the toolbar for text layers
pub const FONT_FAMILIES: [&str; 6] = [
    "Arial",
    "Times New Roman",
    "Courier New",
    "Georgia",
    "Verdana",
    "Impact",
];

pub const MIN_FONT_SIZE: f32 = 8.0;
pub const MAX_FONT_SIZE: f32 = 200.0;
