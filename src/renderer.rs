use egui::epaint::{Mesh, TextShape, Vertex};
use egui::{Align2, Color32, FontFamily, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::config::CanvasConfig;
use crate::geometry;
use crate::draft::LayerDraft;
use crate::gizmo::{self, TransformGizmo};
use crate::layer::{DesignLayer, LayerContent};
use crate::store::DesignStore;
use crate::texture_manager::TextureManager;

const PLACEHOLDER_FILL: Color32 = Color32::from_gray(60);
const AREA_OUTLINE: Color32 = Color32::from_rgb(184, 41, 227);
const MISSING_IMAGE_FILL: Color32 = Color32::from_rgba_premultiplied(120, 120, 120, 120);

/// Maps canvas coordinates onto the screen rect the canvas is shown in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    origin: Pos2,
    scale: f32,
    canvas_size: Vec2,
}

impl CanvasView {
    /// Largest uniform scale that fits `canvas_size` into `available`, centered
    pub fn fit(available: Rect, canvas_size: Vec2) -> Self {
        let scale = (available.width() / canvas_size.x)
            .min(available.height() / canvas_size.y)
            .max(f32::EPSILON);
        let origin = available.center() - canvas_size * scale / 2.0;
        Self {
            origin,
            scale,
            canvas_size,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn to_screen(&self, canvas: Pos2) -> Pos2 {
        self.origin + canvas.to_vec2() * self.scale
    }

    pub fn to_canvas(&self, screen: Pos2) -> Pos2 {
        ((screen - self.origin) / self.scale).to_pos2()
    }

    pub fn rect_to_screen(&self, canvas: Rect) -> Rect {
        Rect::from_min_max(self.to_screen(canvas.min), self.to_screen(canvas.max))
    }

    pub fn screen_rect(&self) -> Rect {
        Rect::from_min_size(self.origin, self.canvas_size * self.scale)
    }
}

/// Parse a `#rrggbb` fill, falling back to white
pub fn parse_fill(fill: &str) -> Color32 {
    Color32::from_hex(fill).unwrap_or_else(|_| {
        log::debug!("Unparseable fill {fill:?}, using white");
        Color32::WHITE
    })
}

pub fn fill_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

pub fn font_id(family: &str, size: f32) -> FontId {
    let family = match family {
        "Courier New" => FontFamily::Monospace,
        _ => FontFamily::Proportional,
    };
    FontId::new(size.max(1.0), family)
}

/// Paints the mockup, the active side's layers and the selection chrome
#[derive(Debug, Default)]
pub struct Renderer {
    config: CanvasConfig,
}

impl Renderer {
    pub fn new(config: CanvasConfig) -> Self {
        Self { config }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        ctx: &egui::Context,
        painter: &Painter,
        view: &CanvasView,
        store: &DesignStore,
        textures: &mut TextureManager,
        gizmo: Option<&TransformGizmo>,
        draft: Option<&LayerDraft>,
    ) {
        self.draw_mockup(ctx, painter, view, store, textures);

        let area = view.rect_to_screen(self.config.design_area());
        let clipped = painter.with_clip_rect(area.intersect(painter.clip_rect()));
        for layer in store.current_layers() {
            let layer = preview(layer, gizmo, draft);
            match &layer.content {
                LayerContent::Image { src } => {
                    Self::draw_image(ctx, &clipped, view, &layer, src, textures);
                }
                LayerContent::Text { .. } => Self::draw_text(&clipped, view, &layer),
            }
        }

        if let Some(selected) = store.selected_layer() {
            painter.extend(Shape::dashed_line(
                &[area.left_top(), area.right_top(), area.right_bottom(), area.left_bottom(), area.left_top()],
                Stroke::new(1.0, AREA_OUTLINE),
                6.0,
                4.0,
            ));
            let selected = preview(selected, gizmo, draft);
            gizmo::draw_handles(painter, &selected, view);
        }
    }

    fn draw_mockup(
        &self,
        ctx: &egui::Context,
        painter: &Painter,
        view: &CanvasView,
        store: &DesignStore,
        textures: &mut TextureManager,
    ) {
        let rect = view.screen_rect();
        let model = store.selected_model();
        match textures.texture_for_source(ctx, model.preview(store.active_side())) {
            Some(texture) => {
                let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                painter.image(texture, rect, uv, Color32::WHITE);
            }
            None => {
                painter.rect_filled(rect, 0.0, PLACEHOLDER_FILL);
                painter.text(
                    rect.center_top() + Vec2::new(0.0, 24.0),
                    Align2::CENTER_CENTER,
                    format!("{} ({})", model.name, store.active_side().label()),
                    FontId::proportional(18.0),
                    Color32::LIGHT_GRAY,
                );
            }
        }
    }

    fn draw_image(
        ctx: &egui::Context,
        painter: &Painter,
        view: &CanvasView,
        layer: &DesignLayer,
        src: &str,
        textures: &mut TextureManager,
    ) {
        let corners = geometry::corners(layer).map(|corner| view.to_screen(corner));
        let Some(texture) = textures.texture_for_source(ctx, src) else {
            painter.add(Shape::convex_polygon(corners.to_vec(), MISSING_IMAGE_FILL, Stroke::NONE));
            return;
        };

        // Mirrored layers sample the texture right to left
        let (u_left, u_right) = if layer.flipped { (1.0, 0.0) } else { (0.0, 1.0) };
        let uvs = [
            Pos2::new(u_left, 0.0),
            Pos2::new(u_right, 0.0),
            Pos2::new(u_right, 1.0),
            Pos2::new(u_left, 1.0),
        ];

        let mut mesh = Mesh::with_texture(texture);
        for (pos, uv) in corners.into_iter().zip(uvs) {
            mesh.vertices.push(Vertex {
                pos,
                uv,
                color: Color32::WHITE,
            });
        }
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        painter.add(Shape::mesh(mesh));
    }

    /// Glyphs are laid out unmirrored from the visual top-left corner
    fn draw_text(painter: &Painter, view: &CanvasView, layer: &DesignLayer) {
        let LayerContent::Text {
            text,
            font_family,
            font_size,
            fill,
        } = &layer.content
        else {
            return;
        };

        let size = font_size * layer.scale_y.abs() * view.scale();
        let color = parse_fill(fill);
        let galley = painter.layout_no_wrap(text.clone(), font_id(font_family, size), color);
        let anchor = view.to_screen(geometry::corners(layer)[0]);
        painter.add(TextShape::new(anchor, galley, color).with_angle(layer.rotation.to_radians()));
    }
}

/// `layer` as it looks with any in-flight gesture or staged edit applied
fn preview(layer: &DesignLayer, gizmo: Option<&TransformGizmo>, draft: Option<&LayerDraft>) -> DesignLayer {
    let layer = match draft {
        Some(draft) if draft.layer_id() == &layer.id => draft.preview(layer),
        _ => layer.clone(),
    };
    match gizmo {
        Some(gizmo) if gizmo.layer_id() == &layer.id => gizmo.preview_layer(&layer),
        _ => layer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_round_trips_points() {
        let view = CanvasView::fit(
            Rect::from_min_size(Pos2::new(100.0, 0.0), Vec2::new(400.0, 1000.0)),
            Vec2::new(800.0, 1000.0),
        );
        assert_eq!(view.scale(), 0.5);

        let canvas = Pos2::new(200.0, 150.0);
        let back = view.to_canvas(view.to_screen(canvas));
        assert!((back - canvas).length() < 1e-3);
    }

    #[test]
    fn fills_parse_and_print() {
        assert_eq!(parse_fill("#ff0000"), Color32::from_rgb(255, 0, 0));
        assert_eq!(parse_fill("not a color"), Color32::WHITE);
        assert_eq!(fill_to_hex(Color32::from_rgb(0, 128, 255)), "#0080ff");
    }
}
