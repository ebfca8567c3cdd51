use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::error::TransformError;
use crate::geometry;
use crate::layer::{DesignLayer, LayerId, Side};
use crate::renderer::CanvasView;
use crate::store::DesignStore;
use crate::transform::{NodeTransform, TransformHandler};

const HANDLE_COLOR: Color32 = Color32::from_rgb(184, 41, 227);
const HANDLE_FILL: Color32 = Color32::WHITE;
const BORDER_WIDTH: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoHandle {
    Move,
    Scale,
    Rotate,
}

/// Which handle of `layer` is under `point` (canvas coordinates)
pub fn handle_at(layer: &DesignLayer, point: Pos2, view: &CanvasView) -> Option<GizmoHandle> {
    let radius = geometry::HANDLE_RADIUS / view.scale();
    if point.distance(geometry::rotate_handle(layer)) <= radius {
        Some(GizmoHandle::Rotate)
    } else if point.distance(geometry::scale_handle(layer)) <= radius {
        Some(GizmoHandle::Scale)
    } else if geometry::contains(layer, point) {
        Some(GizmoHandle::Move)
    } else {
        None
    }
}

/// A drag, resize or rotate gesture in progress on one layer.
///
/// The store is untouched until [`TransformGizmo::finish`]; meanwhile the
/// renderer draws the layer from [`TransformGizmo::preview_layer`].
#[derive(Debug, Clone)]
pub struct TransformGizmo {
    layer_id: LayerId,
    side: Side,
    handle: GizmoHandle,
    initial: NodeTransform,
    base_size: Vec2,
    flipped: bool,
    /// Visual center when the gesture began
    center: Pos2,
    pointer_start: Pos2,
    preview: NodeTransform,
}

impl TransformGizmo {
    pub fn begin(layer: &DesignLayer, side: Side, handle: GizmoHandle, pointer: Pos2) -> Self {
        let initial = NodeTransform::from_layer(layer);
        Self {
            layer_id: layer.id.clone(),
            side,
            handle,
            initial,
            base_size: Vec2::new(layer.width, layer.height),
            flipped: layer.flipped,
            center: geometry::visual_center(layer),
            pointer_start: pointer,
            preview: initial,
        }
    }

    pub fn layer_id(&self) -> &LayerId {
        &self.layer_id
    }

    pub fn preview(&self) -> NodeTransform {
        self.preview
    }

    /// `layer` as it would look if the gesture ended now
    pub fn preview_layer(&self, layer: &DesignLayer) -> DesignLayer {
        DesignLayer {
            x: self.preview.position.x,
            y: self.preview.position.y,
            scale_x: self.preview.scale.x,
            scale_y: self.preview.scale.y,
            rotation: self.preview.rotation,
            ..layer.clone()
        }
    }

    pub fn update(&mut self, pointer: Pos2, handler: &TransformHandler) {
        match self.handle {
            GizmoHandle::Move => {
                self.preview.position = self.initial.position + (pointer - self.pointer_start);
            }
            GizmoHandle::Scale => self.update_scale(pointer, handler),
            GizmoHandle::Rotate => self.update_rotation(pointer),
        }
    }

    fn update_scale(&mut self, pointer: Pos2, handler: &TransformHandler) {
        if self.base_size.x <= 0.0 || self.base_size.y <= 0.0 {
            return;
        }
        let initial_visual = self.base_size * self.initial.scale.abs();
        let current_visual = self.base_size * self.preview.scale.abs();
        let delta = geometry::rotate(pointer - self.pointer_start, -self.initial.rotation);

        let old = Rect::from_min_size(Pos2::ZERO, current_visual);
        let new = Rect::from_min_size(Pos2::ZERO, initial_visual + delta);
        let bounded = handler.bound_box(old, new);

        self.preview.scale = bounded.size() / self.base_size;
        if self.flipped {
            // The origin sits on the visual right edge; keep the left edge still
            let grow = Vec2::new(bounded.width() - initial_visual.x, 0.0);
            self.preview.position = self.initial.position + geometry::rotate(grow, self.initial.rotation);
        }
    }

    fn update_rotation(&mut self, pointer: Pos2) {
        let center = self.center;
        let start_angle = (self.pointer_start - center).angle();
        let angle = (pointer - center).angle();
        let delta = (angle - start_angle).to_degrees();

        self.preview.rotation = self.initial.rotation + delta;
        self.preview.position = center + geometry::rotate(self.initial.position - center, delta);
    }

    /// Commit the gesture through the transform handler
    pub fn finish(self, store: &mut DesignStore, handler: &TransformHandler) -> Result<(), TransformError> {
        if self.preview == self.initial {
            return Ok(());
        }
        match self.handle {
            GizmoHandle::Move => handler.commit_drag(store, self.side, &self.layer_id, self.preview.position),
            GizmoHandle::Scale | GizmoHandle::Rotate => {
                handler.commit_transform(store, self.side, &self.layer_id, self.preview)
            }
        }
    }
}

/// Selection outline with scale and rotate handles
pub fn draw_handles(painter: &Painter, layer: &DesignLayer, view: &CanvasView) {
    let outline: Vec<Pos2> = geometry::corners(layer)
        .iter()
        .map(|corner| view.to_screen(*corner))
        .collect();
    painter.add(Shape::closed_line(outline, Stroke::new(BORDER_WIDTH, HANDLE_COLOR)));

    let top_mid = view.to_screen(geometry::corners(layer)[0].lerp(geometry::corners(layer)[1], 0.5));
    let rotate = view.to_screen(geometry::rotate_handle(layer));
    painter.line_segment([top_mid, rotate], Stroke::new(BORDER_WIDTH, HANDLE_COLOR));

    for handle in [geometry::scale_handle(layer), geometry::rotate_handle(layer)] {
        let center = view.to_screen(handle);
        painter.circle(
            center,
            geometry::HANDLE_RADIUS / 2.0,
            HANDLE_FILL,
            Stroke::new(BORDER_WIDTH, HANDLE_COLOR),
        );
    }
}
