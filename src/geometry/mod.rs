//! Rotated-box math for layers, in canvas coordinates.
//!
//! A layer rotates around its origin `(x, y)`. When flipped, the renderer
//! mirrors it around that origin, so the visual box extends to the left.

use egui::emath::Rot2;
use egui::{Pos2, Vec2};

use crate::layer::{DesignLayer, LayerRef};

pub const HANDLE_RADIUS: f32 = 8.0;
pub const ROTATE_HANDLE_OFFSET: f32 = 30.0;

pub fn rotate(v: Vec2, degrees: f32) -> Vec2 {
    Rot2::from_angle(degrees.to_radians()) * v
}

/// Horizontal extent of the visual box in layer-local coordinates
fn local_x_range(layer: &DesignLayer) -> (f32, f32) {
    let width = layer.visual_size().x;
    if layer.flipped { (-width, 0.0) } else { (0.0, width) }
}

/// Map a canvas point into the layer's unrotated frame, relative to its origin
pub fn to_local(layer: &DesignLayer, point: Pos2) -> Vec2 {
    rotate(point - layer.position(), -layer.rotation)
}

pub fn to_canvas(layer: &DesignLayer, local: Vec2) -> Pos2 {
    layer.position() + rotate(local, layer.rotation)
}

/// Visual corners: left-top, right-top, right-bottom, left-bottom
pub fn corners(layer: &DesignLayer) -> [Pos2; 4] {
    let (left, right) = local_x_range(layer);
    let height = layer.visual_size().y;
    [
        to_canvas(layer, Vec2::new(left, 0.0)),
        to_canvas(layer, Vec2::new(right, 0.0)),
        to_canvas(layer, Vec2::new(right, height)),
        to_canvas(layer, Vec2::new(left, height)),
    ]
}

pub fn visual_center(layer: &DesignLayer) -> Pos2 {
    let (left, right) = local_x_range(layer);
    to_canvas(layer, Vec2::new((left + right) / 2.0, layer.visual_size().y / 2.0))
}

pub fn contains(layer: &DesignLayer, point: Pos2) -> bool {
    let local = to_local(layer, point);
    let (left, right) = local_x_range(layer);
    local.x >= left && local.x <= right && local.y >= 0.0 && local.y <= layer.visual_size().y
}

/// Topmost layer under `point`; later layers paint on top
pub fn layer_at(layers: &[LayerRef], point: Pos2) -> Option<&LayerRef> {
    layers.iter().rev().find(|layer| contains(layer, point))
}

/// Bottom-right corner of the visual box
pub fn scale_handle(layer: &DesignLayer) -> Pos2 {
    corners(layer)[2]
}

/// Above the middle of the top edge
pub fn rotate_handle(layer: &DesignLayer) -> Pos2 {
    let (left, right) = local_x_range(layer);
    to_canvas(layer, Vec2::new((left + right) / 2.0, -ROTATE_HANDLE_OFFSET))
}
