use egui::{Pos2, Sense};

use crate::app::DesignerApp;
use crate::file_handler;
use crate::geometry;
use crate::gizmo::{self, GizmoHandle, TransformGizmo};
use crate::placement::DropOutcome;
use crate::renderer::CanvasView;

pub fn canvas(app: &mut DesignerApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let view = CanvasView::fit(response.rect, app.placement.config().canvas_size);

        handle_pointer(app, &response, &view);
        handle_drops(app, ctx, &response, &view);

        app.renderer
            .render(ctx, &painter, &view, &app.store, &mut app.textures, app.gizmo.as_ref(), app.draft.as_ref());
    });
}

fn handle_pointer(app: &mut DesignerApp, response: &egui::Response, view: &CanvasView) {
    let pointer = response.interact_pointer_pos().map(|pos| view.to_canvas(pos));
    let side = app.store.active_side();

    if response.drag_started() {
        if let Some(point) = pointer {
            app.gizmo = begin_gesture(app, point, view);
        }
    }

    if response.dragged() {
        if let (Some(gizmo), Some(point)) = (app.gizmo.as_mut(), pointer) {
            gizmo.update(point, &app.transform);
        }
    }

    if response.drag_stopped() {
        if let Some(gizmo) = app.gizmo.take() {
            if let Err(err) = gizmo.finish(&mut app.store, &app.transform) {
                log::warn!("Transform not applied: {err}");
            }
        }
    }

    if response.clicked() {
        let hit = pointer.and_then(|point| {
            geometry::layer_at(app.store.layers(side), point).map(|layer| layer.id.clone())
        });
        app.store.set_selected_id(hit);
    }
}

/// Start dragging a handle of the selected layer, or select and move the layer under the pointer
fn begin_gesture(app: &mut DesignerApp, point: Pos2, view: &CanvasView) -> Option<TransformGizmo> {
    let side = app.store.active_side();

    if let Some(selected) = app.store.selected_layer() {
        // Handles only exist on the selected layer
        if let Some(handle) = gizmo::handle_at(selected, point, view) {
            return Some(TransformGizmo::begin(selected, side, handle, point));
        }
    }

    let layer = geometry::layer_at(app.store.layers(side), point)?.clone();
    app.store.set_selected_id(Some(layer.id.clone()));
    Some(TransformGizmo::begin(&layer, side, GizmoHandle::Move, point))
}

fn handle_drops(app: &mut DesignerApp, ctx: &egui::Context, response: &egui::Response, view: &CanvasView) {
    let hover = ctx.input(|i| i.pointer.hover_pos());

    if let Some(payload) = response.dnd_release_payload::<String>() {
        if let Some(screen) = hover {
            let outcome = app.placement.handle_drop(&mut app.store, &payload, view.to_canvas(screen));
            app.handle_drop_outcome(outcome, ctx);
        }
    }

    let files = file_handler::take_dropped_images(ctx);
    if !files.is_empty() {
        let point = hover
            .map(|screen| view.to_canvas(screen))
            .unwrap_or_else(|| app.placement.design_area().center());
        for pending in app.placement.place_images(&app.store, files, point) {
            app.handle_drop_outcome(DropOutcome::PendingImage(pending), ctx);
        }
    }
}
