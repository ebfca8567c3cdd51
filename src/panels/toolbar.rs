use egui::{Color32, DragValue};

use crate::app::DesignerApp;
use crate::draft::LayerDraft;
use crate::config::{FONT_FAMILIES, MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::layer::{LayerContent, LayerPatch};
use crate::renderer;

pub fn toolbar(app: &mut DesignerApp, ctx: &egui::Context, frame: &mut eframe::Frame) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut app.design_name).hint_text("Design name"));
            let can_save = !app.design_name.trim().is_empty();
            if ui.add_enabled(can_save, egui::Button::new("Save Design")).clicked() {
                commit_draft(app);
                app.save_design(frame);
            }
            ui.separator();

            if ui.button("Reset").clicked() {
                app.discard_pending_edits();
                app.placement.cancel_pending();
                app.store.reset_layers();
            }
            if ui.button("Add Text").clicked() {
                commit_draft(app);
                app.placement.add_text_layer(&mut app.store);
            }
            let side_label = if app.store.is_back_view() { "Show Front" } else { "Show Back" };
            if ui.button(side_label).clicked() {
                commit_draft(app);
                app.gizmo = None;
                app.store.toggle_side();
            }
            if ui.add_enabled(app.store.can_undo(), egui::Button::new("Undo")).clicked() {
                app.discard_pending_edits();
                app.store.undo();
            }
        });

        // A draft left behind by a selection change is finished
        let side = app.store.active_side();
        let stale = match (&app.draft, app.store.selected_id()) {
            (Some(draft), Some(id)) => !draft.is_for(id, side),
            (Some(_), None) => true,
            (None, _) => false,
        };
        if stale {
            commit_draft(app);
        }

        if app.store.selected_layer().is_some() {
            ui.separator();
            layer_controls(app, ui);
        }
    });
}

fn commit_draft(app: &mut DesignerApp) {
    if let Some(mut draft) = app.draft.take() {
        draft.commit(&mut app.store);
    }
}

/// Controls for the selected layer
fn layer_controls(app: &mut DesignerApp, ui: &mut egui::Ui) {
    let Some(layer) = app.store.selected_layer().cloned() else {
        return;
    };
    let side = app.store.active_side();
    let id = layer.id.clone();
    let draft = app.draft.get_or_insert_with(|| LayerDraft::new(id.clone(), side));
    let shown = draft.preview(&layer);

    let delete = ui
        .horizontal(|ui| {
            match &shown.content {
                LayerContent::Text {
                    text,
                    font_family,
                    font_size,
                    fill,
                } => {
                    let mut text = text.clone();
                    let text_response = ui.text_edit_singleline(&mut text);
                    if text_response.changed() {
                        draft.stage(LayerPatch::text(text));
                    }

                    let mut family = font_family.clone();
                    egui::ComboBox::from_id_salt("font_family")
                        .selected_text(family.as_str())
                        .show_ui(ui, |ui| {
                            for candidate in FONT_FAMILIES {
                                ui.selectable_value(&mut family, candidate.to_owned(), candidate);
                            }
                        });
                    if &family != font_family {
                        draft.stage(LayerPatch::font_family(family));
                    }

                    let mut color: Color32 = renderer::parse_fill(fill);
                    if ui.color_edit_button_srgba(&mut color).changed() {
                        draft.stage(LayerPatch::fill(renderer::fill_to_hex(color)));
                    }

                    let mut size = *font_size;
                    let size_response =
                        ui.add(DragValue::new(&mut size).range(MIN_FONT_SIZE..=MAX_FONT_SIZE).suffix(" px"));
                    if size_response.changed() {
                        draft.stage(LayerPatch::font_size(size));
                    }

                    // Typing, dragging the size or picking a color is one edit until released
                    let editing = text_response.has_focus()
                        || size_response.has_focus()
                        || size_response.dragged()
                        || ui.memory(|mem| mem.any_popup_open());
                    if !editing && !draft.is_empty() {
                        draft.commit(&mut app.store);
                    }
                }
                LayerContent::Image { .. } => {
                    if ui.button("Flip").clicked() {
                        if let Err(err) = app.transform.toggle_flip(&mut app.store, side, &id) {
                            log::warn!("Flip failed: {err}");
                        }
                    }
                }
            }

            ui.separator();
            if ui.button("Move Up").clicked() {
                app.transform.move_up(&mut app.store, side, &id);
            }
            if ui.button("Move Down").clicked() {
                app.transform.move_down(&mut app.store, side, &id);
            }
            ui.button("Delete").clicked()
        })
        .inner;

    if delete {
        app.discard_pending_edits();
        app.store.remove_layer(&id, side);
    }
}
