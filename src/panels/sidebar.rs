use egui::{Id, Vec2};

use crate::app::DesignerApp;
use crate::catalog::{self, GarmentColor, GarmentStyle};
use crate::designs::SavedDesign;
use crate::placement::DropPayload;

const THUMBNAIL_SIZE: f32 = 72.0;

pub fn sidebar(app: &mut DesignerApp, ctx: &egui::Context, frame: &mut eframe::Frame) {
    egui::SidePanel::left("sidebar")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            model_selector(app, ui);
            ui.separator();

            ui.heading("Assets");
            ui.label("Drag onto the shirt");
            egui::ScrollArea::vertical().show(ui, |ui| {
                let text_payload = DropPayload::Text.to_json();
                ui.dnd_drag_source(Id::new("asset_text"), text_payload, |ui| {
                    ui.label(egui::RichText::new("Aa  Text").size(20.0));
                });
                ui.add_space(8.0);

                for src in app.gallery.clone() {
                    gallery_item(app, ui, &src);
                }

                if !app.saved_designs.is_empty() {
                    ui.separator();
                    ui.collapsing(format!("Saved designs ({})", app.saved_designs.len()), |ui| {
                        for design in app.saved_designs.clone() {
                            saved_design_row(app, ui, frame, &design);
                        }
                    });
                }
            });
        });
}

fn model_selector(app: &mut DesignerApp, ui: &mut egui::Ui) {
    ui.heading("T-shirt");
    let current = app.store.selected_model().clone();
    let mut style = current.style;
    let mut color = current.color;

    ui.horizontal(|ui| {
        for candidate in GarmentStyle::ALL {
            ui.selectable_value(&mut style, candidate, candidate.label());
        }
    });
    ui.horizontal(|ui| {
        for candidate in GarmentColor::ALL {
            ui.selectable_value(&mut color, candidate, candidate.label());
        }
    });

    if (style, color) != (current.style, current.color) {
        match catalog::find_variant(style, color) {
            Some(model) => {
                app.store.set_selected_model(&model.id);
            }
            None => log::warn!("No garment for {} {}", style.label(), color.label()),
        }
    }
}

fn gallery_item(app: &mut DesignerApp, ui: &mut egui::Ui, src: &str) {
    let payload = DropPayload::Image { src: src.to_owned() }.to_json();
    let texture = app.textures.texture_for_source(ui.ctx(), src);
    ui.dnd_drag_source(Id::new(("asset", src)), payload, |ui| match texture {
        Some(texture) => {
            ui.add(egui::Image::new((texture, Vec2::splat(THUMBNAIL_SIZE))).maintain_aspect_ratio(true));
        }
        None => {
            let name = std::path::Path::new(src)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| src.to_owned());
            ui.label(name);
        }
    });
}

fn saved_design_row(app: &mut DesignerApp, ui: &mut egui::Ui, frame: &mut eframe::Frame, design: &SavedDesign) {
    ui.horizontal(|ui| {
        if let Some((id, name)) = app.renaming.as_mut().filter(|renaming| renaming.0 == design.id) {
            let response = ui.text_edit_singleline(name);
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if submitted || ui.small_button("OK").clicked() {
                let (id, name) = (id.clone(), name.clone());
                app.rename_design(frame, &id, &name);
            } else if ui.small_button("Cancel").clicked() {
                app.renaming = None;
            }
            return;
        }

        ui.label(format!("{} · {}", design.name, design.model.style.label()));
        if ui.small_button("Rename").clicked() {
            app.renaming = Some((design.id.clone(), design.name.clone()));
        }
        if ui.small_button("Delete").clicked() {
            app.delete_design(frame, &design.id);
        }
    });
}
