#![warn(clippy::all, rust_2018_idioms)]

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Tee Designer")
            .with_inner_size([1280.0, 960.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "tee_designer",
        native_options,
        Box::new(|cc| Ok(Box::new(tee_designer::DesignerApp::new(cc)))),
    )
}
