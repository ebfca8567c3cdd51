use std::path::Path;

use egui::{Key, KeyboardShortcut, Modifiers};

use crate::config::CanvasConfig;
use crate::designs::{self, SavedDesign};
use crate::draft::LayerDraft;
use crate::event::EventQueue;
use crate::file_handler::{self, ImageLoader};
use crate::gizmo::TransformGizmo;
use crate::panels;
use crate::persistence;
use crate::placement::{DropOutcome, PlacementResolver};
use crate::renderer::Renderer;
use crate::store::DesignStore;
use crate::texture_manager::TextureManager;
use crate::transform::TransformHandler;

const GALLERY_DIR: &str = "assets/gallery";
const TEXTURE_CACHE_SIZE: usize = 64;
const UNDO_SHORTCUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);

pub struct DesignerApp {
    pub(crate) store: DesignStore,
    pub(crate) placement: PlacementResolver,
    pub(crate) transform: TransformHandler,
    pub(crate) renderer: Renderer,
    pub(crate) textures: TextureManager,
    pub(crate) gizmo: Option<TransformGizmo>,
    /// Uncommitted property edits of the selected layer
    pub(crate) draft: Option<LayerDraft>,
    /// Image sources offered in the asset gallery
    pub(crate) gallery: Vec<String>,
    /// Name field of the save form
    pub(crate) design_name: String,
    pub(crate) saved_designs: Vec<SavedDesign>,
    /// Saved design being renamed, with its name field
    pub(crate) renaming: Option<(String, String)>,
    loader: ImageLoader,
    events: EventQueue,
}

impl DesignerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::with_config(CanvasConfig::default());
        if let Some(storage) = cc.storage {
            persistence::rehydrate(storage, &mut app.store);
            app.saved_designs = designs::list_designs(storage);
        }
        // Rehydration is not a change worth writing back
        app.events.drain();
        app.gallery = file_handler::scan_gallery(Path::new(GALLERY_DIR));
        log::info!(
            "Started with {} front / {} back layers, {} gallery images",
            app.store.all_layers().front.len(),
            app.store.all_layers().back.len(),
            app.gallery.len()
        );
        app
    }

    fn with_config(config: CanvasConfig) -> Self {
        let store = DesignStore::new();
        let events = EventQueue::new();
        store.subscribe(Box::new(events.clone()));
        Self {
            store,
            placement: PlacementResolver::new(config.clone()),
            transform: TransformHandler::new(config.min_layer_size),
            renderer: Renderer::new(config),
            textures: TextureManager::new(TEXTURE_CACHE_SIZE),
            gizmo: None,
            draft: None,
            gallery: Vec::new(),
            design_name: String::new(),
            saved_designs: Vec::new(),
            renaming: None,
            loader: ImageLoader::new(),
            events,
        }
    }

    /// Route a placement outcome; image drops start loading their size
    pub(crate) fn handle_drop_outcome(&mut self, outcome: DropOutcome, ctx: &egui::Context) {
        match outcome {
            DropOutcome::Placed(id) => log::info!("Placed layer {id}"),
            DropOutcome::PendingImage(pending) => self.loader.request(pending, ctx),
            DropOutcome::Rejected => {}
        }
    }

    pub(crate) fn save_design(&mut self, frame: &mut eframe::Frame) {
        let Some(storage) = frame.storage_mut() else {
            log::warn!("No storage available, design not saved");
            return;
        };
        match designs::save_design(storage, &self.store, &self.design_name) {
            Ok(design) => {
                self.saved_designs.push(design);
                self.design_name.clear();
                storage.flush();
            }
            Err(err) => log::warn!("Could not save design: {err}"),
        }
    }

    pub(crate) fn rename_design(&mut self, frame: &mut eframe::Frame, id: &str, name: &str) {
        let Some(storage) = frame.storage_mut() else {
            log::warn!("No storage available, design not renamed");
            return;
        };
        match designs::rename_design(storage, id, name) {
            Ok(_) => {
                self.saved_designs = designs::list_designs(storage);
                self.renaming = None;
                storage.flush();
            }
            Err(err) => log::warn!("Could not rename design: {err}"),
        }
    }

    pub(crate) fn delete_design(&mut self, frame: &mut eframe::Frame, id: &str) {
        let Some(storage) = frame.storage_mut() else {
            log::warn!("No storage available, design not deleted");
            return;
        };
        match designs::delete_design(storage, id) {
            Ok(()) => {
                self.saved_designs = designs::list_designs(storage);
                storage.flush();
            }
            Err(err) => log::warn!("Could not delete design: {err}"),
        }
    }

    fn poll_image_loads(&mut self) {
        for result in self.loader.poll() {
            match result.size {
                Some(size) => {
                    self.placement.complete_image_load(&mut self.store, &result.pending, size);
                }
                None => log::warn!("Dropped image {} could not be read", result.pending.src),
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input_mut(|i| i.consume_shortcut(&UNDO_SHORTCUT)) {
            self.discard_pending_edits();
            self.store.undo();
        }
    }

    /// Drop an in-flight gesture and any staged property edits
    pub(crate) fn discard_pending_edits(&mut self) {
        self.gizmo = None;
        self.draft = None;
    }

    /// Write the store whenever a persisted field changed this frame
    fn persist_changes(&mut self, frame: &mut eframe::Frame) {
        let changed = self.events.drain().iter().any(|event| event.is_persistent());
        if !changed {
            return;
        }
        if let Some(storage) = frame.storage_mut() {
            match persistence::save(storage, &self.store) {
                Ok(()) => storage.flush(),
                Err(err) => log::error!("Failed to persist design: {err}"),
            }
        }
    }
}

impl eframe::App for DesignerApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Err(err) = persistence::save(storage, &self.store) {
            log::error!("Failed to persist design: {err}");
        }
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.textures.begin_frame();
        self.poll_image_loads();
        self.handle_shortcuts(ctx);

        panels::toolbar(self, ctx, frame);
        panels::sidebar(self, ctx, frame);
        panels::canvas(self, ctx);
        file_handler::preview_files_being_dropped(ctx);

        self.persist_changes(frame);
    }
}
