#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod catalog;
pub mod config;
pub mod designs;
pub mod draft;
pub mod error;
pub mod event;
pub mod file_handler;
pub mod geometry;
pub mod gizmo;
pub mod id_generator;
pub mod layer;
pub mod panels;
pub mod persistence;
pub mod placement;
pub mod renderer;
pub mod store;
pub mod texture_manager;
pub mod transform;
pub mod util;

pub use app::DesignerApp;
pub use config::CanvasConfig;
pub use event::{EventBus, EventQueue, StoreEvent};
pub use layer::{DesignLayer, LayerContent, LayerId, LayerPatch, Side, SideLayers};
pub use persistence::PersistedState;
pub use placement::{DropOutcome, DropPayload, PlacementResolver};
pub use store::{DesignStore, LayerOrder};
pub use transform::{NodeTransform, TransformHandler};
