use thiserror::Error;

use crate::layer::LayerId;

/// Errors raised while turning a drop payload into a layer
#[derive(Debug, Error)]
pub enum DropError {
    #[error("Malformed drop payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Drop payload is neither an image source nor a text marker")]
    UnknownAsset,

    #[error("Dropped image has an empty source")]
    EmptySource,

    #[error("Image {src} has no usable size ({width}x{height})")]
    InvalidImageSize { src: String, width: f32, height: f32 },
}

/// Errors raised while committing an interactive transform
#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("No layer {0} on the active side")]
    LayerNotFound(LayerId),

    #[error("Resulting size {width}x{height} is below the {min}x{min} minimum")]
    BelowMinimumSize { width: f32, height: f32, min: f32 },
}

/// Errors that can occur while migrating a stored snapshot
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Stored state is not a JSON object")]
    NotAnObject,

    #[error("Failed to build default model: {0}")]
    DefaultModel(#[from] serde_json::Error),
}

/// Errors that can occur during state persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize state: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid state data: {0}")]
    InvalidState(String),

    #[error("Migration failed: {0}")]
    Migration(#[from] MigrationError),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors from the saved design library
#[derive(Debug, Error)]
pub enum DesignError {
    #[error("Design name is empty")]
    EmptyName,

    #[error("No saved design {0}")]
    NotFound(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
