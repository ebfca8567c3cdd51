//! Writes the design store to key-value storage and reads it back on start.
//!
//! Any `eframe::Storage` works: eframe's own backend in the app, or
//! [`MemoryStorage`] headless. Loading never fails. A missing, corrupt or
//! foreign record falls back to the default state.

mod memory;
pub mod migration;

pub use memory::MemoryStorage;
pub use migration::CURRENT_VERSION;

use serde::{Deserialize, Serialize};

use crate::catalog::TShirtModel;
use crate::config::CanvasConfig;
use crate::error::{PersistenceError, PersistenceResult};
use crate::layer::SideLayers;
use crate::store::DesignStore;

/// The persisted part of the design store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub layers: SideLayers,
    #[serde(default)]
    pub is_back_view: bool,
    pub selected_model: TShirtModel,
    #[serde(default)]
    pub version: u32,
}

impl PersistedState {
    pub fn new(layers: SideLayers, is_back_view: bool, selected_model: TShirtModel) -> Self {
        Self {
            layers,
            is_back_view,
            selected_model,
            version: CURRENT_VERSION,
        }
    }
}

impl Default for PersistedState {
    fn default() -> Self {
        Self::new(SideLayers::default(), false, TShirtModel::default())
    }
}

/// Outer record written under the storage key
#[derive(Debug, Serialize, Deserialize)]
struct StorageRecord {
    state: PersistedState,
    version: u32,
}

/// Serialize a state into the storage record format
pub fn encode(state: &PersistedState) -> PersistenceResult<String> {
    let record = StorageRecord {
        state: PersistedState {
            version: CURRENT_VERSION,
            ..state.clone()
        },
        version: CURRENT_VERSION,
    };
    Ok(serde_json::to_string(&record)?)
}

/// Parse and migrate a storage record
pub fn decode(raw: &str) -> PersistenceResult<PersistedState> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let value = migration::migrate(value)?;
    let record: StorageRecord = serde_json::from_value(value)
        .map_err(|err| PersistenceError::InvalidState(err.to_string()))?;
    Ok(record.state)
}

/// Write the store's persisted fields
pub fn save(storage: &mut dyn eframe::Storage, store: &DesignStore) -> PersistenceResult<()> {
    let json = encode(&store.snapshot())?;
    storage.set_string(CanvasConfig::STORAGE_KEY, json);
    Ok(())
}

/// Read the stored state, falling back to defaults on any problem
pub fn load(storage: &dyn eframe::Storage) -> PersistedState {
    let Some(raw) = storage.get_string(CanvasConfig::STORAGE_KEY) else {
        log::info!("No stored design, starting fresh");
        return PersistedState::default();
    };

    match decode(&raw) {
        Ok(state) => state,
        Err(err) => {
            log::warn!("Discarding stored design: {err}");
            PersistedState::default()
        }
    }
}

/// Load the stored state into `store`
pub fn rehydrate(storage: &dyn eframe::Storage, store: &mut DesignStore) {
    let state = load(storage);
    log::info!(
        "Rehydrated design: {} front / {} back layers",
        state.layers.front.len(),
        state.layers.back.len()
    );
    store.restore_snapshot(state);
}
