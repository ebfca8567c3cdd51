//! Named snapshots of a finished design, kept in a JSON array in storage.

use serde::{Deserialize, Serialize};

use crate::catalog::{GarmentColor, GarmentStyle};
use crate::config::CanvasConfig;
use crate::error::{DesignError, PersistenceError};
use crate::id_generator::generate_design_id;
use crate::layer::SideLayers;
use crate::store::DesignStore;
use crate::util::time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignModel {
    pub style: GarmentStyle,
    pub color: GarmentColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDesign {
    pub id: String,
    pub name: String,
    /// Unix milliseconds
    pub timestamp: u64,
    pub layers: SideLayers,
    pub model: DesignModel,
}

/// Keep ASCII letters, digits and spaces
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// All saved designs. A corrupt list is logged and treated as empty.
pub fn list_designs(storage: &dyn eframe::Storage) -> Vec<SavedDesign> {
    let Some(raw) = storage.get_string(CanvasConfig::SAVED_DESIGNS_KEY) else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|err| {
        log::warn!("Ignoring unreadable saved designs: {err}");
        Vec::new()
    })
}

/// Append the store's current design under `name`
pub fn save_design(
    storage: &mut dyn eframe::Storage,
    store: &DesignStore,
    name: &str,
) -> Result<SavedDesign, DesignError> {
    let name = checked_name(name)?;
    let model = store.selected_model();
    let design = SavedDesign {
        id: generate_design_id(),
        name,
        timestamp: time::timestamp_millis(),
        layers: store.all_layers().clone(),
        model: DesignModel {
            style: model.style,
            color: model.color,
        },
    };

    let mut designs = list_designs(storage);
    designs.push(design.clone());
    write_designs(storage, &designs)?;

    log::info!("💾 Saved design \"{}\" ({})", design.name, design.id);
    Ok(design)
}

/// Give the saved design `id` a new name, under the same rules as saving
pub fn rename_design(storage: &mut dyn eframe::Storage, id: &str, name: &str) -> Result<SavedDesign, DesignError> {
    let name = checked_name(name)?;
    let mut designs = list_designs(storage);
    let design = designs
        .iter_mut()
        .find(|design| design.id == id)
        .ok_or_else(|| DesignError::NotFound(id.to_owned()))?;
    design.name = name;
    let renamed = design.clone();
    write_designs(storage, &designs)?;

    log::info!("Renamed design {id} to \"{}\"", renamed.name);
    Ok(renamed)
}

/// Remove the saved design `id` from the list
pub fn delete_design(storage: &mut dyn eframe::Storage, id: &str) -> Result<(), DesignError> {
    let mut designs = list_designs(storage);
    let before = designs.len();
    designs.retain(|design| design.id != id);
    if designs.len() == before {
        return Err(DesignError::NotFound(id.to_owned()));
    }
    write_designs(storage, &designs)?;

    log::info!("🗑 Deleted design {id}");
    Ok(())
}

fn checked_name(raw: &str) -> Result<String, DesignError> {
    let name = sanitize_name(raw);
    if name.trim().is_empty() {
        return Err(DesignError::EmptyName);
    }
    Ok(name)
}

fn write_designs(storage: &mut dyn eframe::Storage, designs: &[SavedDesign]) -> Result<(), DesignError> {
    let json = serde_json::to_string(designs).map_err(PersistenceError::from)?;
    storage.set_string(CanvasConfig::SAVED_DESIGNS_KEY, json);
    Ok(())
}
