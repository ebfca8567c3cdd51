//! Upgrades stored design snapshots to the current record shape.
//!
//! Each step is a pure function from one version's `state` object to the next.
//! Steps run in order from the stored version; current data passes through
//! untouched.

use serde_json::{Map, Value, json};

use crate::catalog;
use crate::error::MigrationError;

pub const CURRENT_VERSION: u32 = 2;

pub type MigrationStep = fn(Value) -> Result<Value, MigrationError>;

/// `MIGRATIONS[n]` upgrades a version `n` state to version `n + 1`
pub const MIGRATIONS: [MigrationStep; CURRENT_VERSION as usize] = [v0_to_v1, v1_to_v2];

/// Version of a stored record: top-level `version`, then `state.version`, else 0
pub fn stored_version(record: &Value) -> u32 {
    record
        .get("version")
        .and_then(Value::as_u64)
        .or_else(|| {
            record
                .get("state")
                .and_then(|state| state.get("version"))
                .and_then(Value::as_u64)
        })
        .map(|version| u32::try_from(version).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

/// Bring a whole storage record (`{ state, version }`) up to `CURRENT_VERSION`
pub fn migrate(mut record: Value) -> Result<Value, MigrationError> {
    let version = stored_version(&record);
    if version >= CURRENT_VERSION {
        return Ok(record);
    }

    let fields = record.as_object_mut().ok_or(MigrationError::NotAnObject)?;
    let mut state = fields
        .remove("state")
        .unwrap_or_else(|| Value::Object(Map::new()));

    for step in &MIGRATIONS[version as usize..] {
        state = step(state)?;
    }
    log::info!("Migrated stored design from v{version} to v{CURRENT_VERSION}");

    fields.insert("state".to_owned(), state);
    fields.insert("version".to_owned(), json!(CURRENT_VERSION));
    Ok(record)
}

/// v0 stored the front side as a bare array and had no back side
pub fn v0_to_v1(state: Value) -> Result<Value, MigrationError> {
    let Value::Object(mut fields) = state else {
        return Err(MigrationError::NotAnObject);
    };
    let front = match fields.remove("layers") {
        Some(Value::Array(layers)) => layers,
        _ => Vec::new(),
    };
    Ok(json!({
        "layers": { "front": front, "back": [] },
        "isBackView": false,
        "version": 1,
    }))
}

/// v1 had both sides but no garment model
pub fn v1_to_v2(state: Value) -> Result<Value, MigrationError> {
    let Value::Object(mut fields) = state else {
        return Err(MigrationError::NotAnObject);
    };
    fields.insert(
        "selectedModel".to_owned(),
        serde_json::to_value(catalog::default_model())?,
    );
    fields.insert("version".to_owned(), json!(2));
    Ok(Value::Object(fields))
}
