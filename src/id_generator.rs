use uuid::Uuid;

use crate::layer::LayerId;

/// Fresh layer id. Random v4 ids stay unique across rapid successive drops.
pub fn generate_layer_id() -> LayerId {
    LayerId::new(Uuid::new_v4().to_string())
}

/// Id for a saved design entry
pub fn generate_design_id() -> String {
    Uuid::new_v4().simple().to_string()
}
