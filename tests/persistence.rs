use egui::{Pos2, Vec2};
use serde_json::{Value, json};
use tee_designer::config::CanvasConfig;
use tee_designer::persistence::{self, MemoryStorage, migration};
use tee_designer::{DesignLayer, DesignStore, LayerContent, LayerId, PersistedState, Side};

use eframe::Storage as _;

fn text_layer_json(id: &str) -> Value {
    json!({
        "id": id,
        "type": "text",
        "text": "PYTH",
        "fontFamily": "Arial",
        "fontSize": 24.0,
        "fill": "#ffffff",
        "x": 250.0,
        "y": 300.0,
        "width": 100.0,
        "height": 30.0,
        "scaleX": 1.0,
        "scaleY": 1.0,
        "rotation": 0.0,
        "zIndex": 0
    })
}

fn populated_store() -> DesignStore {
    let mut store = DesignStore::new();
    store.add_layer(
        DesignLayer::new(
            LayerId::new("front-logo"),
            LayerContent::Image {
                src: "/assets/gallery/logo.png".to_owned(),
            },
            Pos2::new(220.0, 180.0),
            Vec2::new(150.0, 75.0),
            0,
        ),
        Side::Front,
    );
    store.add_layer(
        DesignLayer::new(
            LayerId::new("back-text"),
            LayerContent::Text {
                text: "Crew".to_owned(),
                font_family: "Impact".to_owned(),
                font_size: 48.0,
                fill: "#ff0000".to_owned(),
            },
            Pos2::new(300.0, 400.0),
            Vec2::new(100.0, 30.0),
            0,
        ),
        Side::Back,
    );
    store.toggle_side();
    store.set_selected_model("slim-black");
    store
}

#[test]
fn test_v0_to_v1_moves_layers_to_front() {
    let v0 = json!({ "layers": [text_layer_json("a")] });
    let v1 = migration::v0_to_v1(v0).unwrap();

    assert_eq!(v1["layers"]["front"][0]["id"], "a");
    assert_eq!(v1["layers"]["back"], json!([]));
    assert_eq!(v1["isBackView"], false);
    assert_eq!(v1["version"], 1);
}

#[test]
fn test_v1_to_v2_adds_default_model() {
    let v1 = json!({
        "layers": { "front": [], "back": [text_layer_json("b")] },
        "isBackView": true,
        "version": 1
    });
    let v2 = migration::v1_to_v2(v1).unwrap();

    assert_eq!(v2["selectedModel"]["id"], "oversized-white");
    assert_eq!(v2["version"], 2);
    assert_eq!(v2["isBackView"], true);
    assert_eq!(v2["layers"]["back"][0]["id"], "b");
}

#[test]
fn test_v0_record_migrates_through_every_step() {
    let record = json!({ "state": { "layers": [text_layer_json("a")] }, "version": 0 });
    let raw = record.to_string();

    let state = persistence::decode(&raw).unwrap();
    assert_eq!(state.version, 2);
    assert_eq!(state.layers.front.len(), 1);
    assert!(state.layers.back.is_empty());
    assert!(!state.is_back_view);
    assert_eq!(state.selected_model.id, "oversized-white");
    assert!(state.layers.front[0].is_text());
}

#[test]
fn test_current_record_is_left_untouched() {
    let encoded = persistence::encode(&populated_store().snapshot()).unwrap();
    let value: Value = serde_json::from_str(&encoded).unwrap();

    let migrated = migration::migrate(value.clone()).unwrap();
    assert_eq!(migrated.to_string(), value.to_string());

    let twice = migration::migrate(migrated).unwrap();
    assert_eq!(twice.to_string(), value.to_string());
}

#[test]
fn test_version_is_read_from_state_when_missing_on_record() {
    assert_eq!(migration::stored_version(&json!({ "state": { "version": 1 } })), 1);
    assert_eq!(migration::stored_version(&json!({ "state": {}, "version": 2 })), 2);
    assert_eq!(migration::stored_version(&json!({ "state": {} })), 0);
}

#[test]
fn test_save_and_rehydrate_round_trip() {
    let store = populated_store();
    let mut storage = MemoryStorage::new();
    persistence::save(&mut storage, &store).unwrap();

    let mut restored = DesignStore::new();
    persistence::rehydrate(&storage, &mut restored);

    assert_eq!(restored.all_layers(), store.all_layers());
    assert!(restored.is_back_view());
    assert_eq!(restored.selected_model().id, "slim-black");
    // History and selection are session state
    assert!(!restored.can_undo());
    assert!(restored.selected_id().is_none());
}

#[test]
fn test_record_shape_uses_camel_case() {
    let mut storage = MemoryStorage::new();
    persistence::save(&mut storage, &populated_store()).unwrap();

    let raw = storage.get_string(CanvasConfig::STORAGE_KEY).unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["version"], 2);
    assert_eq!(value["state"]["version"], 2);
    assert_eq!(value["state"]["isBackView"], true);
    assert_eq!(value["state"]["selectedModel"]["id"], "slim-black");

    let text = &value["state"]["layers"]["back"][0];
    assert_eq!(text["type"], "text");
    assert_eq!(text["fontFamily"], "Impact");
    assert_eq!(text["scaleX"], 1.0);
}

#[test]
fn test_missing_or_corrupt_storage_falls_back_to_default() {
    let storage = MemoryStorage::new();
    assert_eq!(persistence::load(&storage), PersistedState::default());

    let mut storage = MemoryStorage::new();
    storage.set_string(CanvasConfig::STORAGE_KEY, "{not json".to_owned());
    assert_eq!(persistence::load(&storage), PersistedState::default());

    storage.set_string(CanvasConfig::STORAGE_KEY, r#"{"state":{"layers":42},"version":2}"#.to_owned());
    assert_eq!(persistence::load(&storage), PersistedState::default());
}

#[test]
fn test_unknown_stored_model_falls_back_to_default() {
    let mut value: Value = serde_json::from_str(&persistence::encode(&populated_store().snapshot()).unwrap()).unwrap();
    value["state"]["selectedModel"]["id"] = json!("cropped-purple");

    let mut storage = MemoryStorage::new();
    storage.set_string(CanvasConfig::STORAGE_KEY, value.to_string());

    let mut store = DesignStore::new();
    persistence::rehydrate(&storage, &mut store);
    assert_eq!(store.selected_model().id, "oversized-white");
    assert_eq!(store.all_layers().front.len(), 1);
}

#[test]
fn test_newer_version_is_not_migrated() {
    let record = json!({
        "state": {
            "layers": { "front": [], "back": [] },
            "isBackView": false,
            "selectedModel": { "id": "slim-white", "name": "Slim White", "style": "slim", "color": "white",
                "previews": { "front": "./assets/white/slim/front.png", "back": "./assets/white/slim/back.png" } },
            "version": 7
        },
        "version": 7
    });
    assert_eq!(migration::migrate(record.clone()).unwrap(), record);

    let state = persistence::decode(&record.to_string()).unwrap();
    assert_eq!(state.selected_model.id, "slim-white");
}
