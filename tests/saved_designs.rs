use egui::{Pos2, Vec2};
use tee_designer::catalog::{GarmentColor, GarmentStyle};
use tee_designer::config::CanvasConfig;
use tee_designer::designs::{self, sanitize_name};
use tee_designer::error::DesignError;
use tee_designer::persistence::MemoryStorage;
use tee_designer::{DesignLayer, DesignStore, LayerContent, LayerId, Side};

use eframe::Storage as _;

fn store_with_layer() -> DesignStore {
    let mut store = DesignStore::new();
    store.add_layer(
        DesignLayer::new(
            LayerId::new("logo"),
            LayerContent::Image {
                src: "/assets/gallery/logo.png".to_owned(),
            },
            Pos2::new(250.0, 200.0),
            Vec2::new(150.0, 150.0),
            0,
        ),
        Side::Front,
    );
    store.set_selected_model("slim-black");
    store
}

#[test]
fn test_names_keep_letters_digits_and_spaces() {
    assert_eq!(sanitize_name("Summer <Drop> #2!"), "Summer Drop 2");
    assert_eq!(sanitize_name("../../etc"), "etc");
}

#[test]
fn test_saving_appends_to_the_list() {
    let store = store_with_layer();
    let mut storage = MemoryStorage::new();

    let first = designs::save_design(&mut storage, &store, "First").unwrap();
    let second = designs::save_design(&mut storage, &store, "Second!").unwrap();

    let saved = designs::list_designs(&storage);
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0], first);
    assert_eq!(saved[1].name, "Second");
    assert_ne!(first.id, second.id);

    assert_eq!(saved[0].model.style, GarmentStyle::Slim);
    assert_eq!(saved[0].model.color, GarmentColor::Black);
    assert_eq!(&saved[0].layers, store.all_layers());
}

#[test]
fn test_empty_name_is_refused() {
    let store = store_with_layer();
    let mut storage = MemoryStorage::new();

    let result = designs::save_design(&mut storage, &store, " ?!* ");
    assert!(matches!(result, Err(DesignError::EmptyName)));
    assert!(storage.get_string(CanvasConfig::SAVED_DESIGNS_KEY).is_none());
}

#[test]
fn test_corrupt_list_reads_as_empty() {
    let mut storage = MemoryStorage::new();
    storage.set_string(CanvasConfig::SAVED_DESIGNS_KEY, "{\"oops\":".to_owned());
    assert!(designs::list_designs(&storage).is_empty());

    // Saving over a corrupt list starts a fresh one
    designs::save_design(&mut storage, &store_with_layer(), "Fresh").unwrap();
    assert_eq!(designs::list_designs(&storage).len(), 1);
}

#[test]
fn test_rename_sanitizes_and_keeps_the_rest() {
    let store = store_with_layer();
    let mut storage = MemoryStorage::new();
    let first = designs::save_design(&mut storage, &store, "First").unwrap();
    let second = designs::save_design(&mut storage, &store, "Second").unwrap();

    let renamed = designs::rename_design(&mut storage, &first.id, "Tour <2026>").unwrap();
    assert_eq!(renamed.name, "Tour 2026");

    let saved = designs::list_designs(&storage);
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].name, "Tour 2026");
    assert_eq!((saved[0].timestamp, &saved[0].layers), (first.timestamp, &first.layers));
    assert_eq!(saved[1], second);
}

#[test]
fn test_rename_refuses_empty_name_and_unknown_id() {
    let mut storage = MemoryStorage::new();
    let design = designs::save_design(&mut storage, &store_with_layer(), "Keep").unwrap();

    assert!(matches!(
        designs::rename_design(&mut storage, &design.id, "!!"),
        Err(DesignError::EmptyName)
    ));
    assert!(matches!(
        designs::rename_design(&mut storage, "nope", "Other"),
        Err(DesignError::NotFound(id)) if id == "nope"
    ));
    assert_eq!(designs::list_designs(&storage)[0].name, "Keep");
}

#[test]
fn test_delete_removes_only_that_design() {
    let store = store_with_layer();
    let mut storage = MemoryStorage::new();
    let first = designs::save_design(&mut storage, &store, "First").unwrap();
    let second = designs::save_design(&mut storage, &store, "Second").unwrap();

    designs::delete_design(&mut storage, &first.id).unwrap();
    assert_eq!(designs::list_designs(&storage), [second.clone()]);

    assert!(matches!(
        designs::delete_design(&mut storage, &first.id),
        Err(DesignError::NotFound(_))
    ));

    designs::delete_design(&mut storage, &second.id).unwrap();
    assert!(designs::list_designs(&storage).is_empty());
}
