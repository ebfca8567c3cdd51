use egui::{Pos2, Vec2};
use tee_designer::draft::LayerDraft;
use tee_designer::{DesignLayer, DesignStore, EventQueue, LayerContent, LayerId, LayerPatch, Side, StoreEvent};

fn store_with_text() -> (DesignStore, LayerId) {
    let mut store = DesignStore::new();
    let id = LayerId::new("caption");
    store.add_layer(
        DesignLayer::new(
            id.clone(),
            LayerContent::Text {
                text: "PYTH".to_owned(),
                font_family: "Arial".to_owned(),
                font_size: 24.0,
                fill: "#ffffff".to_owned(),
            },
            Pos2::new(300.0, 300.0),
            Vec2::new(100.0, 30.0),
            0,
        ),
        Side::Front,
    );
    (store, id)
}

fn text_of(store: &DesignStore, id: &LayerId) -> (String, f32) {
    match &store.layer(id, Side::Front).unwrap().content {
        LayerContent::Text { text, font_size, .. } => (text.clone(), *font_size),
        LayerContent::Image { .. } => panic!("expected a text layer"),
    }
}

#[test]
fn test_typed_text_commits_as_one_undo_step() {
    let (mut store, id) = store_with_text();
    let queue = EventQueue::new();
    store.subscribe(Box::new(queue.clone()));
    let history_before = store.history().len();

    let mut draft = LayerDraft::new(id.clone(), Side::Front);
    let mut typed = String::new();
    for c in "Hello world".chars() {
        typed.push(c);
        draft.stage(LayerPatch::text(typed.clone()));
    }
    // Nothing reaches the store while typing
    assert_eq!(text_of(&store, &id).0, "PYTH");
    assert!(queue.is_empty());

    assert!(draft.commit(&mut store));

    assert_eq!(text_of(&store, &id).0, "Hello world");
    assert_eq!(store.history().len(), history_before + 1);
    assert_eq!(
        queue.drain(),
        vec![StoreEvent::LayerUpdated {
            side: Side::Front,
            id: id.clone(),
        }]
    );

    assert!(store.undo());
    assert_eq!(text_of(&store, &id).0, "PYTH");
}

#[test]
fn test_dragged_font_size_commits_once() {
    let (mut store, id) = store_with_text();
    let history_before = store.history().len();

    let mut draft = LayerDraft::new(id.clone(), Side::Front);
    for size in 25..=120 {
        draft.stage(LayerPatch::font_size(size as f32));
    }
    draft.commit(&mut store);

    assert_eq!(text_of(&store, &id).1, 120.0);
    assert_eq!(store.history().len(), history_before + 1);
}

#[test]
fn test_edit_back_to_original_records_nothing() {
    let (mut store, id) = store_with_text();
    let history_before = store.history().len();

    let mut draft = LayerDraft::new(id.clone(), Side::Front);
    draft.stage(LayerPatch::text("PYTHON"));
    draft.stage(LayerPatch::text("PYTH"));

    assert!(!draft.commit(&mut store));
    assert_eq!(store.history().len(), history_before);
}

#[test]
fn test_draft_for_deleted_layer_is_dropped() {
    let (mut store, id) = store_with_text();
    let mut draft = LayerDraft::new(id.clone(), Side::Front);
    draft.stage(LayerPatch::text("gone"));

    store.remove_layer(&id, Side::Front);
    let history_before = store.history().len();

    assert!(!draft.commit(&mut store));
    assert!(draft.is_empty());
    assert_eq!(store.history().len(), history_before);
}
