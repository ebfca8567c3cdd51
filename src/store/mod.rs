//! The design store: both sides' layer sequences, selection, active side,
//! garment model and undo history.
//!
//! Every mutating operation records a checkpoint of the layer sequences
//! *before* it changes anything, so the n-th undo restores the state that
//! existed right before the n-th most recent mutation. Selection, side and
//! model changes are not recorded.

mod history;

pub use history::{History, HistoryEntry};

use crate::catalog::{self, TShirtModel};
use crate::event::{EventBus, EventHandler, StoreEvent};
use crate::layer::{DesignLayer, LayerId, LayerPatch, LayerRef, Side, SideLayers};
use crate::persistence::PersistedState;
use std::sync::Arc;

/// Direction for paint-order changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOrder {
    /// Toward the end of the sequence, painted later
    Up,
    /// Toward the start of the sequence, painted earlier
    Down,
}

#[derive(Debug, Default)]
pub struct DesignStore {
    layers: SideLayers,
    selected_id: Option<LayerId>,
    is_back_view: bool,
    selected_model: TShirtModel,
    history: History,
    event_bus: EventBus,
}

impl DesignStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer for every store change
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.event_bus.subscribe(handler);
    }

    // ---- reads ----

    pub fn layers(&self, side: Side) -> &[LayerRef] {
        self.layers.get(side)
    }

    pub fn all_layers(&self) -> &SideLayers {
        &self.layers
    }

    pub fn is_back_view(&self) -> bool {
        self.is_back_view
    }

    pub fn active_side(&self) -> Side {
        Side::from_back_view(self.is_back_view)
    }

    pub fn current_layers(&self) -> &[LayerRef] {
        self.layers.get(self.active_side())
    }

    pub fn layer(&self, id: &LayerId, side: Side) -> Option<&DesignLayer> {
        self.layers.find(side, id).map(|layer| layer.as_ref())
    }

    pub fn selected_id(&self) -> Option<&LayerId> {
        self.selected_id.as_ref()
    }

    pub fn selected_layer(&self) -> Option<&DesignLayer> {
        let id = self.selected_id.as_ref()?;
        self.layer(id, self.active_side())
    }

    pub fn selected_model(&self) -> &TShirtModel {
        &self.selected_model
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    // ---- layer mutations ----

    /// Append a layer to `side`. Ids are not de-duplicated.
    pub fn add_layer(&mut self, layer: DesignLayer, side: Side) {
        self.history.checkpoint(&self.layers);
        let id = layer.id.clone();
        log::debug!("Added {} layer {} to {}", layer.kind(), id, side.label());
        self.layers.get_mut(side).push(Arc::new(layer));
        self.event_bus.emit(StoreEvent::LayerAdded { side, id });
    }

    /// Merge `patch` into the layer with `id` on `side`. Returns false on a lookup miss.
    pub fn update_layer(&mut self, id: &LayerId, patch: &LayerPatch, side: Side) -> bool {
        let Some(index) = self.layers.position_of(side, id) else {
            log::debug!("update_layer: no layer {} on {}", id, side.label());
            return false;
        };

        self.history.checkpoint(&self.layers);
        let layer = &mut self.layers.get_mut(side)[index];
        patch.apply(Arc::make_mut(layer));
        self.event_bus.emit(StoreEvent::LayerUpdated {
            side,
            id: id.clone(),
        });
        true
    }

    /// Delete the layer with `id` on `side`, clearing the selection if it pointed at it
    pub fn remove_layer(&mut self, id: &LayerId, side: Side) -> bool {
        let Some(index) = self.layers.position_of(side, id) else {
            log::debug!("remove_layer: no layer {} on {}", id, side.label());
            return false;
        };

        self.history.checkpoint(&self.layers);
        self.layers.get_mut(side).remove(index);
        self.event_bus.emit(StoreEvent::LayerRemoved {
            side,
            id: id.clone(),
        });

        if self.selected_id.as_ref() == Some(id) {
            self.set_selected_id(None);
        }
        true
    }

    /// Swap the layer with its neighbor in paint order. No-op at either end.
    pub fn move_layer(&mut self, id: &LayerId, side: Side, order: LayerOrder) -> bool {
        let Some(index) = self.layers.position_of(side, id) else {
            log::debug!("move_layer: no layer {} on {}", id, side.label());
            return false;
        };

        let len = self.layers.get(side).len();
        let target = match order {
            LayerOrder::Up if index + 1 < len => index + 1,
            LayerOrder::Down if index > 0 => index - 1,
            _ => return false,
        };

        self.history.checkpoint(&self.layers);
        self.layers.get_mut(side).swap(index, target);
        self.event_bus.emit(StoreEvent::LayersReordered { side });
        true
    }

    /// Clear both sides and return selection, side and model to their defaults.
    /// History is kept so the reset itself can be undone.
    pub fn reset_layers(&mut self) {
        self.history.checkpoint(&self.layers);
        self.layers = SideLayers::default();
        self.selected_id = None;
        self.is_back_view = false;
        self.selected_model = catalog::default_model().clone();
        log::info!("Design reset");
        self.event_bus.emit(StoreEvent::Reset);
    }

    /// Restore the most recent checkpoint. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo() else {
            log::debug!("Nothing to undo");
            return false;
        };
        self.layers = entry.layers.clone();
        self.event_bus.emit(StoreEvent::Undone);

        let side = self.active_side();
        let stale = self
            .selected_id
            .as_ref()
            .is_some_and(|id| self.layers.find(side, id).is_none());
        if stale {
            self.set_selected_id(None);
        }
        true
    }

    // ---- unrecorded state ----

    pub fn set_selected_id(&mut self, id: Option<LayerId>) {
        if self.selected_id == id {
            return;
        }
        self.selected_id = id.clone();
        self.event_bus.emit(StoreEvent::SelectionChanged(id));
    }

    /// Switch between front and back. Selection is per side, so it is cleared.
    pub fn toggle_side(&mut self) {
        self.is_back_view = !self.is_back_view;
        self.event_bus.emit(StoreEvent::SideToggled {
            is_back_view: self.is_back_view,
        });
        self.set_selected_id(None);
    }

    /// Select a catalog model by id. Unknown ids leave the store unchanged.
    pub fn set_selected_model(&mut self, model_id: &str) -> bool {
        let Some(model) = catalog::find_model(model_id) else {
            log::warn!("Unknown garment model {model_id}");
            return false;
        };
        if self.selected_model.id != model.id {
            self.selected_model = model.clone();
            self.event_bus.emit(StoreEvent::ModelChanged(model.id.clone()));
        }
        true
    }

    // ---- persistence ----

    /// The part of the store that is written to durable storage
    pub fn snapshot(&self) -> PersistedState {
        PersistedState::new(
            self.layers.clone(),
            self.is_back_view,
            self.selected_model.clone(),
        )
    }

    /// Replace persisted fields with a loaded snapshot. Not recorded in history.
    pub fn restore_snapshot(&mut self, state: PersistedState) {
        self.layers = state.layers;
        self.is_back_view = state.is_back_view;
        self.selected_model = match catalog::find_model(&state.selected_model.id) {
            Some(model) => model.clone(),
            None => {
                log::warn!(
                    "Stored garment model {} is not in the catalog, using {}",
                    state.selected_model.id,
                    catalog::default_model().id
                );
                catalog::default_model().clone()
            }
        };
        self.selected_id = None;
        self.event_bus.emit(StoreEvent::Rehydrated);
    }
}
