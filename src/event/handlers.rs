use parking_lot::Mutex;
use std::sync::Arc;

use crate::event::{EventHandler, StoreEvent};

/// Buffers store events so a frame loop can drain them later.
///
/// Clones share the same buffer: subscribe one clone, keep the other.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Arc<Mutex<Vec<StoreEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<StoreEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventHandler for EventQueue {
    fn handle_event(&mut self, event: &StoreEvent) {
        self.events.lock().push(event.clone());
    }
}
