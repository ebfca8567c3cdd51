use std::collections::VecDeque;

use crate::config::CanvasConfig;
use crate::layer::SideLayers;
use crate::util::time;

/// Both sides' layer sequences as they were right before a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub layers: SideLayers,
    /// Unix milliseconds
    pub timestamp: u64,
}

/// Bounded stack of pre-mutation checkpoints.
///
/// `undoable` counts the entries at or below the cursor. Entries above it stay
/// in place after an undo and are only dropped by the next checkpoint.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    undoable: usize,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(CanvasConfig::MAX_HISTORY)
    }
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            undoable: 0,
            max_entries: max_entries.max(1),
        }
    }

    /// Record the state that is about to be replaced
    pub fn checkpoint(&mut self, layers: &SideLayers) {
        self.entries.truncate(self.undoable);
        self.entries.push_back(HistoryEntry {
            layers: layers.clone(),
            timestamp: time::timestamp_millis(),
        });
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
        self.undoable = self.entries.len();
    }

    /// Step the cursor back and hand out the checkpoint it was pointing at
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if self.undoable == 0 {
            return None;
        }
        self.undoable -= 1;
        self.entries.get(self.undoable)
    }

    pub fn can_undo(&self) -> bool {
        self.undoable > 0
    }

    /// Index of the entry the next undo restores
    pub fn cursor(&self) -> Option<usize> {
        self.undoable.checked_sub(1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{DesignLayer, LayerContent, LayerId};
    use egui::{Pos2, Vec2};
    use std::sync::Arc;

    fn layers_with(count: usize) -> SideLayers {
        let mut layers = SideLayers::default();
        for i in 0..count {
            layers.front.push(Arc::new(DesignLayer::new(
                LayerId::new(i.to_string()),
                LayerContent::Image { src: "a.png".into() },
                Pos2::ZERO,
                Vec2::splat(10.0),
                i as u32,
            )));
        }
        layers
    }

    #[test]
    fn cap_drops_oldest() {
        let mut history = History::new(3);
        for i in 0..5 {
            history.checkpoint(&layers_with(i));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo().unwrap().layers.front.len(), 4);
        assert_eq!(history.undo().unwrap().layers.front.len(), 3);
        assert_eq!(history.undo().unwrap().layers.front.len(), 2);
        assert!(history.undo().is_none());
    }

    #[test]
    fn checkpoint_after_undo_truncates() {
        let mut history = History::new(10);
        history.checkpoint(&layers_with(0));
        history.checkpoint(&layers_with(1));
        history.undo();
        assert_eq!(history.len(), 2);
        history.checkpoint(&layers_with(5));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
        assert_eq!(history.undo().unwrap().layers.front.len(), 5);
    }
}
