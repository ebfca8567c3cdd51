use crate::layer::{LayerId, Side};

#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    LayerAdded { side: Side, id: LayerId },
    LayerUpdated { side: Side, id: LayerId },
    LayerRemoved { side: Side, id: LayerId },
    LayersReordered { side: Side },
    SelectionChanged(Option<LayerId>),
    SideToggled { is_back_view: bool },
    ModelChanged(String),
    Undone,
    Reset,
    Rehydrated,
}

impl StoreEvent {
    /// Whether the event changed anything that is written to storage
    pub fn is_persistent(&self) -> bool {
        !matches!(self, StoreEvent::SelectionChanged(_) | StoreEvent::Rehydrated)
    }
}
