mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::StoreEvent;
pub use handlers::EventQueue;

/// Receives every change the design store makes
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &StoreEvent);
}

