// src/events/mod.rs
//
// Internal Event System - Public API
//
// The notification channel from the core to its UI collaborator:
// every mutating command emits one event after its state is committed.
//
// CRITICAL: EventHandler is INTERNAL and must NOT be exported

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
    // Maintenance
    OrphanTastingsPurged,
    // Tasting
    TastingAdded,
    TastingDeleted,
    TastingUpdated,
    // Wine
    WineCreated,
    WineDeleted,
    WinePhotoChanged,
    WineUpdated,
};

pub use bus::{EventBus, EventLogEntry, DEFAULT_EVENT_LOG_CAPACITY};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
