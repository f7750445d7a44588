// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already been committed.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { stringify!($name) }
        }
    };
}

// ============================================================================
// WINE EVENTS
// ============================================================================

/// Emitted when a new Wine has been persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub wine_id: Uuid,
    pub name: String,
}

impl WineCreated {
    pub fn new(wine_id: Uuid, name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            wine_id,
            name,
        }
    }
}

domain_event!(WineCreated);

/// Emitted when wine fields have been overwritten
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub wine_id: Uuid,
}

impl WineUpdated {
    pub fn new(wine_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            wine_id,
        }
    }
}

domain_event!(WineUpdated);

/// Emitted after a wine and all of its tastings are gone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub wine_id: Uuid,
    pub tastings_removed: usize,
}

impl WineDeleted {
    pub fn new(wine_id: Uuid, tastings_removed: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            wine_id,
            tastings_removed,
        }
    }
}

domain_event!(WineDeleted);

/// Emitted when a wine's photo reference was replaced or cleared
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinePhotoChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub wine_id: Uuid,
    pub photo_filename: Option<String>,
}

impl WinePhotoChanged {
    pub fn new(wine_id: Uuid, photo_filename: Option<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            wine_id,
            photo_filename,
        }
    }
}

domain_event!(WinePhotoChanged);

// ============================================================================
// TASTING EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TastingAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub tasting_id: Uuid,
    pub wine_id: Uuid,
    pub rating: f64,
}

impl TastingAdded {
    pub fn new(tasting_id: Uuid, wine_id: Uuid, rating: f64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            tasting_id,
            wine_id,
            rating,
        }
    }
}

domain_event!(TastingAdded);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TastingUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub tasting_id: Uuid,
    pub wine_id: Uuid,
}

impl TastingUpdated {
    pub fn new(tasting_id: Uuid, wine_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            tasting_id,
            wine_id,
        }
    }
}

domain_event!(TastingUpdated);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TastingDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub tasting_id: Uuid,
    pub wine_id: Uuid,
}

impl TastingDeleted {
    pub fn new(tasting_id: Uuid, wine_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            tasting_id,
            wine_id,
        }
    }
}

domain_event!(TastingDeleted);

// ============================================================================
// MAINTENANCE EVENTS
// ============================================================================

/// Emitted after every orphan sweep, including sweeps that found nothing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrphanTastingsPurged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub removed: usize,
}

impl OrphanTastingsPurged {
    pub fn new(removed: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            removed,
        }
    }
}

domain_event!(OrphanTastingsPurged);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(WineCreated::new(Uuid::new_v4(), "A".into()).event_type(), "WineCreated");
        assert_eq!(WineDeleted::new(Uuid::new_v4(), 2).event_type(), "WineDeleted");
        assert_eq!(OrphanTastingsPurged::new(0).event_type(), "OrphanTastingsPurged");
    }

    #[test]
    fn test_events_have_distinct_ids() {
        let wine_id = Uuid::new_v4();
        let a = WineUpdated::new(wine_id);
        let b = WineUpdated::new(wine_id);
        assert_ne!(a.event_id(), b.event_id());
    }
}
