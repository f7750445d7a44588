// src/lib.rs
// Wine Cellar - Local-first wine catalog, tasting journal and statistics
//
// Architecture:
// - Domain-centric: entities, invariants and the statistics engine are pure
// - Explicit persistence: repositories over SQLite, cascade as one transaction
// - Event-driven UI refresh: every committed mutation emits one event
// - Local-first: one user, one device, one store

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Configuration & Errors
// ============================================================================

pub use config::CellarConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    parse_decimal,
    parse_price,
    parse_vintage,
    validate_rating,
    validate_tasting,
    validate_wine,
    // Statistics
    Dashboard,
    DomainError,
    Overview,
    RegionRating,
    // Tasting
    Tasting,
    TastingFields,
    TypeRating,
    WeekTrend,
    // Wine
    Wine,
    WineFields,
    WineFilter,
    WineType,
    WineWithTastings,
    NO_RATING_TEXT,
    UNKNOWN_REGION,
};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EventBus,
    EventLogEntry,
    OrphanTastingsPurged,
    TastingAdded,
    TastingDeleted,
    TastingUpdated,
    WineCreated,
    WineDeleted,
    WinePhotoChanged,
    WineUpdated,
};

// ============================================================================
// PUBLIC API - Database & Repositories
// ============================================================================

pub use db::{create_connection_pool, initialize_database, open_memory_store, ConnectionPool};

pub use repositories::{
    SqliteTastingRepository, SqliteWineRepository, TastingRepository, WineRepository,
};

// ============================================================================
// PUBLIC API - Infrastructure & Services
// ============================================================================

pub use infrastructure::PhotoStore;

pub use services::{LibraryService, StatisticsService, TastingService, WineService};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{seed_sample_data, AppState, ErrorResponse, ErrorType};

pub use application::commands;
pub use application::dto;
