// src/domain/mod.rs
//
// Cellar domain: wines, their tastings, and what is derived from them.
// Pure data and rules; no storage.

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod parsing;
pub mod statistics;
pub mod tasting;
pub mod wine;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Wine Domain
pub use wine::{
    validate_wine, Wine, WineFields, WineFilter, WineType, WineWithTastings, NO_RATING_TEXT,
};

// Tasting Domain
pub use tasting::{validate_rating, validate_tasting, Tasting, TastingFields};

// Statistics
pub use statistics::{Dashboard, Overview, RegionRating, TypeRating, WeekTrend, UNKNOWN_REGION};

// Text input
pub use parsing::{parse_decimal, parse_price, parse_vintage};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Rating {0} is outside 0.0..=5.0")]
    InvalidRating(f64),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
