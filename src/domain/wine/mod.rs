pub mod entity;
pub mod invariants;

pub use entity::{Wine, WineFields, WineFilter, WineType, WineWithTastings, NO_RATING_TEXT};
pub use invariants::validate_wine;
