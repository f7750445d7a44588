pub mod entity;
pub mod invariants;

pub use entity::{Tasting, TastingFields};
pub use invariants::{validate_rating, validate_tasting, MAX_RATING, MIN_RATING};
