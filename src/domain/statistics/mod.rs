//! Critical Statistics Invariants:
//!
//! 1. Statistics are ALWAYS derived, NEVER stored
//! 2. Only valid (non-orphan) tastings are counted
//! 3. Statistics NEVER alter domain state
//! 4. An average over nothing is absent, never NaN

pub mod engine;
pub mod entity;

pub use engine::{
    overview, ratings_by_region, ratings_by_type, recent_count, week_start, weekly_trend,
};
pub use entity::{Dashboard, Overview, RegionRating, TypeRating, WeekTrend, UNKNOWN_REGION};
