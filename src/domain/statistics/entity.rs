use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::wine::{WineType, NO_RATING_TEXT};

/// Bucket name for wines with no (or a blank) region
pub const UNKNOWN_REGION: &str = "Unknown";

/// Library-wide counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_wines: usize,
    /// Valid (non-orphan) tastings only
    pub total_tastings: usize,
    pub wishlist_count: usize,
    /// `None` when there is no valid tasting
    pub average_rating: Option<f64>,
}

impl Overview {
    pub fn average_rating_text(&self) -> String {
        self.average_rating
            .map(|avg| format!("{:.1}", avg))
            .unwrap_or_else(|| NO_RATING_TEXT.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRating {
    pub wine_type: WineType,
    pub average: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRating {
    pub region: String,
    pub average: f64,
    pub count: usize,
}

/// Average rating of one ISO week (weeks start on Monday, UTC)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekTrend {
    pub week_start: NaiveDate,
    pub average: f64,
    pub count: usize,
}

/// Everything the stats screen shows, computed from one read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub overview: Overview,
    pub by_type: Vec<TypeRating>,
    pub by_region: Vec<RegionRating>,
    pub weekly_trend: Vec<WeekTrend>,
    pub last_7_days: usize,
    pub last_30_days: usize,
}
