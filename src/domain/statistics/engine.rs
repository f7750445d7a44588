// Pure aggregation over wines and their tastings.
//
// No I/O, no clock reads: callers pass `now` so results are reproducible.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use super::entity::{Overview, RegionRating, TypeRating, WeekTrend, UNKNOWN_REGION};
use crate::domain::tasting::Tasting;
use crate::domain::wine::{Wine, WineType};

/// Running sum for a simple arithmetic mean
#[derive(Debug, Clone, Copy, Default)]
struct RatingAccumulator {
    sum: f64,
    count: usize,
}

impl RatingAccumulator {
    fn add(&mut self, rating: f64) {
        self.sum += rating;
        self.count += 1;
    }

    fn average(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum / self.count as f64)
    }
}

/// Tastings paired with their owning wine. Orphans, and tastings whose
/// back-reference points at a wine that no longer exists, are dropped.
fn valid_tastings<'a>(wines: &'a [Wine], tastings: &'a [Tasting]) -> Vec<(&'a Tasting, &'a Wine)> {
    let by_id: HashMap<_, _> = wines.iter().map(|w| (w.id, w)).collect();
    tastings
        .iter()
        .filter_map(|t| {
            let wine_id = t.wine_id?;
            by_id.get(&wine_id).map(|w| (t, *w))
        })
        .collect()
}

/// Start of a `days`-long window ending at `now`. A span beyond the
/// representable calendar saturates: the window then covers everything.
fn cutoff(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(if days < 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        })
}

pub fn overview(wines: &[Wine], tastings: &[Tasting]) -> Overview {
    let valid = valid_tastings(wines, tastings);
    let mut acc = RatingAccumulator::default();
    for (t, _) in &valid {
        acc.add(t.rating);
    }

    Overview {
        total_wines: wines.len(),
        total_tastings: valid.len(),
        wishlist_count: wines.iter().filter(|w| w.is_wishlist).count(),
        average_rating: acc.average(),
    }
}

/// Average and count per wine type, in canonical type order, empty types omitted
pub fn ratings_by_type(wines: &[Wine], tastings: &[Tasting]) -> Vec<TypeRating> {
    let mut buckets: HashMap<WineType, RatingAccumulator> = HashMap::new();
    for (t, w) in valid_tastings(wines, tastings) {
        buckets.entry(w.wine_type).or_default().add(t.rating);
    }

    WineType::ALL
        .iter()
        .filter_map(|wine_type| {
            let acc = buckets.get(wine_type)?;
            Some(TypeRating {
                wine_type: *wine_type,
                average: acc.average()?,
                count: acc.count,
            })
        })
        .collect()
}

/// Average and count per trimmed region, blank regions bucketed as "Unknown".
/// Sorted by count descending then region ascending, truncated to `top_n`.
pub fn ratings_by_region(wines: &[Wine], tastings: &[Tasting], top_n: usize) -> Vec<RegionRating> {
    let mut buckets: HashMap<String, RatingAccumulator> = HashMap::new();
    for (t, w) in valid_tastings(wines, tastings) {
        let region = w
            .region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(UNKNOWN_REGION);
        buckets.entry(region.to_string()).or_default().add(t.rating);
    }

    let mut ranked: Vec<RegionRating> = buckets
        .into_iter()
        .filter_map(|(region, acc)| {
            Some(RegionRating {
                average: acc.average()?,
                count: acc.count,
                region,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.region.cmp(&b.region)));
    ranked.truncate(top_n);
    ranked
}

/// Monday of the ISO week containing `date` (UTC)
pub fn week_start(date: DateTime<Utc>) -> NaiveDate {
    let day = date.date_naive();
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

/// Per-week averages over tastings dated within `window_days` of `now`.
/// Weeks without tastings are absent, not zero-filled.
pub fn weekly_trend(
    wines: &[Wine],
    tastings: &[Tasting],
    window_days: i64,
    now: DateTime<Utc>,
) -> Vec<WeekTrend> {
    let since = cutoff(now, window_days);
    let mut buckets: HashMap<NaiveDate, RatingAccumulator> = HashMap::new();
    for (t, _) in valid_tastings(wines, tastings) {
        if t.date >= since {
            buckets.entry(week_start(t.date)).or_default().add(t.rating);
        }
    }

    let mut weeks: Vec<WeekTrend> = buckets
        .into_iter()
        .filter_map(|(week_start, acc)| {
            Some(WeekTrend {
                week_start,
                average: acc.average()?,
                count: acc.count,
            })
        })
        .collect();

    weeks.sort_by_key(|w| w.week_start);
    weeks
}

/// Valid tastings dated within the last `days` days
pub fn recent_count(wines: &[Wine], tastings: &[Tasting], days: i64, now: DateTime<Utc>) -> usize {
    let since = cutoff(now, days);
    valid_tastings(wines, tastings)
        .into_iter()
        .filter(|(t, _)| t.date >= since)
        .count()
}
