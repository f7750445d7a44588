// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - Explicit SQL only
// - The one multi-table write (wine cascade) runs in a single transaction

pub mod tasting_repository;
pub mod wine_repository;

pub use tasting_repository::{SqliteTastingRepository, TastingRepository};
pub use wine_repository::{SqliteWineRepository, WineRepository};

#[cfg(test)]
pub use tasting_repository::MockTastingRepository;
#[cfg(test)]
pub use wine_repository::MockWineRepository;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// RFC 3339 with nanoseconds and a `Z` suffix. Fixed width, and so sortable
/// as text (`ORDER BY date`), for years 0000 through 9999 only.
pub(crate) fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

pub(crate) fn parse_uuid(column: usize, raw: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|e| conversion_error(column, format!("Invalid UUID '{}': {}", raw, e)))
}

pub(crate) fn parse_timestamp(column: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, format!("Invalid timestamp '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_text_order_matches_time_order() {
        let times = [
            Utc.with_ymd_and_hms(999, 12, 31, 23, 59, 59).unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap() + chrono::Duration::nanoseconds(1),
            Utc.with_ymd_and_hms(9999, 1, 1, 0, 0, 0).unwrap(),
        ];
        let texts: Vec<String> = times.iter().map(format_timestamp).collect();

        assert!(texts.iter().all(|t| t.len() == texts[0].len()));
        assert!(texts.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(parse_timestamp(0, &texts[2]).unwrap(), times[2]);
    }
}
