use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::tasting::Tasting;
use crate::domain::DomainError;

/// Shown wherever a wine has no tasting to take a rating from
pub const NO_RATING_TEXT: &str = "—";

/// A catalog entry for a bottle/label
/// Owns its tastings: deleting a Wine deletes every Tasting that points to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wine {
    /// Internal immutable identifier
    pub id: Uuid,

    pub name: String,

    /// May be empty
    pub producer: String,

    pub vintage: Option<i32>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub grape: Option<String>,

    pub wine_type: WineType,

    pub notes: Option<String>,

    /// Desired but not owned
    pub is_wishlist: bool,

    /// Creation timestamp, never changes
    pub created_at: DateTime<Utc>,

    /// Reference into the PhotoStore, never the image bytes
    pub photo_filename: Option<String>,
}

/// Kind of wine, in canonical display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WineType {
    #[default]
    Red,
    White,
    Rose,
    Sparkling,
    Dessert,
    Fortified,
}

impl WineType {
    pub const ALL: [WineType; 6] = [
        WineType::Red,
        WineType::White,
        WineType::Rose,
        WineType::Sparkling,
        WineType::Dessert,
        WineType::Fortified,
    ];

    /// Raw persisted name
    pub fn as_str(&self) -> &'static str {
        match self {
            WineType::Red => "red",
            WineType::White => "white",
            WineType::Rose => "rose",
            WineType::Sparkling => "sparkling",
            WineType::Dessert => "dessert",
            WineType::Fortified => "fortified",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WineType::Red => "Red",
            WineType::White => "White",
            WineType::Rose => "Rosé",
            WineType::Sparkling => "Sparkling",
            WineType::Dessert => "Dessert",
            WineType::Fortified => "Fortified",
        }
    }

    /// Lenient read used by the persistence layer: unknown raw values become red
    pub fn from_raw_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for WineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WineType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WineType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvariantViolation(format!("Unknown wine type: {}", s)))
    }
}

/// The mutable part of a Wine, as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WineFields {
    pub name: String,
    pub producer: String,
    pub vintage: Option<i32>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub grape: Option<String>,
    pub wine_type: WineType,
    pub notes: Option<String>,
    pub is_wishlist: bool,
}

impl WineFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Which part of the library a listing shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WineFilter {
    #[default]
    All,
    CellarOnly,
    WishlistOnly,
}

impl WineFilter {
    pub fn matches(&self, wine: &Wine) -> bool {
        match self {
            WineFilter::All => true,
            WineFilter::CellarOnly => !wine.is_wishlist,
            WineFilter::WishlistOnly => wine.is_wishlist,
        }
    }
}

impl Wine {
    /// Create a new Wine with a fresh id and `created_at = now`
    pub fn new(fields: WineFields) -> Self {
        let mut wine = Self {
            id: Uuid::new_v4(),
            name: String::new(),
            producer: String::new(),
            vintage: None,
            region: None,
            country: None,
            grape: None,
            wine_type: WineType::default(),
            notes: None,
            is_wishlist: false,
            created_at: Utc::now(),
            photo_filename: None,
        };
        wine.apply(fields);
        wine
    }

    /// Overwrite every mutable field; `id`, `created_at` and the photo are untouched.
    /// Blank optional strings are stored as absent.
    pub fn apply(&mut self, fields: WineFields) {
        self.name = fields.name;
        self.producer = fields.producer;
        self.vintage = fields.vintage;
        self.region = non_blank(fields.region);
        self.country = non_blank(fields.country);
        self.grape = non_blank(fields.grape);
        self.wine_type = fields.wine_type;
        self.notes = non_blank(fields.notes);
        self.is_wishlist = fields.is_wishlist;
    }

    /// Case-insensitive substring match on name, producer or region
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.producer.to_lowercase().contains(&query)
            || self
                .region
                .as_deref()
                .is_some_and(|r| r.to_lowercase().contains(&query))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A wine together with the tastings it owns, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineWithTastings {
    pub wine: Wine,
    pub tastings: Vec<Tasting>,
}

impl WineWithTastings {
    pub fn new(wine: Wine, mut tastings: Vec<Tasting>) -> Self {
        tastings.sort_by(|a, b| b.date.cmp(&a.date));
        Self { wine, tastings }
    }

    /// Tasting with the latest date
    pub fn latest_tasting(&self) -> Option<&Tasting> {
        self.tastings.iter().max_by_key(|t| t.date)
    }

    pub fn latest_rating_text(&self) -> String {
        self.latest_tasting()
            .map(Tasting::rating_text)
            .unwrap_or_else(|| NO_RATING_TEXT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn wine(name: &str, producer: &str, region: Option<&str>) -> Wine {
        Wine::new(WineFields {
            name: name.to_string(),
            producer: producer.to_string(),
            region: region.map(str::to_string),
            ..WineFields::default()
        })
    }

    #[test]
    fn test_new_wine_defaults() {
        let w = Wine::new(WineFields::named("Opus One"));
        assert_eq!(w.wine_type, WineType::Red);
        assert!(!w.is_wishlist);
        assert!(w.photo_filename.is_none());
    }

    #[test]
    fn test_apply_preserves_identity() {
        let mut w = Wine::new(WineFields::named("Before"));
        let (id, created_at) = (w.id, w.created_at);

        w.apply(WineFields {
            name: "After".to_string(),
            wine_type: WineType::Sparkling,
            region: Some("   ".to_string()),
            ..WineFields::default()
        });

        assert_eq!(w.id, id);
        assert_eq!(w.created_at, created_at);
        assert_eq!(w.name, "After");
        assert_eq!(w.wine_type, WineType::Sparkling);
        assert_eq!(w.region, None);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let w = wine("Clos de Vougeot", "Chateau de la Tour", Some("Burgundy"));
        assert!(w.matches_search("vougeot"));
        assert!(w.matches_search("CHATEAU"));
        assert!(w.matches_search("burg"));
        assert!(!w.matches_search("napa"));
    }

    #[test]
    fn test_search_without_region() {
        let w = wine("Plain", "", None);
        assert!(!w.matches_search("x"));
    }

    #[test]
    fn test_filter() {
        let mut w = wine("A", "", None);
        assert!(WineFilter::CellarOnly.matches(&w));
        assert!(!WineFilter::WishlistOnly.matches(&w));
        w.is_wishlist = true;
        assert!(WineFilter::WishlistOnly.matches(&w));
        assert!(WineFilter::All.matches(&w));
    }

    #[test]
    fn test_wine_type_parsing() {
        assert_eq!("Rose".parse::<WineType>().unwrap(), WineType::Rose);
        assert!("orange".parse::<WineType>().is_err());
        assert_eq!(WineType::from_raw_or_default("orange"), WineType::Red);
        assert_eq!(WineType::Rose.display_name(), "Rosé");
    }

    #[test]
    fn test_latest_rating_text() {
        let w = wine("A", "", None);
        let empty = WineWithTastings::new(w.clone(), Vec::new());
        assert!(empty.latest_tasting().is_none());
        assert_eq!(empty.latest_rating_text(), NO_RATING_TEXT);

        let now = Utc::now();
        let mut old = Tasting::new(w.id, 3.0);
        old.date = now - Duration::days(10);
        let mut recent = Tasting::new(w.id, 4.5);
        recent.date = now;

        let details = WineWithTastings::new(w, vec![old, recent.clone()]);
        assert_eq!(details.latest_tasting().map(|t| t.id), Some(recent.id));
        assert_eq!(details.latest_rating_text(), "4.5");
        assert_eq!(details.tastings[0].id, recent.id);
    }
}
