// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations: ids and dates as strings
// - Form input arrives as raw text and is parsed leniently here
// - Unparseable numeric text becomes an absent field, never an error

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    parse_price, parse_vintage, Dashboard, DomainError, DomainResult, RegionRating, Tasting,
    TastingFields, WeekTrend, Wine, WineFields, WineType, WineWithTastings,
};

// ============================================================================
// WINE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineDto {
    pub id: String,
    pub name: String,
    pub producer: String,
    pub vintage: Option<i32>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub grape: Option<String>,
    /// Raw type name ("rose")
    pub wine_type: String,
    /// Display label ("Rosé")
    pub wine_type_label: String,
    pub notes: Option<String>,
    pub is_wishlist: bool,
    pub created_at: String,
    pub photo_filename: Option<String>,
}

impl From<Wine> for WineDto {
    fn from(wine: Wine) -> Self {
        Self {
            id: wine.id.to_string(),
            name: wine.name,
            producer: wine.producer,
            vintage: wine.vintage,
            region: wine.region,
            country: wine.country,
            grape: wine.grape,
            wine_type: wine.wine_type.as_str().to_string(),
            wine_type_label: wine.wine_type.display_name().to_string(),
            notes: wine.notes,
            is_wishlist: wine.is_wishlist,
            created_at: wine.created_at.to_rfc3339(),
            photo_filename: wine.photo_filename,
        }
    }
}

/// Wine form contents, as typed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WineInputDto {
    pub name: String,
    #[serde(default)]
    pub producer: String,
    /// Year as text; anything that is not a whole number is dropped
    #[serde(default)]
    pub vintage: String,
    pub region: Option<String>,
    pub country: Option<String>,
    pub grape: Option<String>,
    /// Raw type name; empty means red
    #[serde(default)]
    pub wine_type: String,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_wishlist: bool,
}

impl TryFrom<WineInputDto> for WineFields {
    type Error = DomainError;

    fn try_from(dto: WineInputDto) -> DomainResult<Self> {
        let wine_type = if dto.wine_type.trim().is_empty() {
            WineType::default()
        } else {
            dto.wine_type.parse()?
        };

        Ok(WineFields {
            name: dto.name.trim().to_string(),
            producer: dto.producer.trim().to_string(),
            vintage: parse_vintage(&dto.vintage),
            region: dto.region.map(|r| r.trim().to_string()),
            country: dto.country.map(|c| c.trim().to_string()),
            grape: dto.grape.map(|g| g.trim().to_string()),
            wine_type,
            notes: dto.notes,
            is_wishlist: dto.is_wishlist,
        })
    }
}

/// Row of the library list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineSummaryDto {
    pub wine: WineDto,
    pub tasting_count: usize,
    pub latest_rating_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineDetailsDto {
    pub wine: WineDto,
    /// Newest first
    pub tastings: Vec<TastingDto>,
    pub latest_rating_text: String,
}

impl From<WineWithTastings> for WineDetailsDto {
    fn from(details: WineWithTastings) -> Self {
        let latest_rating_text = details.latest_rating_text();
        Self {
            wine: WineDto::from(details.wine),
            tastings: details.tastings.into_iter().map(TastingDto::from).collect(),
            latest_rating_text,
        }
    }
}

impl From<WineWithTastings> for WineSummaryDto {
    fn from(details: WineWithTastings) -> Self {
        let latest_rating_text = details.latest_rating_text();
        Self {
            tasting_count: details.tastings.len(),
            wine: WineDto::from(details.wine),
            latest_rating_text,
        }
    }
}

// ============================================================================
// TASTING DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TastingDto {
    pub id: String,
    pub wine_id: Option<String>,
    pub date: String,
    pub rating: f64,
    pub rating_text: String,
    pub price_paid: Option<f64>,
    pub location: Option<String>,
    pub memo: Option<String>,
}

impl From<Tasting> for TastingDto {
    fn from(tasting: Tasting) -> Self {
        Self {
            rating_text: tasting.rating_text(),
            id: tasting.id.to_string(),
            wine_id: tasting.wine_id.map(|id| id.to_string()),
            date: tasting.date.to_rfc3339(),
            rating: tasting.rating,
            price_paid: tasting.price_paid,
            location: tasting.location,
            memo: tasting.memo,
        }
    }
}

/// Tasting form contents. The rating comes from a slider, the price is typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TastingInputDto {
    /// RFC 3339; absent means now
    pub date: Option<String>,
    pub rating: f64,
    /// Either `,` or `.` as decimal separator
    #[serde(default)]
    pub price_paid: String,
    pub location: Option<String>,
    pub memo: Option<String>,
}

impl TastingInputDto {
    /// Convert to domain fields. A malformed date is an error; a malformed
    /// price is treated as not entered.
    pub fn into_fields(self) -> Result<TastingFields, chrono::ParseError> {
        let date = match self.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc),
            None => Utc::now(),
        };

        Ok(TastingFields {
            date,
            rating: self.rating,
            price_paid: parse_price(&self.price_paid),
            location: self.location,
            memo: self.memo,
        })
    }
}

// ============================================================================
// STATISTICS DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRatingDto {
    pub wine_type: String,
    pub label: String,
    pub average: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRatingDto {
    pub region: String,
    pub average: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekTrendDto {
    /// ISO date of the week's Monday
    pub week_start: String,
    pub average: f64,
    pub count: usize,
}

impl From<RegionRating> for RegionRatingDto {
    fn from(r: RegionRating) -> Self {
        Self {
            region: r.region,
            average: r.average,
            count: r.count,
        }
    }
}

impl From<WeekTrend> for WeekTrendDto {
    fn from(w: WeekTrend) -> Self {
        Self {
            week_start: w.week_start.to_string(),
            average: w.average,
            count: w.count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsDto {
    pub total_wines: usize,
    pub total_tastings: usize,
    pub wishlist_count: usize,
    pub average_rating: Option<f64>,
    pub average_rating_text: String,
    pub by_type: Vec<TypeRatingDto>,
    pub by_region: Vec<RegionRatingDto>,
    pub weekly_trend: Vec<WeekTrendDto>,
    pub last_7_days: usize,
    pub last_30_days: usize,
}

impl From<Dashboard> for StatisticsDto {
    fn from(d: Dashboard) -> Self {
        Self {
            total_wines: d.overview.total_wines,
            total_tastings: d.overview.total_tastings,
            wishlist_count: d.overview.wishlist_count,
            average_rating: d.overview.average_rating,
            average_rating_text: d.overview.average_rating_text(),
            by_type: d
                .by_type
                .into_iter()
                .map(|t| TypeRatingDto {
                    wine_type: t.wine_type.as_str().to_string(),
                    label: t.wine_type.display_name().to_string(),
                    average: t.average,
                    count: t.count,
                })
                .collect(),
            by_region: d.by_region.into_iter().map(RegionRatingDto::from).collect(),
            weekly_trend: d.weekly_trend.into_iter().map(WeekTrendDto::from).collect(),
            last_7_days: d.last_7_days,
            last_30_days: d.last_30_days,
        }
    }
}

/// Label and raw value of every wine type, for pickers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WineTypeOptionDto {
    pub value: String,
    pub label: String,
}

pub fn wine_type_options() -> Vec<WineTypeOptionDto> {
    WineType::ALL
        .iter()
        .map(|t| WineTypeOptionDto {
            value: t.as_str().to_string(),
            label: t.display_name().to_string(),
        })
        .collect()
}
