use super::entity::Tasting;
use crate::domain::{DomainError, DomainResult};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// Validates all Tasting invariants
pub fn validate_tasting(tasting: &Tasting) -> DomainResult<()> {
    validate_rating(tasting.rating)?;
    validate_price(tasting.price_paid)?;
    Ok(())
}

/// Rating must lie in [0.0, 5.0]. The half-point step is a UI convention
/// and deliberately not checked here. NaN is out of range.
pub fn validate_rating(rating: f64) -> DomainResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(DomainError::InvalidRating(rating));
    }
    Ok(())
}

fn validate_price(price: Option<f64>) -> DomainResult<()> {
    if let Some(p) = price {
        if !p.is_finite() || p < 0.0 {
            return Err(DomainError::InvariantViolation(format!(
                "Price paid must be a non-negative amount, got {}",
                p
            )));
        }
    }
    Ok(())
}

/// Invariants that must hold true for the Tasting domain:
///
/// 1. A Tasting is created only for an existing Wine
/// 2. A Tasting references at most one Wine, never shared
/// 3. A Tasting without a Wine is an orphan and is invisible to reads
/// 4. Rating is within [0.0, 5.0]
/// 5. Price paid, when present, is non-negative
