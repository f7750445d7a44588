use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One dated rating/review event of a Wine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tasting {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Back-reference to the owning Wine.
    /// `None` marks an orphan: excluded from every read and aggregate.
    pub wine_id: Option<Uuid>,

    pub date: DateTime<Utc>,

    /// 0.0..=5.0; the UI moves in 0.5 steps but any value in range is accepted
    pub rating: f64,

    pub price_paid: Option<f64>,
    pub location: Option<String>,
    pub memo: Option<String>,
}

/// The user-editable part of a Tasting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TastingFields {
    pub date: DateTime<Utc>,
    pub rating: f64,
    pub price_paid: Option<f64>,
    pub location: Option<String>,
    pub memo: Option<String>,
}

impl TastingFields {
    /// Fields for a tasting happening now
    pub fn rated(rating: f64) -> Self {
        Self {
            date: Utc::now(),
            rating,
            price_paid: None,
            location: None,
            memo: None,
        }
    }
}

impl Default for TastingFields {
    fn default() -> Self {
        Self::rated(4.0)
    }
}

impl Tasting {
    /// Create a tasting owned by `wine_id`, dated now
    pub fn new(wine_id: Uuid, rating: f64) -> Self {
        Self::with_fields(wine_id, TastingFields::rated(rating))
    }

    pub fn with_fields(wine_id: Uuid, fields: TastingFields) -> Self {
        let mut tasting = Self {
            id: Uuid::new_v4(),
            wine_id: Some(wine_id),
            date: fields.date,
            rating: fields.rating,
            price_paid: None,
            location: None,
            memo: None,
        };
        tasting.apply(fields);
        tasting
    }

    /// Replace every editable field; identity and ownership are untouched
    pub fn apply(&mut self, fields: TastingFields) {
        self.date = fields.date;
        self.rating = fields.rating;
        self.price_paid = fields.price_paid;
        self.location = fields.location.filter(|l| !l.trim().is_empty());
        self.memo = fields.memo.filter(|m| !m.trim().is_empty());
    }

    pub fn is_orphan(&self) -> bool {
        self.wine_id.is_none()
    }

    /// Rating with one decimal, e.g. "4.5"
    pub fn rating_text(&self) -> String {
        format!("{:.1}", self.rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tasting_is_owned() {
        let wine_id = Uuid::new_v4();
        let t = Tasting::new(wine_id, 4.0);
        assert_eq!(t.wine_id, Some(wine_id));
        assert!(!t.is_orphan());
    }

    #[test]
    fn test_rating_text() {
        let t = Tasting::new(Uuid::new_v4(), 4.0);
        assert_eq!(t.rating_text(), "4.0");
        let t = Tasting::new(Uuid::new_v4(), 3.26);
        assert_eq!(t.rating_text(), "3.3");
    }

    #[test]
    fn test_apply_keeps_identity_and_owner() {
        let wine_id = Uuid::new_v4();
        let mut t = Tasting::new(wine_id, 2.0);
        let id = t.id;

        t.apply(TastingFields {
            rating: 5.0,
            location: Some(" ".to_string()),
            memo: Some("Toasty notes.".to_string()),
            ..TastingFields::rated(0.0)
        });

        assert_eq!(t.id, id);
        assert_eq!(t.wine_id, Some(wine_id));
        assert_eq!(t.rating, 5.0);
        assert_eq!(t.location, None);
        assert_eq!(t.memo.as_deref(), Some("Toasty notes."));
    }
}
