// src/application/sample_data.rs
//
// Demo cellar for previews and first launch

use chrono::{Duration, Utc};

use crate::application::state::AppState;
use crate::domain::{TastingFields, WineFields, WineType};
use crate::error::AppResult;

/// One demo wine and the tastings recorded for it
#[derive(Debug, Clone)]
pub struct SampleWine {
    pub fields: WineFields,
    pub tastings: Vec<TastingFields>,
}

fn tasting(days_ago: i64, rating: f64, location: &str, memo: &str) -> TastingFields {
    TastingFields {
        date: Utc::now() - Duration::days(days_ago),
        rating,
        price_paid: None,
        location: Some(location.to_string()),
        memo: Some(memo.to_string()),
    }
}

/// Two tasted wines in the cellar and one on the wishlist
pub fn sample_cellar() -> Vec<SampleWine> {
    vec![
        SampleWine {
            fields: WineFields {
                name: "Clos de Vougeot".to_string(),
                producer: "Chateau de la Tour".to_string(),
                vintage: Some(2018),
                region: Some("Burgundy".to_string()),
                country: Some("France".to_string()),
                grape: Some("Pinot Noir".to_string()),
                wine_type: WineType::Red,
                notes: Some("Silky texture with dark cherry.".to_string()),
                is_wishlist: false,
            },
            tastings: vec![tasting(3, 4.5, "Home", "Elegant finish.")],
        },
        SampleWine {
            fields: WineFields {
                name: "Grande Cuvée".to_string(),
                producer: "Krug".to_string(),
                vintage: Some(2011),
                region: Some("Champagne".to_string()),
                country: Some("France".to_string()),
                grape: Some("Chardonnay".to_string()),
                wine_type: WineType::Sparkling,
                notes: None,
                is_wishlist: false,
            },
            tastings: vec![tasting(12, 4.0, "Anniversary", "Toasty notes.")],
        },
        SampleWine {
            fields: WineFields {
                name: "Opus One".to_string(),
                producer: "Opus One".to_string(),
                vintage: Some(2016),
                region: Some("Napa Valley".to_string()),
                country: Some("USA".to_string()),
                grape: Some("Cabernet Sauvignon".to_string()),
                wine_type: WineType::Red,
                notes: None,
                is_wishlist: true,
            },
            tastings: Vec::new(),
        },
    ]
}

/// Insert the demo cellar through the services. Returns the number of wines added.
pub fn seed_sample_data(state: &AppState) -> AppResult<usize> {
    let samples = sample_cellar();
    let count = samples.len();

    for sample in samples {
        let wine = state.wine_service.create_wine(sample.fields)?;
        for fields in sample.tastings {
            state.tasting_service.add_tasting(wine.id, fields)?;
        }
    }

    log::info!("Seeded {} sample wines", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CellarConfig;
    use crate::domain::WineFilter;

    #[test]
    fn test_seed_populates_cellar() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::in_memory(CellarConfig::with_data_dir(dir.path())).unwrap();

        assert_eq!(seed_sample_data(&state).unwrap(), 3);

        let overview = state.statistics_service.overview().unwrap();
        assert_eq!(overview.total_wines, 3);
        assert_eq!(overview.total_tastings, 2);
        assert_eq!(overview.wishlist_count, 1);
        assert_eq!(overview.average_rating, Some(4.25));

        let wishlist = state
            .library_service
            .list_wines(WineFilter::WishlistOnly, "")
            .unwrap();
        assert_eq!(wishlist.len(), 1);
        assert_eq!(wishlist[0].name, "Opus One");
    }
}
