// The command surface the UI calls, with text input and ErrorResponse output

use tempfile::TempDir;

use winecellar::commands;
use winecellar::dto::{TastingInputDto, WineInputDto};
use winecellar::{seed_sample_data, AppState, CellarConfig, ErrorType, WineFilter};

fn cellar() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::in_memory(CellarConfig::with_data_dir(dir.path())).unwrap();
    (state, dir)
}

fn wine_input(name: &str) -> WineInputDto {
    WineInputDto {
        name: name.to_string(),
        producer: "Domaine".to_string(),
        vintage: "2015".to_string(),
        wine_type: "white".to_string(),
        ..WineInputDto::default()
    }
}

fn tasting_input(rating: f64, price: &str) -> TastingInputDto {
    TastingInputDto {
        date: None,
        rating,
        price_paid: price.to_string(),
        location: Some("Home".to_string()),
        memo: None,
    }
}

#[test]
fn create_and_taste_through_text_input() {
    let (state, _dir) = cellar();

    let wine = commands::create_wine(&state, wine_input("Meursault")).unwrap();
    assert_eq!(wine.vintage, Some(2015));
    assert_eq!(wine.wine_type_label, "White");

    let comma = commands::add_tasting(&state, &wine.id, tasting_input(4.0, "12,50")).unwrap();
    let dot = commands::add_tasting(&state, &wine.id, tasting_input(4.5, "12.50")).unwrap();
    let junk = commands::add_tasting(&state, &wine.id, tasting_input(3.5, "abc")).unwrap();

    assert_eq!(comma.price_paid, Some(12.5));
    assert_eq!(dot.price_paid, Some(12.5));
    assert_eq!(junk.price_paid, None);
    assert_eq!(commands::list_tastings(&state, &wine.id).unwrap().len(), 3);
}

#[test]
fn empty_name_is_a_validation_error() {
    let (state, _dir) = cellar();
    let err = commands::create_wine(&state, wine_input("  ")).unwrap_err();
    assert_eq!(err.error_type, ErrorType::Validation);
}

#[test]
fn out_of_range_rating_maps_to_invalid_rating() {
    let (state, _dir) = cellar();
    let wine = commands::create_wine(&state, wine_input("A")).unwrap();

    let err = commands::add_tasting(&state, &wine.id, tasting_input(9.0, "")).unwrap_err();

    assert_eq!(err.error_type, ErrorType::InvalidRating);
}

#[test]
fn unknown_ids_map_to_not_found() {
    let (state, _dir) = cellar();
    let missing = uuid::Uuid::new_v4().to_string();

    assert_eq!(
        commands::delete_wine(&state, &missing).unwrap_err().error_type,
        ErrorType::NotFound
    );
    assert_eq!(
        commands::add_tasting(&state, &missing, tasting_input(4.0, "")).unwrap_err().error_type,
        ErrorType::NotFound
    );
    assert_eq!(
        commands::delete_tasting(&state, &missing).unwrap_err().error_type,
        ErrorType::NotFound
    );
}

#[test]
fn malformed_id_is_a_validation_error() {
    let (state, _dir) = cellar();
    let err = commands::get_wine_details(&state, "not-a-uuid").unwrap_err();
    assert_eq!(err.error_type, ErrorType::Validation);
}

#[test]
fn library_list_carries_latest_rating() {
    let (state, _dir) = cellar();
    seed_sample_data(&state).unwrap();

    let rows = commands::list_wines(&state, WineFilter::All, "").unwrap();
    let summary: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.wine.name.as_str(), r.latest_rating_text.as_str()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Clos de Vougeot", "4.5"),
            ("Grande Cuvée", "4.0"),
            ("Opus One", "—"),
        ]
    );

    let found = commands::list_wines(&state, WineFilter::All, "krug").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].wine.name, "Grande Cuvée");
}

#[test]
fn statistics_of_the_sample_cellar() {
    let (state, _dir) = cellar();
    seed_sample_data(&state).unwrap();

    let stats = commands::get_statistics(&state).unwrap();

    assert_eq!(stats.total_wines, 3);
    assert_eq!(stats.total_tastings, 2);
    assert_eq!(stats.wishlist_count, 1);
    assert_eq!(stats.last_7_days, 1);
    assert_eq!(stats.last_30_days, 2);
    let labels: Vec<&str> = stats.by_type.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Red", "Sparkling"]);

    let most_recent = commands::most_recent_wine(&state).unwrap().unwrap();
    assert!(["Clos de Vougeot", "Grande Cuvée", "Opus One"].contains(&most_recent.name.as_str()));
}
