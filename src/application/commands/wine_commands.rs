// src/application/commands/wine_commands.rs
//
// Wine Command Handlers

use crate::application::dto::*;
use crate::application::error_handling::{CommandResult, ErrorResponse};
use crate::application::state::AppState;
use crate::domain::{WineFields, WineFilter, WineWithTastings};

use super::parse_id;

/// Library list: filtered, searched, sorted by name
pub fn list_wines(
    state: &AppState,
    filter: WineFilter,
    search: &str,
) -> CommandResult<Vec<WineSummaryDto>> {
    let wines = state.library_service.list_wines(filter, search)?;

    wines
        .into_iter()
        .map(|wine| -> CommandResult<WineSummaryDto> {
            let tastings = state.tasting_service.list_for_wine(wine.id)?;
            Ok(WineSummaryDto::from(WineWithTastings::new(wine, tastings)))
        })
        .collect()
}

pub fn get_wine_details(state: &AppState, wine_id: &str) -> CommandResult<WineDetailsDto> {
    let id = parse_id(wine_id, "wine")?;
    let details = state.library_service.get_wine_details(id)?;
    Ok(WineDetailsDto::from(details))
}

pub fn most_recent_wine(state: &AppState) -> CommandResult<Option<WineDto>> {
    Ok(state.library_service.most_recent_wine()?.map(WineDto::from))
}

pub fn create_wine(state: &AppState, input: WineInputDto) -> CommandResult<WineDto> {
    let fields = WineFields::try_from(input)?;
    let wine = state.wine_service.create_wine(fields)?;
    Ok(WineDto::from(wine))
}

pub fn update_wine(state: &AppState, wine_id: &str, input: WineInputDto) -> CommandResult<WineDto> {
    let id = parse_id(wine_id, "wine")?;
    let fields = WineFields::try_from(input)?;
    let wine = state.wine_service.update_wine(id, fields)?;
    Ok(WineDto::from(wine))
}

/// Returns how many tastings were deleted with the wine
pub fn delete_wine(state: &AppState, wine_id: &str) -> CommandResult<usize> {
    let id = parse_id(wine_id, "wine")?;
    Ok(state.wine_service.delete_wine(id)?)
}

/// Decode, scale and store a picked image as the wine's photo.
///
/// `Ok(None)`: the photo could not be written and the wine keeps its old one.
pub fn set_wine_photo(state: &AppState, wine_id: &str, bytes: &[u8]) -> CommandResult<Option<String>> {
    let id = parse_id(wine_id, "wine")?;
    let image = image::load_from_memory(bytes)
        .map_err(|e| ErrorResponse::validation(format!("Unsupported image: {}", e)))?;

    Ok(state.wine_service.attach_photo_image(id, &image)?)
}

pub fn get_wine_photo(state: &AppState, wine_id: &str) -> CommandResult<Option<Vec<u8>>> {
    let id = parse_id(wine_id, "wine")?;
    Ok(state.wine_service.load_photo(id)?)
}

pub fn remove_wine_photo(state: &AppState, wine_id: &str) -> CommandResult<()> {
    let id = parse_id(wine_id, "wine")?;
    Ok(state.wine_service.remove_photo(id)?)
}

pub fn purge_orphan_tastings(state: &AppState) -> CommandResult<usize> {
    Ok(state.library_service.purge_orphan_tastings()?)
}

pub fn list_wine_types() -> Vec<WineTypeOptionDto> {
    wine_type_options()
}
