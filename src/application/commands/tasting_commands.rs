// src/application/commands/tasting_commands.rs
//
// Tasting Command Handlers

use crate::application::dto::*;
use crate::application::error_handling::{CommandResult, ErrorResponse};
use crate::application::state::AppState;

use super::parse_id;

pub fn add_tasting(state: &AppState, wine_id: &str, input: TastingInputDto) -> CommandResult<TastingDto> {
    let id = parse_id(wine_id, "wine")?;
    let fields = input
        .into_fields()
        .map_err(|e| ErrorResponse::validation(format!("Invalid tasting date: {}", e)))?;

    let tasting = state.tasting_service.add_tasting(id, fields)?;
    Ok(TastingDto::from(tasting))
}

pub fn update_tasting(
    state: &AppState,
    tasting_id: &str,
    input: TastingInputDto,
) -> CommandResult<TastingDto> {
    let id = parse_id(tasting_id, "tasting")?;
    let fields = input
        .into_fields()
        .map_err(|e| ErrorResponse::validation(format!("Invalid tasting date: {}", e)))?;

    let tasting = state.tasting_service.update_tasting(id, fields)?;
    Ok(TastingDto::from(tasting))
}

pub fn delete_tasting(state: &AppState, tasting_id: &str) -> CommandResult<()> {
    let id = parse_id(tasting_id, "tasting")?;
    Ok(state.tasting_service.delete_tasting(id)?)
}

/// Newest first
pub fn list_tastings(state: &AppState, wine_id: &str) -> CommandResult<Vec<TastingDto>> {
    let id = parse_id(wine_id, "wine")?;
    let tastings = state.tasting_service.list_for_wine(id)?;
    Ok(tastings.into_iter().map(TastingDto::from).collect())
}
