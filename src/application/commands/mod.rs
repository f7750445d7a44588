// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept DTOs, return DTOs
// - Commands convert errors into ErrorResponse
// - Commands NEVER contain business logic

pub mod statistics_commands;
pub mod tasting_commands;
pub mod wine_commands;

pub use statistics_commands::*;
pub use tasting_commands::*;
pub use wine_commands::*;

use uuid::Uuid;

use crate::application::error_handling::{CommandResult, ErrorResponse};

/// Ids cross the boundary as strings
pub(crate) fn parse_id(raw: &str, what: &str) -> CommandResult<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|e| ErrorResponse::validation(format!("Invalid {} id: {}", what, e)))
}
