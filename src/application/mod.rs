// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between the UI collaborator and the services
// - Translates between DTOs and domain entities
// - Every command returns Result<_, ErrorResponse>

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod sample_data;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{CommandResult, ErrorResponse, ErrorType};
pub use sample_data::{sample_cellar, seed_sample_data, SampleWine};
pub use state::AppState;
