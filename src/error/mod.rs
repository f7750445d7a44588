// src/error/mod.rs
//
// Crate-level error types

pub mod types;

pub use types::{AppError, AppResult};
