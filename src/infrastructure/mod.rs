// src/infrastructure/mod.rs
//
// Local-disk pieces the services lean on. Nothing here knows about wines
// beyond a file name.

pub mod photo_store;

pub use photo_store::{PhotoStore, DEFAULT_MAX_DIMENSION, DEFAULT_QUALITY};
