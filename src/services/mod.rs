// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services validate, call repositories, and emit one event per committed
// mutation. Queries go straight to the repositories.

pub mod library_service;
pub mod statistics_service;
pub mod tasting_service;
pub mod wine_service;

pub use library_service::LibraryService;
pub use statistics_service::{
    StatisticsService, DEFAULT_REGION_TOP_N, DEFAULT_TREND_WINDOW_DAYS,
};
pub use tasting_service::TastingService;
pub use wine_service::WineService;
