// src/application/state.rs
//
// Wiring of the whole core: pool, repositories, photo store, event bus
// and services, in dependency order.

use std::sync::Arc;

use anyhow::Context;

use crate::config::CellarConfig;
use crate::db::{create_connection_pool, get_connection, initialize_database, open_memory_store, ConnectionPool};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::infrastructure::PhotoStore;
use crate::repositories::{
    SqliteTastingRepository, SqliteWineRepository, TastingRepository, WineRepository,
};
use crate::services::{LibraryService, StatisticsService, TastingService, WineService};

/// Everything the UI collaborator talks to.
/// All fields are Arc-wrapped so the state can be shared across threads.
pub struct AppState {
    pub config: CellarConfig,
    pub pool: Arc<ConnectionPool>,
    pub event_bus: Arc<EventBus>,
    pub photo_store: Arc<PhotoStore>,
    pub wine_service: Arc<WineService>,
    pub tasting_service: Arc<TastingService>,
    pub library_service: Arc<LibraryService>,
    pub statistics_service: Arc<StatisticsService>,
}

impl AppState {
    /// Open (or create) the on-disk cellar described by `config`.
    ///
    /// Runs an orphan sweep once the schema is in place.
    pub fn initialize(config: CellarConfig) -> anyhow::Result<Self> {
        let pool = create_connection_pool(&config)
            .with_context(|| format!("opening database at {:?}", config.database_path()))?;
        {
            let conn = get_connection(&pool).context("acquiring startup connection")?;
            initialize_database(&conn).context("initializing cellar schema")?;
        }

        let state = Self::from_pool(config, pool);
        let purged = state
            .library_service
            .purge_orphan_tastings()
            .context("purging orphan tastings")?;
        log::info!(
            "Cellar ready at {:?} ({} orphan tastings purged)",
            state.config.data_dir,
            purged
        );

        Ok(state)
    }

    /// A throwaway cellar: in-memory database, photos under `config.photo_dir()`
    pub fn in_memory(config: CellarConfig) -> AppResult<Self> {
        let pool = open_memory_store()?;
        Ok(Self::from_pool(config, pool))
    }

    fn from_pool(config: CellarConfig, pool: ConnectionPool) -> Self {
        // 1. INFRASTRUCTURE
        let pool = Arc::new(pool);
        let event_bus = Arc::new(EventBus::new());
        let photo_store = Arc::new(PhotoStore::new(config.photo_dir()));

        // 2. REPOSITORIES
        let wine_repo: Arc<dyn WineRepository> =
            Arc::new(SqliteWineRepository::new(Arc::clone(&pool)));
        let tasting_repo: Arc<dyn TastingRepository> =
            Arc::new(SqliteTastingRepository::new(Arc::clone(&pool)));

        // 3. SERVICES
        let wine_service = Arc::new(
            WineService::new(wine_repo.clone(), photo_store.clone(), event_bus.clone())
                .with_photo_settings(config.max_photo_dimension, config.photo_quality),
        );
        let tasting_service = Arc::new(TastingService::new(
            wine_repo.clone(),
            tasting_repo.clone(),
            event_bus.clone(),
        ));
        let library_service = Arc::new(LibraryService::new(
            wine_repo.clone(),
            tasting_repo.clone(),
            event_bus.clone(),
        ));
        let statistics_service = Arc::new(
            StatisticsService::new(wine_repo, tasting_repo)
                .with_limits(config.region_top_n, config.trend_window_days),
        );

        Self {
            config,
            pool,
            event_bus,
            photo_store,
            wine_service,
            tasting_service,
            library_service,
            statistics_service,
        }
    }
}
