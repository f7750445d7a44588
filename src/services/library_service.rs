// src/services/library_service.rs
//
// Read side of the cellar: filtered/searched listings, wine details,
// and the orphan sweep that keeps the tasting table consistent.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::wine::{Wine, WineFilter, WineWithTastings};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, OrphanTastingsPurged};
use crate::repositories::{TastingRepository, WineRepository};

pub struct LibraryService {
    wine_repo: Arc<dyn WineRepository>,
    tasting_repo: Arc<dyn TastingRepository>,
    event_bus: Arc<EventBus>,
}

impl LibraryService {
    pub fn new(
        wine_repo: Arc<dyn WineRepository>,
        tasting_repo: Arc<dyn TastingRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            wine_repo,
            tasting_repo,
            event_bus,
        }
    }

    /// Wines passing `filter`, narrowed by a case-insensitive substring of
    /// name, producer or region. An empty `search` applies no text filter.
    /// Always sorted by name as stored (case-sensitive), then creation time.
    pub fn list_wines(&self, filter: WineFilter, search: &str) -> AppResult<Vec<Wine>> {
        let wines: Vec<Wine> = self
            .wine_repo
            .list_all()?
            .into_iter()
            .filter(|w| filter.matches(w))
            .filter(|w| search.is_empty() || w.matches_search(search))
            .collect();

        log::debug!(
            "Listed {} wines (filter {:?}, search {:?})",
            wines.len(),
            filter,
            search
        );
        Ok(wines)
    }

    /// The wine added last
    pub fn most_recent_wine(&self) -> AppResult<Option<Wine>> {
        Ok(self
            .wine_repo
            .list_all()?
            .into_iter()
            .max_by_key(|w| w.created_at))
    }

    pub fn get_wine_details(&self, wine_id: Uuid) -> AppResult<WineWithTastings> {
        let wine = self
            .wine_repo
            .get_by_id(wine_id)?
            .ok_or(AppError::NotFound)?;
        let tastings = self.tasting_repo.list_by_wine(wine_id)?;

        Ok(WineWithTastings::new(wine, tastings))
    }

    /// Delete every tasting that lost its wine. Safe to run at any time;
    /// a second run in a row removes nothing.
    pub fn purge_orphan_tastings(&self) -> AppResult<usize> {
        let removed = self.tasting_repo.delete_orphans()?;

        if removed > 0 {
            log::info!("Purged {} orphan tastings", removed);
        } else {
            log::debug!("No orphan tastings to purge");
        }
        self.event_bus.emit(OrphanTastingsPurged::new(removed));

        Ok(removed)
    }
}
