// src/services/tasting_service.rs
//
// Tasting mutations. A tasting is only ever created for a wine that
// exists, and an invalid rating aborts before anything is written.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::tasting::{validate_tasting, Tasting, TastingFields};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, TastingAdded, TastingDeleted, TastingUpdated};
use crate::repositories::{TastingRepository, WineRepository};

pub struct TastingService {
    wine_repo: Arc<dyn WineRepository>,
    tasting_repo: Arc<dyn TastingRepository>,
    event_bus: Arc<EventBus>,
}

impl TastingService {
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

    pub fn add_tasting(&self, wine_id: Uuid, fields: TastingFields) -> AppResult<Tasting> {
        if !self.wine_repo.exists(wine_id)? {
            return Err(AppError::NotFound);
        }

        let tasting = Tasting::with_fields(wine_id, fields);

        validate_tasting(&tasting)?;
        self.tasting_repo.save(&tasting)?;

        log::info!(
            "Added tasting {} ({}) to wine {}",
            tasting.id,
            tasting.rating_text(),
            wine_id
        );
        self.event_bus
            .emit(TastingAdded::new(tasting.id, wine_id, tasting.rating));

        Ok(tasting)
    }

    /// Replace every editable field; the owning wine never changes
    pub fn update_tasting(&self, tasting_id: Uuid, fields: TastingFields) -> AppResult<Tasting> {
        let mut tasting = self
            .tasting_repo
            .get_by_id(tasting_id)?
            .ok_or(AppError::NotFound)?;
        let wine_id = tasting.wine_id.ok_or(AppError::NotFound)?;

        tasting.apply(fields);

        validate_tasting(&tasting)?;
        self.tasting_repo.save(&tasting)?;

        log::info!("Updated tasting {}", tasting.id);
        self.event_bus.emit(TastingUpdated::new(tasting.id, wine_id));

        Ok(tasting)
    }

    pub fn delete_tasting(&self, tasting_id: Uuid) -> AppResult<()> {
        let tasting = self
            .tasting_repo
            .get_by_id(tasting_id)?
            .ok_or(AppError::NotFound)?;
        let wine_id = tasting.wine_id.ok_or(AppError::NotFound)?;

        self.tasting_repo.delete(tasting_id)?;

        log::info!("Deleted tasting {} of wine {}", tasting_id, wine_id);
        self.event_bus.emit(TastingDeleted::new(tasting_id, wine_id));

        Ok(())
    }

    pub fn get_tasting(&self, tasting_id: Uuid) -> AppResult<Option<Tasting>> {
        self.tasting_repo.get_by_id(tasting_id)
    }

    /// Tastings of one wine, newest first
    pub fn list_for_wine(&self, wine_id: Uuid) -> AppResult<Vec<Tasting>> {
        self.tasting_repo.list_by_wine(wine_id)
    }
}
