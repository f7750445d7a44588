// src/services/wine_service.rs
//
// Wine mutations and the photo lifecycle tied to them.
//
// Photo ordering: a new file is saved before the row changes, and the old
// file is removed only after the row change is committed.

use std::sync::Arc;

use image::DynamicImage;
use uuid::Uuid;

use crate::domain::wine::{validate_wine, Wine, WineFields};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, WineCreated, WineDeleted, WinePhotoChanged, WineUpdated};
use crate::infrastructure::{PhotoStore, DEFAULT_MAX_DIMENSION, DEFAULT_QUALITY};
use crate::repositories::WineRepository;

pub struct WineService {
    wine_repo: Arc<dyn WineRepository>,
    photo_store: Arc<PhotoStore>,
    event_bus: Arc<EventBus>,
    max_photo_dimension: u32,
    photo_quality: f32,
}

impl WineService {
    pub fn new(
        wine_repo: Arc<dyn WineRepository>,
        photo_store: Arc<PhotoStore>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            wine_repo,
            photo_store,
            event_bus,
            max_photo_dimension: DEFAULT_MAX_DIMENSION,
            photo_quality: DEFAULT_QUALITY,
        }
    }

    /// Size and quality used by `attach_photo_image`
    pub fn with_photo_settings(mut self, max_dimension: u32, quality: f32) -> Self {
        self.max_photo_dimension = max_dimension;
        self.photo_quality = quality;
        self
    }

    pub fn create_wine(&self, fields: WineFields) -> AppResult<Wine> {
        let wine = Wine::new(fields);

        validate_wine(&wine)?;
        self.wine_repo.save(&wine)?;

        log::info!("Created wine {} ({})", wine.name, wine.id);
        self.event_bus.emit(WineCreated::new(wine.id, wine.name.clone()));

        Ok(wine)
    }

    /// Overwrite the mutable fields; identity, creation time and photo stay
    pub fn update_wine(&self, wine_id: Uuid, fields: WineFields) -> AppResult<Wine> {
        let mut wine = self
            .wine_repo
            .get_by_id(wine_id)?
            .ok_or(AppError::NotFound)?;

        wine.apply(fields);

        validate_wine(&wine)?;
        self.wine_repo.save(&wine)?;

        log::info!("Updated wine {}", wine.id);
        self.event_bus.emit(WineUpdated::new(wine.id));

        Ok(wine)
    }

    /// Delete the wine with all of its tastings, then release its photo.
    /// Returns the number of tastings removed with it.
    pub fn delete_wine(&self, wine_id: Uuid) -> AppResult<usize> {
        let wine = self
            .wine_repo
            .get_by_id(wine_id)?
            .ok_or(AppError::NotFound)?;

        let removed = self.wine_repo.delete_with_tastings(wine_id)?;

        if let Some(filename) = wine.photo_filename.as_deref() {
            self.photo_store.remove_image(filename);
        }

        log::info!("Deleted wine {} and {} tastings", wine_id, removed);
        self.event_bus.emit(WineDeleted::new(wine_id, removed));

        Ok(removed)
    }

    pub fn get_wine(&self, wine_id: Uuid) -> AppResult<Option<Wine>> {
        self.wine_repo.get_by_id(wine_id)
    }

    /// Store already-encoded image bytes as the wine's photo.
    ///
    /// `Ok(None)` means the photo store could not write the file and the
    /// wine is unchanged.
    pub fn attach_photo_bytes(&self, wine_id: Uuid, bytes: &[u8]) -> AppResult<Option<String>> {
        let wine = self
            .wine_repo
            .get_by_id(wine_id)?
            .ok_or(AppError::NotFound)?;

        match self.photo_store.save_image_bytes(bytes) {
            Some(filename) => self.replace_photo(wine, filename).map(Some),
            None => Ok(None),
        }
    }

    /// Scale and re-encode `image`, then store it as the wine's photo
    pub fn attach_photo_image(&self, wine_id: Uuid, image: &DynamicImage) -> AppResult<Option<String>> {
        let wine = self
            .wine_repo
            .get_by_id(wine_id)?
            .ok_or(AppError::NotFound)?;

        let saved = self
            .photo_store
            .save_image(image, self.max_photo_dimension, self.photo_quality);

        match saved {
            Some(filename) => self.replace_photo(wine, filename).map(Some),
            None => Ok(None),
        }
    }

    /// Clear the wine's photo reference, then delete the file
    pub fn remove_photo(&self, wine_id: Uuid) -> AppResult<()> {
        let mut wine = self
            .wine_repo
            .get_by_id(wine_id)?
            .ok_or(AppError::NotFound)?;

        let Some(old) = wine.photo_filename.take() else {
            return Ok(());
        };

        self.wine_repo.save(&wine)?;
        self.photo_store.remove_image(&old);

        log::info!("Removed photo of wine {}", wine.id);
        self.event_bus.emit(WinePhotoChanged::new(wine.id, None));

        Ok(())
    }

    /// Bytes of the wine's current photo, if it has one that can be read
    pub fn load_photo(&self, wine_id: Uuid) -> AppResult<Option<Vec<u8>>> {
        let wine = self
            .wine_repo
            .get_by_id(wine_id)?
            .ok_or(AppError::NotFound)?;

        Ok(wine
            .photo_filename
            .as_deref()
            .and_then(|f| self.photo_store.load_image_bytes(f)))
    }

    /// `filename` is already on disk. Commit it, then drop the previous file.
    fn replace_photo(&self, mut wine: Wine, filename: String) -> AppResult<String> {
        let old = wine.photo_filename.replace(filename.clone());

        if let Err(e) = self.wine_repo.save(&wine) {
            log::warn!("Photo commit failed for wine {}: {}", wine.id, e);
            self.photo_store.remove_image(&filename);
            return Err(e);
        }

        if let Some(old) = old.filter(|o| *o != filename) {
            self.photo_store.remove_image(&old);
        }

        log::info!("Attached photo {} to wine {}", filename, wine.id);
        self.event_bus
            .emit(WinePhotoChanged::new(wine.id, Some(filename.clone())));

        Ok(filename)
    }
}
