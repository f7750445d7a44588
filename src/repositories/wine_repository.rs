// src/repositories/wine_repository.rs
//
// Wine persistence, including the transactional cascade delete

use std::sync::Arc;

use rusqlite::{params, Row};
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, parse_uuid};
use crate::db::ConnectionPool;
use crate::domain::wine::{Wine, WineType};
use crate::error::{AppError, AppResult};

const WINE_COLUMNS: &str = "id, name, producer, vintage, region, country, grape, wine_type,
                            notes, is_wishlist, created_at, photo_filename";

#[cfg_attr(test, mockall::automock)]
pub trait WineRepository: Send + Sync {
    /// Insert or update; `created_at` of an existing row is never rewritten
    fn save(&self, wine: &Wine) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Wine>>;
    /// All wines ordered by name (byte-wise, case-sensitive)
    fn list_all(&self) -> AppResult<Vec<Wine>>;
    fn exists(&self, id: Uuid) -> AppResult<bool>;
    /// Delete every tasting of the wine, then the wine, atomically.
    /// Returns the number of tastings removed; `NotFound` leaves the store untouched.
    fn delete_with_tastings(&self, id: Uuid) -> AppResult<usize>;
}

pub struct SqliteWineRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteWineRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_wine(row: &Row) -> Result<Wine, rusqlite::Error> {
        let id = parse_uuid(0, &row.get::<_, String>("id")?)?;
        let wine_type: String = row.get("wine_type")?;
        let created_at = parse_timestamp(10, &row.get::<_, String>("created_at")?)?;

        Ok(Wine {
            id,
            name: row.get("name")?,
            producer: row.get("producer")?,
            vintage: row.get("vintage")?,
            region: row.get("region")?,
            country: row.get("country")?,
            grape: row.get("grape")?,
            wine_type: WineType::from_raw_or_default(&wine_type),
            notes: row.get("notes")?,
            is_wishlist: row.get("is_wishlist")?,
            created_at,
            photo_filename: row.get("photo_filename")?,
        })
    }
}

impl WineRepository for SqliteWineRepository {
    fn save(&self, wine: &Wine) -> AppResult<()> {
        let conn = self.pool.get()?;

        // Upsert rather than REPLACE: REPLACE deletes the row first, which
        // would fire ON DELETE SET NULL and orphan the wine's tastings.
        conn.execute(
            "INSERT INTO wines (
                id, name, producer, vintage, region, country, grape, wine_type,
                notes, is_wishlist, created_at, photo_filename
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                producer = excluded.producer,
                vintage = excluded.vintage,
                region = excluded.region,
                country = excluded.country,
                grape = excluded.grape,
                wine_type = excluded.wine_type,
                notes = excluded.notes,
                is_wishlist = excluded.is_wishlist,
                photo_filename = excluded.photo_filename",
            params![
                wine.id.to_string(),
                wine.name,
                wine.producer,
                wine.vintage,
                wine.region,
                wine.country,
                wine.grape,
                wine.wine_type.as_str(),
                wine.notes,
                wine.is_wishlist,
                format_timestamp(&wine.created_at),
                wine.photo_filename,
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Wine>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("SELECT {} FROM wines WHERE id = ?1", WINE_COLUMNS))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_wine) {
            Ok(wine) => Ok(Some(wine)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Wine>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM wines ORDER BY name, created_at",
            WINE_COLUMNS
        ))?;

        let wines: Vec<Wine> = stmt
            .query_map([], Self::row_to_wine)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(wines)
    }

    fn exists(&self, id: Uuid) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM wines WHERE id = ?1",
            params![id.to_string()],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    fn delete_with_tastings(&self, id: Uuid) -> AppResult<usize> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;
        let id_str = id.to_string();

        let tastings_removed =
            tx.execute("DELETE FROM tastings WHERE wine_id = ?1", params![id_str])?;
        let wines_removed = tx.execute("DELETE FROM wines WHERE id = ?1", params![id_str])?;

        if wines_removed == 0 {
            // Dropping the transaction rolls back the tasting delete
            return Err(AppError::NotFound);
        }

        tx.commit()?;
        Ok(tastings_removed)
    }
}
