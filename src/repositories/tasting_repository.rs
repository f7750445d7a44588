// src/repositories/tasting_repository.rs
//
// Tasting persistence
//
// Every read filters `wine_id IS NOT NULL`: orphans exist in the table
// only until the next purge and are never handed out.

use std::sync::Arc;

use rusqlite::{params, Row};
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, parse_uuid};
use crate::db::ConnectionPool;
use crate::domain::tasting::Tasting;
use crate::error::{AppError, AppResult};

const TASTING_COLUMNS: &str = "id, wine_id, date, rating, price_paid, location, memo";

#[cfg_attr(test, mockall::automock)]
pub trait TastingRepository: Send + Sync {
    fn save(&self, tasting: &Tasting) -> AppResult<()>;
    /// Valid tastings only
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Tasting>>;
    /// Tastings of one wine, newest first
    fn list_by_wine(&self, wine_id: Uuid) -> AppResult<Vec<Tasting>>;
    /// Every valid tasting, oldest first
    fn list_valid(&self) -> AppResult<Vec<Tasting>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
    /// Remove every tasting without a wine; returns how many were removed
    fn delete_orphans(&self) -> AppResult<usize>;
}

pub struct SqliteTastingRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteTastingRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_tasting(row: &Row) -> Result<Tasting, rusqlite::Error> {
        let id = parse_uuid(0, &row.get::<_, String>("id")?)?;
        let wine_id = row
            .get::<_, Option<String>>("wine_id")?
            .map(|raw| parse_uuid(1, &raw))
            .transpose()?;
        let date = parse_timestamp(2, &row.get::<_, String>("date")?)?;

        Ok(Tasting {
            id,
            wine_id,
            date,
            rating: row.get("rating")?,
            price_paid: row.get("price_paid")?,
            location: row.get("location")?,
            memo: row.get("memo")?,
        })
    }
}

impl TastingRepository for SqliteTastingRepository {
    fn save(&self, tasting: &Tasting) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO tastings (id, wine_id, date, rating, price_paid, location, memo)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                wine_id = excluded.wine_id,
                date = excluded.date,
                rating = excluded.rating,
                price_paid = excluded.price_paid,
                location = excluded.location,
                memo = excluded.memo",
            params![
                tasting.id.to_string(),
                tasting.wine_id.map(|id| id.to_string()),
                format_timestamp(&tasting.date),
                tasting.rating,
                tasting.price_paid,
                tasting.location,
                tasting.memo,
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Tasting>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tastings WHERE id = ?1 AND wine_id IS NOT NULL",
            TASTING_COLUMNS
        ))?;

        match stmt.query_row(params![id.to_string()], Self::row_to_tasting) {
            Ok(tasting) => Ok(Some(tasting)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_by_wine(&self, wine_id: Uuid) -> AppResult<Vec<Tasting>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tastings WHERE wine_id = ?1 ORDER BY date DESC",
            TASTING_COLUMNS
        ))?;

        let tastings: Vec<Tasting> = stmt
            .query_map(params![wine_id.to_string()], Self::row_to_tasting)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tastings)
    }

    fn list_valid(&self) -> AppResult<Vec<Tasting>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tastings WHERE wine_id IS NOT NULL ORDER BY date",
            TASTING_COLUMNS
        ))?;

        let tastings: Vec<Tasting> = stmt
            .query_map([], Self::row_to_tasting)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tastings)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "DELETE FROM tastings WHERE id = ?1 AND wine_id IS NOT NULL",
            params![id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete_orphans(&self) -> AppResult<usize> {
        let conn = self.pool.get()?;
        let removed = conn.execute("DELETE FROM tastings WHERE wine_id IS NULL", [])?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_store;
    use crate::domain::wine::{Wine, WineFields};
    use crate::repositories::{SqliteWineRepository, WineRepository};
    use chrono::{Duration, Utc};

    struct Fixture {
        wines: SqliteWineRepository,
        tastings: SqliteTastingRepository,
    }

    fn fixture() -> Fixture {
        let pool = Arc::new(open_memory_store().unwrap());
        Fixture {
            wines: SqliteWineRepository::new(pool.clone()),
            tastings: SqliteTastingRepository::new(pool),
        }
    }

    fn saved_wine(f: &Fixture, name: &str) -> Wine {
        let wine = Wine::new(WineFields::named(name));
        f.wines.save(&wine).unwrap();
        wine
    }

    fn orphan() -> Tasting {
        let mut t = Tasting::new(Uuid::new_v4(), 2.0);
        t.wine_id = None;
        t
    }

    #[test]
    fn test_save_and_get() {
        let f = fixture();
        let wine = saved_wine(&f, "A");
        let mut tasting = Tasting::new(wine.id, 4.5);
        tasting.price_paid = Some(12.5);
        tasting.location = Some("Home".to_string());

        f.tastings.save(&tasting).unwrap();

        assert_eq!(f.tastings.get_by_id(tasting.id).unwrap(), Some(tasting));
    }

    #[test]
    fn test_list_by_wine_newest_first() {
        let f = fixture();
        let wine = saved_wine(&f, "A");
        let other = saved_wine(&f, "B");
        let now = Utc::now();

        let mut old = Tasting::new(wine.id, 3.0);
        old.date = now - Duration::days(3);
        let mut new = Tasting::new(wine.id, 4.0);
        new.date = now;
        f.tastings.save(&old).unwrap();
        f.tastings.save(&new).unwrap();
        f.tastings.save(&Tasting::new(other.id, 1.0)).unwrap();

        let ids: Vec<Uuid> = f.tastings.list_by_wine(wine.id).unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![new.id, old.id]);
    }

    #[test]
    fn test_orphans_are_invisible() {
        let f = fixture();
        let wine = saved_wine(&f, "A");
        let valid = Tasting::new(wine.id, 4.0);
        let orphan = orphan();
        f.tastings.save(&valid).unwrap();
        f.tastings.save(&orphan).unwrap();

        assert_eq!(f.tastings.list_valid().unwrap(), vec![valid]);
        assert_eq!(f.tastings.get_by_id(orphan.id).unwrap(), None);
        assert!(matches!(f.tastings.delete(orphan.id), Err(AppError::NotFound)));
    }

    #[test]
    fn test_delete_orphans_is_idempotent() {
        let f = fixture();
        let wine = saved_wine(&f, "A");
        f.tastings.save(&Tasting::new(wine.id, 4.0)).unwrap();
        f.tastings.save(&orphan()).unwrap();
        f.tastings.save(&orphan()).unwrap();

        assert_eq!(f.tastings.delete_orphans().unwrap(), 2);
        assert_eq!(f.tastings.delete_orphans().unwrap(), 0);
        assert_eq!(f.tastings.list_valid().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let f = fixture();
        assert!(matches!(f.tastings.delete(Uuid::new_v4()), Err(AppError::NotFound)));
    }

    #[test]
    fn test_cascade_removes_only_that_wines_tastings() {
        let f = fixture();
        let doomed = saved_wine(&f, "Doomed");
        let kept = saved_wine(&f, "Kept");
        f.tastings.save(&Tasting::new(doomed.id, 4.0)).unwrap();
        f.tastings.save(&Tasting::new(doomed.id, 3.0)).unwrap();
        let survivor = Tasting::new(kept.id, 5.0);
        f.tastings.save(&survivor).unwrap();

        assert_eq!(f.wines.delete_with_tastings(doomed.id).unwrap(), 2);

        assert!(f.wines.get_by_id(doomed.id).unwrap().is_none());
        assert!(f.tastings.list_by_wine(doomed.id).unwrap().is_empty());
        assert_eq!(f.tastings.list_valid().unwrap(), vec![survivor]);
        assert_eq!(f.tastings.delete_orphans().unwrap(), 0);
    }

    #[test]
    fn test_saving_wine_again_keeps_its_tastings() {
        let f = fixture();
        let mut wine = saved_wine(&f, "A");
        f.tastings.save(&Tasting::new(wine.id, 4.0)).unwrap();

        wine.name = "A2".to_string();
        f.wines.save(&wine).unwrap();

        assert_eq!(f.tastings.list_by_wine(wine.id).unwrap().len(), 1);
    }
}
