// src/db/migrations.rs
//
// Cellar schema versioning
//
// Migrations are an ordered list; each runs once inside its own transaction
// and records its version. A store written by a newer build is refused.

use crate::error::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};

struct Migration {
    version: i32,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "wines and tastings",
    sql: include_str!("../../schema.sql"),
}];

fn latest_version() -> i32 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

/// Bring the store up to the latest schema. Calling it again is a no-op.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current = schema_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(AppError::Other(format!(
            "Cellar schema version {} was written by a newer build (this build knows {})",
            current, latest
        )));
    }

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        apply(conn, migration)?;
        log::info!(
            "Applied cellar schema version {} ({})",
            migration.version,
            migration.description
        );
    }

    Ok(())
}

/// 0 for a fresh store
fn schema_version(conn: &Connection) -> AppResult<i32> {
    let has_table = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |_| Ok(()),
        )
        .optional()?
        .is_some();

    if !has_table {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}

fn apply(conn: &Connection, migration: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(migration.sql).map_err(|e| {
        AppError::Other(format!(
            "Cellar schema version {} failed: {}",
            migration.version, e
        ))
    })?;
    record_version(&tx, migration.version)?;
    tx.commit()?;
    Ok(())
}

fn record_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// `PRAGMA integrity_check`; anything but "ok" is an error
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let verdict: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;

    if verdict != "ok" {
        return Err(AppError::Other(format!("Cellar store is corrupt: {}", verdict)));
    }
    Ok(())
}

/// Row counts and file size of the store
pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let count = |sql: &str| -> AppResult<i64> { Ok(conn.query_row(sql, [], |row| row.get(0))?) };

    let page_count = count("PRAGMA page_count")?;
    let page_size = count("PRAGMA page_size")?;

    Ok(DatabaseStats {
        size_bytes: page_count * page_size,
        page_count,
        page_size,
        wine_count: count("SELECT COUNT(*) FROM wines")?,
        tasting_count: count("SELECT COUNT(*) FROM tastings")?,
        orphan_tasting_count: count("SELECT COUNT(*) FROM tastings WHERE wine_id IS NULL")?,
    })
}

#[derive(Debug)]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub wine_count: i64,
    /// All rows, orphans included
    pub tasting_count: i64,
    pub orphan_tasting_count: i64,
}
