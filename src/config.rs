// src/config.rs
//
// Cellar configuration
//
// Everything the core needs to know about where data lives and how
// photos and statistics are tuned. Loaded from an optional JSON file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

const APP_DIR_NAME: &str = "winecellar";

/// Upper bound on the trend window; a century of tastings
pub const MAX_TREND_WINDOW_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellarConfig {
    /// Root directory for the database and photo directory
    pub data_dir: PathBuf,

    /// SQLite file name inside `data_dir`
    pub database_file: String,

    /// Photo directory name inside `data_dir`
    pub photo_dir_name: String,

    /// Longer side limit for stored photos, in pixels
    pub max_photo_dimension: u32,

    /// JPEG quality in 0.0..=1.0
    pub photo_quality: f32,

    /// Number of regions kept by the by-region ranking
    pub region_top_n: usize,

    /// Rolling window of the weekly trend, in days
    pub trend_window_days: i64,
}

impl Default for CellarConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            database_file: "winecellar.db".to_string(),
            photo_dir_name: "wines".to_string(),
            max_photo_dimension: 2000,
            photo_quality: 0.85,
            region_top_n: 10,
            trend_window_days: 90,
        }
    }
}

impl CellarConfig {
    /// Defaults rooted at an explicit directory
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load settings from a JSON file.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    /// Keys absent from the file keep their default value.
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            log::debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: CellarConfig = serde_json::from_str(&raw)?;
        Ok(config.clamped())
    }

    /// Pull the statistics tunables back into their usable range
    fn clamped(mut self) -> Self {
        let window = self.trend_window_days.clamp(1, MAX_TREND_WINDOW_DAYS);
        if window != self.trend_window_days {
            log::warn!(
                "trend_window_days {} out of range, using {}",
                self.trend_window_days,
                window
            );
            self.trend_window_days = window;
        }
        self
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }

    pub fn photo_dir(&self) -> PathBuf {
        self.data_dir.join(&self.photo_dir_name)
    }
}

/// {APP_DATA}/winecellar, or {TMP}/winecellar when the platform has no data dir
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
}
