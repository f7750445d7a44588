// src/services/statistics_service.rs
//
// Statistics are derived on demand from the current wines and valid
// tastings. Nothing is cached or stored.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::statistics::{
    self, Dashboard, Overview, RegionRating, TypeRating, WeekTrend,
};
use crate::domain::tasting::Tasting;
use crate::domain::wine::Wine;
use crate::error::AppResult;
use crate::repositories::{TastingRepository, WineRepository};

pub const DEFAULT_REGION_TOP_N: usize = 10;
pub const DEFAULT_TREND_WINDOW_DAYS: i64 = 90;

pub struct StatisticsService {
    wine_repo: Arc<dyn WineRepository>,
    tasting_repo: Arc<dyn TastingRepository>,
    region_top_n: usize,
    trend_window_days: i64,
}

impl StatisticsService {
    pub fn new(
        wine_repo: Arc<dyn WineRepository>,
        tasting_repo: Arc<dyn TastingRepository>,
    ) -> Self {
        Self {
            wine_repo,
            tasting_repo,
            region_top_n: DEFAULT_REGION_TOP_N,
            trend_window_days: DEFAULT_TREND_WINDOW_DAYS,
        }
    }

    /// Limits used by `dashboard`
    pub fn with_limits(mut self, region_top_n: usize, trend_window_days: i64) -> Self {
        self.region_top_n = region_top_n;
        self.trend_window_days = trend_window_days;
        self
    }

    fn snapshot(&self) -> AppResult<(Vec<Wine>, Vec<Tasting>)> {
        Ok((self.wine_repo.list_all()?, self.tasting_repo.list_valid()?))
    }

    pub fn overview(&self) -> AppResult<Overview> {
        let (wines, tastings) = self.snapshot()?;
        Ok(statistics::overview(&wines, &tastings))
    }

    pub fn ratings_by_type(&self) -> AppResult<Vec<TypeRating>> {
        let (wines, tastings) = self.snapshot()?;
        Ok(statistics::ratings_by_type(&wines, &tastings))
    }

    pub fn ratings_by_region(&self, top_n: usize) -> AppResult<Vec<RegionRating>> {
        let (wines, tastings) = self.snapshot()?;
        Ok(statistics::ratings_by_region(&wines, &tastings, top_n))
    }

    pub fn weekly_trend(&self, window_days: i64) -> AppResult<Vec<WeekTrend>> {
        let (wines, tastings) = self.snapshot()?;
        Ok(statistics::weekly_trend(&wines, &tastings, window_days, Utc::now()))
    }

    pub fn recent_count(&self, days: i64) -> AppResult<usize> {
        let (wines, tastings) = self.snapshot()?;
        Ok(statistics::recent_count(&wines, &tastings, days, Utc::now()))
    }

    pub fn dashboard(&self) -> AppResult<Dashboard> {
        self.dashboard_at(Utc::now())
    }

    /// Every statistic from a single read, relative to `now`
    pub fn dashboard_at(&self, now: DateTime<Utc>) -> AppResult<Dashboard> {
        let (wines, tastings) = self.snapshot()?;

        let dashboard = Dashboard {
            overview: statistics::overview(&wines, &tastings),
            by_type: statistics::ratings_by_type(&wines, &tastings),
            by_region: statistics::ratings_by_region(&wines, &tastings, self.region_top_n),
            weekly_trend: statistics::weekly_trend(&wines, &tastings, self.trend_window_days, now),
            last_7_days: statistics::recent_count(&wines, &tastings, 7, now),
            last_30_days: statistics::recent_count(&wines, &tastings, 30, now),
        };

        log::debug!(
            "Computed dashboard over {} wines and {} tastings",
            dashboard.overview.total_wines,
            dashboard.overview.total_tastings
        );
        Ok(dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_store;
    use crate::domain::wine::{WineFields, WineType};
    use crate::repositories::{SqliteTastingRepository, SqliteWineRepository};
    use chrono::Duration;

    struct Fixture {
        service: StatisticsService,
        wines: Arc<SqliteWineRepository>,
        tastings: Arc<SqliteTastingRepository>,
    }

    fn fixture() -> Fixture {
        let pool = Arc::new(open_memory_store().unwrap());
        let wines = Arc::new(SqliteWineRepository::new(Arc::clone(&pool)));
        let tastings = Arc::new(SqliteTastingRepository::new(pool));
        Fixture {
            service: StatisticsService::new(wines.clone(), tastings.clone()),
            wines,
            tastings,
        }
    }

    fn wine(f: &Fixture, name: &str, region: Option<&str>) -> Wine {
        let wine = Wine::new(WineFields {
            name: name.to_string(),
            wine_type: WineType::Red,
            region: region.map(str::to_string),
            ..WineFields::default()
        });
        f.wines.save(&wine).unwrap();
        wine
    }

    fn taste(f: &Fixture, wine: &Wine, rating: f64, days_ago: i64) {
        let mut t = Tasting::new(wine.id, rating);
        t.date = Utc::now() - Duration::days(days_ago);
        f.tastings.save(&t).unwrap();
    }

    #[test]
    fn test_empty_store() {
        let f = fixture();
        let dashboard = f.service.dashboard().unwrap();

        assert_eq!(dashboard.overview.average_rating, None);
        assert_eq!(dashboard.overview.average_rating_text(), "—");
        assert!(dashboard.by_type.is_empty());
        assert!(dashboard.weekly_trend.is_empty());
        assert_eq!(dashboard.last_30_days, 0);
    }

    #[test]
    fn test_reference_scenario_through_store() {
        let f = fixture();
        let a = wine(&f, "A", None);
        let b = wine(&f, "B", Some("Napa"));
        taste(&f, &a, 4.0, 1);
        taste(&f, &b, 5.0, 1);

        let by_type = f.service.ratings_by_type().unwrap();
        assert_eq!(by_type.len(), 1);
        assert_eq!(by_type[0].average, 4.5);
        assert_eq!(by_type[0].count, 2);

        let by_region = f.service.ratings_by_region(10).unwrap();
        let regions: Vec<&str> = by_region.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["Napa", "Unknown"]);
    }

    #[test]
    fn test_deleted_wine_no_longer_counts() {
        let f = fixture();
        let a = wine(&f, "A", None);
        let b = wine(&f, "B", None);
        taste(&f, &a, 2.0, 0);
        taste(&f, &b, 4.0, 0);

        f.wines.delete_with_tastings(a.id).unwrap();

        let overview = f.service.overview().unwrap();
        assert_eq!(overview.total_wines, 1);
        assert_eq!(overview.total_tastings, 1);
        assert_eq!(overview.average_rating, Some(4.0));
    }

    #[test]
    fn test_recent_windows() {
        let f = fixture();
        let a = wine(&f, "A", None);
        taste(&f, &a, 3.0, 2);
        taste(&f, &a, 3.0, 20);
        taste(&f, &a, 3.0, 200);

        let dashboard = f.service.dashboard().unwrap();
        assert_eq!(dashboard.last_7_days, 1);
        assert_eq!(dashboard.last_30_days, 2);
        assert_eq!(f.service.recent_count(365).unwrap(), 3);

        let weeks: usize = dashboard.weekly_trend.iter().map(|w| w.count).sum();
        assert_eq!(weeks, 2);
    }

    #[test]
    fn test_limits_apply_to_dashboard() {
        let f = fixture();
        for (i, region) in ["Rioja", "Mosel", "Douro"].iter().enumerate() {
            let w = wine(&f, &format!("W{}", i), Some(region));
            taste(&f, &w, 4.0, 40);
        }

        let service = StatisticsService::new(f.wines.clone(), f.tastings.clone()).with_limits(2, 30);
        let dashboard = service.dashboard().unwrap();

        assert_eq!(dashboard.by_region.len(), 2);
        assert!(dashboard.weekly_trend.is_empty());
    }

    #[test]
    fn test_unbounded_windows_do_not_fail() {
        let f = fixture();
        let a = wine(&f, "A", None);
        taste(&f, &a, 3.0, 2);
        taste(&f, &a, 5.0, 400);

        assert_eq!(f.service.recent_count(i64::MAX).unwrap(), 2);
        assert_eq!(f.service.recent_count(1_000_000_000).unwrap(), 2);
        assert_eq!(f.service.weekly_trend(i64::MAX).unwrap().len(), 2);

        let wide = StatisticsService::new(f.wines.clone(), f.tastings.clone())
            .with_limits(DEFAULT_REGION_TOP_N, i64::MAX);
        assert_eq!(wide.dashboard().unwrap().weekly_trend.len(), 2);
    }
}
