// src/application/commands/statistics_commands.rs

use crate::application::dto::*;
use crate::application::error_handling::CommandResult;
use crate::application::state::AppState;

/// Everything the statistics screen shows
pub fn get_statistics(state: &AppState) -> CommandResult<StatisticsDto> {
    let dashboard = state.statistics_service.dashboard()?;
    Ok(StatisticsDto::from(dashboard))
}

pub fn get_ratings_by_region(state: &AppState, top_n: Option<usize>) -> CommandResult<Vec<RegionRatingDto>> {
    let top_n = top_n.unwrap_or(state.config.region_top_n);
    let ranked = state.statistics_service.ratings_by_region(top_n)?;

    Ok(ranked.into_iter().map(RegionRatingDto::from).collect())
}

pub fn get_weekly_trend(state: &AppState, window_days: Option<i64>) -> CommandResult<Vec<WeekTrendDto>> {
    let window_days = window_days.unwrap_or(state.config.trend_window_days);
    let weeks = state.statistics_service.weekly_trend(window_days)?;

    Ok(weeks.into_iter().map(WeekTrendDto::from).collect())
}

pub fn get_recent_count(state: &AppState, days: i64) -> CommandResult<usize> {
    Ok(state.statistics_service.recent_count(days)?)
}
