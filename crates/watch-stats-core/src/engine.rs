// Aggregation facade: the only entry point callers use. Validates request
// parameters, then composes the independent aggregators into response shapes.

use crate::credits::{rank_people, CreditRole};
use crate::distribution::{decade_rollup, genre_rollup, rating_histogram, summarize};
use crate::error::{AnalyticsError, Result};
use crate::normalize::{normalize_movies, normalize_records, NormalizedBatch};
use crate::shows::show_analytics;
use crate::streak::streak_stats;
use crate::temporal::{active_years, annual_heatmap, monthly_timeline};
use chrono::{Datelike, Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info};
use watch_stats_config::AnalyticsConfig;
use watch_stats_models::{
    Dashboard, Heatmap, Overview, PeopleRanking, RatedEpisode, RawMovieRecord, RawRecord,
    ShowAnalytics, StreakStats, WatchedEntry,
};

/// Parameters for a combined dashboard request
#[derive(Debug, Clone)]
pub struct DashboardRequest {
    /// Heatmap year; defaults to the latest year with activity, else `today`'s year
    pub year: Option<i64>,
    /// Top-N for people rankings; defaults to the configured `default_top_n`
    pub limit: Option<i64>,
    /// Reference date for streaks and recency
    pub today: NaiveDate,
}

impl DashboardRequest {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            year: None,
            limit: None,
            today,
        }
    }

    /// Request anchored at the local calendar date
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn with_year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

pub fn build_overview(entries: &[WatchedEntry]) -> Overview {
    Overview {
        summary: summarize(entries),
        rating_distribution: rating_histogram(entries),
        genres: genre_rollup(entries),
        decades: decade_rollup(entries),
        timeline: monthly_timeline(entries),
        active_years: active_years(entries),
    }
}

pub fn build_people(entries: &[WatchedEntry], limit: usize) -> PeopleRanking {
    PeopleRanking {
        directors: rank_people(entries, CreditRole::Director, limit),
        actors: rank_people(entries, CreditRole::Actor, limit),
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatsEngine {
    config: AnalyticsConfig,
}

impl StatsEngine {
    pub fn new(config: AnalyticsConfig) -> Result<Self> {
        if !config.trend_threshold.is_finite() || config.trend_threshold < 0.0 {
            return Err(AnalyticsError::InvalidThreshold(config.trend_threshold));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Normalize a heterogeneous batch of raw records
    pub fn normalize(&self, raw: &[RawRecord]) -> NormalizedBatch {
        normalize_records(raw)
    }

    pub fn validate_year(&self, year: i64) -> Result<i32> {
        let min = self.config.heatmap_min_year;
        let max = self.config.heatmap_max_year;
        if year < i64::from(min) || year > i64::from(max) {
            return Err(AnalyticsError::InvalidYear { year, min, max });
        }
        // In range of the i32 bounds above
        Ok(year as i32)
    }

    pub fn validate_limit(&self, limit: Option<i64>) -> Result<usize> {
        let max = self.config.max_top_n;
        match limit {
            None => Ok(self.config.default_top_n),
            Some(n) if n >= 1 && (n as u64) <= max as u64 => Ok(n as usize),
            Some(n) => Err(AnalyticsError::InvalidLimit { limit: n, max }),
        }
    }

    pub fn overview(&self, entries: &[WatchedEntry]) -> Overview {
        build_overview(entries)
    }

    pub fn heatmap(&self, entries: &[WatchedEntry], year: i64) -> Result<Heatmap> {
        let year = self.validate_year(year)?;
        Ok(annual_heatmap(entries, year))
    }

    /// Streaks relative to the local calendar date
    pub fn streaks(&self, entries: &[WatchedEntry]) -> StreakStats {
        self.streaks_as_of(entries, Local::now().date_naive())
    }

    pub fn streaks_as_of(&self, entries: &[WatchedEntry], today: NaiveDate) -> StreakStats {
        streak_stats(entries, today)
    }

    pub fn top_people(&self, entries: &[WatchedEntry], limit: Option<i64>) -> Result<PeopleRanking> {
        let limit = self.validate_limit(limit)?;
        Ok(build_people(entries, limit))
    }

    pub fn show(&self, show_id: u64, episodes: &[RatedEpisode]) -> ShowAnalytics {
        show_analytics(show_id, episodes, self.config.trend_threshold)
    }

    /// Only an explicit year is validated. The default is the latest active
    /// year inside the configured bounds, else the year of `today`.
    fn resolve_year(&self, entries: &[WatchedEntry], request: &DashboardRequest) -> Result<i32> {
        if let Some(year) = request.year {
            return self.validate_year(year);
        }

        let bounds = self.config.heatmap_min_year..=self.config.heatmap_max_year;
        let year = active_years(entries)
            .into_iter()
            .find(|y| bounds.contains(y))
            .unwrap_or_else(|| request.today.year());
        Ok(year)
    }

    /// Normalize raw movie records and compute every per-user aggregate
    pub fn dashboard(&self, raw: &[RawMovieRecord], request: &DashboardRequest) -> Result<Dashboard> {
        let normalized = normalize_movies(raw);
        let entries = normalized.items;
        let year = self.resolve_year(&entries, request)?;
        let limit = self.validate_limit(request.limit)?;

        let dashboard = Dashboard {
            overview: build_overview(&entries),
            heatmap: annual_heatmap(&entries, year),
            streaks: streak_stats(&entries, request.today),
            people: build_people(&entries, limit),
            skipped: normalized.skipped,
        };

        info!(
            "Dashboard computed: {} entries, {} skipped, heatmap year {}",
            entries.len(),
            dashboard.skipped.skipped,
            year
        );
        Ok(dashboard)
    }

    /// Same payload as [`StatsEngine::dashboard`], with the four aggregators
    /// running as independent blocking tasks over a shared snapshot
    pub async fn dashboard_concurrent(
        &self,
        raw: &[RawMovieRecord],
        request: &DashboardRequest,
    ) -> Result<Dashboard> {
        let normalized = normalize_movies(raw);
        let year = self.resolve_year(&normalized.items, request)?;
        let limit = self.validate_limit(request.limit)?;
        let today = request.today;

        let entries: Arc<[WatchedEntry]> = normalized.items.into();
        debug!("dashboard_concurrent: spawning aggregators over {} entries", entries.len());

        let overview_task = tokio::task::spawn_blocking({
            let entries = Arc::clone(&entries);
            move || build_overview(&entries)
        });
        let heatmap_task = tokio::task::spawn_blocking({
            let entries = Arc::clone(&entries);
            move || annual_heatmap(&entries, year)
        });
        let streak_task = tokio::task::spawn_blocking({
            let entries = Arc::clone(&entries);
            move || streak_stats(&entries, today)
        });
        let people_task = tokio::task::spawn_blocking({
            let entries = Arc::clone(&entries);
            move || build_people(&entries, limit)
        });

        let (overview, heatmap, streaks, people) =
            futures::try_join!(overview_task, heatmap_task, streak_task, people_task)
                .map_err(|e| AnalyticsError::Task(e.to_string()))?;

        info!(
            "Dashboard computed concurrently: {} entries, {} skipped, heatmap year {}",
            entries.len(),
            normalized.skipped.skipped,
            year
        );

        Ok(Dashboard {
            overview,
            heatmap,
            streaks,
            people,
            skipped: normalized.skipped,
        })
    }
}

#[cfg(test)]
mod tests;
