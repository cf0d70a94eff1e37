use super::input::{load_entries, load_raw_movies, report_skipped};
use crate::output::Output;
use crate::render;
use chrono::{Datelike, Local, NaiveDate};
use color_eyre::Result;
use std::path::Path;
use watch_stats_core::{active_years, DashboardRequest, StatsEngine};

pub struct DashboardOptions {
    pub year: Option<i64>,
    pub limit: Option<i64>,
    pub as_of: Option<NaiveDate>,
    pub concurrent: bool,
}

pub async fn run_overview(engine: &StatsEngine, input: &Path, output: &Output) -> Result<()> {
    let entries = load_entries(input, output).await?;
    let overview = engine.overview(&entries);

    if output.is_human() {
        render::overview(&overview, output);
        Ok(())
    } else {
        output.data(&overview)
    }
}

pub async fn run_heatmap(
    engine: &StatsEngine,
    input: &Path,
    year: Option<i64>,
    output: &Output,
) -> Result<()> {
    let entries = load_entries(input, output).await?;
    let year = match year {
        Some(year) => year,
        None => {
            let config = engine.config();
            let bounds = config.heatmap_min_year..=config.heatmap_max_year;
            let latest = active_years(&entries).into_iter().find(|y| bounds.contains(y));
            i64::from(latest.unwrap_or_else(|| Local::now().year()))
        }
    };
    let heatmap = engine.heatmap(&entries, year)?;

    if output.is_human() {
        render::heatmap(&heatmap, output);
        Ok(())
    } else {
        output.data(&heatmap)
    }
}

pub async fn run_streaks(
    engine: &StatsEngine,
    input: &Path,
    as_of: Option<NaiveDate>,
    output: &Output,
) -> Result<()> {
    let entries = load_entries(input, output).await?;
    let streaks = match as_of {
        Some(today) => engine.streaks_as_of(&entries, today),
        None => engine.streaks(&entries),
    };

    if output.is_human() {
        render::streaks(&streaks, output);
        Ok(())
    } else {
        output.data(&streaks)
    }
}

pub async fn run_people(
    engine: &StatsEngine,
    input: &Path,
    limit: Option<i64>,
    output: &Output,
) -> Result<()> {
    let entries = load_entries(input, output).await?;
    let people = engine.top_people(&entries, limit)?;

    if output.is_human() {
        render::people(&people, output);
        Ok(())
    } else {
        output.data(&people)
    }
}

pub async fn run_dashboard(
    engine: &StatsEngine,
    input: &Path,
    options: DashboardOptions,
    output: &Output,
) -> Result<()> {
    let raw = load_raw_movies(input).await?;

    let mut request = match options.as_of {
        Some(today) => DashboardRequest::new(today),
        None => DashboardRequest::today(),
    };
    request.year = options.year;
    request.limit = options.limit;

    let dashboard = if options.concurrent {
        engine.dashboard_concurrent(&raw, &request).await?
    } else {
        engine.dashboard(&raw, &request)?
    };
    report_skipped(&dashboard.skipped, output);

    if output.is_human() {
        render::overview(&dashboard.overview, output);
        render::heatmap(&dashboard.heatmap, output);
        render::streaks(&dashboard.streaks, output);
        render::people(&dashboard.people, output);
        Ok(())
    } else {
        output.data(&dashboard)
    }
}
