use crate::output::Output;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::path::Path;
use watch_stats_core::{normalize_episodes, normalize_movies, parse_records, split_records, ImportFormat};
use watch_stats_models::{RatedEpisode, RawEpisodeRecord, RawMovieRecord, SkipReport, WatchedEntry};

async fn read_export(path: &Path) -> Result<(Vec<RawMovieRecord>, Vec<RawEpisodeRecord>)> {
    let format = ImportFormat::from_path(path).map_err(|e| eyre!("{}", e))?;
    let content = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let records = parse_records(&content, format)
        .map_err(|e| eyre!("Failed to import {}: {:#}", path.display(), e))?;
    Ok(split_records(records))
}

pub fn report_skipped(skipped: &SkipReport, output: &Output) {
    if skipped.is_empty() {
        return;
    }
    let reasons: Vec<String> = skipped
        .by_reason
        .iter()
        .map(|(reason, count)| format!("{} {}", count, reason))
        .collect();
    output.warn(format!(
        "Skipped {} malformed records ({})",
        skipped.skipped,
        reasons.join(", ")
    ));
}

/// Raw movie records, for callers that hand normalization to the engine
pub async fn load_raw_movies(path: &Path) -> Result<Vec<RawMovieRecord>> {
    let (movies, episodes) = read_export(path).await?;
    if !episodes.is_empty() {
        tracing::debug!("Ignoring {} episode records in {}", episodes.len(), path.display());
    }
    Ok(movies)
}

pub async fn load_entries(path: &Path, output: &Output) -> Result<Vec<WatchedEntry>> {
    let movies = load_raw_movies(path).await?;
    let normalized = normalize_movies(&movies);
    report_skipped(&normalized.skipped, output);
    Ok(normalized.items)
}

pub async fn load_episodes(path: &Path, output: &Output) -> Result<Vec<RatedEpisode>> {
    let (movies, episodes) = read_export(path).await?;
    if !movies.is_empty() {
        tracing::debug!("Ignoring {} movie records in {}", movies.len(), path.display());
    }
    let normalized = normalize_episodes(&episodes);
    report_skipped(&normalized.skipped, output);
    Ok(normalized.items)
}
