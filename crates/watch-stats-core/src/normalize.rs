// Entry normalizer: shapes raw CRUD records into WatchedEntry / RatedEpisode.
// Records that break an invariant are dropped and counted, never raised.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use watch_stats_models::{
    RatedEpisode, RawEpisodeRecord, RawMovieRecord, RawRecord, SkipReason, SkipReport, WatchedEntry,
};

pub const MAX_RATING: f64 = 5.0;
pub const MAX_VOTE_AVERAGE: f64 = 10.0;

/// Calendar years a watched date may fall in
pub const WATCHED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Number of individual skips logged at debug level before going quiet
const SKIP_LOG_LIMIT: usize = 5;

/// Normalized items of one kind plus the skip counter
#[derive(Debug, Clone)]
pub struct Normalized<T> {
    pub items: Vec<T>,
    pub skipped: SkipReport,
}

/// Result of normalizing a heterogeneous batch
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub entries: Vec<WatchedEntry>,
    pub episodes: Vec<RatedEpisode>,
    pub skipped: SkipReport,
}

/// A rating is valid when it is a multiple of 0.5 within [0, 5]
pub fn is_valid_rating(rating: f64) -> bool {
    rating.is_finite() && (0.0..=MAX_RATING).contains(&rating) && (rating * 2.0).fract() == 0.0
}

/// Parse a watched date: `YYYY-MM-DD`, RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS`.
/// Blank input means "no date"; anything else unparseable, or a date outside
/// years 1..=9999, is an error.
pub fn parse_watched_date(raw: &str) -> Result<Option<NaiveDate>, SkipReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let date = if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        date
    } else if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        // Timestamps keep the calendar day of their own offset
        dt.date_naive()
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        dt.date()
    } else {
        return Err(SkipReason::InvalidDate);
    };

    if !WATCHED_YEARS.contains(&date.year()) {
        return Err(SkipReason::InvalidDate);
    }
    Ok(Some(date))
}

fn clean_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

fn clean_genres(genres: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    clean_names(genres)
        .into_iter()
        .filter(|g| seen.insert(g.clone()))
        .collect()
}

/// Validate and shape a single movie record
pub fn normalize_movie(raw: &RawMovieRecord) -> Result<WatchedEntry, SkipReason> {
    let id = raw.id_string().ok_or(SkipReason::MissingId)?;
    if !raw.invalid_fields.is_empty() {
        return Err(SkipReason::InvalidNumber);
    }

    let my_rating = raw.my_rating.ok_or(SkipReason::MissingRating)?;
    if !is_valid_rating(my_rating) {
        return Err(SkipReason::RatingOutOfRange);
    }

    let watched_date = match raw.watched_date.as_deref() {
        Some(s) => parse_watched_date(s)?,
        None => None,
    };

    let runtime_minutes = match raw.runtime_minutes {
        Some(minutes) if minutes < 0 => return Err(SkipReason::NegativeRuntime),
        Some(minutes) => u32::try_from(minutes).unwrap_or(u32::MAX),
        None => 0,
    };

    // Years outside i32 are treated as unknown rather than rejected
    let release_year = raw.release_year.and_then(|y| i32::try_from(y).ok());

    Ok(WatchedEntry {
        id,
        title: raw.title.as_deref().unwrap_or("").trim().to_string(),
        genres: clean_genres(&raw.genres),
        release_year,
        watched_date,
        my_rating,
        runtime_minutes,
        directors: clean_names(&raw.directors),
        actors: clean_names(&raw.actors),
    })
}

/// Validate and shape a single episode record
pub fn normalize_episode(raw: &RawEpisodeRecord) -> Result<RatedEpisode, SkipReason> {
    if !raw.invalid_fields.is_empty() {
        return Err(SkipReason::InvalidEpisodeKey);
    }
    let (show_id, season, episode) = match (raw.show_id, raw.season_number, raw.episode_number) {
        (Some(show), Some(season), Some(episode)) => (show, season, episode),
        _ => return Err(SkipReason::MissingEpisodeKey),
    };

    let show_id = u64::try_from(show_id).map_err(|_| SkipReason::InvalidEpisodeKey)?;
    let season_number = u32::try_from(season).map_err(|_| SkipReason::InvalidEpisodeKey)?;
    let episode_number = u32::try_from(episode).map_err(|_| SkipReason::InvalidEpisodeKey)?;

    let vote_average = raw.vote_average.ok_or(SkipReason::MissingVoteAverage)?;
    if !vote_average.is_finite() || !(0.0..=MAX_VOTE_AVERAGE).contains(&vote_average) {
        return Err(SkipReason::VoteAverageOutOfRange);
    }

    let episode = RatedEpisode::new(show_id, season_number, episode_number, vote_average);
    Ok(match raw.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => episode.with_name(name),
        _ => episode,
    })
}

fn log_skip(skipped: &SkipReport, kind: &str, index: usize, reason: SkipReason) {
    if skipped.skipped <= SKIP_LOG_LIMIT {
        debug!("normalize: skipping {} record #{} ({})", kind, index, reason);
    }
}

fn log_summary(kind: &str, kept: usize, skipped: &SkipReport) {
    if skipped.is_empty() {
        info!("Normalized {} {} records", kept, kind);
    } else {
        warn!(
            "Normalized {} {} records, skipped {} malformed: {:?}",
            kept, kind, skipped.skipped, skipped.by_reason
        );
    }
}

/// Normalize movie records; the first record wins on duplicate ids
pub fn normalize_movies(raw: &[RawMovieRecord]) -> Normalized<WatchedEntry> {
    let mut items = Vec::with_capacity(raw.len());
    let mut skipped = SkipReport::default();
    let mut seen_ids = HashSet::new();

    for (index, record) in raw.iter().enumerate() {
        let result = normalize_movie(record).and_then(|entry| {
            if seen_ids.insert(entry.id.clone()) {
                Ok(entry)
            } else {
                Err(SkipReason::DuplicateId)
            }
        });

        match result {
            Ok(entry) => items.push(entry),
            Err(reason) => {
                skipped.record(reason);
                log_skip(&skipped, "movie", index, reason);
            }
        }
    }

    log_summary("movie", items.len(), &skipped);
    Normalized { items, skipped }
}

/// Normalize episode records; the first record wins on a duplicate
/// (show, season, episode) key
pub fn normalize_episodes(raw: &[RawEpisodeRecord]) -> Normalized<RatedEpisode> {
    let mut items = Vec::with_capacity(raw.len());
    let mut skipped = SkipReport::default();
    let mut seen_keys = HashSet::new();

    for (index, record) in raw.iter().enumerate() {
        let result = normalize_episode(record).and_then(|episode| {
            let key = (episode.show_id, episode.season_number, episode.episode_number);
            if seen_keys.insert(key) {
                Ok(episode)
            } else {
                Err(SkipReason::DuplicateEpisode)
            }
        });

        match result {
            Ok(episode) => items.push(episode),
            Err(reason) => {
                skipped.record(reason);
                log_skip(&skipped, "episode", index, reason);
            }
        }
    }

    log_summary("episode", items.len(), &skipped);
    Normalized { items, skipped }
}

/// Split a heterogeneous batch by kind and normalize both halves
pub fn normalize_records(raw: &[RawRecord]) -> NormalizedBatch {
    let mut movies = Vec::new();
    let mut episodes = Vec::new();
    for record in raw {
        match record {
            RawRecord::Movie(movie) => movies.push(movie.clone()),
            RawRecord::Episode(episode) => episodes.push(episode.clone()),
        }
    }

    let movies = normalize_movies(&movies);
    let episodes = normalize_episodes(&episodes);

    let mut skipped = movies.skipped;
    skipped.merge(&episodes.skipped);

    NormalizedBatch {
        entries: movies.items,
        episodes: episodes.items,
        skipped,
    }
}
