// Distribution aggregator: rating histogram, genre and decade rollups.

use crate::numeric::{round_half_up, RatingAccumulator};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;
use watch_stats_models::{DecadeStat, GenreStat, RatingHistogram, WatchSummary, WatchedEntry};

/// Count entries per half-star bucket. All ten buckets are always present.
///
/// A 0.0 rating is a valid entry but has no bucket, so it is not counted.
pub fn rating_histogram(entries: &[WatchedEntry]) -> RatingHistogram {
    let mut histogram = RatingHistogram::default();
    let mut unbucketed = 0usize;

    for entry in entries {
        if !histogram.increment(entry.my_rating) {
            unbucketed += 1;
        }
    }

    if unbucketed > 0 {
        debug!("rating_histogram: {} entries outside bucket range", unbucketed);
    }
    histogram
}

/// Group by genre; an entry with N genres lands in N groups.
/// Ordered by count descending, then genre name ascending.
pub fn genre_rollup(entries: &[WatchedEntry]) -> Vec<GenreStat> {
    let mut groups: HashMap<&str, RatingAccumulator> = HashMap::new();

    for entry in entries {
        for genre in &entry.genres {
            groups.entry(genre.as_str()).or_default().push(entry.my_rating);
        }
    }

    let mut stats: Vec<GenreStat> = groups
        .into_iter()
        .map(|(genre, acc)| GenreStat {
            genre: genre.to_string(),
            count: acc.count(),
            avg_rating: acc.rounded_mean(1),
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));
    stats
}

/// Decade start for a release year, flooring towards negative infinity
pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

pub fn decade_label(year: i32) -> String {
    format!("{}s", decade_of(year))
}

/// Group by release decade; entries without a release year are left out.
/// Ordered by decade ascending.
pub fn decade_rollup(entries: &[WatchedEntry]) -> Vec<DecadeStat> {
    let mut groups: BTreeMap<i32, (RatingAccumulator, u64)> = BTreeMap::new();

    for entry in entries {
        let Some(year) = entry.release_year else {
            continue;
        };
        let (acc, runtime) = groups.entry(decade_of(year)).or_default();
        acc.push(entry.my_rating);
        *runtime += u64::from(entry.runtime_minutes);
    }

    groups
        .into_iter()
        .map(|(decade, (acc, runtime))| DecadeStat {
            decade: format!("{}s", decade),
            count: acc.count(),
            avg_rating: acc.rounded_mean(1),
            total_runtime: runtime,
        })
        .collect()
}

/// Headline counters for the whole history
pub fn summarize(entries: &[WatchedEntry]) -> WatchSummary {
    let mut ratings = RatingAccumulator::default();
    let mut runtime: u64 = 0;
    let mut dated: u32 = 0;
    let mut genres: HashSet<&str> = HashSet::new();

    for entry in entries {
        ratings.push(entry.my_rating);
        runtime += u64::from(entry.runtime_minutes);
        if entry.watched_date.is_some() {
            dated += 1;
        }
        genres.extend(entry.genres.iter().map(String::as_str));
    }

    WatchSummary {
        total_entries: ratings.count(),
        dated_entries: dated,
        average_rating: ratings.rounded_mean(2),
        total_runtime_minutes: runtime,
        total_hours: round_half_up(runtime as f64 / 60.0, 1),
        distinct_genres: genres.len() as u32,
    }
}
