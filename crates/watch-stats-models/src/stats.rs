// Response shapes consumed verbatim by the UI. Field names are part of the
// contract, hence the camelCase renames.

use serde::{Deserialize, Serialize};
use crate::skip::SkipReport;
use std::collections::BTreeMap;

/// Histogram buckets, 0.5 to 5.0 in half-star steps
pub const RATING_BUCKETS: [f64; 10] = [0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0];

/// Rating → count, keyed by the rating formatted to one decimal ("4.5").
/// All ten buckets are always present.
///
/// There is no 0.0 bucket. A 0.0 rating is valid, but it is not counted
/// here, so [`RatingHistogram::total`] equals the number of entries rated
/// 0.5 or higher. That matches the entry count only when no entry is rated
/// 0.0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RatingHistogram(BTreeMap<String, u32>);

impl RatingHistogram {
    pub fn bucket_key(rating: f64) -> String {
        format!("{:.1}", rating)
    }

    pub fn get(&self, rating: f64) -> u32 {
        self.0.get(&Self::bucket_key(rating)).copied().unwrap_or(0)
    }

    /// Increment the bucket for `rating`; returns false if no bucket matches
    pub fn increment(&mut self, rating: f64) -> bool {
        match self.0.get_mut(&Self::bucket_key(rating)) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&String, &u32)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RatingHistogram {
    fn default() -> Self {
        Self(
            RATING_BUCKETS
                .iter()
                .map(|r| (Self::bucket_key(*r), 0))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenreStat {
    pub genre: String,
    pub count: u32,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecadeStat {
    pub decade: String, // "1990s"
    pub count: u32,
    pub avg_rating: f64,
    pub total_runtime: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub count: u32,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayStats {
    pub count: u32,
    pub avg_rating: f64,
}

/// Daily activity for one calendar year. Days without activity are absent
/// from `days`; absence means zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Heatmap {
    pub year: i32,
    pub days: BTreeMap<String, DayStats>, // "YYYY-MM-DD"
    pub max_count: u32,
    pub total_count: u32,
}

impl Heatmap {
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            days: BTreeMap::new(),
            max_count: 0,
            total_count: 0,
        }
    }

    pub fn count_on(&self, date: &str) -> u32 {
        self.days.get(date).map(|d| d.count).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub avg_movies_per_month: f64,
    pub days_since_last_watch: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonStat {
    pub name: String,
    pub count: u32,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PeopleRanking {
    pub directors: Vec<PersonStat>,
    pub actors: Vec<PersonStat>,
}

/// Headline counters shown above the charts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchSummary {
    pub total_entries: u32,
    pub dated_entries: u32,
    pub average_rating: f64,
    pub total_runtime_minutes: u64,
    pub total_hours: f64,
    pub distinct_genres: u32,
}

/// Everything the stats page renders from the watch history alone
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub summary: WatchSummary,
    pub rating_distribution: RatingHistogram,
    pub genres: Vec<GenreStat>,
    pub decades: Vec<DecadeStat>,
    pub timeline: Vec<MonthlyBucket>,
    pub active_years: Vec<i32>,
}

/// Combined payload: overview, one heatmap year, streaks, people rankings
/// and the count of records the normalizer dropped
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub overview: Overview,
    pub heatmap: Heatmap,
    pub streaks: StreakStats,
    pub people: PeopleRanking,
    pub skipped: SkipReport,
}
