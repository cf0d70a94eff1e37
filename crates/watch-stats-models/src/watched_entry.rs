use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One logged watch of a movie, already validated by the normalizer.
///
/// `my_rating` is always a multiple of 0.5 within [0, 5]. Entries without a
/// `watched_date` still count towards distribution and credit aggregates but
/// are left out of every temporal aggregate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchedEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>, // Deduplicated, first occurrence order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watched_date: Option<NaiveDate>,
    pub my_rating: f64,
    #[serde(default)]
    pub runtime_minutes: u32,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub actors: Vec<String>,
}

impl WatchedEntry {
    /// Minimal entry used by callers that only care about rating and date
    pub fn new(id: impl Into<String>, title: impl Into<String>, my_rating: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            genres: Vec::new(),
            release_year: None,
            watched_date: None,
            my_rating,
            runtime_minutes: 0,
            directors: Vec::new(),
            actors: Vec::new(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.watched_date = Some(date);
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_release_year(mut self, year: i32) -> Self {
        self.release_year = Some(year);
        self
    }

    pub fn with_runtime(mut self, minutes: u32) -> Self {
        self.runtime_minutes = minutes;
        self
    }

    pub fn with_directors<I, S>(mut self, directors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directors = directors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_actors<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actors = actors.into_iter().map(Into::into).collect();
        self
    }

    /// (year, month) of the watch, if dated
    pub fn watched_month(&self) -> Option<(i32, u32)> {
        self.watched_date.map(|d| (d.year(), d.month()))
    }
}
