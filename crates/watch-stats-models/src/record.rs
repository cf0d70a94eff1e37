// Raw records as handed over by the CRUD layer or read from an export file.
// Nothing here is validated; the normalizer turns these into WatchedEntry /
// RatedEpisode and counts whatever it has to drop.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawMovieRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<Value>, // String or number, depending on the exporter
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub release_year: Option<i64>,
    #[serde(default)]
    pub watched_date: Option<String>, // YYYY-MM-DD or RFC 3339
    #[serde(default)]
    pub my_rating: Option<f64>,
    #[serde(default)]
    pub runtime_minutes: Option<i64>,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    /// Numeric cells that were present but unparseable (CSV import only)
    #[serde(skip)]
    pub invalid_fields: Vec<String>,
}

impl RawMovieRecord {
    /// The id rendered as a string, if it is a non-empty string or a number
    pub fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawEpisodeRecord {
    #[serde(default)]
    pub show_id: Option<i64>,
    #[serde(default)]
    pub season_number: Option<i64>,
    #[serde(default)]
    pub episode_number: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Numeric cells that were present but unparseable (CSV import only)
    #[serde(skip)]
    pub invalid_fields: Vec<String>,
}

/// Heterogeneous input: either kind of record, tagged by `kind`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawRecord {
    Movie(RawMovieRecord),
    Episode(RawEpisodeRecord),
}
