// Reading history exports into raw records. Only structural problems (bad
// JSON, missing required CSV columns) fail here; row-level validation is
// left to the normalizer.

use anyhow::{anyhow, Context, Result};
use csv::Reader;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};
use watch_stats_models::{RawEpisodeRecord, RawMovieRecord, RawRecord};

/// Separator for list cells (genres, directors, actors) in CSV exports
pub const LIST_SEPARATOR: char = '|';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "json" => Ok(ImportFormat::Json),
            "csv" => Ok(ImportFormat::Csv),
            other => Err(anyhow!(
                "Unsupported import format '{}' for {}. Use a .json or .csv file",
                other,
                path.display()
            )),
        }
    }
}

/// Parse export content in the given format
pub fn parse_records(content: &str, format: ImportFormat) -> Result<Vec<RawRecord>> {
    match format {
        ImportFormat::Json => parse_json_records(content),
        ImportFormat::Csv => parse_csv_records(content.as_bytes()),
    }
}

/// Read and parse an export file, picking the format from its extension
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let format = ImportFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_records(&content, format).with_context(|| format!("Failed to import {}", path.display()))
}

/// Split records by kind
pub fn split_records(records: Vec<RawRecord>) -> (Vec<RawMovieRecord>, Vec<RawEpisodeRecord>) {
    let mut movies = Vec::new();
    let mut episodes = Vec::new();
    for record in records {
        match record {
            RawRecord::Movie(movie) => movies.push(movie),
            RawRecord::Episode(episode) => episodes.push(episode),
        }
    }
    (movies, episodes)
}

/// JSON array whose elements are `kind`-tagged records, or untagged movie /
/// episode records (an element with a `showId` is an episode)
pub fn parse_json_records(content: &str) -> Result<Vec<RawRecord>> {
    let value: Value = serde_json::from_str(content).context("Invalid JSON")?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(anyhow!("Expected a JSON array of records")),
    };

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let record = if item.get("kind").is_some() {
            serde_json::from_value::<RawRecord>(item)
        } else if item.get("showId").is_some() {
            serde_json::from_value::<RawEpisodeRecord>(item).map(RawRecord::Episode)
        } else {
            serde_json::from_value::<RawMovieRecord>(item).map(RawRecord::Movie)
        };
        let record = record.with_context(|| format!("Invalid record at index {}", index))?;
        records.push(record);
    }

    info!("Parsed {} JSON records", records.len());
    Ok(records)
}

/// Lowercase, drop separators: "Release Year", "release_year" and
/// "releaseYear" all become "releaseyear"
fn header_key(header: &str) -> String {
    header
        .chars()
        .filter(|c| !matches!(c, '_' | ' ' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn cell<'a>(record: &'a csv::StringRecord, columns: &HashMap<String, usize>, key: &str) -> Option<&'a str> {
    columns
        .get(key)
        .and_then(|i| record.get(*i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn list_cell(record: &csv::StringRecord, columns: &HashMap<String, usize>, key: &str) -> Vec<String> {
    cell(record, columns, key)
        .map(|s| s.split(LIST_SEPARATOR).map(|p| p.trim().to_string()).collect())
        .unwrap_or_default()
}

/// Present but unparseable integers are recorded in `invalid` so the
/// normalizer can reject the row
fn int_cell(
    record: &csv::StringRecord,
    columns: &HashMap<String, usize>,
    key: &str,
    invalid: &mut Vec<String>,
) -> Option<i64> {
    let raw = cell(record, columns, key)?;
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            invalid.push(key.to_string());
            None
        }
    }
}

/// Present but unparseable numbers become NaN so the normalizer reports
/// them as out of range instead of missing
fn float_cell(record: &csv::StringRecord, columns: &HashMap<String, usize>, key: &str) -> Option<f64> {
    cell(record, columns, key).map(|s| s.parse::<f64>().unwrap_or(f64::NAN))
}

fn require_columns(columns: &HashMap<String, usize>, required: &[&str], available: &[String]) -> Result<()> {
    for col in required {
        if !columns.contains_key(*col) {
            return Err(anyhow!(
                "Missing required column: {}. Available columns: {:?}",
                col,
                available
            ));
        }
    }
    Ok(())
}

/// CSV with either the movie layout (id, title, genres, releaseYear,
/// watchedDate, myRating, runtimeMinutes, directors, actors) or the episode
/// layout (showId, seasonNumber, episodeNumber, name, voteAverage)
pub fn parse_csv_records<R: Read>(input: R) -> Result<Vec<RawRecord>> {
    let mut reader = Reader::from_reader(input);

    let headers = reader.headers()?.clone();
    let available: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (header_key(h), i))
        .collect();
    debug!("Available CSV columns: {:?}", available);

    let episodes = columns.contains_key("showid");
    if episodes {
        require_columns(&columns, &["showid", "seasonnumber", "episodenumber", "voteaverage"], &available)?;
    } else {
        require_columns(&columns, &["id", "myrating"], &available)?;
    }

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable CSV row {}: {}", row + 1, e);
                continue;
            }
        };

        let mut invalid = Vec::new();
        let parsed = if episodes {
            RawRecord::Episode(RawEpisodeRecord {
                show_id: int_cell(&record, &columns, "showid", &mut invalid),
                season_number: int_cell(&record, &columns, "seasonnumber", &mut invalid),
                episode_number: int_cell(&record, &columns, "episodenumber", &mut invalid),
                name: cell(&record, &columns, "name").map(str::to_string),
                vote_average: float_cell(&record, &columns, "voteaverage"),
                invalid_fields: invalid,
            })
        } else {
            RawRecord::Movie(RawMovieRecord {
                id: cell(&record, &columns, "id").map(Value::from),
                title: cell(&record, &columns, "title").map(str::to_string),
                genres: list_cell(&record, &columns, "genres"),
                release_year: int_cell(&record, &columns, "releaseyear", &mut invalid),
                watched_date: cell(&record, &columns, "watcheddate").map(str::to_string),
                my_rating: float_cell(&record, &columns, "myrating"),
                runtime_minutes: int_cell(&record, &columns, "runtimeminutes", &mut invalid),
                directors: list_cell(&record, &columns, "directors"),
                actors: list_cell(&record, &columns, "actors"),
                invalid_fields: invalid,
            })
        };

        if row < 3 {
            debug!(row = row + 1, "Parsed CSV row: {:?}", parsed);
        }
        records.push(parsed);
    }

    info!(
        "Parsed {} CSV {} rows",
        records.len(),
        if episodes { "episode" } else { "movie" }
    );
    Ok(records)
}
