use serde::{Deserialize, Serialize};
use std::fmt;

/// Season-over-season quality direction of a show
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    #[default]
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Declining => write!(f, "declining"),
            Trend::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSummary {
    pub season_number: u32,
    pub episode_number: u32,
    pub name: String,
    pub vote_average: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeasonAverage {
    pub season_number: u32,
    pub average_rating: f64,
    pub episode_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShowAnalytics {
    pub show_id: u64,
    pub total_episodes: u32,
    pub average_rating: f64,
    pub best_episode: Option<EpisodeSummary>,
    pub worst_episode: Option<EpisodeSummary>,
    pub trend: Trend,
    pub season_averages: Vec<SeasonAverage>,
}

impl ShowAnalytics {
    /// Result for a show without any rated episodes
    pub fn no_data(show_id: u64) -> Self {
        Self {
            show_id,
            total_episodes: 0,
            average_rating: 0.0,
            best_episode: None,
            worst_episode: None,
            trend: Trend::Stable,
            season_averages: Vec::new(),
        }
    }

    pub fn has_data(&self) -> bool {
        self.total_episodes > 0
    }
}
