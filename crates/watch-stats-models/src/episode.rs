use serde::{Deserialize, Serialize};

/// Community rating of a single TV episode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatedEpisode {
    pub show_id: u64,
    pub season_number: u32,
    pub episode_number: u32,
    #[serde(default)]
    pub name: String,
    pub vote_average: f64, // 0-10 scale
}

impl RatedEpisode {
    pub fn new(show_id: u64, season_number: u32, episode_number: u32, vote_average: f64) -> Self {
        Self {
            show_id,
            season_number,
            episode_number,
            name: format!("S{:02}E{:02}", season_number, episode_number),
            vote_average,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sort key used for tie-breaking: earliest episode first
    pub fn position(&self) -> (u32, u32) {
        (self.season_number, self.episode_number)
    }
}
