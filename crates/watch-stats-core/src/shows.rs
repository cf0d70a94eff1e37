// Show analytics: per-show episode statistics and season quality trend.

use crate::numeric::{round_half_up, RatingAccumulator};
use std::collections::BTreeMap;
use tracing::debug;
use watch_stats_models::{EpisodeSummary, RatedEpisode, SeasonAverage, ShowAnalytics, Trend};

pub use watch_stats_config::DEFAULT_TREND_THRESHOLD;

/// Absorbs binary float error so a difference of exactly the threshold
/// classifies the same at every rating level
const TREND_EPSILON: f64 = 1e-9;

fn summary(episode: &RatedEpisode) -> EpisodeSummary {
    EpisodeSummary {
        season_number: episode.season_number,
        episode_number: episode.episode_number,
        name: episode.name.clone(),
        vote_average: episode.vote_average,
    }
}

/// Per-season averages, ascending by season number
pub fn season_averages(episodes: &[&RatedEpisode]) -> Vec<SeasonAverage> {
    let mut seasons: BTreeMap<u32, RatingAccumulator> = BTreeMap::new();
    for episode in episodes {
        seasons
            .entry(episode.season_number)
            .or_default()
            .push(episode.vote_average);
    }

    seasons
        .into_iter()
        .map(|(season_number, acc)| SeasonAverage {
            season_number,
            average_rating: acc.rounded_mean(2),
            episode_count: acc.count(),
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    let mut acc = RatingAccumulator::default();
    values.iter().for_each(|v| acc.push(*v));
    acc.mean()
}

/// Compare the earlier half of the season averages with the later half.
///
/// With an odd season count the middle season belongs to the later half.
/// Fewer than two seasons is always stable, and so is a difference of
/// exactly `threshold`.
pub fn classify_trend(seasons: &[SeasonAverage], threshold: f64) -> Trend {
    if seasons.len() < 2 {
        return Trend::Stable;
    }

    let averages: Vec<f64> = seasons.iter().map(|s| s.average_rating).collect();
    let (earlier, later) = averages.split_at(averages.len() / 2);
    let difference = mean(later) - mean(earlier);
    let margin = threshold + TREND_EPSILON;

    if difference > margin {
        Trend::Improving
    } else if -difference > margin {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Statistics for one show. Rows belonging to other shows are ignored;
/// a show without episodes gets the "no data" result.
pub fn show_analytics(show_id: u64, episodes: &[RatedEpisode], threshold: f64) -> ShowAnalytics {
    let mut rows: Vec<&RatedEpisode> = episodes.iter().filter(|e| e.show_id == show_id).collect();

    let foreign = episodes.len() - rows.len();
    if foreign > 0 {
        debug!("show_analytics: ignoring {} episodes of other shows", foreign);
    }

    if rows.is_empty() {
        debug!("show_analytics: no episodes for show {}", show_id);
        return ShowAnalytics::no_data(show_id);
    }

    // Earliest episode first, so strict comparisons keep the earliest on ties
    rows.sort_by_key(|e| e.position());

    let mut overall = RatingAccumulator::default();
    let mut best = rows[0];
    let mut worst = rows[0];
    for &episode in &rows {
        overall.push(episode.vote_average);
        if episode.vote_average > best.vote_average {
            best = episode;
        }
        if episode.vote_average < worst.vote_average {
            worst = episode;
        }
    }

    let seasons = season_averages(&rows);
    let trend = classify_trend(&seasons, threshold);

    ShowAnalytics {
        show_id,
        total_episodes: overall.count(),
        average_rating: round_half_up(overall.mean(), 2),
        best_episode: Some(summary(best)),
        worst_episode: Some(summary(worst)),
        trend,
        season_averages: seasons,
    }
}
