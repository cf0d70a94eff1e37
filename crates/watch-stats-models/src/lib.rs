pub mod episode;
pub mod record;
pub mod show;
pub mod skip;
pub mod stats;
pub mod watched_entry;

pub use episode::RatedEpisode;
pub use record::{RawEpisodeRecord, RawMovieRecord, RawRecord};
pub use show::{EpisodeSummary, SeasonAverage, ShowAnalytics, Trend};
pub use skip::{SkipReason, SkipReport};
pub use stats::{
    Dashboard, DayStats, DecadeStat, GenreStat, Heatmap, MonthlyBucket, Overview, PeopleRanking,
    PersonStat, RatingHistogram, StreakStats, WatchSummary, RATING_BUCKETS,
};
pub use watched_entry::WatchedEntry;
