pub mod credits;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod import;
pub mod normalize;
pub mod numeric;
pub mod shows;
pub mod streak;
pub mod temporal;

pub use credits::{full_ranking, rank_people, CreditRole};
pub use distribution::{decade_label, decade_rollup, genre_rollup, rating_histogram, summarize};
pub use engine::{build_overview, build_people, DashboardRequest, StatsEngine};
pub use error::{AnalyticsError, Result};
pub use import::{load_records, parse_records, split_records, ImportFormat};
pub use normalize::{normalize_episodes, normalize_movies, normalize_records, Normalized, NormalizedBatch};
pub use shows::{classify_trend, show_analytics, DEFAULT_TREND_THRESHOLD};
pub use streak::{streak_stats, week_start};
pub use temporal::{active_years, annual_heatmap, days_of_year, monthly_timeline};
