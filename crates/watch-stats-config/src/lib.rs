pub mod config;
pub mod paths;

pub use config::{AnalyticsConfig, Config, LoggingConfig, DEFAULT_TREND_THRESHOLD, default_analytics_config};
pub use paths::{PathManager, container_base_path};
