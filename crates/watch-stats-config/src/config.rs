use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Season-average difference (0-10 scale) above which a show counts as
/// improving or declining
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.3;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalyticsConfig {
    #[serde(default = "default_trend_threshold")]
    pub trend_threshold: f64,

    // Top-N people rankings
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,

    // Accepted heatmap years (1-4 digit years)
    #[serde(default = "default_heatmap_min_year")]
    pub heatmap_min_year: i32,
    #[serde(default = "default_heatmap_max_year")]
    pub heatmap_max_year: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json_logging")]
    pub json: bool,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_trend_threshold() -> f64 {
    DEFAULT_TREND_THRESHOLD
}

fn default_top_n() -> usize {
    5
}

fn default_max_top_n() -> usize {
    100
}

fn default_heatmap_min_year() -> i32 {
    1
}

fn default_heatmap_max_year() -> i32 {
    9999
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json_logging() -> bool {
    use std::io::IsTerminal;
    !std::io::stdout().is_terminal()
}

pub fn default_analytics_config() -> AnalyticsConfig {
    AnalyticsConfig {
        trend_threshold: default_trend_threshold(),
        default_top_n: default_top_n(),
        max_top_n: default_max_top_n(),
        heatmap_min_year: default_heatmap_min_year(),
        heatmap_max_year: default_heatmap_max_year(),
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        default_analytics_config()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json_logging(),
            file: None,
        }
    }
}

impl AnalyticsConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.trend_threshold.is_finite() || self.trend_threshold < 0.0 {
            return Err(anyhow::anyhow!(
                "trend_threshold must be a non-negative number, got {}",
                self.trend_threshold
            ));
        }

        if self.max_top_n == 0 {
            return Err(anyhow::anyhow!("max_top_n must be at least 1"));
        }

        if self.default_top_n == 0 || self.default_top_n > self.max_top_n {
            return Err(anyhow::anyhow!(
                "default_top_n must be between 1 and max_top_n ({}), got {}",
                self.max_top_n,
                self.default_top_n
            ));
        }

        if self.heatmap_min_year < 1 || self.heatmap_max_year > 9999 {
            return Err(anyhow::anyhow!(
                "heatmap year bounds must stay within 1..=9999, got {}..={}",
                self.heatmap_min_year,
                self.heatmap_max_year
            ));
        }

        if self.heatmap_min_year > self.heatmap_max_year {
            return Err(anyhow::anyhow!(
                "heatmap_min_year ({}) is greater than heatmap_max_year ({})",
                self.heatmap_min_year,
                self.heatmap_max_year
            ));
        }

        Ok(())
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            Self::load_from_file(path)
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.analytics.validate()?;

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(anyhow::anyhow!("Invalid log level: {}", self.logging.level));
        }

        Ok(())
    }
}
