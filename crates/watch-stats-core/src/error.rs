use thiserror::Error;

/// Request-parameter failures surfaced to callers of the engine.
///
/// Malformed records and empty inputs never produce one of these; they
/// degrade to skip counters and zero-valued results instead.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("invalid limit {limit}: must be between 1 and {max}")]
    InvalidLimit { limit: i64, max: usize },

    #[error("invalid year {year}: must be between {min} and {max}")]
    InvalidYear { year: i64, min: i32, max: i32 },

    #[error("invalid trend threshold {0}: must be a non-negative number")]
    InvalidThreshold(f64),

    #[error("aggregation task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
