use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Why the normalizer dropped a raw record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingId,
    DuplicateId,
    MissingRating,
    RatingOutOfRange,
    InvalidDate,
    NegativeRuntime,
    InvalidNumber,
    MissingEpisodeKey,
    InvalidEpisodeKey,
    MissingVoteAverage,
    VoteAverageOutOfRange,
    DuplicateEpisode,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::MissingId => "missing id",
            SkipReason::DuplicateId => "duplicate id",
            SkipReason::MissingRating => "missing rating",
            SkipReason::RatingOutOfRange => "rating out of range",
            SkipReason::InvalidDate => "invalid watched date",
            SkipReason::NegativeRuntime => "negative runtime",
            SkipReason::InvalidNumber => "unparseable number",
            SkipReason::MissingEpisodeKey => "missing show/season/episode number",
            SkipReason::InvalidEpisodeKey => "invalid show/season/episode number",
            SkipReason::MissingVoteAverage => "missing vote average",
            SkipReason::VoteAverageOutOfRange => "vote average out of range",
            SkipReason::DuplicateEpisode => "duplicate episode",
        };
        write!(f, "{}", label)
    }
}

/// Counter of excluded records, returned next to every normalized batch
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkipReport {
    pub skipped: usize,
    pub by_reason: BTreeMap<SkipReason, usize>,
}

impl SkipReport {
    pub fn record(&mut self, reason: SkipReason) {
        self.skipped += 1;
        *self.by_reason.entry(reason).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: &SkipReport) {
        self.skipped += other.skipped;
        for (reason, count) in &other.by_reason {
            *self.by_reason.entry(*reason).or_insert(0) += count;
        }
    }

    pub fn count(&self, reason: SkipReason) -> usize {
        self.by_reason.get(&reason).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.skipped == 0
    }
}
