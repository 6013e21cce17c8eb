//! Race outcomes.

use std::time::Duration;

use crate::source::{FetchError, Record};

/// A source that dropped out of the race, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source_id: String,
    pub error: FetchError,
}

/// Terminal result of one race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// First successful fetch.
    Won {
        source_id: String,
        record: Record,
        /// Time from race start to the winning report.
        elapsed: Duration,
    },
    /// Global deadline fired before any source succeeded.
    TimedOut { elapsed: Duration },
    /// Every source failed before the deadline, in the order they failed.
    AllFailed { failures: Vec<SourceFailure> },
}

impl Outcome {
    /// Static label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Won { .. } => "won",
            Outcome::TimedOut { .. } => "timed_out",
            Outcome::AllFailed { .. } => "all_failed",
        }
    }

    pub fn is_won(&self) -> bool {
        matches!(self, Outcome::Won { .. })
    }

    /// The winning record, if any.
    pub fn record(&self) -> Option<&Record> {
        match self {
            Outcome::Won { record, .. } => Some(record),
            _ => None,
        }
    }
}
