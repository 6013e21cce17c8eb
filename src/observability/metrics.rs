//! Metrics collection.
//!
//! # Metrics
//! - `cep_race_source_requests_total` (counter): fetches by source and result
//! - `cep_race_source_duration_seconds` (histogram): per-source fetch latency
//! - `cep_race_outcomes_total` (counter): race outcomes by kind
//! - `cep_race_late_results_total` (counter): results that arrived after the race was decided
//!
//! # Design Decisions
//! - Recording is switched per coordinator, not per process
//! - Metrics go to whatever recorder is installed; none is installed here

use std::time::Duration;

use metrics::{counter, histogram};

/// Metric sink owned by a race coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceMetrics {
    enabled: bool,
}

impl RaceMetrics {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record one finished fetch. `result` is `"ok"` or a `FetchError::kind` label.
    pub fn record_fetch(&self, source: &str, result: &'static str, elapsed: Duration) {
        if !self.enabled {
            return;
        }
        counter!("cep_race_source_requests_total", "source" => source.to_string(), "result" => result)
            .increment(1);
        histogram!("cep_race_source_duration_seconds", "source" => source.to_string())
            .record(elapsed.as_secs_f64());
    }

    /// Record the terminal outcome of a race.
    pub fn record_outcome(&self, outcome: &'static str) {
        if !self.enabled {
            return;
        }
        counter!("cep_race_outcomes_total", "outcome" => outcome).increment(1);
    }

    /// Record a result delivered after its race was already decided.
    pub fn record_late_result(&self, source: &str) {
        if !self.enabled {
            return;
        }
        counter!("cep_race_late_results_total", "source" => source.to_string()).increment(1);
    }
}

impl Default for RaceMetrics {
    fn default() -> Self {
        Self::new(true)
    }
}
