//! Race coordinator.
//!
//! # Responsibilities
//! - Start one independent task per data source
//! - Enforce each source's own timeout inside its task
//! - Resolve to the first success, to `AllFailed` once every source failed,
//!   or to `TimedOut` when the global deadline fires
//! - Abandon whatever is still running once the outcome is known

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::FuturesUnordered;
use futures_util::{FutureExt, StreamExt};
use tokio::time::{self, Instant};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::{AbandonPolicy, RaceSettings};
use crate::observability::metrics::RaceMetrics;
use crate::race::outcome::{Outcome, SourceFailure};
use crate::resilience::with_timeout;
use crate::source::{DataSource, FetchError, FetchResult, LookupKey, Record};

/// One source entered into a race, with its own per-call timeout.
#[derive(Clone)]
pub struct Invocation {
    pub source: Arc<dyn DataSource>,
    pub timeout: Duration,
}

impl Invocation {
    pub fn new(source: Arc<dyn DataSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("source", &self.source.id())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// What a finished unit hands back to the coordinator.
struct UnitReport {
    source_id: String,
    result: FetchResult<Record>,
}

/// Races data sources against a global deadline.
#[derive(Debug, Clone)]
pub struct RaceCoordinator {
    global_timeout: Duration,
    abandon: AbandonPolicy,
    metrics: RaceMetrics,
}

impl RaceCoordinator {
    pub fn new(global_timeout: Duration) -> Self {
        Self {
            global_timeout,
            abandon: AbandonPolicy::default(),
            metrics: RaceMetrics::default(),
        }
    }

    pub fn from_settings(settings: &RaceSettings) -> Self {
        Self::new(settings.global_timeout()).with_abandon(settings.abandon)
    }

    pub fn with_abandon(mut self, abandon: AbandonPolicy) -> Self {
        self.abandon = abandon;
        self
    }

    /// Turn metric recording on or off for races run by this coordinator.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics = RaceMetrics::new(enabled);
        self
    }

    pub fn metrics_enabled(&self) -> bool {
        self.metrics.is_enabled()
    }

    pub fn global_timeout(&self) -> Duration {
        self.global_timeout
    }

    /// Run one race for `key` across `invocations`.
    ///
    /// Resolves exactly once. When several sources succeed within the same
    /// scheduling window, which of them wins is unspecified.
    ///
    /// # Panics
    /// Panics if `invocations` is empty; a race needs at least one source.
    pub async fn race(&self, key: &LookupKey, invocations: Vec<Invocation>) -> Outcome {
        assert!(
            !invocations.is_empty(),
            "race requires at least one data source"
        );

        let race_id = Uuid::new_v4();
        let span = tracing::info_span!("race", %race_id, key = %key);
        self.run(key, invocations).instrument(span).await
    }

    async fn run(&self, key: &LookupKey, invocations: Vec<Invocation>) -> Outcome {
        let started = Instant::now();
        let decided = Arc::new(AtomicBool::new(false));
        let entrants = invocations.len();

        tracing::info!(
            sources = entrants,
            global_timeout_ms = self.global_timeout.as_millis() as u64,
            "Race started"
        );

        let mut pending = FuturesUnordered::new();
        let mut abort_handles = Vec::with_capacity(entrants);

        for invocation in invocations {
            let source_id = invocation.source.id().to_string();
            let unit = run_unit(invocation, key.clone(), decided.clone(), self.metrics)
                .in_current_span();
            let handle = tokio::spawn(unit);
            abort_handles.push(handle.abort_handle());

            // A panicking unit still reports, so it counts towards AllFailed.
            pending.push(handle.map(move |joined| match joined {
                Ok(report) => report,
                Err(e) => UnitReport {
                    source_id,
                    result: Err(FetchError::Panicked(e.to_string())),
                },
            }));
        }

        let deadline = time::sleep(self.global_timeout);
        tokio::pin!(deadline);

        let mut failures = Vec::new();
        let outcome = loop {
            tokio::select! {
                biased;

                report = pending.next() => match report {
                    Some(UnitReport { source_id, result: Ok(record) }) => {
                        decided.store(true, Ordering::Release);
                        let elapsed = started.elapsed();
                        tracing::info!(
                            source = %source_id,
                            url = %record.url,
                            elapsed_ms = elapsed.as_millis() as u64,
                            "Race won"
                        );
                        break Outcome::Won { source_id, record, elapsed };
                    }
                    Some(UnitReport { source_id, result: Err(error) }) => {
                        tracing::warn!(source = %source_id, error = %error, "Source failed");
                        failures.push(SourceFailure { source_id, error });
                    }
                    None => {
                        decided.store(true, Ordering::Release);
                        tracing::warn!(failed = failures.len(), "All sources failed");
                        break Outcome::AllFailed { failures };
                    }
                },

                _ = &mut deadline => {
                    decided.store(true, Ordering::Release);
                    let elapsed = started.elapsed();
                    tracing::warn!(
                        elapsed_ms = elapsed.as_millis() as u64,
                        failed = failures.len(),
                        "Race timed out"
                    );
                    break Outcome::TimedOut { elapsed };
                }
            }
        };

        let outstanding = pending.len();
        if outstanding > 0 {
            match self.abandon {
                AbandonPolicy::Cancel => {
                    for handle in &abort_handles {
                        handle.abort();
                    }
                    tracing::debug!(outstanding, "Cancelled losing sources");
                }
                AbandonPolicy::Detach => {
                    tracing::debug!(outstanding, "Detached losing sources");
                }
            }
        }
        // Dropping the join handles detaches whatever was not aborted.
        drop(pending);

        self.metrics.record_outcome(outcome.kind());
        outcome
    }
}

/// Body of one spawned unit: fetch under its own deadline and report.
async fn run_unit(
    invocation: Invocation,
    key: LookupKey,
    decided: Arc<AtomicBool>,
    metrics: RaceMetrics,
) -> UnitReport {
    let Invocation { source, timeout } = invocation;
    let source_id = source.id().to_string();
    let started = Instant::now();

    let result = with_timeout(timeout, source.fetch(&key, timeout)).await;
    let elapsed = started.elapsed();

    let label = match &result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    metrics.record_fetch(&source_id, label, elapsed);

    if decided.load(Ordering::Acquire) {
        metrics.record_late_result(&source_id);
        tracing::debug!(
            source = %source_id,
            result = label,
            elapsed_ms = elapsed.as_millis() as u64,
            "Late result discarded"
        );
    }

    UnitReport { source_id, result }
}
