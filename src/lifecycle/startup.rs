//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate the final configuration
//! - Build the shared HTTP client and one source per enabled provider
//! - Hand back a ready-to-run lookup
//! - Map CLI overrides and outcomes onto config and exit status

use std::sync::Arc;

use thiserror::Error;

use crate::config::{validate_config, ConfigError, RaceConfig};
use crate::race::{Invocation, Outcome, RaceCoordinator};
use crate::source::http::build_client;
use crate::source::{HttpSource, LookupKey};

/// Errors that prevent a lookup from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// A coordinator plus the sources it races.
#[derive(Debug, Clone)]
pub struct Lookup {
    pub coordinator: RaceCoordinator,
    pub invocations: Vec<Invocation>,
}

impl Lookup {
    /// Race all configured sources for `key`.
    pub async fn run(&self, key: &LookupKey) -> Outcome {
        self.coordinator.race(key, self.invocations.clone()).await
    }
}

/// Build a lookup from configuration.
pub fn build_lookup(config: &RaceConfig) -> Result<Lookup, StartupError> {
    validate_config(config).map_err(ConfigError::from)?;

    let client = build_client(&config.http)?;
    let global_timeout = config.race.global_timeout();
    let invocations: Vec<Invocation> = config
        .enabled_providers()
        .map(|provider| {
            let timeout = provider.timeout(global_timeout);
            tracing::debug!(
                source = %provider.name,
                kind = ?provider.kind,
                base_url = %provider.base_url,
                timeout_ms = timeout.as_millis() as u64,
                "Registering source"
            );
            Invocation::new(
                Arc::new(HttpSource::from_config(provider, client.clone())),
                timeout,
            )
        })
        .collect();

    tracing::info!(
        sources = invocations.len(),
        global_timeout_ms = config.race.global_timeout_ms,
        abandon = ?config.race.abandon,
        metrics_enabled = config.observability.metrics_enabled,
        "Lookup ready"
    );

    let coordinator = RaceCoordinator::from_settings(&config.race)
        .with_metrics(config.observability.metrics_enabled);

    Ok(Lookup {
        coordinator,
        invocations,
    })
}

/// Replace the global deadline, capping explicit provider timeouts to it.
pub fn apply_timeout_override(config: &mut RaceConfig, global_ms: u64) {
    config.race.global_timeout_ms = global_ms;
    for provider in &mut config.providers {
        provider.timeout_ms = provider.timeout_ms.map(|ms| ms.min(global_ms));
    }
}

/// Process exit status for a finished lookup.
pub fn exit_status(outcome: &Outcome) -> u8 {
    match outcome {
        Outcome::Won { .. } => 0,
        Outcome::AllFailed { .. } => 1,
        Outcome::TimedOut { .. } => 2,
    }
}

/// Exit status when the lookup was interrupted by a signal.
pub const INTERRUPTED_EXIT_STATUS: u8 = 130;
