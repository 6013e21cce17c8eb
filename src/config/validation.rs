//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, per-source timeout within the race deadline)
//! - Check provider names are unique and base URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RaceConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::RaceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no enabled providers")]
    NoEnabledProviders,

    #[error("race.global_timeout_ms must be greater than zero")]
    ZeroGlobalTimeout,

    #[error("duplicate provider name '{0}'")]
    DuplicateProvider(String),

    #[error("provider '{0}' has timeout_ms = 0")]
    ZeroProviderTimeout(String),

    #[error("provider '{name}' timeout {timeout_ms}ms exceeds global timeout {global_ms}ms")]
    ProviderTimeoutExceedsGlobal {
        name: String,
        timeout_ms: u64,
        global_ms: u64,
    },

    #[error("provider '{name}' has invalid base_url '{url}': {reason}")]
    InvalidBaseUrl {
        name: String,
        url: String,
        reason: String,
    },
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &RaceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let global_ms = config.race.global_timeout_ms;

    if global_ms == 0 {
        errors.push(ValidationError::ZeroGlobalTimeout);
    }

    if config.enabled_providers().next().is_none() {
        errors.push(ValidationError::NoEnabledProviders);
    }

    let mut seen = HashSet::new();
    for provider in &config.providers {
        if !seen.insert(provider.name.as_str()) {
            errors.push(ValidationError::DuplicateProvider(provider.name.clone()));
        }

        // Unset timeouts follow the global deadline; only explicit ones are checked.
        match provider.timeout_ms {
            Some(0) => errors.push(ValidationError::ZeroProviderTimeout(provider.name.clone())),
            Some(timeout_ms) if global_ms > 0 && timeout_ms > global_ms => {
                errors.push(ValidationError::ProviderTimeoutExceedsGlobal {
                    name: provider.name.clone(),
                    timeout_ms,
                    global_ms,
                })
            }
            _ => {}
        }

        match url::Url::parse(&provider.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::InvalidBaseUrl {
                name: provider.name.clone(),
                url: provider.base_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidBaseUrl {
                name: provider.name.clone(),
                url: provider.base_url.clone(),
                reason: e.to_string(),
            }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
