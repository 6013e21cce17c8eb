//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RaceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<Vec<ValidationError>> for ConfigError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ConfigError::Validation(errors)
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RaceConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RaceConfig = toml::from_str(&content)?;

    validate_config(&config)?;

    tracing::debug!(path = %path.display(), providers = config.providers.len(), "Configuration file loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_file() {
        let file = write_config(
            r#"
            [race]
            global_timeout_ms = 750
            "#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.race.global_timeout_ms, 750);
        assert_eq!(config.providers.len(), 2);
        for provider in &config.providers {
            assert_eq!(provider.timeout(config.race.global_timeout()), Duration::from_millis(750));
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_bad_syntax_is_parse_error() {
        let file = write_config("[race\nglobal_timeout_ms = ");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_semantic_problems_are_reported_together() {
        let file = write_config(
            r#"
            [race]
            global_timeout_ms = 0

            [[providers]]
            name = "a"
            kind = "viacep"
            base_url = "not a url"
            "#,
        );

        match load_config(file.path()).unwrap_err() {
            ConfigError::Validation(errors) => {
                assert!(errors.contains(&ValidationError::ZeroGlobalTimeout));
                assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidBaseUrl { .. })));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }
}
