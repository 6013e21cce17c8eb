//! Lookup keys and fetch error definitions.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of the resource being looked up (a postal code).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupKey(String);

impl LookupKey {
    /// Wrap a key as-is, without any normalization.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors produced when parsing a postal code from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("postal code is empty")]
    Empty,

    #[error("postal code must have 8 digits, got {0}")]
    Length(usize),

    #[error("postal code contains a non-digit character: {0:?}")]
    NonDigit(char),

    #[error("postal code hyphen must split it as NNNNN-NNN")]
    MisplacedHyphen,
}

impl FromStr for LookupKey {
    type Err = KeyError;

    /// Accepts `22735140` or `22735-140`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KeyError::Empty);
        }

        let digits = match trimmed.split_once('-') {
            None => trimmed.to_string(),
            Some((head, tail)) if head.len() == 5 && tail.len() == 3 && !tail.contains('-') => {
                format!("{}{}", head, tail)
            }
            Some(_) => return Err(KeyError::MisplacedHyphen),
        };
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(KeyError::NonDigit(c));
        }
        if digits.len() != 8 {
            return Err(KeyError::Length(digits.len()));
        }

        Ok(Self(digits))
    }
}

/// Errors that can occur while a single source fetches a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection, DNS or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The source's own timeout expired before a response was decoded.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// Provider answered with a non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    BadStatus(u16),

    /// Response body did not match the provider schema.
    #[error("decode error: {0}")]
    Decode(String),

    /// Provider answered successfully but does not know the key.
    #[error("postal code not found")]
    NotFound,

    /// The unit of work running the fetch crashed.
    #[error("fetch task panicked: {0}")]
    Panicked(String),
}

impl FetchError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Timeout(_) => "timeout",
            FetchError::BadStatus(_) => "bad_status",
            FetchError::Decode(_) => "decode",
            FetchError::NotFound => "not_found",
            FetchError::Panicked(_) => "panicked",
        }
    }
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;
