//! Timeout enforcement.
//!
//! # Responsibilities
//! - Wrap source calls with their own deadline
//! - Report expiry as `FetchError::Timeout`, never as a network error
//! - Drop the inner future on expiry so the connection is released

use std::future::Future;
use std::time::Duration;

use tokio::time;

use crate::source::{FetchError, FetchResult};

/// Run `fut` for at most `duration`.
pub async fn with_timeout<T, F>(duration: Duration, fut: F) -> FetchResult<T>
where
    F: Future<Output = FetchResult<T>>,
{
    match time::timeout(duration, fut).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(duration)),
    }
}
