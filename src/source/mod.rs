//! Data source subsystem.
//!
//! # Data Flow
//! ```text
//! LookupKey + per-call timeout
//!     → http.rs (one GET against the provider, bounded by the timeout)
//!     → record.rs (decode provider JSON into the matching Address variant)
//!     → Result<Record, FetchError>
//! ```
//!
//! # Design Decisions
//! - One outbound request per invocation, never retried here
//! - Every source owns its own timeout; the coordinator's deadline is separate
//! - Each provider schema is its own `Address` variant, not an untyped blob

pub mod http;
pub mod record;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;

pub use http::{HttpSource, ProviderKind};
pub use record::{Address, OpenCepAddress, Record, ViaCepAddress};
pub use types::{FetchError, FetchResult, KeyError, LookupKey};

/// A provider of postal-code records.
///
/// Implementations perform a single lookup per call and must give up with
/// [`FetchError::Timeout`] once `timeout` has elapsed, whether or not the
/// caller is still waiting.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Stable identifier used in outcomes, logs and metrics.
    fn id(&self) -> &str;

    async fn fetch(&self, key: &LookupKey, timeout: Duration) -> FetchResult<Record>;
}
