//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Sources and the race coordinator produce:
//!     → logging.rs (structured log events on stderr)
//!     → metrics.rs (counters and histograms through the `metrics` facade)
//!
//! Every race runs inside a span carrying its race_id.
//! ```
//!
//! # Design Decisions
//! - stdout is reserved for the lookup result; logs never go there
//! - No exporter is installed here; an embedding process may install a recorder

pub mod logging;
pub mod metrics;
