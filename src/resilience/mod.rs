//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Source fetch:
//!     → timeouts.rs (hard per-call deadline, distinct Timeout error)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every outbound call has a deadline
//! - A lookup is attempted once per source; there are no retries to budget

pub mod timeouts;

pub use timeouts::with_timeout;
