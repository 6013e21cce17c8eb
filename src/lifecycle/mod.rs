//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Validate → HTTP client → Invocations + RaceCoordinator
//!
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → stop waiting on the race and exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - An interrupted lookup prints nothing on stdout

pub mod signals;
pub mod startup;

pub use startup::{
    apply_timeout_override, build_lookup, exit_status, Lookup, StartupError,
    INTERRUPTED_EXIT_STATUS,
};
