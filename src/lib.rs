//! Postal-code lookup that races independent providers against a deadline.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod race;
pub mod render;
pub mod resilience;
pub mod source;

pub use config::RaceConfig;
pub use lifecycle::{build_lookup, Lookup};
pub use race::{Invocation, Outcome, RaceCoordinator, SourceFailure};
pub use source::{DataSource, FetchError, LookupKey, Record};
