//! Race coordination subsystem.
//!
//! # Data Flow
//! ```text
//! LookupKey + Vec<Invocation>
//!     → coordinator.rs (one spawned task per source, per-call timeout each)
//!     → first success / all failed / global deadline
//!     → outcome.rs (Outcome, produced exactly once)
//! ```
//!
//! # State Machine
//! ```text
//! Pending → Won        first unit reports a record
//! Pending → AllFailed  every unit reported an error
//! Pending → TimedOut   global deadline fired first
//! ```
//! Terminal states are final.
//!
//! # Design Decisions
//! - First *success* wins; a failing unit only removes itself from the race
//! - The global deadline unblocks the wait without touching in-flight units
//! - Losing units are never awaited; by default they are aborted

pub mod coordinator;
pub mod outcome;

pub use coordinator::{Invocation, RaceCoordinator};
pub use outcome::{Outcome, SourceFailure};
