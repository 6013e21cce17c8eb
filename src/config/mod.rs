//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RaceConfig (validated, immutable)
//!     → CLI overrides applied by the binary, then validated again
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so an empty file (or no file) is a valid config
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AbandonPolicy, HttpConfig, LogFormat, ObservabilityConfig, ProviderConfig, RaceConfig,
    RaceSettings,
};
pub use validation::{validate_config, ValidationError};
