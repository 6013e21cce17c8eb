//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::source::ProviderKind;

/// Root configuration for a lookup race.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Global deadline and loser handling.
    pub race: RaceSettings,

    /// Shared HTTP client settings.
    pub http: HttpConfig,

    /// Providers raced against each other.
    pub providers: Vec<ProviderConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            race: RaceSettings::default(),
            http: HttpConfig::default(),
            providers: vec![
                ProviderConfig {
                    name: "viacep".to_string(),
                    kind: ProviderKind::ViaCep,
                    base_url: "https://viacep.com.br".to_string(),
                    timeout_ms: None,
                    enabled: true,
                },
                ProviderConfig {
                    name: "opencep".to_string(),
                    kind: ProviderKind::OpenCep,
                    base_url: "https://opencep.com".to_string(),
                    timeout_ms: None,
                    enabled: true,
                },
            ],
            observability: ObservabilityConfig::default(),
        }
    }
}

impl RaceConfig {
    /// Providers that take part in the race.
    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled)
    }
}

/// What happens to sources still in flight once the race is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AbandonPolicy {
    /// Abort losing tasks so their connections are released.
    #[default]
    Cancel,
    /// Let losing tasks run to completion; late results are only logged.
    Detach,
}

/// Race-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RaceSettings {
    /// Upper bound on the whole race in milliseconds.
    pub global_timeout_ms: u64,

    /// Handling of losing sources.
    pub abandon: AbandonPolicy,
}

impl RaceSettings {
    pub fn global_timeout(&self) -> Duration {
        Duration::from_millis(self.global_timeout_ms)
    }
}

impl Default for RaceSettings {
    fn default() -> Self {
        Self {
            global_timeout_ms: 1000,
            abandon: AbandonPolicy::Cancel,
        }
    }
}

/// HTTP client configuration shared by all providers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// TCP/TLS connection establishment timeout in milliseconds.
    pub connect_timeout_ms: u64,

    /// User-Agent header sent to providers.
    pub user_agent: String,

    /// Honor HTTP_PROXY/HTTPS_PROXY from the environment.
    pub use_system_proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 500,
            user_agent: concat!("cep-race/", env!("CARGO_PKG_VERSION")).to_string(),
            use_system_proxy: true,
        }
    }
}

/// A single postal-code provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Unique provider identifier for logging/metrics.
    pub name: String,

    /// Response schema and URL layout.
    pub kind: ProviderKind,

    /// Scheme and host, e.g. "https://viacep.com.br".
    pub base_url: String,

    /// Per-call timeout in milliseconds; unset means the race's global timeout.
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Disabled providers are skipped.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl ProviderConfig {
    /// Effective per-call timeout for a race bounded by `global`.
    pub fn timeout(&self, global: Duration) -> Duration {
        self.timeout_ms.map(Duration::from_millis).unwrap_or(global)
    }
}

fn default_enabled() -> bool {
    true
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Record metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
        }
    }
}
