//! Export configuration.
//!
//! Defaults suit normal use. Override via environment variables or explicit
//! construction for tests.

use url::Url;

/// Default connectivity probe target.
pub const DEFAULT_PROBE_URL: &str = "https://www.google.com/favicon.ico";
/// Default probe timeout in seconds.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;
/// Default inventory export filename prefix.
pub const DEFAULT_EXPORT_PREFIX: &str = "inventory";
/// Filename prefix for divergence reports.
pub const DIVERGENCE_PREFIX: &str = "divergences";

/// Settings for the gated export path.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// URL fetched to decide whether the machine is online.
    pub probe_url: Url,
    /// Probe request timeout in seconds.
    pub probe_timeout_secs: u64,
    /// Inventory export filename prefix.
    pub file_prefix: String,
}

impl ExportConfig {
    /// Build with the default timeout and prefix.
    pub fn new(probe_url: Url) -> Self {
        Self {
            probe_url,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            file_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `STK_PROBE_URL` (default: `https://www.google.com/favicon.ico`)
    /// - `STK_PROBE_TIMEOUT_SECS` (default: 5)
    /// - `STK_EXPORT_PREFIX` (default: `inventory`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let probe_timeout_secs = match std::env::var("STK_PROBE_TIMEOUT_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(0) | Err(_) => return Err(ConfigError::InvalidTimeout(raw)),
                Ok(secs) => secs,
            },
            Err(_) => DEFAULT_PROBE_TIMEOUT_SECS,
        };
        let file_prefix = std::env::var("STK_EXPORT_PREFIX")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXPORT_PREFIX.to_string());

        Ok(Self {
            probe_url: env_url("STK_PROBE_URL", DEFAULT_PROBE_URL)?,
            probe_timeout_secs,
            file_prefix,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("STK_PROBE_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}
