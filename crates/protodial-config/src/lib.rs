//! Layered configuration for the `protodial` command-line client.
//!
//! Values resolve in precedence order: built-in defaults, then the
//! `.protodial.toml` configuration file, then `PROTODIAL_*` environment
//! variables, then command-line flags.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod credentials;
mod defaults;
mod logging;

pub use credentials::CredentialMode;
pub use defaults::{
    DEFAULT_LOG_FILTER, default_credentials, default_log_filter_string, default_log_format,
};
pub use logging::LogFormat;

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "PROTODIAL")]
pub struct Config {
    /// Tracing filter expression applied to diagnostic output on stderr.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Diagnostic output format.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
    /// Transport security used for the outbound channel.
    #[ortho_config(default = defaults::default_credentials())]
    pub credentials: CredentialMode,
    /// Optional deadline for the whole call, in milliseconds.
    #[serde(default)]
    pub call_timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            credentials: default_credentials(),
            call_timeout_ms: None,
        }
    }
}

impl Config {
    /// Returns the tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the diagnostic output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the configured transport credentials.
    #[must_use]
    pub fn credentials(&self) -> CredentialMode {
        self.credentials
    }

    /// Returns the call deadline, if one was configured.
    ///
    /// A zero value is treated as "no deadline".
    #[must_use]
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_ms
            .filter(|millis| *millis > 0)
            .map(Duration::from_millis)
    }
}
