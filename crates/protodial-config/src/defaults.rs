//! Built-in configuration defaults, the lowest precedence layer.

use crate::credentials::CredentialMode;
use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
///
/// Kept at `warn` so stderr carries nothing but the `error:` line on ordinary
/// failures.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Owned copy of [`DEFAULT_LOG_FILTER`] for the configuration default.
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Default logging format for the binary.
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default transport credentials.
pub fn default_credentials() -> CredentialMode {
    CredentialMode::Insecure
}
