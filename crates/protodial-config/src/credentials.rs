//! Transport credential selection for outbound channels.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the client secures its connection to the target endpoint.
///
/// `Insecure` opens a plaintext HTTP/2 connection with no authentication. It
/// remains the default so existing invocations against local development
/// servers keep working.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CredentialMode {
    /// Plaintext transport without encryption or authentication.
    #[default]
    Insecure,
    /// TLS using the platform's native root certificates.
    Tls,
}

impl CredentialMode {
    /// URI scheme implied by the credential mode.
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Insecure => "http",
            Self::Tls => "https",
        }
    }
}
