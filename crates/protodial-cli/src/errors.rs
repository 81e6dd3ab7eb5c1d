//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use protodial_registry::RegistryError;
use thiserror::Error;
use tonic::Status;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{}", usage_headline(.0))]
    CliUsage(clap::Error),
    #[error("--endpoint must be provided")]
    MissingEndpoint,
    #[error("--proto must be provided")]
    MissingProto,
    #[error("--rpc must be provided")]
    MissingRpc,
    #[error("<REQUEST> must be provided")]
    MissingRequest,
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("invalid JSON request: {0}")]
    RequestParse(serde_json::Error),
    #[error("request does not match {message_type}: {source}")]
    RequestShape {
        message_type: String,
        source: serde_json::Error,
    },
    #[error("{}", status_text(.0))]
    Rpc(Box<Status>),
    #[error("call timed out after {millis}ms")]
    CallTimeout { millis: u128 },
    #[error("failed to start async runtime: {0}")]
    Runtime(io::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to write response: {0}")]
    WriteResponse(io::Error),
    #[error("failed to serialise response: {0}")]
    SerialiseResponse(serde_json::Error),
}

impl From<Status> for AppError {
    fn from(status: Status) -> Self {
        Self::Rpc(Box::new(status))
    }
}

/// The status message, or the code's description when the server sent none.
pub(crate) fn status_text(status: &Status) -> &str {
    if status.message().is_empty() {
        status.code().description()
    } else {
        status.message()
    }
}

/// First line of a clap usage error without clap's own `error: ` prefix.
pub(crate) fn usage_headline(error: &clap::Error) -> String {
    let rendered = error.to_string();
    let headline = rendered.lines().next().unwrap_or_default();
    headline
        .strip_prefix("error: ")
        .unwrap_or(headline)
        .to_owned()
}
