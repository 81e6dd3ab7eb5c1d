//! Error types for definition loading and method resolution.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors returned while loading definitions or resolving a method.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The definition file does not exist.
    #[error("{} does not exist", path.display())]
    DefinitionNotFound {
        /// Path exactly as supplied by the caller.
        path: PathBuf,
    },

    /// The definition file exists but could not be compiled.
    #[error("failed to load {}: {message}", path.display())]
    DefinitionInvalid {
        /// Path exactly as supplied by the caller.
        path: PathBuf,
        /// Compiler diagnostic.
        message: String,
    },

    /// No package declares a service with the requested name.
    #[error("could not find {reference}")]
    ServiceNotFound {
        /// Raw method reference.
        reference: String,
    },

    /// The service exists but exposes no method with the requested name.
    #[error("could not find {reference}")]
    MethodNotFound {
        /// Raw method reference.
        reference: String,
    },

    /// The method streams requests or responses.
    #[error("{reference} is a streaming method; only unary calls are supported")]
    UnsupportedStreaming {
        /// Raw method reference.
        reference: String,
    },

    /// The endpoint cannot be turned into a request URI.
    #[error("invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint {
        /// Endpoint as supplied by the caller.
        endpoint: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// TLS could not be configured for the endpoint.
    #[error("failed to configure TLS for {endpoint}: {reason}")]
    Tls {
        /// Endpoint as supplied by the caller.
        endpoint: String,
        /// Transport diagnostic.
        reason: String,
    },
}

impl RegistryError {
    /// Creates a new `DefinitionNotFound` error.
    #[must_use]
    pub fn definition_not_found(path: &Path) -> Self {
        Self::DefinitionNotFound {
            path: path.to_path_buf(),
        }
    }

    /// Creates a new `DefinitionInvalid` error.
    #[must_use]
    pub fn definition_invalid(path: &Path, message: impl Into<String>) -> Self {
        Self::DefinitionInvalid {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Creates a new `ServiceNotFound` error.
    #[must_use]
    pub fn service_not_found(reference: impl Into<String>) -> Self {
        Self::ServiceNotFound {
            reference: reference.into(),
        }
    }

    /// Creates a new `MethodNotFound` error.
    #[must_use]
    pub fn method_not_found(reference: impl Into<String>) -> Self {
        Self::MethodNotFound {
            reference: reference.into(),
        }
    }

    /// Creates a new `UnsupportedStreaming` error.
    #[must_use]
    pub fn unsupported_streaming(reference: impl Into<String>) -> Self {
        Self::UnsupportedStreaming {
            reference: reference.into(),
        }
    }

    /// Creates a new `InvalidEndpoint` error.
    #[must_use]
    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `Tls` error.
    #[must_use]
    pub fn tls(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Tls {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}
