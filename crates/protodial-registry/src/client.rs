//! Clients bound to a single service on a single endpoint.

use std::collections::BTreeMap;

use prost_reflect::{DynamicMessage, MessageDescriptor, MethodDescriptor, ServiceDescriptor};
use protodial_config::CredentialMode;
use tonic::codegen::http::Uri;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic::{Request, Status};
use tracing::debug;

use crate::codec::DynamicCodec;
use crate::error::RegistryError;
use crate::method_ref::MethodRef;

/// Builds the request URI for `endpoint`, adding a scheme when missing.
#[must_use]
pub fn endpoint_uri(endpoint: &str, credentials: CredentialMode) -> String {
    if endpoint.contains("://") {
        endpoint.to_owned()
    } else {
        format!("{}://{endpoint}", credentials.scheme())
    }
}

pub(crate) fn channel(
    endpoint: &str,
    credentials: CredentialMode,
) -> Result<Channel, RegistryError> {
    let uri: Uri = endpoint_uri(endpoint, credentials)
        .parse()
        .map_err(|error| RegistryError::invalid_endpoint(endpoint, format!("{error}")))?;
    if uri.host().is_none_or(str::is_empty) {
        return Err(RegistryError::invalid_endpoint(endpoint, "missing host"));
    }

    let builder = Endpoint::from(uri);
    let configured = match credentials {
        CredentialMode::Insecure => builder,
        CredentialMode::Tls => builder
            .tls_config(ClientTlsConfig::new().with_native_roots())
            .map_err(|error| RegistryError::tls(endpoint, error.to_string()))?,
    };
    Ok(configured.connect_lazy())
}

/// A unary method resolved on a [`ServiceClient`].
#[derive(Debug, Clone)]
pub struct UnaryMethod {
    descriptor: MethodDescriptor,
    path: String,
}

impl UnaryMethod {
    /// Fully qualified method name, e.g. `greet.HelloService.SayHello`.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.descriptor.full_name()
    }

    /// Request message type.
    #[must_use]
    pub fn input(&self) -> MessageDescriptor {
        self.descriptor.input()
    }

    /// Response message type.
    #[must_use]
    pub fn output(&self) -> MessageDescriptor {
        self.descriptor.output()
    }

    /// HTTP/2 request path, e.g. `/greet.HelloService/SayHello`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Client for one service, bound to one endpoint.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    descriptor: ServiceDescriptor,
    methods: BTreeMap<String, MethodDescriptor>,
    grpc: tonic::client::Grpc<Channel>,
}

impl ServiceClient {
    pub(crate) fn new(
        descriptor: ServiceDescriptor,
        methods: BTreeMap<String, MethodDescriptor>,
        channel: Channel,
    ) -> Self {
        Self {
            descriptor,
            methods,
            grpc: tonic::client::Grpc::new(channel),
        }
    }

    /// Looks up the referenced method by its lowerCamel identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MethodNotFound`] when the service has no such
    /// method and [`RegistryError::UnsupportedStreaming`] when it streams.
    pub fn method(&self, reference: &MethodRef) -> Result<UnaryMethod, RegistryError> {
        let Some(descriptor) = self.methods.get(reference.method_name()) else {
            debug!(
                service = self.descriptor.full_name(),
                method = reference.method_name(),
                "method not found"
            );
            return Err(RegistryError::method_not_found(reference.raw()));
        };
        if descriptor.is_client_streaming() || descriptor.is_server_streaming() {
            return Err(RegistryError::unsupported_streaming(reference.raw()));
        }
        Ok(UnaryMethod {
            path: format!("/{}/{}", self.descriptor.full_name(), descriptor.name()),
            descriptor: descriptor.clone(),
        })
    }

    /// Sends `request` and waits for the single response.
    ///
    /// # Errors
    ///
    /// Returns the [`Status`] reported by the transport or the server.
    pub async fn unary(
        &mut self,
        method: &UnaryMethod,
        request: DynamicMessage,
    ) -> Result<DynamicMessage, Status> {
        self.grpc
            .ready()
            .await
            .map_err(|error| Status::unknown(format!("service was not ready: {error}")))?;
        let path = PathAndQuery::try_from(method.path())
            .map_err(|error| Status::internal(format!("invalid method path: {error}")))?;
        let codec = DynamicCodec::new(method.output());
        debug!(method = method.full_name(), "sending unary request");
        let response = self.grpc.unary(Request::new(request), path, codec).await?;
        Ok(response.into_inner())
    }
}
