//! Service registry built from a compiled descriptor pool.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use prost_reflect::{DescriptorPool, MethodDescriptor, ServiceDescriptor};
use protodial_config::CredentialMode;
use tracing::debug;

use crate::client::{ServiceClient, channel};
use crate::error::RegistryError;
use crate::loader;
use crate::method_ref::{MethodRef, lower_first_char};

/// Services declared by a definition file and its imports, grouped by
/// package.
///
/// Packages iterate in lexicographic order; files without a `package`
/// declaration live under the empty string.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    packages: BTreeMap<String, BTreeMap<String, ServiceEntry>>,
}

impl ServiceRegistry {
    /// Compiles the definition at `path` and indexes its services.
    ///
    /// # Errors
    ///
    /// Propagates loader failures; see [`loader::compile`].
    pub fn load(path: &Path, import_paths: &[PathBuf]) -> Result<Self, RegistryError> {
        let pool = loader::compile(path, import_paths)?;
        Ok(Self::from_pool(&pool))
    }

    /// Indexes every service in an already compiled pool.
    #[must_use]
    pub fn from_pool(pool: &DescriptorPool) -> Self {
        let mut packages: BTreeMap<String, BTreeMap<String, ServiceEntry>> = BTreeMap::new();
        for service in pool.services() {
            packages
                .entry(service.package_name().to_owned())
                .or_default()
                .insert(service.name().to_owned(), ServiceEntry::new(service));
        }
        debug!(packages = packages.len(), "indexed services");
        Self { packages }
    }

    /// Package names in iteration order.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Finds the first package declaring the referenced service.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::ServiceNotFound`] when no package declares it.
    pub fn find_service(&self, reference: &MethodRef) -> Result<&ServiceEntry, RegistryError> {
        self.packages
            .iter()
            .find_map(|(package, services)| {
                services.get(reference.service_name()).inspect(|_| {
                    debug!(package = %package, service = reference.service_name(), "service resolved");
                })
            })
            .ok_or_else(|| {
                debug!(reference = reference.raw(), "service not found");
                RegistryError::service_not_found(reference.raw())
            })
    }
}

/// Constructor for clients of a single service.
#[derive(Debug, Clone)]
pub struct ServiceEntry {
    descriptor: ServiceDescriptor,
    methods: BTreeMap<String, MethodDescriptor>,
}

impl ServiceEntry {
    fn new(descriptor: ServiceDescriptor) -> Self {
        let methods = descriptor
            .methods()
            .map(|method| (lower_first_char(method.name()), method))
            .collect();
        Self {
            descriptor,
            methods,
        }
    }

    /// Fully qualified service name, e.g. `greet.HelloService`.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.descriptor.full_name()
    }

    /// Method identifiers in lowerCamel form.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }

    /// Binds a client to `endpoint`.
    ///
    /// No network I/O happens here; the connection is established by the
    /// first call. Must be invoked from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidEndpoint`] or [`RegistryError::Tls`]
    /// when the channel cannot be configured.
    pub fn connect(
        &self,
        endpoint: &str,
        credentials: CredentialMode,
    ) -> Result<ServiceClient, RegistryError> {
        let channel = channel(endpoint, credentials)?;
        debug!(
            service = self.full_name(),
            endpoint,
            credentials = %credentials,
            "client bound"
        );
        Ok(ServiceClient::new(
            self.descriptor.clone(),
            self.methods.clone(),
            channel,
        ))
    }
}
