//! Runtime resolution of gRPC methods from `.proto` definitions.
//!
//! A definition file is compiled at runtime into a [`ServiceRegistry`], which
//! maps package names to the services they declare. Resolving a
//! [`MethodRef`] such as `HelloService.SayHello` proceeds in three steps:
//!
//! 1. [`ServiceRegistry::find_service`] searches packages in lexicographic
//!    order and returns the first [`ServiceEntry`] with a matching name.
//! 2. [`ServiceEntry::connect`] binds a [`ServiceClient`] to an endpoint.
//! 3. [`ServiceClient::method`] returns the [`UnaryMethod`] to invoke.
//!
//! Messages travel as [`prost_reflect::DynamicMessage`] values through the
//! [`DynamicCodec`], so no generated code is involved.

mod client;
mod codec;
mod error;
mod loader;
mod method_ref;
mod registry;

pub use client::{ServiceClient, UnaryMethod, endpoint_uri};
pub use codec::{DynamicCodec, DynamicDecoder, DynamicEncoder};
pub use error::RegistryError;
pub use loader::compile;
pub use method_ref::{MethodRef, lower_first_char};
pub use registry::{ServiceEntry, ServiceRegistry};

#[cfg(test)]
mod tests;
