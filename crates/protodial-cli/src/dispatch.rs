//! Performs the resolved call and renders its outcome.

use std::io::Write;

use prost_reflect::{DynamicMessage, SerializeOptions};
use protodial_config::Config;
use protodial_registry::{ServiceRegistry, UnaryMethod};
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::command::Invocation;
use crate::errors::AppError;

/// Loads the definition, performs the call and writes the JSON response.
///
/// The runtime, channel and descriptor pool are dropped before returning on
/// every path.
pub(crate) fn dispatch<W>(
    invocation: &Invocation,
    config: &Config,
    stdout: &mut W,
) -> Result<(), AppError>
where
    W: Write,
{
    let registry = ServiceRegistry::load(&invocation.definition_path, &invocation.import_paths)?;
    debug!(packages = ?registry.packages().collect::<Vec<_>>(), "definition loaded");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;
    let response = runtime.block_on(call(&registry, invocation, config))?;
    write_response(stdout, &response)
}

async fn call(
    registry: &ServiceRegistry,
    invocation: &Invocation,
    config: &Config,
) -> Result<DynamicMessage, AppError> {
    let reference = &invocation.method_ref;
    let entry = registry.find_service(reference)?;
    let mut client = entry.connect(&invocation.endpoint, config.credentials())?;
    let method = client.method(reference)?;
    let request = request_message(&method, &invocation.request_body)?;

    debug!(method = method.full_name(), endpoint = %invocation.endpoint, "dispatching");
    let pending = client.unary(&method, request);
    let outcome = match config.call_timeout() {
        Some(deadline) => tokio::time::timeout(deadline, pending)
            .await
            .map_err(|_| AppError::CallTimeout {
                millis: deadline.as_millis(),
            })?,
        None => pending.await,
    };
    outcome.map_err(|status| {
        debug!(code = ?status.code(), "call failed");
        AppError::from(status)
    })
}

/// Parses `body` as JSON and converts it into the method's request type.
pub(crate) fn request_message(method: &UnaryMethod, body: &str) -> Result<DynamicMessage, AppError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(AppError::RequestParse)?;
    let descriptor = method.input();
    let message_type = descriptor.full_name().to_owned();
    DynamicMessage::deserialize(descriptor, value).map_err(|source| AppError::RequestShape {
        message_type,
        source,
    })
}

/// Writes `response` as two-space indented JSON followed by a newline.
///
/// Fields holding their default value are written out too, so the output
/// carries every field the server returned.
pub(crate) fn write_response<W>(stdout: &mut W, response: &DynamicMessage) -> Result<(), AppError>
where
    W: Write,
{
    let options = SerializeOptions::new().skip_default_fields(false);
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut *stdout, formatter);
    response
        .serialize_with_options(&mut serializer, &options)
        .map_err(AppError::SerialiseResponse)?;
    stdout.write_all(b"\n").map_err(AppError::WriteResponse)?;
    stdout.flush().map_err(AppError::WriteResponse)
}
