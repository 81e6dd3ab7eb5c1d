//! Validation of parsed arguments into a single call description.

use std::path::PathBuf;

use protodial_registry::MethodRef;

use crate::cli::Cli;
use crate::errors::AppError;

/// Everything needed to perform one call. Built once per run.
#[derive(Debug)]
pub(crate) struct Invocation {
    pub(crate) endpoint: String,
    pub(crate) definition_path: PathBuf,
    pub(crate) method_ref: MethodRef,
    pub(crate) request_body: String,
    pub(crate) import_paths: Vec<PathBuf>,
}

impl TryFrom<Cli> for Invocation {
    type Error = AppError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let endpoint = required(cli.endpoint, AppError::MissingEndpoint)?;
        let proto = required(cli.proto, AppError::MissingProto)?;
        let rpc = required(cli.rpc, AppError::MissingRpc)?;
        let request_body = required(cli.request, AppError::MissingRequest)?;
        Ok(Self {
            endpoint,
            definition_path: PathBuf::from(proto),
            method_ref: MethodRef::parse(&rpc),
            request_body,
            import_paths: cli.import_paths,
        })
    }
}

/// Blank values count as missing; anything else is kept verbatim.
fn required(value: Option<String>, missing: AppError) -> Result<String, AppError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(missing),
    }
}
