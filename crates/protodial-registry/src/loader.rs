//! Runtime compilation of `.proto` definition files.

use std::fs;
use std::path::{Path, PathBuf};

use prost_reflect::DescriptorPool;
use protox::Compiler;
use tracing::debug;

use crate::error::RegistryError;

/// Compiles the definition at `path`, resolving imports against its own
/// directory first and then `import_paths` in order.
///
/// # Errors
///
/// Returns [`RegistryError::DefinitionNotFound`] when `path` does not exist
/// and [`RegistryError::DefinitionInvalid`] when compilation fails.
pub fn compile(path: &Path, import_paths: &[PathBuf]) -> Result<DescriptorPool, RegistryError> {
    if !path.exists() {
        return Err(RegistryError::definition_not_found(path));
    }

    let file = fs::canonicalize(path)
        .map_err(|error| RegistryError::definition_invalid(path, error.to_string()))?;
    let includes = include_paths(&file, import_paths);
    debug!(
        definition = %file.display(),
        includes = includes.len(),
        "compiling definition"
    );

    let invalid = |error: protox::Error| RegistryError::definition_invalid(path, error.to_string());
    let mut compiler = Compiler::new(includes).map_err(invalid)?;
    compiler.include_imports(true);
    compiler.open_file(&file).map_err(invalid)?;
    Ok(compiler.descriptor_pool())
}

fn include_paths(file: &Path, import_paths: &[PathBuf]) -> Vec<PathBuf> {
    let own_dir = file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    std::iter::once(own_dir)
        .chain(import_paths.iter().cloned())
        .collect()
}
