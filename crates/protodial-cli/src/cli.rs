//! CLI argument definitions for `protodial`.

use std::path::PathBuf;

use clap::Parser;

/// Command-line interface for invoking unary gRPC methods.
///
/// Every value is optional at the parser level so that missing flags are
/// reported through [`crate::command::Invocation`] with a uniform message.
#[derive(Parser, Debug, Default)]
#[command(
    name = "protodial",
    version,
    about = "Invoke a unary gRPC method described by a .proto file",
    after_help = "Configuration flags (--config-path, --log-filter, --log-format, \
                  --credentials, --call-timeout-ms) must precede the options above."
)]
pub(crate) struct Cli {
    /// Target server address.
    #[arg(long, value_name = "HOST:PORT")]
    pub(crate) endpoint: Option<String>,
    /// Path to the `.proto` file declaring the service.
    #[arg(long, value_name = "PATH")]
    pub(crate) proto: Option<String>,
    /// Method to invoke.
    #[arg(long, value_name = "SERVICE.METHOD")]
    pub(crate) rpc: Option<String>,
    /// Extra directories searched for `import` statements.
    #[arg(short = 'I', long = "import-path", value_name = "DIR")]
    pub(crate) import_paths: Vec<PathBuf>,
    /// JSON-encoded request message.
    #[arg(value_name = "REQUEST", allow_hyphen_values = true)]
    pub(crate) request: Option<String>,
}
