//! CLI entrypoint for the `protodial` unary RPC client.
//!
//! The binary delegates to [`protodial_cli::run`], which loads configuration,
//! parses the invocation, resolves the method and prints the response.

use std::io::{self, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    // Left unlocked: diagnostics from runtime threads share stderr.
    let mut stderr = io::stderr();
    protodial_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
