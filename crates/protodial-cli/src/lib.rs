//! Command-line runtime for the `protodial` unary RPC client.
//!
//! The module owns argument parsing, configuration bootstrapping, method
//! resolution and response rendering. It can be driven from the binary
//! entrypoint or from tests, where configuration loading and IO streams are
//! substituted.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::debug;

mod cli;
mod command;
mod config;
mod dispatch;
mod errors;
mod telemetry;

use cli::Cli;
use command::Invocation;
use config::{ConfigLoader, OrthoConfigLoader, command_arguments, split_config_arguments};
use dispatch::dispatch;
use errors::AppError;

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
}

impl<'a, W, E, L> CliRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    fn new(io: &'a mut IoStreams<'a, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        let result = match Cli::try_parse_from(command_arguments(&args, &split)) {
            Ok(cli) => self.execute(cli, &split.config_arguments),
            Err(error) if is_informational(&error) => return self.print_informational(&error),
            Err(error) => Err(AppError::CliUsage(error)),
        };

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                report(&error, &mut *self.io.stderr);
                ExitCode::FAILURE
            }
        }
    }

    fn execute(&mut self, cli: Cli, config_arguments: &[OsString]) -> Result<(), AppError> {
        let config = self.loader.load(config_arguments)?;
        telemetry::initialise(&config)?;
        let invocation = Invocation::try_from(cli)?;
        debug!(
            endpoint = %invocation.endpoint,
            definition = %invocation.definition_path.display(),
            method = %invocation.method_ref,
            "invocation parsed"
        );
        dispatch(&invocation, &config, &mut *self.io.stdout)
    }

    fn print_informational(&mut self, message: &clap::Error) -> ExitCode {
        match write!(self.io.stdout, "{message}").and_then(|()| self.io.stdout.flush()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                report(&AppError::WriteResponse(error), &mut *self.io.stderr);
                ExitCode::FAILURE
            }
        }
    }
}

/// `--help` and `--version` surface as clap errors but are successful runs.
fn is_informational(error: &clap::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

/// Writes `error` to stderr as a single `error:` line.
fn report<E: Write>(error: &AppError, stderr: &mut E) {
    let _ = writeln!(stderr, "error: {error}");
    let _ = stderr.flush();
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<'a, I, W, E, L>(
    args: I,
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}
