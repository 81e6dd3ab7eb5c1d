//! Test support utilities for CLI behavioural coverage.
//!
//! Supplies harness types for starting fake servers, capturing CLI output and
//! loading fixtures so step definitions and unit tests remain focused on their
//! assertions.


use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use prost_reflect::DescriptorPool;
use protodial_config::Config;
use rstest::fixture;
use serde_json::Value;

use crate::{AppError, ConfigLoader, IoStreams, run_with_loader};

pub(super) use fake_server::{FakeServer, Reply};

/// Port with nothing listening, used when a scenario never reaches the network.
const UNUSED_PORT: u16 = 9;

/// A config loader that returns a fixed configuration for tests.
pub(super) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(super) fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

/// Test world holding CLI state, the fake server, and captured output.
#[derive(Default)]
pub(super) struct TestWorld {
    pub config: Config,
    pub server: Option<FakeServer>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<ExitCode>,
    pub requests: Vec<Value>,
}

impl TestWorld {
    pub fn start_server(&mut self, reply: Reply, delay: Option<Duration>) -> Result<()> {
        self.server = Some(FakeServer::spawn(reply, delay)?);
        Ok(())
    }

    fn endpoint(&self) -> String {
        let port = self.server.as_ref().map_or(UNUSED_PORT, FakeServer::port);
        format!("127.0.0.1:{port}")
    }

    /// Calls `method` on the greet fixture with `request` as the body.
    pub fn call(&mut self, method: &str, request: &str) -> Result<()> {
        let definition = fixture_path("greet.proto");
        self.call_with_definition(&definition.to_string_lossy(), method, request)
    }

    pub fn call_with_definition(
        &mut self,
        definition: &str,
        method: &str,
        request: &str,
    ) -> Result<()> {
        let endpoint = self.endpoint();
        let args = [
            "protodial",
            "--endpoint",
            endpoint.as_str(),
            "--proto",
            definition,
            "--rpc",
            method,
            request,
        ]
        .map(OsString::from);
        self.run(args)
    }

    pub fn run<I>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = OsString>,
    {
        self.stdout.clear();
        self.stderr.clear();
        self.requests.clear();
        let loader = StaticConfigLoader::new(self.config.clone());
        let mut io = IoStreams::new(&mut self.stdout, &mut self.stderr);
        let exit = run_with_loader(args, &mut io, &loader);
        self.exit_code = Some(exit);
        if let Some(mut server) = self.server.take() {
            self.requests = server.take_requests()?;
        }
        Ok(())
    }

    pub fn stdout_text(&self) -> Result<String> {
        decode_utf8(self.stdout.clone(), "stdout")
    }

    pub fn stderr_text(&self) -> Result<String> {
        decode_utf8(self.stderr.clone(), "stderr")
    }

    pub fn assert_success(&self) -> Result<()> {
        let exit = self.exit_code.context("exit code recorded")?;
        ensure!(
            exit == ExitCode::SUCCESS,
            "expected success, got {exit:?} with stderr {:?}",
            self.stderr_text()?
        );
        Ok(())
    }

    pub fn assert_failure(&self) -> Result<()> {
        let exit = self.exit_code.context("exit code recorded")?;
        ensure!(
            exit == ExitCode::FAILURE,
            "expected failure exit code, got {exit:?}"
        );
        Ok(())
    }
}

// ── Helper functions ───────────────────────────────────────────────────────────

pub(super) fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

pub(super) fn fixture_pool() -> Result<DescriptorPool> {
    protodial_registry::compile(&fixture_path("greet.proto"), &[])
        .context("compile greet fixture")
}

pub(super) fn read_fixture(name: &str) -> Result<String> {
    let normalized = name.trim().trim_matches('"');
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("golden");
    path.push(normalized);
    fs::read_to_string(&path).with_context(|| format!("read fixture at {}", path.display()))
}

pub(super) fn decode_utf8(buffer: Vec<u8>, label: &str) -> Result<String> {
    String::from_utf8(buffer).with_context(|| format!("{label} utf8"))
}

// ── Fixtures ───────────────────────────────────────────────────────────────────

#[fixture]
pub(super) fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}
