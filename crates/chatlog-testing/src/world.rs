//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated temp directory for outputs and config files
//! - Pointing the CLI at a fake API through environment variables
//! - Executing CLI commands and capturing their output

use anyhow::Result;
use assert_cmd::Command;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::api::{FakeApi, PASSWORD, PROJECT_ID, USER_ID};
use crate::fixtures::{AgentFixture, SessionFixture};

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use chatlog_testing::{AgentFixture, SessionFixture, TestWorld};
///
/// let world = TestWorld::new()
///     .with_agents(&[AgentFixture::new("a-1", "general")])
///     .with_sessions(&[SessionFixture::new("s-1", "a-1").pairs(2)]);
///
/// let out = world.path("out.csv");
/// let result = world.run(&["export", "--output", out.to_str().unwrap()]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    api: FakeApi,
    temp_dir: TempDir,
    env_vars: HashMap<String, Option<String>>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment with credentials in the environment.
    pub fn new() -> Self {
        let api = FakeApi::start();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let world = Self {
            temp_dir,
            env_vars: HashMap::new(),
            api,
        };

        // keep the developer's own config file and log filter out of the run
        let no_config = world.path("no-config.toml");
        let origin = world.api.uri();
        world
            .with_env("CHATLOG_ORIGIN", origin)
            .with_env("CHATLOG_USER_ID", USER_ID)
            .with_env("CHATLOG_PASSWORD", PASSWORD)
            .with_env("CHATLOG_PROJECT_ID", PROJECT_ID)
            .with_env("CHATLOG_CONFIG", no_config.to_string_lossy())
            .without_env("CHATLOG_LOG")
    }

    pub fn api(&self) -> &FakeApi {
        &self.api
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path inside the temp directory.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.temp_dir.path().join(relative)
    }

    pub fn with_agents(self, agents: &[AgentFixture]) -> Self {
        self.api.with_agents(agents);
        self
    }

    pub fn with_sessions(self, sessions: &[SessionFixture]) -> Self {
        self.api.with_sessions(sessions);
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), Some(value.into()));
        self
    }

    /// Remove an environment variable for CLI execution.
    pub fn without_env(mut self, key: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), None);
        self
    }

    /// Write `contents` as the config file and point `CHATLOG_CONFIG` at it.
    pub fn with_config(self, contents: &str) -> Self {
        let path = self.path("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config file");
        self.with_env("CHATLOG_CONFIG", path.to_string_lossy())
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.current_dir(self.temp_dir.path());

        for (key, value) in &self.env_vars {
            match value {
                Some(value) => cmd.env(key, value),
                None => cmd.env_remove(key),
            };
        }

        cmd
    }

    /// Execute the `chatlog` binary with `args` and capture the result.
    ///
    /// # Note
    /// This method uses `Command::cargo_bin()` which requires the binary to be
    /// built, which cargo test does for integration tests of the CLI crate.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("chatlog")
            .map_err(|e| anyhow::anyhow!("Failed to find chatlog binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
