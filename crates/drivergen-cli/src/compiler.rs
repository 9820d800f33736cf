//! jank compiler subprocess.
//!
//! The compiler is run once, to completion, with both output channels
//! captured. There is no timeout: a hung compiler hangs the invocation.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{DriverError, DriverResult};

/// Arguments placed before the source path.
pub const CODEGEN_ARGS: &[&str] = &["--codegen", "cpp", "run"];

/// Captured output of a finished compiler run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    /// The text to extract from: stdout, or stderr when stdout is empty.
    pub fn primary_text(&self) -> &str {
        if self.used_secondary() {
            &self.stderr
        } else {
            &self.stdout
        }
    }

    /// Returns true if stdout was empty and stderr was used instead.
    pub fn used_secondary(&self) -> bool {
        self.stdout.is_empty()
    }
}

/// A jank compiler invocation.
#[derive(Debug, Clone)]
pub struct Compiler {
    binary: PathBuf,
    working_dir: PathBuf,
}

impl Compiler {
    pub fn new(binary: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Builds the command for `source`.
    ///
    /// `jank --codegen cpp run <source>`, run from the working directory.
    pub fn command(&self, source: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(CODEGEN_ARGS)
            .arg(source)
            .current_dir(&self.working_dir);
        cmd
    }

    /// Human-readable command line, for verbose output.
    pub fn command_line(&self, source: &Path) -> String {
        let mut parts = vec![self.binary.display().to_string()];
        parts.extend(CODEGEN_ARGS.iter().map(|a| a.to_string()));
        parts.push(source.display().to_string());
        parts.join(" ")
    }

    /// Runs the compiler on `source` and captures both channels.
    ///
    /// # Errors
    ///
    /// - [`DriverError::SpawnFailed`] if the process cannot be started
    /// - [`DriverError::SubprocessFailure`] on non-zero exit; output is discarded
    pub fn run(&self, source: &Path) -> DriverResult<CapturedOutput> {
        let output = self
            .command(source)
            .output()
            .map_err(DriverError::SpawnFailed)?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let exit_code = output.status.code().unwrap_or(-1);
            return Err(DriverError::subprocess_failed(exit_code, stderr));
        }

        Ok(CapturedOutput { stdout, stderr })
    }
}
