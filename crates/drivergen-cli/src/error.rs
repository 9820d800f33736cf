//! Error types for driver generation.

use drivergen_core::{ErrorCode, ExtractError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for driver generation.
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors that can occur while generating a driver.
///
/// Every variant is fatal to the invocation. Nothing is retried: the compiler
/// is deterministic, so a second run would produce the same output.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Compiler binary or input source file is missing.
    #[error("{what} not found: {}", path.display())]
    PrerequisiteMissing { what: &'static str, path: PathBuf },

    /// Failed to spawn the compiler process.
    #[error("Failed to spawn compiler: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// Compiler exited with non-zero status.
    #[error("Compiler exited with status {exit_code}: {stderr}")]
    SubprocessFailure { exit_code: i32, stderr: String },

    /// Compiler output did not contain a usable fragment.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Failed to write the driver file.
    #[error("Failed to write driver to {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error during path resolution.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DriverError {
    /// Creates a missing compiler binary error.
    pub fn compiler_missing(path: impl Into<PathBuf>) -> Self {
        Self::PrerequisiteMissing {
            what: "compiler binary",
            path: path.into(),
        }
    }

    /// Creates a missing source file error.
    pub fn source_missing(path: impl Into<PathBuf>) -> Self {
        Self::PrerequisiteMissing {
            what: "source file",
            path: path.into(),
        }
    }

    /// Creates a new subprocess failure error.
    pub fn subprocess_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::SubprocessFailure {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Returns a suggestion for the user, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            DriverError::PrerequisiteMissing {
                what: "compiler binary",
                ..
            } => Some("build the compiler first (./bin/compile) or pass --compiler"),
            DriverError::Extract(ExtractError::EmptyOutput) => {
                Some("the compiler may have reported an error on the other output channel; rerun with --verbose")
            }
            _ => None,
        }
    }
}

impl ErrorCode for DriverError {
    fn code(&self) -> &'static str {
        match self {
            DriverError::PrerequisiteMissing { .. } => "DRIVER_001",
            DriverError::SpawnFailed(_) => "DRIVER_002",
            DriverError::SubprocessFailure { .. } => "DRIVER_003",
            DriverError::Extract(e) => e.code(),
            DriverError::WriteFailed { .. } => "DRIVER_004",
            DriverError::Io(_) => "DRIVER_005",
        }
    }

    fn category(&self) -> &'static str {
        match self {
            DriverError::Extract(e) => e.category(),
            _ => "driver",
        }
    }
}
