//! Driver generation configuration.
//!
//! Settings come from, in order of precedence: explicit setters (CLI flags),
//! environment variables, then defaults.

use std::path::{Path, PathBuf};

use drivergen_core::{ExtractOptions, ExtractStrategy};

/// Environment variable overriding the compiler binary path.
pub const COMPILER_ENV: &str = "DRIVERGEN_COMPILER";

/// Environment variable overriding the compiler working directory.
pub const WORKDIR_ENV: &str = "DRIVERGEN_WORKDIR";

/// Compiler location relative to the working directory.
pub const DEFAULT_COMPILER_PATH: &str = "../build/jank";

/// Runtime support header included by the driver.
pub const DEFAULT_HEADER: &str = "minimal_jank_runtime.hpp";

/// Configuration for a driver generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Compiler binary. `None` means [`DEFAULT_COMPILER_PATH`] under the working directory.
    pub compiler_path: Option<PathBuf>,
    /// Working directory for the compiler. `None` means the current directory.
    pub working_dir: Option<PathBuf>,
    /// Runtime header to include.
    pub header: PathBuf,
    /// Extraction strategy and sentinel.
    pub extract: ExtractOptions,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            compiler_path: None,
            working_dir: None,
            header: PathBuf::from(DEFAULT_HEADER),
            extract: ExtractOptions::default(),
        }
    }
}

impl DriverConfig {
    /// Creates a config from defaults plus environment overrides.
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Fills unset fields from `lookup`, which maps variable names to values.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.compiler_path.is_none() {
            self.compiler_path = lookup(COMPILER_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from);
        }
        if self.working_dir.is_none() {
            self.working_dir = lookup(WORKDIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from);
        }
        self
    }

    /// Sets the compiler binary path.
    pub fn compiler_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.compiler_path = Some(path.into());
        self
    }

    /// Sets the compiler working directory.
    pub fn working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }

    /// Sets the runtime header.
    pub fn header(mut self, path: impl Into<PathBuf>) -> Self {
        self.header = path.into();
        self
    }

    /// Sets the extraction strategy.
    pub fn strategy(mut self, strategy: ExtractStrategy) -> Self {
        self.extract.strategy = strategy;
        self
    }

    /// Sets the sentinel pattern.
    pub fn sentinel(mut self, pattern: impl Into<String>) -> Self {
        self.extract.sentinel = pattern.into();
        self
    }

    /// Working directory resolved against `base_dir`.
    pub fn resolve_working_dir(&self, base_dir: &Path) -> PathBuf {
        match &self.working_dir {
            Some(dir) => base_dir.join(dir),
            None => base_dir.to_path_buf(),
        }
    }

    /// Compiler binary resolved against `base_dir` (explicit paths) or the
    /// working directory (the default location).
    pub fn resolve_compiler(&self, base_dir: &Path) -> PathBuf {
        match &self.compiler_path {
            Some(path) => base_dir.join(path),
            None => self
                .resolve_working_dir(base_dir)
                .join(DEFAULT_COMPILER_PATH),
        }
    }
}
