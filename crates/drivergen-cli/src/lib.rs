//! drivergen CLI library.
//!
//! This crate provides the command-line side of drivergen: configuration,
//! running the jank compiler in C++ codegen mode, and the `generate`,
//! `extract` and `doctor` commands. Extraction and assembly live in
//! `drivergen-core`.

pub mod commands;
pub mod compiler;
pub mod config;
pub mod error;
pub mod pipeline;

pub use compiler::{CapturedOutput, Compiler};
pub use config::DriverConfig;
pub use error::{DriverError, DriverResult};
pub use pipeline::{generate, generate_in, GenerateOutcome};
