//! The generate pipeline: prerequisites, compile, extract, assemble, write.
//!
//! Nothing is written unless every earlier stage succeeded. The only
//! filesystem change on the failure path is parent directory creation, and
//! that happens only once the driver text is fully rendered.

use std::path::{Path, PathBuf};

use drivergen_core::{extract_with, header_reference, Extraction, HostingArtifact};

use crate::compiler::{CapturedOutput, Compiler};
use crate::config::DriverConfig;
use crate::error::{DriverError, DriverResult};

/// Result of a successful generate run.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// Extracted fragment and identifiers.
    pub extraction: Extraction,
    /// Absolute path the driver was written to.
    pub output_path: PathBuf,
    /// Path used in the driver's `#include`.
    pub header_include: String,
    /// The compiler command line that was run.
    pub command_line: String,
    /// Everything the compiler printed.
    pub captured: CapturedOutput,
    /// Size of the written driver in bytes.
    pub bytes_written: usize,
}

/// Runs the pipeline with paths resolved against the current directory.
pub fn generate(
    config: &DriverConfig,
    source: &Path,
    output: &Path,
) -> DriverResult<GenerateOutcome> {
    let base_dir = std::env::current_dir()?;
    generate_in(config, source, output, &base_dir)
}

/// Runs the pipeline with relative paths resolved against `base_dir`.
///
/// # Errors
///
/// - [`DriverError::PrerequisiteMissing`] if the compiler binary or `source`
///   does not exist; checked before anything is spawned
/// - [`DriverError::SpawnFailed`] / [`DriverError::SubprocessFailure`] from the compiler
/// - [`DriverError::Extract`] if the output holds no usable fragment
/// - [`DriverError::WriteFailed`] if the driver cannot be written
pub fn generate_in(
    config: &DriverConfig,
    source: &Path,
    output: &Path,
    base_dir: &Path,
) -> DriverResult<GenerateOutcome> {
    let compiler_path = config.resolve_compiler(base_dir);
    let source_path = base_dir.join(source);
    check_prerequisites(&compiler_path, &source_path)?;

    let source_path = source_path.canonicalize()?;
    let compiler = Compiler::new(compiler_path, config.resolve_working_dir(base_dir));
    let command_line = compiler.command_line(&source_path);
    let captured = compiler.run(&source_path)?;

    let extraction = extract_with(captured.primary_text(), &config.extract)?;

    let output_path = base_dir.join(output);
    let header_include = header_reference(&config.header, &output_path, base_dir);
    let artifact = HostingArtifact::new(&extraction, &header_include);

    artifact
        .write_to(&output_path)
        .map_err(|source| DriverError::WriteFailed {
            path: output_path.clone(),
            source,
        })?;

    Ok(GenerateOutcome {
        extraction,
        output_path,
        header_include,
        command_line,
        captured,
        bytes_written: artifact.text().len(),
    })
}

/// Checks that the compiler binary and the source file exist.
///
/// The compiler is checked first.
pub fn check_prerequisites(compiler: &Path, source: &Path) -> DriverResult<()> {
    if !compiler.is_file() {
        return Err(DriverError::compiler_missing(compiler));
    }
    if !source.is_file() {
        return Err(DriverError::source_missing(source));
    }
    Ok(())
}
