//! Doctor command implementation
//!
//! Checks that the compiler and runtime header can be found before a build
//! step depends on them.

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::DriverConfig;

/// Run the doctor command
///
/// Checks:
/// - Compiler binary at the resolved location
/// - Working directory
/// - Runtime header
/// - emscripten toolchain on PATH (informational)
///
/// # Returns
/// Exit code: 0 if all required checks pass, 1 otherwise
pub fn run(config: &DriverConfig) -> Result<ExitCode> {
    let base_dir = std::env::current_dir()?;
    let report = diagnose(config, &base_dir);

    println!("{}", "drivergen doctor".cyan().bold());
    println!("{}", "================".cyan());
    println!();

    println!("{}", "Versions:".bold());
    println!(
        "  {} drivergen-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("{}", "Compiler:".bold());
    if report.working_dir_ok {
        println!(
            "  {} working directory {}",
            "ok".green(),
            report.working_dir.display()
        );
    } else {
        println!(
            "  {} working directory {} does not exist",
            "!!".red(),
            report.working_dir.display()
        );
    }
    if report.compiler_ok {
        println!("  {} {}", "ok".green(), report.compiler.display());
    } else {
        println!("  {} not found at {}", "!!".red(), report.compiler.display());
        println!(
            "     {}",
            "Build the compiler first (./bin/compile) or pass --compiler.".dimmed()
        );
        if let Some(ref on_path) = report.compiler_on_path {
            println!(
                "     {}",
                format!("A jank binary is on PATH: --compiler {}", on_path.display()).dimmed()
            );
        }
    }
    println!();

    println!("{}", "Runtime:".bold());
    if report.header_ok {
        println!("  {} {}", "ok".green(), report.header.display());
    } else {
        // The driver can still be written; only the downstream build needs the header.
        println!("  {} header not found: {}", "!!".yellow(), report.header.display());
    }
    match report.emcc {
        Some(ref emcc) => println!("  {} emcc {}", "ok".green(), emcc.display()),
        None => println!(
            "  {} emcc not found in PATH {}",
            "!!".yellow(),
            "(needed to build the driver, not to generate it)".dimmed()
        ),
    }
    println!();

    if report.is_ok() {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

/// Results of the doctor checks.
#[derive(Debug, Clone)]
pub struct DoctorReport {
    pub working_dir: PathBuf,
    pub working_dir_ok: bool,
    pub compiler: PathBuf,
    pub compiler_ok: bool,
    /// A `jank` found via PATH, suggested when the configured one is missing.
    pub compiler_on_path: Option<PathBuf>,
    pub header: PathBuf,
    pub header_ok: bool,
    pub emcc: Option<PathBuf>,
}

impl DoctorReport {
    /// Required checks only; the header and emcc are advisory.
    pub fn is_ok(&self) -> bool {
        self.working_dir_ok && self.compiler_ok
    }
}

/// Runs every check without printing.
pub fn diagnose(config: &DriverConfig, base_dir: &Path) -> DoctorReport {
    let working_dir = config.resolve_working_dir(base_dir);
    let compiler = config.resolve_compiler(base_dir);
    let compiler_ok = compiler.is_file();
    let header = base_dir.join(&config.header);

    DoctorReport {
        working_dir_ok: working_dir.is_dir(),
        working_dir,
        compiler_ok,
        compiler_on_path: if compiler_ok {
            None
        } else {
            which::which("jank").ok()
        },
        compiler,
        header_ok: header.is_file(),
        header,
        emcc: which::which("emcc").ok(),
    }
}
