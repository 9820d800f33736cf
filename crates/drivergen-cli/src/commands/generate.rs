//! Generate command implementation
//!
//! Compiles a jank source file in C++ codegen mode and writes a hosting
//! driver for it.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{GenerateOutput, JsonError};
use crate::config::DriverConfig;
use crate::error::DriverError;
use crate::pipeline::{generate, GenerateOutcome};

/// Run the generate command
///
/// # Arguments
/// * `config` - Resolved driver configuration
/// * `source` - Path to the jank source file
/// * `output` - Path of the driver to write
/// * `json_output` - Whether to output machine-readable JSON
/// * `verbose` - Whether to echo the compiler command and stderr
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    config: &DriverConfig,
    source: &str,
    output: &str,
    json_output: bool,
    verbose: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(config, source, output)
    } else {
        run_human(config, source, output, verbose)
    }
}

fn run_human(
    config: &DriverConfig,
    source: &str,
    output: &str,
    verbose: bool,
) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Compiling:".cyan().bold(), source);
    println!("{} {}", "Output:".cyan().bold(), output);
    println!("{} {}", "Strategy:".dimmed(), config.extract.strategy);

    match generate(config, Path::new(source), Path::new(output)) {
        Ok(outcome) => {
            if verbose {
                print_verbose(&outcome);
            }
            print_success(&outcome);
            println!(
                "\n{} driver written in {:.2?}",
                "ok".green().bold(),
                start.elapsed()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report_error(&e);
            Ok(ExitCode::from(1))
        }
    }
}

fn run_json(config: &DriverConfig, source: &str, output: &str) -> Result<ExitCode> {
    let (result, code) = match generate(config, Path::new(source), Path::new(output)) {
        Ok(outcome) => (GenerateOutput::success(&outcome), ExitCode::SUCCESS),
        Err(e) => {
            let mut error = JsonError::from_error(&e);
            if let Some(hint) = e.hint() {
                error = error.with_suggestion(hint);
            }
            (GenerateOutput::failure(error), ExitCode::from(1))
        }
    };

    let json = serde_json::to_string_pretty(&result)?;
    println!("{}", json);
    Ok(code)
}

fn print_success(outcome: &GenerateOutcome) {
    let extraction = &outcome.extraction;
    println!(
        "  {} namespace {}",
        "->".green(),
        extraction.namespace.bold()
    );
    println!(
        "  {} entry {}",
        "->".green(),
        extraction.qualified_entry().bold()
    );
    if extraction.entry_candidates.len() > 1 {
        println!(
            "     {}",
            format!(
                "{} candidate structs, using the last: {}",
                extraction.entry_candidates.len(),
                extraction.entry_candidates.join(", ")
            )
            .dimmed()
        );
    }
    println!(
        "  {} {} ({} bytes, includes \"{}\")",
        "->".green(),
        outcome.output_path.display(),
        outcome.bytes_written,
        outcome.header_include
    );
}

fn print_verbose(outcome: &GenerateOutcome) {
    println!("{} {}", "Command:".dimmed(), outcome.command_line);
    if outcome.captured.used_secondary() {
        println!(
            "  {} stdout was empty; extracted from stderr",
            "!".yellow()
        );
    } else if !outcome.captured.stderr.trim().is_empty() {
        println!("{}", "Compiler stderr:".dimmed());
        for line in outcome.captured.stderr.lines() {
            println!("  {}", line.dimmed());
        }
    }
}

fn report_error(err: &DriverError) {
    eprintln!("{} {}", "error:".red().bold(), err);
    if let Some(hint) = err.hint() {
        eprintln!("  {} {}", "hint:".yellow(), hint);
    }
}
