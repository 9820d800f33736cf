//! Extract command implementation
//!
//! Runs only the extraction stage on saved compiler output. Handy when the
//! compiler's output format drifts and the driver comes out wrong.

use anyhow::{Context, Result};
use colored::Colorize;
use drivergen_core::{extract_with, ExtractOptions, ExtractResult, Extraction};
use std::io::Read;
use std::process::ExitCode;

use super::json_output::{ExtractOutput, JsonError};

/// Run the extract command
///
/// # Arguments
/// * `input` - Path to a captured output file, or `-` for stdin
/// * `options` - Extraction strategy and sentinel
/// * `show_fragment` - Whether to print the fragment after the identifiers
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &str,
    options: &ExtractOptions,
    show_fragment: bool,
    json_output: bool,
) -> Result<ExitCode> {
    let raw = read_input(input)?;
    let result = extract_with(&raw, options);

    if json_output {
        print_json(options, &result)
    } else {
        print_human(input, options, &result, show_fragment)
    }
}

/// Reads the capture from a file, or stdin for `-`.
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read captured output from stdin")?;
        Ok(raw)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read captured output: {}", input))
    }
}

fn print_json(options: &ExtractOptions, result: &ExtractResult<Extraction>) -> Result<ExitCode> {
    let strategy = options.strategy.as_str();
    let (output, code) = match result {
        Ok(extraction) => (
            ExtractOutput::success(strategy, extraction),
            ExitCode::SUCCESS,
        ),
        Err(e) => (
            ExtractOutput::failure(strategy, JsonError::from_error(e)),
            ExitCode::from(1),
        ),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(code)
}

fn print_human(
    input: &str,
    options: &ExtractOptions,
    result: &ExtractResult<Extraction>,
    show_fragment: bool,
) -> Result<ExitCode> {
    let extraction = match result {
        Ok(extraction) => extraction,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return Ok(ExitCode::from(1));
        }
    };

    println!("{} {}", "Extracted from:".cyan().bold(), input);
    println!("{} {}", "Strategy:".dimmed(), options.strategy);
    println!("  {} namespace {}", "->".green(), extraction.namespace.bold());
    println!(
        "  {} entry {}",
        "->".green(),
        extraction.qualified_entry().bold()
    );
    for (i, candidate) in extraction.entry_candidates.iter().enumerate() {
        println!("     {}", format!("[{}] {}", i, candidate).dimmed());
    }
    println!(
        "  {} {} lines of source",
        "->".green(),
        extraction.fragment.lines().count()
    );

    if show_fragment {
        println!();
        println!("{}", extraction.fragment);
    }

    Ok(ExitCode::SUCCESS)
}
