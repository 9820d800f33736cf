//! drivergen - builds emscripten hosting drivers from jank C++ codegen output
//!
//! This binary runs the jank compiler in `--codegen cpp` mode, extracts the
//! generated C++ from its output and wraps it in a driver exposing
//! `jank_run_main`.

use clap::{Args, Parser, Subcommand};
use drivergen_core::{ExtractOptions, ExtractStrategy, DEFAULT_SENTINEL};
use std::process::ExitCode;

use drivergen_cli::commands;
use drivergen_cli::config::{DriverConfig, DEFAULT_HEADER};

/// drivergen - jank to emscripten driver generator
#[derive(Parser)]
#[command(name = "drivergen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a jank file and write a self-contained C++ driver
    Generate {
        /// Path to the jank source file
        source: String,

        /// Path of the driver to write (parent directories are created)
        #[arg(short, long)]
        output: String,

        #[command(flatten)]
        compiler: CompilerArgs,

        #[command(flatten)]
        extract: ExtractArgs,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,

        /// Echo the compiler command line and its stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run extraction only, on saved compiler output
    Extract {
        /// Captured compiler output, or `-` for stdin
        input: String,

        #[command(flatten)]
        extract: ExtractArgs,

        /// Print the extracted fragment
        #[arg(long)]
        show_fragment: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check that the compiler and runtime header can be found
    Doctor {
        #[command(flatten)]
        compiler: CompilerArgs,
    },
}

/// Where to find and how to run the compiler.
#[derive(Args, Debug)]
struct CompilerArgs {
    /// Compiler binary (default: ../build/jank under the working directory, or DRIVERGEN_COMPILER)
    #[arg(long)]
    compiler: Option<String>,

    /// Working directory for the compiler (default: current directory, or DRIVERGEN_WORKDIR)
    #[arg(long)]
    workdir: Option<String>,

    /// Runtime support header included by the driver
    #[arg(long, default_value = DEFAULT_HEADER)]
    header: String,
}

/// How to separate generated code from trailing output.
#[derive(Args, Debug)]
struct ExtractArgs {
    /// Extraction strategy
    #[arg(long, default_value = "auto", value_parser = ["auto", "line-scan", "sentinel"])]
    strategy: String,

    /// Regex marking the start of trailing interpreter echo
    #[arg(long, default_value = DEFAULT_SENTINEL)]
    sentinel: String,
}

impl ExtractArgs {
    fn to_options(&self) -> anyhow::Result<ExtractOptions> {
        let strategy: ExtractStrategy = self.strategy.parse().map_err(anyhow::Error::msg)?;
        Ok(ExtractOptions::with_strategy(strategy).sentinel(self.sentinel.clone()))
    }
}

fn build_config(
    compiler: &CompilerArgs,
    extract: Option<&ExtractArgs>,
) -> anyhow::Result<DriverConfig> {
    let mut config = DriverConfig::default().header(&compiler.header);
    if let Some(ref path) = compiler.compiler {
        config = config.compiler_path(path);
    }
    if let Some(ref dir) = compiler.workdir {
        config = config.working_dir(dir);
    }
    if let Some(extract) = extract {
        config.extract = extract.to_options()?;
    }
    Ok(config.with_env(|key| std::env::var(key).ok()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            source,
            output,
            compiler,
            extract,
            json,
            verbose,
        } => build_config(&compiler, Some(&extract))
            .and_then(|config| commands::generate::run(&config, &source, &output, json, verbose)),
        Commands::Extract {
            input,
            extract,
            show_fragment,
            json,
        } => extract
            .to_options()
            .and_then(|options| commands::extract::run(&input, &options, show_fragment, json)),
        Commands::Doctor { compiler } => {
            build_config(&compiler, None).and_then(|config| commands::doctor::run(&config))
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
