//! drivergen core
//!
//! This crate turns the textual output of a compiler running in C++ codegen
//! mode into a self-contained hosting driver that can be built for a sandboxed
//! target (for example emscripten/WASM) and entered through a single C symbol.
//!
//! # Overview
//!
//! The pipeline has two stages:
//!
//! 1. **Extraction** ([`extract`]) - recovers the generated C++ fragment from a
//!    noisy capture that may also hold program output, printed return values
//!    and diagnostics, then locates the namespace and the entry struct.
//! 2. **Assembly** ([`assemble`]) - wraps the fragment in a fixed driver
//!    template exposing `jank_run_main` and a process `main`.
//!
//! Both stages are pure; the only side effect in this crate is
//! [`HostingArtifact::write_to`].
//!
//! # Example
//!
//! ```
//! use drivergen_core::{extract, HostingArtifact};
//!
//! let raw = "namespace demo {\nstruct main_fn : jank::runtime::obj::jit_function {\n};\n}\n42\n";
//! let extraction = extract(raw).unwrap();
//! assert_eq!(extraction.namespace, "demo");
//! assert_eq!(extraction.entry_name, "main_fn");
//!
//! let artifact = HostingArtifact::new(&extraction, "runtime.hpp");
//! assert!(artifact.text().contains("using jank_entry_t = ::demo::main_fn;"));
//! ```
//!
//! # Crate Structure
//!
//! - [`extract`] - fragment recovery and identifier lookup
//! - [`source_lines`] - the line-start allow-list used by the line scan
//! - [`scan`] - ordered regex match lists
//! - [`assemble`] - driver template and artifact persistence
//! - [`paths`] - header include path computation
//! - [`error`] - error types

pub mod assemble;
pub mod error;
pub mod extract;
pub mod paths;
pub mod scan;
pub mod source_lines;

pub use assemble::{assemble, HostingArtifact, ENTRY_ALIAS, ENTRY_SYMBOL};
pub use error::{ErrorCode, ExtractError, ExtractResult};
pub use extract::{
    extract, extract_with, ExtractOptions, ExtractStrategy, Extraction, DEFAULT_SENTINEL,
    ENTRY_BASE_TYPE,
};
pub use paths::header_reference;
