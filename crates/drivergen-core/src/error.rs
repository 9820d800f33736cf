//! Error types for extraction.

use thiserror::Error;

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Trait for errors that carry a stable code for reporting.
///
/// Codes are stable strings like `EXTRACT_001` so that callers and the
/// `--json` output can match on them without parsing messages.
///
/// # Example
///
/// ```
/// use drivergen_core::{ErrorCode, ExtractError};
///
/// let err = ExtractError::NamespaceNotFound;
/// assert_eq!(err.code(), "EXTRACT_002");
/// assert_eq!(err.category(), "extract");
/// ```
pub trait ErrorCode: std::error::Error {
    /// Get the error code for reporting.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

/// Errors that can occur while extracting generated source from raw output.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Nothing usable was left after sanitizing the capture.
    #[error("compiler did not emit any C++ code")]
    EmptyOutput,

    /// No `namespace <name> {` declaration in the fragment.
    #[error("could not find namespace in generated C++")]
    NamespaceNotFound,

    /// No `struct <name> : jank::runtime::obj::jit_function` declaration in the fragment.
    #[error("could not find jit_function struct in generated C++")]
    EntryConstructNotFound,

    /// The configured sentinel is not a valid regular expression.
    #[error("invalid sentinel pattern '{pattern}': {source}")]
    InvalidSentinel {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl ErrorCode for ExtractError {
    fn code(&self) -> &'static str {
        match self {
            ExtractError::EmptyOutput => "EXTRACT_001",
            ExtractError::NamespaceNotFound => "EXTRACT_002",
            ExtractError::EntryConstructNotFound => "EXTRACT_003",
            ExtractError::InvalidSentinel { .. } => "EXTRACT_004",
        }
    }

    fn category(&self) -> &'static str {
        "extract"
    }
}
