//! JSON output types for machine-readable CLI output.
//!
//! These back the `--json` flag on `generate` and `extract`, so build scripts
//! can read the chosen identifiers and error codes without scraping colored
//! text.

use drivergen_core::{ErrorCode, Extraction};
use serde::Serialize;

use crate::pipeline::GenerateOutcome;

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "DRIVER_001", "EXTRACT_002")
    pub code: String,
    /// Error category ("driver" or "extract")
    pub category: String,
    /// Human-readable error message
    pub message: String,
    /// Suggestion for fixing the error (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl JsonError {
    /// Creates a JSON error from any coded error.
    pub fn from_error<E: ErrorCode>(err: &E) -> Self {
        Self {
            code: err.code().to_string(),
            category: err.category().to_string(),
            message: err.message(),
            suggestion: None,
        }
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Identifiers found in the fragment.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonIdentifiers {
    pub namespace: String,
    pub entry_name: String,
    pub entry_candidates: Vec<String>,
}

impl From<&Extraction> for JsonIdentifiers {
    fn from(extraction: &Extraction) -> Self {
        Self {
            namespace: extraction.namespace.clone(),
            entry_name: extraction.entry_name.clone(),
            entry_candidates: extraction.entry_candidates.clone(),
        }
    }
}

/// Output of `generate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<JsonIdentifiers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_include: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_written: Option<usize>,
    pub errors: Vec<JsonError>,
}

impl GenerateOutput {
    pub fn success(outcome: &GenerateOutcome) -> Self {
        Self {
            success: true,
            identifiers: Some(JsonIdentifiers::from(&outcome.extraction)),
            output_path: Some(outcome.output_path.display().to_string()),
            header_include: Some(outcome.header_include.clone()),
            bytes_written: Some(outcome.bytes_written),
            errors: Vec::new(),
        }
    }

    pub fn failure(error: JsonError) -> Self {
        Self {
            success: false,
            identifiers: None,
            output_path: None,
            header_include: None,
            bytes_written: None,
            errors: vec![error],
        }
    }
}

/// Output of `extract --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractOutput {
    pub success: bool,
    pub strategy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifiers: Option<JsonIdentifiers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    pub errors: Vec<JsonError>,
}

impl ExtractOutput {
    pub fn success(strategy: &str, extraction: &Extraction) -> Self {
        Self {
            success: true,
            strategy: strategy.to_string(),
            identifiers: Some(JsonIdentifiers::from(extraction)),
            fragment: Some(extraction.fragment.clone()),
            errors: Vec::new(),
        }
    }

    pub fn failure(strategy: &str, error: JsonError) -> Self {
        Self {
            success: false,
            strategy: strategy.to_string(),
            identifiers: None,
            fragment: None,
            errors: vec![error],
        }
    }
}
