//! Extraction of generated C++ from raw compiler output.
//!
//! The compiler is run with `--codegen cpp run <file>`, which prints the
//! generated translation unit and then runs it, so the capture also holds
//! program output and the printed result. Two truncation policies are
//! available because the trailing noise differs between invocation modes:
//!
//! - **line scan** - keep lines while they look like source
//!   (see [`crate::source_lines`])
//! - **sentinel** - cut at the first match of a sentinel regex
//!
//! [`ExtractStrategy::Auto`] applies the sentinel when it matches and the
//! line scan in every case.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::{ExtractError, ExtractResult};
use crate::scan;
use crate::source_lines::take_source_lines;

/// Fully qualified runtime base type of entry structs.
pub const ENTRY_BASE_TYPE: &str = "jank::runtime::obj::jit_function";

/// Default sentinel: a bare `nil` line, the printed result of a program whose
/// main form returns nothing.
pub const DEFAULT_SENTINEL: &str = r"(?m)^nil\s*$";

/// Truncation policy applied before identifier lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractStrategy {
    /// Cut at the sentinel if present, then line scan.
    #[default]
    Auto,
    /// Line scan only.
    LineScan,
    /// Cut at the sentinel only. Without a match the whole capture is kept.
    Sentinel,
}

impl ExtractStrategy {
    /// Returns the string identifier for this strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractStrategy::Auto => "auto",
            ExtractStrategy::LineScan => "line-scan",
            ExtractStrategy::Sentinel => "sentinel",
        }
    }

    fn uses_sentinel(&self) -> bool {
        matches!(self, ExtractStrategy::Auto | ExtractStrategy::Sentinel)
    }

    fn uses_line_scan(&self) -> bool {
        matches!(self, ExtractStrategy::Auto | ExtractStrategy::LineScan)
    }
}

impl fmt::Display for ExtractStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(ExtractStrategy::Auto),
            "line-scan" => Ok(ExtractStrategy::LineScan),
            "sentinel" => Ok(ExtractStrategy::Sentinel),
            other => Err(format!(
                "unknown extraction strategy '{}' (expected auto, line-scan, or sentinel)",
                other
            )),
        }
    }
}

/// Options controlling extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub strategy: ExtractStrategy,
    /// Regex marking the start of trailing interpreter echo.
    pub sentinel: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            strategy: ExtractStrategy::default(),
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}

impl ExtractOptions {
    /// Creates options with the given strategy and the default sentinel.
    pub fn with_strategy(strategy: ExtractStrategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    /// Sets the sentinel pattern.
    pub fn sentinel(mut self, pattern: impl Into<String>) -> Self {
        self.sentinel = pattern.into();
        self
    }
}

/// Result of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Trimmed generated source.
    pub fragment: String,
    /// First namespace declared in the fragment.
    pub namespace: String,
    /// Last entry struct declared in the fragment.
    pub entry_name: String,
    /// Every entry struct in declaration order; `entry_name` is the last one.
    pub entry_candidates: Vec<String>,
}

impl Extraction {
    /// `::<namespace>::<entry_name>`.
    pub fn qualified_entry(&self) -> String {
        format!("::{}::{}", self.namespace, self.entry_name)
    }
}

/// Extracts with [`ExtractOptions::default`].
pub fn extract(raw: &str) -> ExtractResult<Extraction> {
    extract_with(raw, &ExtractOptions::default())
}

/// Extracts the generated fragment and its identifiers from `raw`.
///
/// # Errors
///
/// - [`ExtractError::InvalidSentinel`] if the sentinel is needed and does not compile
/// - [`ExtractError::EmptyOutput`] if nothing is left after trimming
/// - [`ExtractError::NamespaceNotFound`] if no `namespace <name> {` is present
/// - [`ExtractError::EntryConstructNotFound`] if no entry struct is present
pub fn extract_with(raw: &str, options: &ExtractOptions) -> ExtractResult<Extraction> {
    let fragment = sanitize(raw, options)?;
    if fragment.is_empty() {
        return Err(ExtractError::EmptyOutput);
    }

    let namespace = scan::namespaces(&fragment)
        .first()
        .map(|m| m.name.to_string())
        .ok_or(ExtractError::NamespaceNotFound)?;

    let entry_candidates: Vec<String> = scan::entry_structs(&fragment)
        .names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let entry_name = entry_candidates
        .last()
        .cloned()
        .ok_or(ExtractError::EntryConstructNotFound)?;

    Ok(Extraction {
        fragment,
        namespace,
        entry_name,
        entry_candidates,
    })
}

/// Applies the truncation policy and trims the result.
///
/// Line endings are normalized to `\n` first, so every strategy sees the
/// same text.
pub fn sanitize(raw: &str, options: &ExtractOptions) -> ExtractResult<String> {
    let normalized = normalize_line_endings(raw);
    let mut text = normalized.as_str();

    if options.strategy.uses_sentinel() {
        let sentinel =
            Regex::new(&options.sentinel).map_err(|source| ExtractError::InvalidSentinel {
                pattern: options.sentinel.clone(),
                source,
            })?;
        if let Some(m) = sentinel.find(text) {
            text = &text[..m.start()];
        }
    }

    let kept = if options.strategy.uses_line_scan() {
        take_source_lines(text)
    } else {
        text.to_string()
    };

    Ok(kept.trim().to_string())
}

/// Rewrites `\r\n` and lone `\r` as `\n`.
fn normalize_line_endings(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::HostingArtifact;
    use pretty_assertions::assert_eq;

    const DEMO: &str = "namespace demo_42 {\nstruct entry_fn : jank::runtime::obj::jit_function {\n  void call() {}\n};\n}\nHello from WASM!\n";

    #[test]
    fn test_demo_capture() {
        let extraction = extract(DEMO).unwrap();
        assert_eq!(extraction.namespace, "demo_42");
        assert_eq!(extraction.entry_name, "entry_fn");
        assert_eq!(
            extraction.fragment,
            "namespace demo_42 {\nstruct entry_fn : jank::runtime::obj::jit_function {\n  void call() {}\n};\n}"
        );
        assert!(!extraction.fragment.contains("Hello from WASM!"));
    }

    #[test]
    fn test_last_entry_struct_wins() {
        let raw = "\
namespace app {
struct A : jank::runtime::obj::jit_function {};
struct B : jank::runtime::obj::jit_function {};
}
";
        let extraction = extract(raw).unwrap();
        assert_eq!(extraction.entry_name, "B");
        assert_eq!(extraction.entry_candidates, vec!["A", "B"]);
    }

    #[test]
    fn test_first_namespace_wins() {
        let raw = "namespace first {\n}\nnamespace second {\nstruct m : jank::runtime::obj::jit_function {};\n}";
        let extraction = extract(raw).unwrap();
        assert_eq!(extraction.namespace, "first");
    }

    #[test]
    fn test_trailing_value_dropped() {
        let raw = "namespace n {\nstruct m : jank::runtime::obj::jit_function {};\n}\n42\n";
        let extraction = extract(raw).unwrap();
        assert!(extraction.fragment.ends_with('}'));
        assert!(!extraction.fragment.contains("42"));
    }

    #[test]
    fn test_crlf_output_yields_lf_driver() {
        let raw = "namespace demo_42 {\r\nstruct entry_fn : jank::runtime::obj::jit_function {\r\n  void call() {}\r\n};\r\n}\r\nnil\r\n";

        for strategy in [
            ExtractStrategy::Auto,
            ExtractStrategy::LineScan,
            ExtractStrategy::Sentinel,
        ] {
            let extraction = extract_with(raw, &ExtractOptions::with_strategy(strategy)).unwrap();
            assert_eq!(extraction.entry_name, "entry_fn", "strategy {}", strategy);

            let text = HostingArtifact::new(&extraction, "h.hpp").into_string();
            assert!(!text.contains('\r'), "strategy {}", strategy);
            assert!(!text.contains("nil"), "strategy {}", strategy);
        }
    }

    #[test]
    fn test_lone_carriage_returns_become_newlines() {
        let raw = "namespace n {\rstruct m : jank::runtime::obj::jit_function {};\r}";
        let extraction =
            extract_with(raw, &ExtractOptions::with_strategy(ExtractStrategy::Sentinel)).unwrap();
        assert_eq!(
            extraction.fragment,
            "namespace n {\nstruct m : jank::runtime::obj::jit_function {};\n}"
        );
    }

    #[test]
    fn test_empty_output() {
        assert!(matches!(extract(""), Err(ExtractError::EmptyOutput)));
        assert!(matches!(extract("  \n\t\n"), Err(ExtractError::EmptyOutput)));
    }

    #[test]
    fn test_namespace_not_found() {
        let raw = "struct m : jank::runtime::obj::jit_function {};";
        assert!(matches!(extract(raw), Err(ExtractError::NamespaceNotFound)));
    }

    #[test]
    fn test_entry_construct_not_found() {
        let raw = "namespace n {\nstruct m {};\n}";
        assert!(matches!(
            extract(raw),
            Err(ExtractError::EntryConstructNotFound)
        ));
    }

    #[test]
    fn test_entry_after_foreign_line_is_not_seen() {
        let raw = "namespace n {\n}\ndone\nstruct m : jank::runtime::obj::jit_function {};";
        assert!(matches!(
            extract(raw),
            Err(ExtractError::EntryConstructNotFound)
        ));
    }

    #[test]
    fn test_sentinel_strategy_cuts_at_nil() {
        let raw = "namespace n {\nstruct m : jank::runtime::obj::jit_function {};\n}\nnil\n";
        let options = ExtractOptions::with_strategy(ExtractStrategy::Sentinel);
        let extraction = extract_with(raw, &options).unwrap();
        assert!(extraction.fragment.ends_with('}'));
        assert!(!extraction.fragment.contains("nil"));
    }

    #[test]
    fn test_sentinel_catches_echo_the_line_scan_keeps() {
        // A printed map starts with `{`, which the line scan accepts.
        let raw = "namespace n {\nstruct m : jank::runtime::obj::jit_function {};\n}\n{:a 1}\n";

        let line_scan =
            extract_with(raw, &ExtractOptions::with_strategy(ExtractStrategy::LineScan)).unwrap();
        assert!(line_scan.fragment.ends_with("{:a 1}"));

        let auto = extract_with(raw, &ExtractOptions::default().sentinel(r"(?m)^\{:")).unwrap();
        assert!(auto.fragment.ends_with('}'));
        assert!(!auto.fragment.contains(":a"));
    }

    #[test]
    fn test_sentinel_strategy_keeps_all_without_match() {
        let raw = "namespace n {\nstruct m : jank::runtime::obj::jit_function {};\n}\ndone";
        let options = ExtractOptions::with_strategy(ExtractStrategy::Sentinel);
        let extraction = extract_with(raw, &options).unwrap();
        assert!(extraction.fragment.ends_with("done"));
    }

    #[test]
    fn test_custom_sentinel() {
        let raw = "namespace n {\nstruct m : jank::runtime::obj::jit_function {};\n}\n;; ---- end ----\n  trailing\n";
        let options =
            ExtractOptions::with_strategy(ExtractStrategy::Sentinel).sentinel(";; ---- end");
        let extraction = extract_with(raw, &options).unwrap();
        assert!(!extraction.fragment.contains("trailing"));
    }

    #[test]
    fn test_invalid_sentinel() {
        let options = ExtractOptions::default().sentinel("(unclosed");
        let err = extract_with(DEMO, &options).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidSentinel { .. }));
    }

    #[test]
    fn test_invalid_sentinel_ignored_by_line_scan() {
        let options = ExtractOptions::with_strategy(ExtractStrategy::LineScan).sentinel("(unclosed");
        assert!(extract_with(DEMO, &options).is_ok());
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("auto".parse::<ExtractStrategy>().unwrap(), ExtractStrategy::Auto);
        assert_eq!(
            "line-scan".parse::<ExtractStrategy>().unwrap(),
            ExtractStrategy::LineScan
        );
        assert_eq!(
            "sentinel".parse::<ExtractStrategy>().unwrap(),
            ExtractStrategy::Sentinel
        );
        assert!("regex".parse::<ExtractStrategy>().is_err());
        assert_eq!(ExtractStrategy::LineScan.to_string(), "line-scan");
    }

    #[test]
    fn test_qualified_entry() {
        let extraction = extract(DEMO).unwrap();
        assert_eq!(extraction.qualified_entry(), "::demo_42::entry_fn");
    }
}
