//! Structural pattern scanning.
//!
//! Identifier lookup in generated code is textual, not a parse: a fixed regex
//! with one capture group is run over the fragment and every hit is kept in
//! source order. Callers then pick the first or the last hit.

use std::sync::OnceLock;

use regex::Regex;

use crate::extract::ENTRY_BASE_TYPE;

/// Pattern for a namespace opening: `namespace <ident> {`.
const NAMESPACE_PATTERN: &str = r"namespace\s+([A-Za-z0-9_]+)\s*\{";

static NAMESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
static ENTRY_STRUCT_REGEX: OnceLock<Regex> = OnceLock::new();

fn namespace_regex() -> &'static Regex {
    NAMESPACE_REGEX.get_or_init(|| Regex::new(NAMESPACE_PATTERN).expect("invalid regex pattern"))
}

/// Pattern for an entry struct: `struct <ident> : <ENTRY_BASE_TYPE>`.
fn entry_struct_regex() -> &'static Regex {
    ENTRY_STRUCT_REGEX.get_or_init(|| {
        let pattern = format!(
            r"struct\s+([A-Za-z0-9_]+)\s*:\s*{}",
            regex::escape(ENTRY_BASE_TYPE)
        );
        Regex::new(&pattern).expect("invalid regex pattern")
    })
}

/// A single captured identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch<'a> {
    /// The text of the first capture group.
    pub name: &'a str,
}

/// Ordered list of matches of one pattern over one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult<'a> {
    matches: Vec<PatternMatch<'a>>,
}

impl<'a> ScanResult<'a> {
    /// First match in source order.
    pub fn first(&self) -> Option<&PatternMatch<'a>> {
        self.matches.first()
    }

    /// Last match in source order.
    pub fn last(&self) -> Option<&PatternMatch<'a>> {
        self.matches.last()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Captured names in source order.
    pub fn names(&self) -> Vec<&'a str> {
        self.matches.iter().map(|m| m.name).collect()
    }
}

/// Runs `pattern` over `text` and collects every match of capture group 1.
///
/// Matches without a first capture group are skipped.
pub fn scan<'a>(pattern: &Regex, text: &'a str) -> ScanResult<'a> {
    let matches = pattern
        .captures_iter(text)
        .filter_map(|caps| {
            caps.get(1).map(|name| PatternMatch {
                name: name.as_str(),
            })
        })
        .collect();

    ScanResult { matches }
}

/// All namespace declarations in `text`.
pub fn namespaces(text: &str) -> ScanResult<'_> {
    scan(namespace_regex(), text)
}

/// All entry struct declarations in `text`.
pub fn entry_structs(text: &str) -> ScanResult<'_> {
    scan(entry_struct_regex(), text)
}
