//! Line-start heuristics for generated C++.
//!
//! The compiler prints its generated code, then whatever the program printed
//! while running, then the printed return value. There is no delimiter, so a
//! line is judged by how it starts. Generated code is indented or begins with
//! one of [`SOURCE_PREFIXES`]; program output almost never does.

/// Line prefixes (after trimming) that mark a line as generated source.
///
/// Covers declarations, braces, runtime-qualified names, comments,
/// preprocessor lines, continuation punctuation and control flow.
pub const SOURCE_PREFIXES: &[&str] = &[
    "namespace",
    "struct",
    "{",
    "}",
    "using",
    "auto",
    "return",
    "jank::",
    "object_ref",
    "//",
    "/*",
    "*",
    "#",
    "explicit",
    "virtual",
    "final",
    "override",
    ".",
    ",",
    ")",
    "(",
    ";",
    "if",
    "else",
    "for",
    "while",
];

/// Why a line was accepted as source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty line.
    Blank,
    /// Starts with whitespace.
    Indented,
    /// Trimmed text starts with a known prefix.
    Prefixed(&'static str),
    /// Not generated source.
    Foreign,
}

impl LineKind {
    pub fn is_source(self) -> bool {
        !matches!(self, LineKind::Foreign)
    }
}

/// Classifies a single line.
///
/// A lone `}` is always source; it is covered by the `}` prefix.
pub fn classify(line: &str) -> LineKind {
    if line.is_empty() {
        return LineKind::Blank;
    }

    let trimmed = line.trim();
    if let Some(prefix) = SOURCE_PREFIXES.iter().find(|p| trimmed.starts_with(**p)) {
        return LineKind::Prefixed(prefix);
    }

    if line.starts_with(char::is_whitespace) {
        return LineKind::Indented;
    }

    LineKind::Foreign
}

/// Returns true if `line` looks like generated source.
pub fn is_source_line(line: &str) -> bool {
    classify(line).is_source()
}

/// Accumulates lines from the start of `text` until the first foreign line.
///
/// The first line is always taken. Lines are rejoined with `\n`; the result
/// is not trimmed.
pub fn take_source_lines(text: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();

    for line in text.lines() {
        if !kept.is_empty() && !is_source_line(line) {
            break;
        }
        kept.push(line);
    }

    kept.join("\n")
}
