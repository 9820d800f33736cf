//! Header include path computation.
//!
//! The driver includes the runtime header by a path relative to the directory
//! the driver is written to, so the pair can be moved together. All
//! computation is lexical; nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Returns the string to place inside `#include "..."` for `header`.
///
/// An absolute `header` is used unchanged. Otherwise `header` and
/// `output_path` are both resolved against `base_dir` and the header is
/// expressed relative to the output file's parent directory. Separators are
/// always `/`.
///
/// # Example
///
/// ```
/// use drivergen_core::header_reference;
/// use std::path::Path;
///
/// let include = header_reference(
///     Path::new("minimal_jank_runtime.hpp"),
///     Path::new("out/driver.cpp"),
///     Path::new("/work"),
/// );
/// assert_eq!(include, "../minimal_jank_runtime.hpp");
/// ```
pub fn header_reference(header: &Path, output_path: &Path, base_dir: &Path) -> String {
    if header.is_absolute() {
        return to_posix(header);
    }

    let header_abs = normalize(&base_dir.join(header));
    let output_abs = normalize(&base_dir.join(output_path));
    let output_dir = output_abs.parent().unwrap_or(&output_abs);

    to_posix(&relative_to(&header_abs, output_dir))
}

/// Lexically resolves `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Expresses `target` relative to the directory `from`.
///
/// Both paths should already be normalized and share the same root.
pub fn relative_to(target: &Path, from: &Path) -> PathBuf {
    let target: Vec<Component> = target.components().collect();
    let from: Vec<Component> = from.components().collect();

    let common = target
        .iter()
        .zip(from.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push("..");
    }
    for component in &target[common..] {
        out.push(component.as_os_str());
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

fn to_posix(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
