//! Hosting driver assembly.
//!
//! The driver is a fixed template around the extracted fragment. Names in
//! the template are a contract with the emscripten toolchain and the jank
//! runtime headers and must not change:
//!
//! | Name | Role |
//! |------|------|
//! | `__EMSCRIPTEN__` | guard for target-only lines |
//! | `EMSCRIPTEN_KEEPALIVE` | keeps the entry symbol through dead-code elimination |
//! | `jank::runtime::make_box` | managed construction of the entry struct |
//! | `call()` | the entry struct's single call operation |
//! | `jank_run_main` | exported C entry symbol |

use std::io::Write;
use std::path::Path;

use crate::extract::Extraction;

/// Local alias bound to the fully qualified entry struct.
pub const ENTRY_ALIAS: &str = "jank_entry_t";

/// Exported C symbol that runs the program.
pub const ENTRY_SYMBOL: &str = "jank_run_main";

/// Renders the driver source.
///
/// `fragment` is inserted verbatim; pass an [`Extraction`] fragment, which
/// is already trimmed. Output depends only on the arguments. The result uses `\n` line endings
/// and ends with exactly one newline.
pub fn assemble(
    fragment: &str,
    namespace: &str,
    entry_name: &str,
    header_include: &str,
) -> String {
    let mut out = String::with_capacity(fragment.len() + 512);

    out.push_str(&format!("#include \"{}\"\n", header_include));
    out.push_str("#ifdef __EMSCRIPTEN__\n");
    out.push_str("#  include <emscripten/emscripten.h>\n");
    out.push_str("#endif\n");
    out.push('\n');

    out.push_str(fragment);
    out.push_str("\n\n");

    out.push_str("namespace {\n");
    out.push_str(&format!(
        "  using {} = ::{}::{};\n",
        ENTRY_ALIAS, namespace, entry_name
    ));
    out.push_str("}\n");
    out.push('\n');

    out.push_str("extern \"C\" {\n");
    out.push('\n');
    out.push_str("#ifdef __EMSCRIPTEN__\n");
    out.push_str("EMSCRIPTEN_KEEPALIVE\n");
    out.push_str("#endif\n");
    out.push_str(&format!("void {}() {{\n", ENTRY_SYMBOL));
    out.push_str(&format!(
        "  auto fn = jank::runtime::make_box<{}>();\n",
        ENTRY_ALIAS
    ));
    out.push_str("  fn->call();\n");
    out.push_str("}\n");
    out.push('\n');
    out.push_str("int main() {\n");
    out.push_str(&format!("  {}();\n", ENTRY_SYMBOL));
    out.push_str("  return 0;\n");
    out.push_str("}\n");
    out.push('\n');
    out.push_str("}\n");

    out
}

/// A rendered driver ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostingArtifact {
    text: String,
}

impl HostingArtifact {
    /// Renders the driver for `extraction`.
    pub fn new(extraction: &Extraction, header_include: &str) -> Self {
        Self {
            text: assemble(
                &extraction.fragment,
                &extraction.namespace,
                &extraction.entry_name,
                header_include,
            ),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Writes the driver to `path`, creating parent directories.
    ///
    /// The text goes to a temporary file in the target directory first and is
    /// renamed over `path`, so a failed write never leaves a partial driver.
    /// An existing file at `path` is replaced.
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut file = tempfile::Builder::new()
            .prefix(".drivergen_")
            .suffix(".tmp")
            .tempfile_in(parent)?;
        file.write_all(self.text.as_bytes())?;
        file.flush()?;
        file.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}
