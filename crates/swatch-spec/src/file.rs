//! Spec file naming conventions.

use std::path::{Path, PathBuf};

/// Extension of component spec files.
pub const SPEC_EXTENSION: &str = "yml";

/// Suffix of generated demo pages.
pub const DEMO_SUFFIX: &str = ".demo.html";

/// A spec file handed to the renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecFile {
    /// Path of the `.yml` file
    pub path: PathBuf,
}

impl SpecFile {
    /// Create a descriptor for the spec at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the sibling template with the given extension.
    ///
    /// `button/primary.yml` -> `button/primary.njk`
    pub fn template_path(&self, template_ext: &str) -> PathBuf {
        self.path.with_extension(template_ext)
    }

    /// File name of the demo page generated for this spec.
    ///
    /// `button/primary.yml` -> `primary.demo.html`
    pub fn demo_file_name(&self) -> String {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        format!("{}{}", stem, DEMO_SUFFIX)
    }

    /// Whether the path carries the spec extension.
    pub fn is_spec(path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(SPEC_EXTENSION)
    }
}

/// Turn a file or directory name into a navigation label.
///
/// Strips the first occurrence of the template extension and replaces
/// underscores and hyphens with spaces.
pub fn label(segment: &str, template_ext: &str) -> String {
    segment
        .replacen(&format!(".{}", template_ext), "", 1)
        .replace(['_', '-'], " ")
}
