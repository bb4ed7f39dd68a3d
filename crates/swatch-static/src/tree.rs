//! Navigation trees built from template and component directories.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use swatch_spec::{label, outline, SpecError};

use crate::config::DocsConfig;
use crate::environment::to_slash;

/// A single navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variation {
    /// Link target, relative to the tree root
    pub url: String,
    /// Display name
    pub name: String,
}

/// A group of entries sharing a top-level directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    pub variations: Vec<Variation>,
}

/// Group key -> group.
pub type NavTree = BTreeMap<String, Group>;

/// Errors that can occur while building trees.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to list files: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid spec {path}: {source}")]
    Spec {
        path: String,
        #[source]
        source: SpecError,
    },
}

/// List the files matching `pattern`, relative to `relative_to`.
///
/// Paths outside `relative_to` are returned as matched. The order of the
/// result is unspecified.
pub fn relative_paths(pattern: &str, relative_to: &Path) -> Result<Vec<PathBuf>, TreeError> {
    let mut paths = Vec::new();

    for entry in glob::glob(pattern)? {
        let path = entry?;
        let relative = path
            .strip_prefix(relative_to)
            .map(Path::to_path_buf)
            .unwrap_or(path);
        paths.push(relative);
    }

    Ok(paths)
}

/// Glob pattern matching every file with `extension` below `dir`.
pub fn pattern_for(dir: &Path, extension: &str) -> String {
    format!(
        "{}/**/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        extension
    )
}

/// Build a tree of template files, named after their file paths.
pub fn template_tree(
    pattern: &str,
    relative_to: &Path,
    template_ext: &str,
) -> Result<NavTree, TreeError> {
    let mut files = relative_paths(pattern, relative_to)?;
    files.sort();

    let tree = files.iter().fold(NavTree::new(), |mut tree, file| {
        let key = label(&first_segment(file), template_ext);
        let name = label(&last_segment(file), template_ext);

        tree.entry(key).or_default().variations.push(Variation {
            url: to_slash(file),
            name,
        });
        tree
    });

    Ok(tree)
}

/// Build a tree of component specs, named after their titles.
///
/// Specs are read from the configured components directory. Files that do
/// not hold a structured YAML value are left out.
pub fn component_tree(
    pattern: &str,
    relative_to: &Path,
    config: &DocsConfig,
) -> Result<NavTree, TreeError> {
    let template_ext = config.build.template_extension.as_str();
    let mut files = relative_paths(pattern, relative_to)?;
    files.sort();

    let mut tree = NavTree::new();

    for file in &files {
        let path = config.docs.components_dir.join(file);
        let content = fs::read(&path).map_err(|e| TreeError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let outline = outline(&content).map_err(|source| TreeError::Spec {
            path: path.display().to_string(),
            source,
        })?;

        let Some(outline) = outline else {
            tracing::debug!("Skipping empty spec {}", path.display());
            continue;
        };

        let name = outline.title.unwrap_or_else(|| {
            let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            label(stem, template_ext)
        });

        tree.entry(first_segment(file))
            .or_default()
            .variations
            .push(Variation {
                url: to_slash(&file.with_extension(template_ext)),
                name,
            });
    }

    Ok(tree)
}

fn first_segment(path: &Path) -> String {
    path.iter()
        .next()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn last_segment(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
