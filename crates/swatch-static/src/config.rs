//! Build configuration (swatch.toml).

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default configuration file name.
pub const CONFIG_FILE: &str = "swatch.toml";

/// Complete build configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocsConfig {
    /// Documentation sources
    pub docs: DocsPaths,

    /// HTML pattern library sources
    pub html: HtmlPaths,

    /// Build behaviour
    pub build: BuildSettings,
}

/// Documentation source directories and layout templates.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocsPaths {
    /// Templates for the docs index page
    pub index_dir: PathBuf,

    /// Docs layout templates
    pub layout_dir: PathBuf,

    /// Component specs and their templates
    pub components_dir: PathBuf,

    /// Template wrapping a component page
    pub component_template: String,

    /// Template wrapping a component demo
    pub preview_template: String,

    /// Template for the docs index page
    pub index_template: String,

    /// Output directory
    pub output: PathBuf,
}

impl Default for DocsPaths {
    fn default() -> Self {
        Self {
            index_dir: PathBuf::from("docs/index"),
            layout_dir: PathBuf::from("docs/layout"),
            components_dir: PathBuf::from("docs/components"),
            component_template: "component.njk".to_string(),
            preview_template: "preview.njk".to_string(),
            index_template: "index.njk".to_string(),
            output: PathBuf::from("dist/docs"),
        }
    }
}

/// HTML pattern library directories.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HtmlPaths {
    /// Page layout templates
    pub layout_dir: PathBuf,

    /// Component templates
    pub components_dir: PathBuf,

    /// Base URI prefixed to asset links
    pub base_uri: String,
}

impl Default for HtmlPaths {
    fn default() -> Self {
        Self {
            layout_dir: PathBuf::from("src/layout"),
            components_dir: PathBuf::from("src/components"),
            base_uri: "/".to_string(),
        }
    }
}

/// Build behaviour.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuildSettings {
    /// Extension of template files, without the dot
    pub template_extension: String,

    /// Fail the build when a sample or demo cannot be rendered
    pub strict: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            template_extension: "njk".to_string(),
            strict: false,
        }
    }
}

impl DocsConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the defaults. Relative paths are resolved
    /// against the directory containing the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::from_toml(&content)?;
        let root = path.parent().unwrap_or(Path::new(""));

        tracing::info!("Loaded config from {}", path.display());

        Ok(config.resolve(root))
    }

    /// Parse configuration from TOML source.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve every directory against `root`.
    pub fn resolve(mut self, root: &Path) -> Self {
        for dir in [
            &mut self.docs.index_dir,
            &mut self.docs.layout_dir,
            &mut self.docs.components_dir,
            &mut self.docs.output,
            &mut self.html.layout_dir,
            &mut self.html.components_dir,
        ] {
            *dir = root.join(&*dir);
        }
        self
    }

    /// Template search directories, in lookup order.
    pub fn template_dirs(&self) -> [&Path; 5] {
        [
            self.docs.index_dir.as_path(),
            self.docs.layout_dir.as_path(),
            self.docs.components_dir.as_path(),
            self.html.layout_dir.as_path(),
            self.html.components_dir.as_path(),
        ]
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),
}
