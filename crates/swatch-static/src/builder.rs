//! Static docs builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use minijinja::context;

use swatch_spec::{has_content, SpecFile, SPEC_EXTENSION};

use crate::config::DocsConfig;
use crate::environment::DocsEnvironment;
use crate::renderer::{ComponentRenderer, DocsError, FragmentError, RenderedPage};
use crate::tree::{component_tree, pattern_for, relative_paths, template_tree, TreeError};

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of component pages generated
    pub pages: usize,

    /// Number of demo pages generated
    pub demos: usize,

    /// Pages or demos rendered without their fragment
    pub degraded: usize,

    /// Spec files skipped for having no content
    pub skipped: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error(transparent)]
    Docs(#[from] DocsError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("{path} rendered without its component template: {source}")]
    Degraded {
        path: String,
        #[source]
        source: FragmentError,
    },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static docs builder.
pub struct StaticBuilder {
    config: DocsConfig,
    env: DocsEnvironment,
}

impl StaticBuilder {
    /// Create a new builder. The template environment is set up once here
    /// and reused for every page.
    pub fn new(config: DocsConfig) -> Self {
        let env = DocsEnvironment::new(&config);
        Self { config, env }
    }

    /// Build the docs site.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let output_dir = &self.config.docs.output;

        fs::create_dir_all(output_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let renderer = ComponentRenderer::new(&self.config, &self.env);
        let specs = self.discover_specs()?;

        let mut result = BuildResult {
            pages: 0,
            demos: 0,
            degraded: 0,
            skipped: 0,
            duration_ms: 0,
            output_dir: output_dir.clone(),
        };

        for relative in &specs {
            let path = self.config.docs.components_dir.join(relative);
            let content = fs::read(&path).map_err(|e| BuildError::ReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let structured = has_content(&content).map_err(|source| DocsError::Spec {
                path: path.display().to_string(),
                source,
            })?;
            if !structured {
                tracing::debug!("Skipping empty spec {}", path.display());
                result.skipped += 1;
                continue;
            }

            let file = SpecFile::new(&path);

            let RenderedPage {
                html,
                fragment_error,
            } = renderer.render_component(&content, &file)?;
            self.check(&file, fragment_error, &mut result)?;
            write_output(&output_dir.join(relative).with_extension("html"), &html)?;
            result.pages += 1;

            let RenderedPage {
                html,
                fragment_error,
            } = renderer.render_component_demo(&content, &file)?;
            self.check(&file, fragment_error, &mut result)?;
            let demo_dir = output_dir.join(relative.parent().unwrap_or(Path::new("")));
            write_output(&demo_dir.join(file.demo_file_name()), &html)?;
            result.demos += 1;
        }

        self.build_index()?;

        result.duration_ms = start.elapsed().as_millis() as u64;

        Ok(result)
    }

    /// Find every spec file below the components directory, sorted.
    fn discover_specs(&self) -> Result<Vec<PathBuf>, BuildError> {
        let dir = &self.config.docs.components_dir;

        if !dir.exists() {
            return Err(BuildError::ReadError {
                path: dir.display().to_string(),
                message: "components directory not found".to_string(),
            });
        }

        let mut specs = relative_paths(&pattern_for(dir, SPEC_EXTENSION), dir)?;
        specs.retain(|p| SpecFile::is_spec(p));
        specs.sort();

        tracing::info!("Found {} component specs in {}", specs.len(), dir.display());

        Ok(specs)
    }

    /// Count a degraded page, or fail on it in strict mode.
    fn check(
        &self,
        file: &SpecFile,
        fragment_error: Option<FragmentError>,
        result: &mut BuildResult,
    ) -> Result<(), BuildError> {
        let Some(source) = fragment_error else {
            return Ok(());
        };

        if self.config.build.strict {
            return Err(BuildError::Degraded {
                path: file.path.display().to_string(),
                source,
            });
        }

        result.degraded += 1;
        Ok(())
    }

    /// Render the index page and the navigation data.
    fn build_index(&self) -> Result<(), BuildError> {
        let ext = &self.config.build.template_extension;
        let docs_components = &self.config.docs.components_dir;
        let html_components = &self.config.html.components_dir;

        let components = component_tree(
            &pattern_for(docs_components, SPEC_EXTENSION),
            docs_components,
            &self.config,
        )?;
        let templates = template_tree(&pattern_for(html_components, ext), html_components, ext)?;

        let html = self
            .env
            .render(
                &self.config.docs.index_template,
                context! {
                    baseUri => &self.config.html.base_uri,
                    templateExtension => ext,
                    components => &components,
                    templates => &templates,
                },
            )
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        let output_dir = &self.config.docs.output;
        write_output(&output_dir.join("index.html"), &html)?;

        tracing::info!(
            "Indexed {} component groups and {} template groups",
            components.len(),
            templates.len()
        );

        let navigation = serde_json::json!({
            "components": components,
            "templates": templates,
        });
        let json = serde_json::to_string_pretty(&navigation)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;
        write_output(&output_dir.join("navigation.json"), &json)?;

        Ok(())
    }
}

fn write_output(path: &Path, content: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }

    fs::write(path, content)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}
