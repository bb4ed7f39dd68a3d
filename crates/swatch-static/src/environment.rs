//! Template environment for docs rendering.
//!
//! The environment searches the configured template directories in order and
//! falls back to the built-in layout templates. Custom behaviour is added
//! through [`EnvironmentExtension`]s.

use std::path::{Component, Path, PathBuf};

use minijinja::{path_loader, Environment, Value};
use serde::Serialize;

use swatch_spec::{label, render_markdown};

use crate::config::DocsConfig;
use crate::templates;

/// A unit of custom template behaviour (filters, globals, tests).
pub trait EnvironmentExtension: Send + Sync {
    /// Extension identifier, used in logs
    fn name(&self) -> &'static str;

    /// Register the extension on the environment.
    fn register(&self, env: &mut Environment<'static>);
}

/// `markdown` filter: renders a markdown string to safe HTML.
pub struct MarkdownFilter;

impl EnvironmentExtension for MarkdownFilter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn register(&self, env: &mut Environment<'static>) {
        env.add_filter("markdown", |source: String| {
            Value::from_safe_string(render_markdown(&source))
        });
    }
}

/// `label` filter: turns a file name into a navigation label.
pub struct LabelFilter {
    template_ext: String,
}

impl LabelFilter {
    pub fn new(template_ext: impl Into<String>) -> Self {
        Self {
            template_ext: template_ext.into(),
        }
    }
}

impl EnvironmentExtension for LabelFilter {
    fn name(&self) -> &'static str {
        "label"
    }

    fn register(&self, env: &mut Environment<'static>) {
        let ext = self.template_ext.clone();
        env.add_filter("label", move |name: String| label(&name, &ext));
    }
}

/// `baseUri` global.
pub struct BaseUriGlobal {
    base_uri: String,
}

impl BaseUriGlobal {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
        }
    }
}

impl EnvironmentExtension for BaseUriGlobal {
    fn name(&self) -> &'static str {
        "baseUri"
    }

    fn register(&self, env: &mut Environment<'static>) {
        env.add_global("baseUri", Value::from(self.base_uri.clone()));
    }
}

/// The extensions every docs environment gets by default.
pub fn standard_extensions(config: &DocsConfig) -> Vec<Box<dyn EnvironmentExtension>> {
    vec![
        Box::new(MarkdownFilter),
        Box::new(LabelFilter::new(&config.build.template_extension)),
        Box::new(BaseUriGlobal::new(&config.html.base_uri)),
    ]
}

/// A configured template environment.
pub struct DocsEnvironment {
    env: Environment<'static>,
    search_dirs: Vec<PathBuf>,
}

impl DocsEnvironment {
    /// Create an environment with the standard extensions.
    pub fn new(config: &DocsConfig) -> Self {
        let extensions = standard_extensions(config);
        let extensions: Vec<&dyn EnvironmentExtension> =
            extensions.iter().map(|e| e.as_ref()).collect();

        Self::with_extensions(config, &extensions)
    }

    /// Create an environment with an explicit set of extensions.
    pub fn with_extensions(config: &DocsConfig, extensions: &[&dyn EnvironmentExtension]) -> Self {
        let search_dirs: Vec<PathBuf> = config
            .template_dirs()
            .iter()
            .map(|dir| dir.to_path_buf())
            .collect();

        let loaders: Vec<_> = search_dirs
            .iter()
            .map(|dir| path_loader(dir.clone()))
            .collect();

        let mut env = Environment::new();
        env.set_loader(move |name| {
            if let Some((index, relative)) = pinned(name) {
                return match loaders.get(index) {
                    Some(load) => load(relative),
                    None => Ok(None),
                };
            }

            for load in &loaders {
                if let Some(source) = load(name)? {
                    return Ok(Some(source));
                }
            }
            Ok(templates::builtin(name).map(str::to_string))
        });

        for extension in extensions {
            tracing::debug!("Registering template extension {}", extension.name());
            extension.register(&mut env);
        }

        Self { env, search_dirs }
    }

    /// Render a template by name.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }

    /// Render the template file at `path`.
    ///
    /// A file inside a search directory is loaded from that directory only,
    /// so a template with the same relative name earlier in the search order
    /// cannot shadow it.
    pub fn render_file<S: Serialize>(&self, path: &Path, ctx: S) -> Result<String, minijinja::Error> {
        let name = match self.locate(path) {
            Some((index, relative)) => format!("{}{}/{}", PIN_PREFIX, index, to_slash(relative)),
            None => to_slash(path),
        };

        self.render(&name, ctx)
    }

    /// Template name for a file path.
    ///
    /// Paths inside a search directory become relative to the first one that
    /// contains them; names always use `/` separators.
    pub fn template_name(&self, path: &Path) -> String {
        let relative = self
            .locate(path)
            .map(|(_, relative)| relative)
            .unwrap_or(path);

        to_slash(relative)
    }

    /// Index of the first search directory holding `path`, and the path
    /// relative to it.
    fn locate<'p>(&self, path: &'p Path) -> Option<(usize, &'p Path)> {
        self.search_dirs
            .iter()
            .enumerate()
            .find_map(|(index, dir)| path.strip_prefix(dir).ok().map(|rel| (index, rel)))
    }
}

/// Marks a name as `@<search dir index>/<relative name>`.
const PIN_PREFIX: char = '@';

/// Split a pinned template name into its directory index and relative name.
fn pinned(name: &str) -> Option<(usize, &str)> {
    let (index, relative) = name.strip_prefix(PIN_PREFIX)?.split_once('/')?;
    Some((index.parse().ok()?, relative))
}

/// Join the normal components of a path with `/`.
pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
