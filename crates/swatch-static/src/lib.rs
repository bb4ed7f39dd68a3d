//! Template environment, renderers and static builder for swatch docs.
//!
//! Renders YAML component specs into documentation pages and live demos,
//! and builds the navigation trees shown on the docs index.

pub mod beautify;
pub mod builder;
pub mod config;
pub mod environment;
pub mod renderer;
pub mod templates;
pub mod tree;

pub use beautify::beautify;
pub use builder::{BuildError, BuildResult, StaticBuilder};
pub use config::{ConfigError, DocsConfig, CONFIG_FILE};
pub use environment::{DocsEnvironment, EnvironmentExtension};
pub use renderer::{ComponentRenderer, DocsError, FragmentError, RenderedPage};
pub use tree::{component_tree, relative_paths, template_tree, Group, NavTree, TreeError, Variation};

pub use swatch_spec::{SpecFile, SPEC_EXTENSION};
