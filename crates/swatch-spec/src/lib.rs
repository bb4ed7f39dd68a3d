//! Component spec parsing and markdown rendering.
//!
//! This crate loads the YAML documents that describe documentation components,
//! checks whether a spec file carries any content, and converts the markdown
//! fields of a spec to HTML.

pub mod file;
pub mod markdown;
pub mod spec;

pub use file::{label, SpecFile, DEMO_SUFFIX, SPEC_EXTENSION};
pub use markdown::{render_implementation, render_markdown, TABLE_CLASS};
pub use spec::{has_content, outline, ComponentSpec, SpecError, SpecOutline, PLACEHOLDER};
