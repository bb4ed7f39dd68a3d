//! Scaffold a documentation project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use swatch_static::{templates, DocsConfig};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing swatch...");

    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    let root = config_path.parent().unwrap_or(Path::new(""));
    write(config_path, DEFAULT_CONFIG, yes)?;

    let config = DocsConfig::from_toml(DEFAULT_CONFIG)
        .context("Default config is invalid")?
        .resolve(root);

    for (name, source) in templates::all() {
        write(&config.docs.layout_dir.join(name), source, yes)?;
    }

    let buttons = config.docs.components_dir.join("buttons");
    write(&buttons.join("primary.yml"), EXAMPLE_SPEC, yes)?;
    write(&buttons.join("primary.njk"), EXAMPLE_TEMPLATE, yes)?;

    let html_buttons = config.html.components_dir.join("buttons");
    write(&html_buttons.join("button.njk"), EXAMPLE_TEMPLATE, yes)?;

    fs::create_dir_all(&config.docs.index_dir).context("Failed to create index directory")?;
    fs::create_dir_all(&config.html.layout_dir).context("Failed to create layout directory")?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'swatch build' to generate the documentation.");

    Ok(())
}

/// Write a file unless it exists and `overwrite` is false.
fn write(path: &Path, content: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        tracing::debug!("Keeping existing {}", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Created {}", path.display());

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Swatch Configuration

[docs]
# Templates for the docs index page
index_dir = "docs/index"

# Docs layout templates (component, preview, index)
layout_dir = "docs/layout"

# Component specs (.yml) and their templates
components_dir = "docs/components"

component_template = "component.njk"
preview_template = "preview.njk"
index_template = "index.njk"

# Output directory for the built site
output = "dist/docs"

[html]
# Pattern library layouts and component templates
layout_dir = "src/layout"
components_dir = "src/components"

# Base URI prefixed to asset links
base_uri = "/"

[build]
template_extension = "njk"

# Fail the build when a component template cannot be rendered
strict = false
"#;

const EXAMPLE_SPEC: &str = r#"title: Primary button
description: |
  The main call to action on a page. Use **one** per view.
implementation: |
  | Class          | Purpose          |
  |----------------|------------------|
  | `.btn`         | Base styles      |
  | `.btn-primary` | Primary emphasis |
data:
  label: Save changes
  variant: primary
demo: |
  <div class="demo-row">{}</div>
"#;

const EXAMPLE_TEMPLATE: &str = r#"<button class="btn btn-{{ variant | default("primary") }}" type="button">
  {{ label | default("Button") }}
</button>
"#;
