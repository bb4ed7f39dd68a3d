//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use swatch_static::{BuildResult, DocsConfig, StaticBuilder};

use super::load_config;

/// Run the build command.
pub fn run(config_path: &Path, output: Option<PathBuf>, strict: bool) -> Result<()> {
    tracing::info!("Building documentation...");

    let mut config = load_config(config_path)?;

    if let Some(output) = output {
        config.docs.output = output;
    }
    if strict {
        config.build.strict = true;
    }

    let result = build(config)?;
    report(&result);

    Ok(())
}

/// Build once with the given configuration.
pub fn build(config: DocsConfig) -> Result<BuildResult> {
    StaticBuilder::new(config)
        .build()
        .context("Documentation build failed")
}

/// Log a build summary.
pub fn report(result: &BuildResult) {
    tracing::info!(
        "Built {} pages and {} demos in {}ms",
        result.pages,
        result.demos,
        result.duration_ms
    );

    if result.skipped > 0 {
        tracing::info!("Skipped {} empty specs", result.skipped);
    }
    if result.degraded > 0 {
        tracing::warn!(
            "{} pages were rendered without their component template",
            result.degraded
        );
    }

    tracing::info!("Output: {}", result.output_dir.display());
}
