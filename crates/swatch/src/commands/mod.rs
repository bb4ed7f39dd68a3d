pub mod build;
pub mod init;
pub mod serve;
pub mod watch;

use std::path::Path;

use anyhow::{Context, Result};
use swatch_static::DocsConfig;

/// Load the config file, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> Result<DocsConfig> {
    DocsConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}
