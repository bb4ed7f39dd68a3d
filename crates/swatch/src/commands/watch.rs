//! Rebuild on change.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notify::RecursiveMode;
use swatch_static::DocsConfig;

use super::build::{build, report};
use super::load_config;
use crate::watcher::FileWatcher;

/// Run the watch command.
pub async fn run(config_path: &Path) -> Result<()> {
    let config_file = std::path::absolute(config_path)
        .with_context(|| format!("Failed to resolve {}", config_path.display()))?;
    let mut config = load_config(&config_file)?;

    rebuild(&config);

    let (mut watcher, mut rx) = FileWatcher::new(&[], &config.build.template_extension)
        .context("Failed to start file watcher")?;

    // The project root, for the config file and directories created later
    if let Some(root) = config_file.parent() {
        watcher
            .watch(root, RecursiveMode::NonRecursive)
            .context("Failed to watch project root")?;
    }

    let mut watched = HashSet::new();
    watch_dirs(&mut watcher, &config, &mut watched)?;

    for dir in config.template_dirs() {
        if !watched.contains(dir) {
            tracing::warn!("Not watching {}: directory does not exist", dir.display());
        }
    }

    tracing::info!("Watching {} directories for changes", watched.len());

    while let Some(event) = rx.recv().await {
        let path = event.path();
        let is_config = path == config_file.as_path();

        if is_config {
            match load_config(&config_file) {
                Ok(reloaded) => {
                    tracing::info!("Reloaded {}", config_file.display());
                    config = reloaded;
                }
                Err(e) => {
                    tracing::error!("{:#}", e);
                    continue;
                }
            }
        } else if path.starts_with(&config.docs.output) {
            continue;
        }

        // Configured directories may have been created since the last event
        watch_dirs(&mut watcher, &config, &mut watched)?;

        if !is_config && !config.template_dirs().iter().any(|dir| path.starts_with(dir)) {
            continue;
        }

        tracing::info!("{}", event);
        rebuild(&config);
    }

    Ok(())
}

/// Watch every configured directory that exists and is not watched yet.
fn watch_dirs(
    watcher: &mut FileWatcher,
    config: &DocsConfig,
    watched: &mut HashSet<PathBuf>,
) -> Result<()> {
    for dir in config.template_dirs() {
        if watched.contains(dir) {
            continue;
        }

        let added = watcher
            .watch(dir, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
        if added {
            tracing::debug!("Watching {}", dir.display());
            watched.insert(dir.to_path_buf());
        }
    }

    Ok(())
}

/// Build with a fresh environment so edited templates are picked up.
fn rebuild(config: &DocsConfig) {
    match build(config.clone()) {
        Ok(result) => report(&result),
        Err(e) => tracing::error!("{:#}", e),
    }
}
