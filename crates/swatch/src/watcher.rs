//! File watching for rebuilds.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Component spec was modified
    SpecModified(PathBuf),

    /// Template was modified
    TemplateModified(PathBuf),

    /// File was created
    Created(PathBuf),

    /// File was deleted
    Deleted(PathBuf),

    /// Generic modification
    Modified(PathBuf),
}

impl WatchEvent {
    /// Path the event refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::SpecModified(p)
            | Self::TemplateModified(p)
            | Self::Created(p)
            | Self::Deleted(p)
            | Self::Modified(p) => p,
        }
    }
}

impl fmt::Display for WatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Self::SpecModified(_) => "Spec changed",
            Self::TemplateModified(_) => "Template changed",
            Self::Created(_) => "Created",
            Self::Deleted(_) => "Deleted",
            Self::Modified(_) => "Changed",
        };
        write!(f, "{}: {}", what, self.path().display())
    }
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths.
    ///
    /// Returns the watcher and a channel to receive events.
    pub fn new(
        paths: &[PathBuf],
        template_ext: &str,
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;
        let mut watcher = Self { watcher };

        for path in paths {
            if !watcher.watch(path, RecursiveMode::Recursive)? {
                tracing::warn!("Not watching {}: path does not exist", path.display());
            }
        }

        let template_ext = template_ext.to_string();
        std::thread::spawn(move || {
            let mut last_event_time: Option<Instant> = None;
            let debounce_duration = Duration::from_millis(100);

            while let Ok(event) = sync_rx.recv() {
                // Debounce rapid events
                let now = Instant::now();
                if last_event_time.is_some_and(|last| now.duration_since(last) < debounce_duration)
                {
                    continue;
                }
                last_event_time = Some(now);

                for path in event.paths {
                    if let Some(e) = classify_event(&path, &event.kind, &template_ext) {
                        let _ = async_tx.blocking_send(e);
                    }
                }
            }
        });

        Ok((watcher, async_rx))
    }

    /// Start watching another path.
    ///
    /// Returns `false` without watching when the path does not exist.
    pub fn watch(&mut self, path: &Path, mode: RecursiveMode) -> Result<bool, std::io::Error> {
        if !path.exists() {
            return Ok(false);
        }

        self.watcher
            .watch(path, mode)
            .map_err(std::io::Error::other)?;

        Ok(true)
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(
    path: &Path,
    kind: &notify::EventKind,
    template_ext: &str,
) -> Option<WatchEvent> {
    use notify::EventKind;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match kind {
        EventKind::Create(_) => Some(WatchEvent::Created(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path.to_path_buf())),
        EventKind::Modify(_) => {
            if ext == swatch_static::SPEC_EXTENSION {
                Some(WatchEvent::SpecModified(path.to_path_buf()))
            } else if ext == template_ext {
                Some(WatchEvent::TemplateModified(path.to_path_buf()))
            } else {
                Some(WatchEvent::Modified(path.to_path_buf()))
            }
        }
        _ => None,
    }
}
