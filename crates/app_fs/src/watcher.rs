//! Folder watcher with notify-debouncer-mini
//!
//! Collapses every change under the watched folder into a single
//! "library changed" notification per debounce window.

use crate::{FsError, Result};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEventKind, Debouncer};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Watches a folder and reports debounced changes to a callback
pub struct FolderWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    path: PathBuf,
}

impl FolderWatcher {
    /// Start watching `path`. `on_change` runs on the debouncer thread once per
    /// debounce window in which something changed.
    pub fn new<F>(path: &Path, recursive: bool, debounce: Duration, on_change: F) -> Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let mut debouncer = new_debouncer(debounce, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    let changed = events
                        .iter()
                        .any(|e| matches!(e.kind, DebouncedEventKind::Any));
                    if changed {
                        tracing::debug!("Library folder changed ({} events)", events.len());
                        on_change();
                    }
                }
                Err(e) => {
                    tracing::warn!("Watcher error: {:?}", e);
                }
            }
        })
        .map_err(|e| FsError::Watch(e.to_string()))?;

        let mode = if recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        debouncer
            .watcher()
            .watch(path, mode)
            .map_err(|e| FsError::Watch(e.to_string()))?;
        tracing::info!("Watching: {}", path.display());

        Ok(Self {
            debouncer,
            path: path.to_path_buf(),
        })
    }

    /// Folder being watched
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FolderWatcher {
    fn drop(&mut self) {
        let _ = self.debouncer.watcher().unwatch(&self.path);
        tracing::info!("Unwatched: {}", self.path.display());
    }
}
