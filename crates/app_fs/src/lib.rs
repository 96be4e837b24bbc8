//! PhotoSweep File System Layer
//!
//! Provides the filesystem primitives behind the folder-backed photo library:
//! - Image scanning (newest first)
//! - Batched deletion to the recycle bin or permanently
//! - Debounced folder watching

mod delete;
mod scan;
mod watcher;

pub use delete::{delete_files, DeleteMode, DeleteReport};
pub use scan::{is_supported_image, scan_images, ImageEntry, ScanOptions, IMAGE_EXTENSIONS};
pub use watcher::FolderWatcher;

use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Trash error: {0}")]
    Trash(String),

    #[error("Watch error: {0}")]
    Watch(String),
}

impl FsError {
    /// Classify an I/O error against the path it happened on
    pub fn from_io(e: std::io::Error, path: &Path) -> Self {
        match e.kind() {
            ErrorKind::NotFound => FsError::NotFound(path.display().to_string()),
            ErrorKind::PermissionDenied => FsError::AccessDenied(path.display().to_string()),
            _ => FsError::Io(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, FsError>;
