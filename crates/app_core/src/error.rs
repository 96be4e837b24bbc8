//! Application error types

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Recoverable Errors (notify user, continue) =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Photo library access denied")]
    PermissionDenied,

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Library watch error: {0}")]
    Watch(String),

    // ===== Fatal Errors (session termination) =====
    #[error("Session channel closed")]
    ChannelClosed,
}

impl AppError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Io(_)
                | AppError::PermissionDenied
                | AppError::AssetNotFound(_)
                | AppError::ImageDecode(_)
                | AppError::Delete(_)
                | AppError::Watch(_)
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::PermissionDenied => {
                "Photo library access denied. Grant access in your system settings.".to_string()
            }
            AppError::AssetNotFound(id) => format!("Image not found: {}", id),
            AppError::ImageDecode(msg) => format!("Cannot load image: {}", msg),
            AppError::Delete(msg) => format!("The library refused the delete ({})", msg),
            _ => self.to_string(),
        }
    }
}

impl From<app_fs::FsError> for AppError {
    fn from(e: app_fs::FsError) -> Self {
        match e {
            app_fs::FsError::NotFound(p) => AppError::AssetNotFound(p),
            app_fs::FsError::AccessDenied(_) => AppError::PermissionDenied,
            app_fs::FsError::Trash(msg) | app_fs::FsError::InvalidPath(msg) => AppError::Delete(msg),
            app_fs::FsError::Watch(msg) => AppError::Watch(msg),
            app_fs::FsError::Io(e) => AppError::Io(e),
        }
    }
}

impl From<image::ImageError> for AppError {
    fn from(e: image::ImageError) -> Self {
        AppError::ImageDecode(e.to_string())
    }
}
