//! Batched file deletion (recycle bin or permanent)

use crate::{FsError, Result};
use std::path::PathBuf;

/// How a batch should be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Move to the platform recycle bin
    RecycleBin,
    /// Remove from disk
    Permanent,
}

/// Outcome of a batch delete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteReport {
    pub deleted: Vec<PathBuf>,
    /// Paths that no longer existed when the batch ran
    pub skipped: Vec<PathBuf>,
}

/// Delete a batch of files.
///
/// Paths that no longer exist are skipped rather than failing the batch.
/// Every remaining path must be a regular file; the batch is validated up
/// front so an invalid entry fails it before anything is touched.
pub fn delete_files(paths: &[PathBuf], mode: DeleteMode) -> Result<DeleteReport> {
    let mut report = DeleteReport::default();
    let mut targets = Vec::with_capacity(paths.len());

    for path in paths {
        if !path.exists() {
            tracing::debug!("Already gone, skipping: {}", path.display());
            report.skipped.push(path.clone());
            continue;
        }

        if !path.is_file() {
            return Err(FsError::InvalidPath(format!("Not a file: {}", path.display())));
        }

        targets.push(path.clone());
    }

    if targets.is_empty() {
        return Ok(report);
    }

    match mode {
        DeleteMode::RecycleBin => move_to_trash(&targets)?,
        DeleteMode::Permanent => {
            for path in &targets {
                std::fs::remove_file(path).map_err(|e| FsError::from_io(e, path))?;
                tracing::warn!("Permanently deleted: {}", path.display());
            }
        }
    }

    report.deleted = targets;
    Ok(report)
}

#[cfg(feature = "trash-support")]
fn move_to_trash(paths: &[PathBuf]) -> Result<()> {
    trash::delete_all(paths).map_err(|e| FsError::Trash(e.to_string()))?;
    tracing::info!("Moved {} files to trash", paths.len());
    Ok(())
}

#[cfg(not(feature = "trash-support"))]
fn move_to_trash(_paths: &[PathBuf]) -> Result<()> {
    Err(FsError::Trash("Recycle bin support not enabled".to_string()))
}
