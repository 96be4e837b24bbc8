//! Trash buffer: soft-deleted assets waiting for a permanent delete

use crate::asset::{AssetId, AssetRef};
use crate::AppError;
use std::future::Future;
use thiserror::Error;

/// A commit that did not go through. The buffer is left exactly as it was.
#[derive(Error, Debug)]
#[error("Commit of {pending} assets failed: {source}")]
pub struct CommitError {
    /// Assets still waiting in the buffer
    pub pending: usize,
    #[source]
    pub source: AppError,
}

/// Assets removed from the working set, pending permanent deletion
#[derive(Debug, Clone, Default)]
pub struct TrashBuffer {
    assets: Vec<AssetRef>,
}

impl TrashBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset. Adding one that is already held does nothing.
    pub fn add(&mut self, asset: AssetRef) {
        if self.contains(&asset.id) {
            tracing::debug!("Asset {} is already in the trash", asset.id);
            return;
        }
        self.assets.push(asset);
    }

    pub fn count(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.assets.iter().any(|a| &a.id == id)
    }

    pub fn assets(&self) -> &[AssetRef] {
        &self.assets
    }

    /// Hand the whole buffer to `delete_fn` as one batch.
    ///
    /// Success clears the buffer and returns how many assets were committed.
    /// Failure leaves every asset in place for a retry. An empty buffer
    /// commits trivially without calling `delete_fn`.
    pub async fn commit<F, Fut>(&mut self, delete_fn: F) -> Result<usize, CommitError>
    where
        F: FnOnce(Vec<AssetRef>) -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        if self.assets.is_empty() {
            return Ok(0);
        }

        let batch = self.assets.clone();
        match delete_fn(batch).await {
            Ok(()) => {
                let committed = self.assets.len();
                self.assets.clear();
                tracing::info!("Committed {} assets from the trash", committed);
                Ok(committed)
            }
            Err(source) => {
                tracing::warn!("Trash commit failed, keeping {} assets: {}", self.assets.len(), source);
                Err(CommitError {
                    pending: self.assets.len(),
                    source,
                })
            }
        }
    }
}
