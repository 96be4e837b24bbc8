//! Boundary to the photo library

use crate::asset::{AssetRef, Thumbnail, ThumbnailSize};
use crate::permission::PermissionStatus;
use crate::AppError;
use async_trait::async_trait;
use std::any::Any;
use tokio::sync::mpsc;

/// Access to an image library: enumeration, thumbnails, batch delete,
/// permission and change notification.
#[async_trait]
pub trait PhotoLibraryGateway: Send + Sync + 'static {
    /// Ask for (or report) access to the library
    async fn request_access(&self) -> PermissionStatus;

    /// All images, newest first
    async fn fetch_assets(&self) -> Result<Vec<AssetRef>, AppError>;

    /// Thumbnail bounded by `size`. `Ok(None)` when the library has nothing to show.
    async fn fetch_thumbnail(
        &self,
        asset: &AssetRef,
        size: ThumbnailSize,
    ) -> Result<Option<Thumbnail>, AppError>;

    /// Permanently delete a batch, all or nothing
    async fn delete(&self, assets: &[AssetRef]) -> Result<(), AppError>;

    /// Start observing library changes
    fn subscribe(&self) -> Result<LibrarySubscription, AppError>;
}

/// Live registration for library-change notifications.
///
/// Owned by whoever consumes the notifications; dropping it releases the
/// underlying observer.
pub struct LibrarySubscription {
    rx: mpsc::UnboundedReceiver<()>,
    _observer: Box<dyn Any + Send>,
}

impl LibrarySubscription {
    /// Wrap a receiver together with the observer that feeds it
    pub fn new<O: Any + Send>(rx: mpsc::UnboundedReceiver<()>, observer: O) -> Self {
        Self {
            rx,
            _observer: Box::new(observer),
        }
    }

    /// A subscription that never fires
    pub fn inert() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self::new(rx, tx)
    }

    /// Wait for the next change. `None` once the observer has gone away.
    pub async fn changed(&mut self) -> Option<()> {
        self.rx.recv().await?;
        // Collapse a burst into one notification
        while self.rx.try_recv().is_ok() {}
        Some(())
    }
}

impl std::fmt::Debug for LibrarySubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibrarySubscription").finish_non_exhaustive()
    }
}
