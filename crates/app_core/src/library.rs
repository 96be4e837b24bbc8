//! Folder-backed photo library

use crate::asset::{AssetId, AssetRef, Thumbnail, ThumbnailSize};
use crate::config::AppConfig;
use crate::gateway::{LibrarySubscription, PhotoLibraryGateway};
use crate::permission::PermissionStatus;
use crate::thumbnail::{decode_thumbnail, ThumbnailCache};
use crate::AppError;
use app_fs::{delete_files, scan_images, DeleteMode, FolderWatcher, ImageEntry, ScanOptions};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc;

/// Settings for [`FsPhotoLibrary`]
#[derive(Debug, Clone)]
pub struct FsLibraryOptions {
    pub root: PathBuf,
    pub scan: ScanOptions,
    pub delete_mode: DeleteMode,
    pub watch_debounce: Duration,
    pub cache_entries: usize,
}

impl FsLibraryOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scan: ScanOptions::default(),
            delete_mode: DeleteMode::RecycleBin,
            watch_debounce: Duration::from_millis(250),
            cache_entries: 32,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let library = &config.library;
        let scan = ScanOptions {
            recursive: library.recursive,
            show_hidden: library.show_hidden,
            ..ScanOptions::default()
        }
        .with_extra_extensions(&library.extra_extensions);

        Self {
            root: library.root.clone(),
            scan,
            delete_mode: if library.use_recycle_bin {
                DeleteMode::RecycleBin
            } else {
                DeleteMode::Permanent
            },
            watch_debounce: Duration::from_millis(library.watch_debounce_ms),
            cache_entries: config.viewer.thumbnail_cache_entries,
        }
    }
}

/// Photo library over the images of one folder.
///
/// Asset identifiers are file paths.
pub struct FsPhotoLibrary {
    options: FsLibraryOptions,
    cache: Arc<ThumbnailCache>,
}

impl FsPhotoLibrary {
    pub fn new(options: FsLibraryOptions) -> Self {
        let cache = Arc::new(ThumbnailCache::new(options.cache_entries));
        Self { options, cache }
    }

    pub fn root(&self) -> &Path {
        &self.options.root
    }

    fn asset_from_entry(entry: ImageEntry) -> AssetRef {
        let created: DateTime<Utc> = entry.created.unwrap_or(SystemTime::UNIX_EPOCH).into();
        AssetRef::new(entry.path.to_string_lossy(), created)
    }

    fn path_of(asset: &AssetRef) -> PathBuf {
        PathBuf::from(asset.id.as_str())
    }
}

/// Map what the folder allows onto a permission status
fn check_access(root: &Path) -> PermissionStatus {
    let metadata = match std::fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => return PermissionStatus::Restricted,
        Err(e) => {
            tracing::warn!("Library folder {} unavailable: {}", root.display(), e);
            return PermissionStatus::Denied;
        }
    };

    if !metadata.is_dir() {
        tracing::warn!("Library root is not a folder: {}", root.display());
        return PermissionStatus::Denied;
    }

    if let Err(e) = std::fs::read_dir(root) {
        tracing::warn!("Library folder {} unreadable: {}", root.display(), e);
        return PermissionStatus::Restricted;
    }

    if metadata.permissions().readonly() {
        PermissionStatus::Limited
    } else {
        PermissionStatus::Authorized
    }
}

#[async_trait]
impl PhotoLibraryGateway for FsPhotoLibrary {
    async fn request_access(&self) -> PermissionStatus {
        let root = self.options.root.clone();
        match tokio::task::spawn_blocking(move || check_access(&root)).await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!("Access check failed: {}", e);
                PermissionStatus::NotDetermined
            }
        }
    }

    async fn fetch_assets(&self) -> Result<Vec<AssetRef>, AppError> {
        let root = self.options.root.clone();
        let scan = self.options.scan.clone();

        let entries = tokio::task::spawn_blocking(move || scan_images(&root, &scan))
            .await
            .map_err(|e| AppError::Io(std::io::Error::other(e)))??;

        Ok(entries.into_iter().map(Self::asset_from_entry).collect())
    }

    async fn fetch_thumbnail(
        &self,
        asset: &AssetRef,
        size: ThumbnailSize,
    ) -> Result<Option<Thumbnail>, AppError> {
        if let Some(cached) = self.cache.get(&asset.id, size) {
            return Ok(Some(Thumbnail::clone(&cached)));
        }

        let path = Self::path_of(asset);
        let id: AssetId = asset.id.clone();
        let decoded = tokio::task::spawn_blocking(move || {
            if !path.exists() {
                return Ok(None);
            }
            decode_thumbnail(&path, &id, size).map(Some)
        })
        .await
        .map_err(|e| AppError::ImageDecode(e.to_string()))??;

        if let Some(thumbnail) = &decoded {
            self.cache.insert(size, Arc::new(thumbnail.clone()));
        }

        Ok(decoded)
    }

    async fn delete(&self, assets: &[AssetRef]) -> Result<(), AppError> {
        let paths: Vec<PathBuf> = assets.iter().map(Self::path_of).collect();
        let mode = self.options.delete_mode;

        let report = tokio::task::spawn_blocking(move || delete_files(&paths, mode))
            .await
            .map_err(|e| AppError::Delete(e.to_string()))??;

        for asset in assets {
            self.cache.evict(&asset.id);
        }

        tracing::info!(
            "Deleted {} images ({} already gone)",
            report.deleted.len(),
            report.skipped.len()
        );
        Ok(())
    }

    fn subscribe(&self) -> Result<LibrarySubscription, AppError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let watcher = FolderWatcher::new(
            &self.options.root,
            self.options.scan.recursive,
            self.options.watch_debounce,
            move || {
                let _ = tx.send(());
            },
        )?;

        Ok(LibrarySubscription::new(rx, watcher))
    }
}
