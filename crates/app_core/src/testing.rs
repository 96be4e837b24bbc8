//! In-memory library and recording view for controller tests

use crate::asset::{AssetId, AssetRef, Thumbnail, ThumbnailSize};
use crate::gateway::{LibrarySubscription, PhotoLibraryGateway};
use crate::permission::PermissionStatus;
use crate::view::SessionView;
use crate::AppError;
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::mpsc;

/// Thumbnail the mock library returns for `id`
pub fn thumb_for(id: &str) -> Thumbnail {
    Thumbnail {
        asset: AssetId::new(id),
        width: 1,
        height: 1,
        data: id.as_bytes().to_vec(),
    }
}

/// Assets named by `ids`, newest first
pub fn assets(ids: &[&str]) -> Vec<AssetRef> {
    let newest = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    ids.iter()
        .enumerate()
        .map(|(i, id)| AssetRef::new(*id, newest - Duration::minutes(i as i64)))
        .collect()
}

pub struct MockGateway {
    assets: Mutex<Vec<AssetRef>>,
    status: Mutex<PermissionStatus>,
    fetch_calls: AtomicUsize,
    fail_deletes: AtomicBool,
    missing_thumbnails: AtomicBool,
    deleted: Mutex<Vec<Vec<String>>>,
    changes: Mutex<Option<mpsc::UnboundedSender<()>>>,
}

impl MockGateway {
    pub fn with_assets(ids: &[&str]) -> Self {
        Self {
            assets: Mutex::new(assets(ids)),
            status: Mutex::new(PermissionStatus::Authorized),
            fetch_calls: AtomicUsize::new(0),
            fail_deletes: AtomicBool::new(false),
            missing_thumbnails: AtomicBool::new(false),
            deleted: Mutex::new(Vec::new()),
            changes: Mutex::new(None),
        }
    }

    pub fn set_assets(&self, ids: &[&str]) {
        *self.assets.lock() = assets(ids);
    }

    pub fn set_status(&self, status: PermissionStatus) {
        *self.status.lock() = status;
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn set_missing_thumbnails(&self, missing: bool) {
        self.missing_thumbnails.store(missing, Ordering::SeqCst);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn deleted_batches(&self) -> Vec<Vec<String>> {
        self.deleted.lock().clone()
    }

    pub fn notify_change(&self) {
        if let Some(tx) = self.changes.lock().as_ref() {
            let _ = tx.send(());
        }
    }
}

#[async_trait]
impl PhotoLibraryGateway for MockGateway {
    async fn request_access(&self) -> PermissionStatus {
        *self.status.lock()
    }

    async fn fetch_assets(&self) -> Result<Vec<AssetRef>, AppError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.assets.lock().clone())
    }

    async fn fetch_thumbnail(
        &self,
        asset: &AssetRef,
        _size: ThumbnailSize,
    ) -> Result<Option<Thumbnail>, AppError> {
        if self.missing_thumbnails.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(Some(thumb_for(asset.id.as_str())))
    }

    async fn delete(&self, batch: &[AssetRef]) -> Result<(), AppError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::Delete("library refused the change".into()));
        }

        let ids: Vec<String> = batch.iter().map(|a| a.id.to_string()).collect();
        self.assets.lock().retain(|a| !ids.contains(&a.id.to_string()));
        self.deleted.lock().push(ids);
        Ok(())
    }

    fn subscribe(&self) -> Result<LibrarySubscription, AppError> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.changes.lock() = Some(tx);
        Ok(LibrarySubscription::new(rx, ()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    Image(Option<Thumbnail>),
    Unavailable(String),
    DeniedAlert,
    CommitFailure(String),
    Counter(usize),
    AdvanceEnabled(bool),
    DeleteEnabled(bool),
    CommitEnabled(bool),
}

/// Records every call and keeps the latest widget state
#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
    pub counter: usize,
    pub advance_enabled: bool,
    pub delete_enabled: bool,
    pub commit_enabled: bool,
}

impl RecordingView {
    pub fn last_image(&self) -> Option<Option<Thumbnail>> {
        self.calls.iter().rev().find_map(|call| match call {
            ViewCall::Image(image) => Some(image.clone()),
            _ => None,
        })
    }

    pub fn denied_alerts(&self) -> usize {
        self.calls.iter().filter(|c| **c == ViewCall::DeniedAlert).count()
    }
}

impl SessionView for RecordingView {
    fn present_image(&mut self, image: Option<&Thumbnail>) {
        self.calls.push(ViewCall::Image(image.cloned()));
    }

    fn present_unavailable(&mut self, asset: &AssetId) {
        self.calls.push(ViewCall::Unavailable(asset.to_string()));
    }

    fn present_denied_alert(&mut self) {
        self.calls.push(ViewCall::DeniedAlert);
    }

    fn present_commit_failure(&mut self, error: &AppError) {
        self.calls.push(ViewCall::CommitFailure(error.to_string()));
    }

    fn update_counter(&mut self, count: usize) {
        self.counter = count;
        self.calls.push(ViewCall::Counter(count));
    }

    fn update_advance_enabled(&mut self, enabled: bool) {
        self.advance_enabled = enabled;
        self.calls.push(ViewCall::AdvanceEnabled(enabled));
    }

    fn update_delete_enabled(&mut self, enabled: bool) {
        self.delete_enabled = enabled;
        self.calls.push(ViewCall::DeleteEnabled(enabled));
    }

    fn update_commit_enabled(&mut self, enabled: bool) {
        self.commit_enabled = enabled;
        self.calls.push(ViewCall::CommitEnabled(enabled));
    }
}
