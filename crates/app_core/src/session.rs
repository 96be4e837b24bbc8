//! Browsing session: the working set and its cursor

use crate::asset::{AssetId, AssetRef};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("No asset to remove: the session is empty")]
    EmptySession,
}

/// Ordered working set of assets with a cursor on the current one.
///
/// The cursor is `Some` exactly when the working set is non-empty and
/// always points inside it. The set only shrinks, except through
/// [`BrowsingSession::load`].
#[derive(Debug, Clone, Default)]
pub struct BrowsingSession {
    assets: Vec<AssetRef>,
    cursor: Option<usize>,
}

impl BrowsingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the working set wholesale and point at the first asset.
    /// Duplicate identifiers keep their first occurrence.
    pub fn load(&mut self, assets: impl IntoIterator<Item = AssetRef>) {
        let mut seen = HashSet::new();
        self.assets = assets
            .into_iter()
            .filter(|asset| seen.insert(asset.id.clone()))
            .collect();
        self.cursor = if self.assets.is_empty() { None } else { Some(0) };
    }

    /// Drop every asset
    pub fn clear(&mut self) {
        self.assets.clear();
        self.cursor = None;
    }

    pub fn current(&self) -> Option<&AssetRef> {
        self.cursor.and_then(|i| self.assets.get(i))
    }

    /// Step to the next asset, wrapping at the end. No-op with fewer than two.
    pub fn advance(&mut self) {
        let len = self.assets.len();
        if len <= 1 {
            return;
        }
        if let Some(i) = self.cursor {
            self.cursor = Some((i + 1) % len);
        }
    }

    /// Remove the current asset and return it.
    ///
    /// The asset that slides into the vacated slot becomes current; removing
    /// the last one wraps the cursor to the front.
    pub fn remove_current(&mut self) -> Result<AssetRef, SessionError> {
        let i = self.cursor.ok_or(SessionError::EmptySession)?;
        let removed = self.assets.remove(i);

        let remaining = self.assets.len();
        self.cursor = if remaining == 0 { None } else { Some(i % remaining) };

        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Cursor position
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        self.assets.iter().any(|a| &a.id == id)
    }

    pub fn assets(&self) -> &[AssetRef] {
        &self.assets
    }
}
