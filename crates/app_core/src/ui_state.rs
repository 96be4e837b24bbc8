//! UI state derived from the session and the trash buffer

use crate::asset::AssetRef;
use crate::session::BrowsingSession;
use crate::trash::TrashBuffer;

/// What the view should show. Always recomputed, never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// `None` means the empty marker
    pub current: Option<AssetRef>,
    pub advance_enabled: bool,
    pub delete_enabled: bool,
    pub trash_count: usize,
    pub commit_enabled: bool,
}

impl UiState {
    pub fn derive(session: &BrowsingSession, trash: &TrashBuffer) -> Self {
        Self {
            current: session.current().cloned(),
            advance_enabled: session.len() > 1,
            delete_enabled: !session.is_empty(),
            trash_count: trash.count(),
            commit_enabled: !trash.is_empty(),
        }
    }
}
