//! Output contract the session controller drives

use crate::asset::{AssetId, Thumbnail};
use crate::AppError;

/// The single sink for everything the controller wants shown.
pub trait SessionView: Send {
    /// Show an image, or the empty marker for `None`
    fn present_image(&mut self, image: Option<&Thumbnail>);

    /// The current asset has no image to show (gone or undecodable).
    /// Falls back to the empty marker.
    fn present_unavailable(&mut self, asset: &AssetId) {
        let _ = asset;
        self.present_image(None);
    }

    fn present_denied_alert(&mut self);

    fn present_commit_failure(&mut self, error: &AppError);

    /// Number of assets in the trash
    fn update_counter(&mut self, count: usize);

    fn update_advance_enabled(&mut self, enabled: bool);

    fn update_delete_enabled(&mut self, enabled: bool);

    fn update_commit_enabled(&mut self, enabled: bool);
}
