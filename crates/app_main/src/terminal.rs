//! Line-oriented terminal view

use app_core::{t, AppError, AssetId, I18n, SessionView, Thumbnail};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Writes what the session wants shown as plain text lines
pub struct TerminalView<W: Write + Send> {
    out: W,
    i18n: Arc<I18n>,
    counter: usize,
    advance_enabled: bool,
    delete_enabled: bool,
    commit_enabled: bool,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W, i18n: Arc<I18n>) -> Self {
        Self {
            out,
            i18n,
            counter: 0,
            advance_enabled: false,
            delete_enabled: false,
            commit_enabled: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::warn!("Terminal write failed: {}", e);
        }
    }

    fn flag(&self, enabled: bool) -> String {
        self.i18n.get(if enabled { "status-on" } else { "status-off" })
    }

    fn print_status(&mut self) {
        let counter = t!(self.i18n, "trash-counter", count = self.counter);
        let text = t!(
            self.i18n,
            "status-line",
            counter = counter,
            next = self.flag(self.advance_enabled),
            delete = self.flag(self.delete_enabled),
            commit = self.flag(self.commit_enabled),
        );
        self.line(&text);
    }
}

/// File name of a path-like asset id, or the id itself
fn display_name(id: &str) -> String {
    Path::new(id)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.to_string())
}

impl<W: Write + Send> SessionView for TerminalView<W> {
    fn present_image(&mut self, image: Option<&Thumbnail>) {
        let text = match image {
            Some(thumb) => t!(
                self.i18n,
                "image-shown",
                name = display_name(thumb.asset.as_str()),
                width = thumb.width,
                height = thumb.height,
            ),
            None => self.i18n.get("empty-marker"),
        };
        self.line(&text);
    }

    fn present_unavailable(&mut self, asset: &AssetId) {
        let text = t!(self.i18n, "image-unavailable", name = display_name(asset.as_str()));
        self.line(&text);
    }

    fn present_denied_alert(&mut self) {
        let title = self.i18n.get("denied-alert-title");
        let body = self.i18n.get("denied-alert-body");
        self.line(&format!("!! {}", title));
        self.line(&body);
    }

    fn present_commit_failure(&mut self, error: &AppError) {
        let text = t!(self.i18n, "commit-failed", reason = error.user_message());
        self.line(&text);
    }

    fn update_counter(&mut self, count: usize) {
        // The count only drops to zero through a successful commit
        if self.counter > 0 && count == 0 {
            let text = self.i18n.get("commit-done");
            self.line(&text);
        }
        self.counter = count;
    }

    fn update_advance_enabled(&mut self, enabled: bool) {
        self.advance_enabled = enabled;
    }

    fn update_delete_enabled(&mut self, enabled: bool) {
        self.delete_enabled = enabled;
    }

    // Last update of every state push, so the status line goes out here
    fn update_commit_enabled(&mut self, enabled: bool) {
        self.commit_enabled = enabled;
        self.print_status();
    }
}
