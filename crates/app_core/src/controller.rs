//! Session controller
//!
//! Owns the browsing session and the trash buffer, reacts to user actions
//! and library callbacks, and pushes the derived [`UiState`] to the view
//! after every mutation.
//!
//! All mutation happens on one task: actions and thumbnail completions are
//! queued on a single channel and handled one at a time by
//! [`SessionController::run`]. Thumbnail fetches are the only work spawned
//! off that task; each new request aborts the previous one, and a result
//! that still arrives for an asset that is no longer current is dropped.

use crate::asset::{AssetId, AssetRef, Thumbnail, ThumbnailSize};
use crate::gateway::{LibrarySubscription, PhotoLibraryGateway};
use crate::permission::{PermissionState, PermissionStatus};
use crate::session::BrowsingSession;
use crate::trash::TrashBuffer;
use crate::ui_state::UiState;
use crate::view::SessionView;
use crate::AppError;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// User-level actions a front end can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Advance,
    Delete,
    CommitTrash,
    /// Re-check access and reload, same as a library change
    Reload,
    Quit,
}

#[derive(Debug)]
enum SessionEvent {
    Action(SessionAction),
    ThumbnailLoaded {
        asset: AssetId,
        image: Result<Option<Thumbnail>, AppError>,
    },
}

/// Cloneable entry point for front ends
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    pub fn send(&self, action: SessionAction) -> Result<(), AppError> {
        self.tx
            .send(SessionEvent::Action(action))
            .map_err(|_| AppError::ChannelClosed)
    }

    pub fn advance(&self) -> Result<(), AppError> {
        self.send(SessionAction::Advance)
    }

    pub fn delete(&self) -> Result<(), AppError> {
        self.send(SessionAction::Delete)
    }

    pub fn commit_trash(&self) -> Result<(), AppError> {
        self.send(SessionAction::CommitTrash)
    }

    pub fn quit(&self) -> Result<(), AppError> {
        self.send(SessionAction::Quit)
    }
}

/// Browsing/trash state machine
pub struct SessionController<G: PhotoLibraryGateway, V: SessionView> {
    gateway: Arc<G>,
    view: V,
    session: BrowsingSession,
    trash: TrashBuffer,
    permission: PermissionState,
    thumbnail_size: ThumbnailSize,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    /// Thumbnail fetch currently running, aborted when superseded
    inflight: Option<JoinHandle<()>>,
}

impl<G: PhotoLibraryGateway, V: SessionView> SessionController<G, V> {
    pub fn new(gateway: Arc<G>, view: V, thumbnail_size: ThumbnailSize) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            gateway,
            view,
            session: BrowsingSession::new(),
            trash: TrashBuffer::new(),
            permission: PermissionState::Unknown,
            thumbnail_size,
            events_tx,
            events_rx,
            inflight: None,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            tx: self.events_tx.clone(),
        }
    }

    pub fn ui_state(&self) -> UiState {
        UiState::derive(&self.session, &self.trash)
    }

    pub fn permission(&self) -> PermissionState {
        self.permission
    }

    pub fn session(&self) -> &BrowsingSession {
        &self.session
    }

    pub fn trash(&self) -> &TrashBuffer {
        &self.trash
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Run until [`SessionAction::Quit`]. Requests access first, then
    /// handles queued events and library changes in arrival order.
    pub async fn run(mut self) -> Result<V, AppError> {
        let mut subscription = match self.gateway.subscribe() {
            Ok(subscription) => subscription,
            Err(e) => {
                tracing::warn!("Library changes will not be observed: {}", e);
                LibrarySubscription::inert()
            }
        };
        let mut watching = true;

        self.start().await;

        loop {
            tokio::select! {
                biased;

                event = self.events_rx.recv() => {
                    let Some(event) = event else { break };
                    if self.dispatch(event).await.is_break() {
                        break;
                    }
                }
                change = subscription.changed(), if watching => {
                    match change {
                        Some(()) => self.on_library_changed().await,
                        None => {
                            tracing::debug!("Library observer closed");
                            watching = false;
                        }
                    }
                }
            }
        }

        self.cancel_thumbnail();
        drop(subscription);
        tracing::info!("Session finished with {} assets left in the trash", self.trash.count());

        Ok(self.view)
    }

    /// Push the initial (empty) state and ask the library for access
    pub async fn start(&mut self) {
        self.push_ui_state();
        let status = self.gateway.request_access().await;
        self.on_permission(status).await;
    }

    /// Handle the next queued event
    pub async fn process_next(&mut self) -> ControlFlow<()> {
        match self.events_rx.recv().await {
            Some(event) => self.dispatch(event).await,
            None => ControlFlow::Break(()),
        }
    }

    async fn dispatch(&mut self, event: SessionEvent) -> ControlFlow<()> {
        match event {
            SessionEvent::Action(action) => {
                tracing::debug!("Action: {:?}", action);
                match action {
                    SessionAction::Advance => self.on_advance(),
                    SessionAction::Delete => self.on_delete(),
                    SessionAction::CommitTrash => self.on_commit_trash().await,
                    SessionAction::Reload => self.on_library_changed().await,
                    SessionAction::Quit => return ControlFlow::Break(()),
                }
            }
            SessionEvent::ThumbnailLoaded { asset, image } => self.on_thumbnail(asset, image),
        }
        ControlFlow::Continue(())
    }

    /// Apply a permission status from the library
    pub async fn on_permission(&mut self, status: PermissionStatus) {
        if status == PermissionStatus::NotDetermined {
            tracing::debug!("Permission not determined yet");
            return;
        }

        let previous = self.permission;
        self.permission = previous.apply(status);
        tracing::info!("Permission {:?} -> {:?}", previous, self.permission);

        if self.permission.can_browse() {
            self.reload().await;
        } else if self.permission.is_denied() {
            self.cancel_thumbnail();
            self.session.clear();
            if !previous.is_denied() {
                self.view.present_denied_alert();
            }
            self.view.present_image(None);
            self.push_ui_state();
        }
    }

    /// The library changed: re-check access, which reloads when still granted
    pub async fn on_library_changed(&mut self) {
        tracing::info!("Library changed, checking access again");
        let status = self.gateway.request_access().await;
        self.on_permission(status).await;
    }

    pub fn on_advance(&mut self) {
        if !self.ui_state().advance_enabled {
            tracing::debug!("Advance ignored with {} assets", self.session.len());
            return;
        }

        self.session.advance();
        self.push_ui_state();
        self.show_current();
    }

    pub fn on_delete(&mut self) {
        if !self.ui_state().delete_enabled {
            tracing::debug!("Delete ignored, nothing to delete");
            return;
        }

        match self.session.remove_current() {
            Ok(asset) => {
                tracing::info!("Moved {} to the trash", asset.id);
                self.trash.add(asset);
            }
            Err(e) => {
                tracing::error!("Delete failed: {}", e);
                return;
            }
        }

        self.push_ui_state();
        self.show_current();
    }

    pub async fn on_commit_trash(&mut self) {
        if !self.ui_state().commit_enabled {
            tracing::debug!("Commit ignored, trash is empty");
            return;
        }

        let gateway = Arc::clone(&self.gateway);
        let result = self
            .trash
            .commit(|batch| async move { gateway.delete(&batch).await })
            .await;

        match result {
            Ok(_) => self.push_ui_state(),
            Err(e) => self.view.present_commit_failure(&e.source),
        }
    }

    /// Thumbnail completion. Results for anything but the current asset are stale.
    pub fn on_thumbnail(&mut self, asset: AssetId, image: Result<Option<Thumbnail>, AppError>) {
        let is_current = self.session.current().map_or(false, |current| current.id == asset);
        if !is_current {
            tracing::debug!("Discarding stale thumbnail for {}", asset);
            return;
        }

        self.inflight = None;
        match image {
            Ok(Some(image)) => self.view.present_image(Some(&image)),
            Ok(None) => self.view.present_unavailable(&asset),
            Err(e) => {
                tracing::warn!("Thumbnail for {} failed: {}", asset, e);
                self.view.present_unavailable(&asset);
            }
        }
    }

    async fn reload(&mut self) {
        match self.gateway.fetch_assets().await {
            Ok(assets) => {
                let trash = &self.trash;
                let fresh: Vec<AssetRef> = assets
                    .into_iter()
                    .filter(|asset| !trash.contains(&asset.id))
                    .collect();
                self.session.load(fresh);
                tracing::info!("Loaded {} assets", self.session.len());
            }
            Err(e) => {
                tracing::error!("Failed to fetch assets, keeping the current set: {}", e);
            }
        }

        self.push_ui_state();
        self.show_current();
    }

    fn show_current(&mut self) {
        self.cancel_thumbnail();

        match self.session.current().cloned() {
            Some(asset) => self.request_thumbnail(asset),
            None => self.view.present_image(None),
        }
    }

    fn request_thumbnail(&mut self, asset: AssetRef) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.events_tx.clone();
        let size = self.thumbnail_size;

        self.inflight = Some(tokio::spawn(async move {
            let image = gateway.fetch_thumbnail(&asset, size).await;
            let _ = tx.send(SessionEvent::ThumbnailLoaded {
                asset: asset.id,
                image,
            });
        }));
    }

    fn cancel_thumbnail(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }

    fn push_ui_state(&mut self) {
        let state = self.ui_state();
        self.view.update_counter(state.trash_count);
        self.view.update_advance_enabled(state.advance_enabled);
        self.view.update_delete_enabled(state.delete_enabled);
        self.view.update_commit_enabled(state.commit_enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{thumb_for, MockGateway, RecordingView, ViewCall};
    use proptest::prelude::*;
    use std::time::Duration;

    type Controller = SessionController<MockGateway, RecordingView>;

    fn controller(gateway: MockGateway) -> (Controller, Arc<MockGateway>) {
        let gateway = Arc::new(gateway);
        let controller = SessionController::new(
            Arc::clone(&gateway),
            RecordingView::default(),
            ThumbnailSize::default(),
        );
        (controller, gateway)
    }

    /// Drain queued events until nothing arrives for a short while
    async fn settle(controller: &mut Controller) {
        while let Ok(flow) =
            tokio::time::timeout(Duration::from_millis(50), controller.process_next()).await
        {
            if flow.is_break() {
                break;
            }
        }
    }

    fn current_id(controller: &Controller) -> Option<String> {
        controller.ui_state().current.map(|a| a.id.to_string())
    }

    fn assert_invariants(controller: &Controller) {
        let state = controller.ui_state();
        let session = controller.session();

        match session.position() {
            Some(i) => assert!(i < session.len()),
            None => assert!(session.is_empty()),
        }
        assert_eq!(state.delete_enabled, !session.is_empty());
        assert_eq!(state.advance_enabled, session.len() > 1);
        assert_eq!(state.trash_count, controller.trash().count());
        assert_eq!(state.commit_enabled, state.trash_count > 0);
        for asset in controller.trash().assets() {
            assert!(!session.contains(&asset.id));
        }

        // The view saw the latest push
        let view = controller.view();
        assert_eq!(view.counter, state.trash_count);
        assert_eq!(view.advance_enabled, state.advance_enabled);
        assert_eq!(view.delete_enabled, state.delete_enabled);
        assert_eq!(view.commit_enabled, state.commit_enabled);
    }

    #[tokio::test]
    async fn test_authorized_loads_and_shows_first() {
        let (mut controller, gateway) = controller(MockGateway::with_assets(&["a", "b", "c"]));

        controller.start().await;
        settle(&mut controller).await;

        assert_eq!(controller.permission(), PermissionState::Authorized);
        assert_eq!(gateway.fetch_calls(), 1);
        assert_eq!(current_id(&controller).as_deref(), Some("a"));
        assert_eq!(controller.view().last_image(), Some(Some(thumb_for("a"))));
        assert!(controller.view().advance_enabled);
        assert!(controller.view().delete_enabled);
        assert!(!controller.view().commit_enabled);
    }

    #[tokio::test]
    async fn test_limited_loads_too() {
        let gateway = MockGateway::with_assets(&["a"]);
        gateway.set_status(PermissionStatus::Limited);
        let (mut controller, gateway) = controller(gateway);

        controller.start().await;

        assert_eq!(controller.permission(), PermissionState::Limited);
        assert_eq!(gateway.fetch_calls(), 1);
        assert!(!controller.view().advance_enabled);
        assert!(controller.view().delete_enabled);
    }

    #[tokio::test]
    async fn test_advance_cycles() {
        let (mut controller, _) = controller(MockGateway::with_assets(&["a", "b", "c"]));
        controller.start().await;

        let mut seen = Vec::new();
        for _ in 0..3 {
            controller.on_advance();
            seen.push(current_id(&controller).unwrap());
        }
        settle(&mut controller).await;

        assert_eq!(seen, vec!["b", "c", "a"]);
        assert_eq!(controller.view().last_image(), Some(Some(thumb_for("a"))));
    }

    #[tokio::test]
    async fn test_delete_middle_slides_next_in() {
        let (mut controller, _) = controller(MockGateway::with_assets(&["a", "b", "c"]));
        controller.start().await;
        controller.on_advance();

        controller.on_delete();
        settle(&mut controller).await;

        let ids: Vec<_> = controller.session().assets().iter().map(|a| a.id.to_string()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(controller.session().position(), Some(1));
        assert_eq!(current_id(&controller).as_deref(), Some("c"));
        assert_eq!(controller.view().counter, 1);
        assert!(controller.view().commit_enabled);
        assert_eq!(controller.view().last_image(), Some(Some(thumb_for("c"))));
        assert_invariants(&controller);
    }

    #[tokio::test]
    async fn test_delete_last_item_shows_empty_marker() {
        let (mut controller, _) = controller(MockGateway::with_assets(&["a"]));
        controller.start().await;
        settle(&mut controller).await;

        controller.on_delete();

        assert!(controller.session().is_empty());
        assert!(!controller.view().delete_enabled);
        assert!(!controller.view().advance_enabled);
        assert_eq!(controller.view().last_image(), Some(None));

        // Further actions are no-ops
        let calls = controller.view().calls.len();
        controller.on_delete();
        controller.on_advance();
        assert_eq!(controller.view().calls.len(), calls);
        assert!(controller.ui_state().current.is_none());
    }

    #[tokio::test]
    async fn test_commit_success() {
        let (mut controller, gateway) = controller(MockGateway::with_assets(&["a", "b", "c"]));
        controller.start().await;
        controller.on_advance();
        controller.on_delete();
        controller.on_delete();
        assert_eq!(controller.view().counter, 2);

        controller.on_commit_trash().await;

        assert_eq!(gateway.deleted_batches(), vec![vec!["b".to_string(), "c".to_string()]]);
        assert_eq!(controller.view().counter, 0);
        assert!(!controller.view().commit_enabled);
        assert_eq!(controller.session().len(), 1);
        assert_eq!(current_id(&controller).as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_commit_failure_keeps_trash() {
        let gateway = MockGateway::with_assets(&["a", "b", "c"]);
        gateway.fail_deletes(true);
        let (mut controller, gateway) = controller(gateway);
        controller.start().await;
        controller.on_delete();
        controller.on_delete();

        controller.on_commit_trash().await;

        assert_eq!(controller.trash().count(), 2);
        assert_eq!(controller.view().counter, 2);
        assert!(controller.view().commit_enabled);
        assert!(matches!(
            controller.view().calls.last(),
            Some(ViewCall::CommitFailure(_))
        ));

        // Retry once the library recovers
        gateway.fail_deletes(false);
        controller.on_commit_trash().await;
        assert_eq!(controller.trash().count(), 0);
        assert_eq!(gateway.deleted_batches().len(), 1);
    }

    #[tokio::test]
    async fn test_commit_with_empty_trash_is_noop() {
        let (mut controller, gateway) = controller(MockGateway::with_assets(&["a"]));
        controller.start().await;

        controller.on_commit_trash().await;

        assert!(gateway.deleted_batches().is_empty());
    }

    #[tokio::test]
    async fn test_denied_never_loads() {
        let gateway = MockGateway::with_assets(&["a", "b"]);
        gateway.set_status(PermissionStatus::Denied);
        let (mut controller, gateway) = controller(gateway);

        controller.start().await;

        assert_eq!(gateway.fetch_calls(), 0);
        assert_eq!(controller.view().denied_alerts(), 1);
        assert!(!controller.view().advance_enabled);
        assert!(!controller.view().delete_enabled);

        // Still denied after a library change: no reload, no second alert
        controller.on_library_changed().await;
        controller.on_permission(PermissionStatus::Restricted).await;
        assert_eq!(gateway.fetch_calls(), 0);
        assert_eq!(controller.view().denied_alerts(), 1);
    }

    #[tokio::test]
    async fn test_revoked_access_clears_session() {
        let (mut controller, gateway) = controller(MockGateway::with_assets(&["a", "b"]));
        controller.start().await;
        controller.on_delete();

        gateway.set_status(PermissionStatus::Restricted);
        controller.on_library_changed().await;

        assert_eq!(controller.permission(), PermissionState::Restricted);
        assert!(controller.session().is_empty());
        assert_eq!(controller.view().denied_alerts(), 1);
        assert!(!controller.view().delete_enabled);
        assert_eq!(controller.view().last_image(), Some(None));
        // The trash survives and can still be committed
        assert!(controller.view().commit_enabled);

        gateway.set_status(PermissionStatus::Authorized);
        controller.on_library_changed().await;
        assert_eq!(current_id(&controller).as_deref(), Some("b"));

        gateway.set_status(PermissionStatus::Denied);
        controller.on_library_changed().await;
        assert_eq!(controller.view().denied_alerts(), 2);
    }

    #[tokio::test]
    async fn test_not_determined_changes_nothing() {
        let gateway = MockGateway::with_assets(&["a"]);
        gateway.set_status(PermissionStatus::NotDetermined);
        let (mut controller, gateway) = controller(gateway);

        controller.start().await;

        assert_eq!(controller.permission(), PermissionState::Unknown);
        assert_eq!(gateway.fetch_calls(), 0);
        assert_eq!(controller.view().denied_alerts(), 0);
    }

    #[tokio::test]
    async fn test_reload_skips_trashed_assets() {
        let (mut controller, gateway) = controller(MockGateway::with_assets(&["a", "b", "c"]));
        controller.start().await;
        controller.on_delete();

        controller.on_library_changed().await;

        assert_eq!(gateway.fetch_calls(), 2);
        let ids: Vec<_> = controller.session().assets().iter().map(|a| a.id.to_string()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(controller.session().position(), Some(0));
        assert_invariants(&controller);
    }

    #[tokio::test]
    async fn test_stale_thumbnail_is_discarded() {
        let (mut controller, _) = controller(MockGateway::with_assets(&["a", "b"]));
        controller.start().await;
        controller.on_advance();
        settle(&mut controller).await;
        let calls = controller.view().calls.len();

        controller.on_thumbnail(AssetId::new("a"), Ok(Some(thumb_for("a"))));

        assert_eq!(controller.view().calls.len(), calls);
        assert_eq!(controller.view().last_image(), Some(Some(thumb_for("b"))));
    }

    #[tokio::test]
    async fn test_missing_thumbnail_reports_unavailable() {
        let gateway = MockGateway::with_assets(&["a"]);
        gateway.set_missing_thumbnails(true);
        let (mut controller, _) = controller(gateway);

        controller.start().await;
        settle(&mut controller).await;

        assert_eq!(
            controller.view().calls.last(),
            Some(&ViewCall::Unavailable("a".to_string()))
        );
        assert_eq!(controller.view().last_image(), None);
        assert!(controller.view().delete_enabled);
    }

    #[tokio::test]
    async fn test_failed_thumbnail_reports_unavailable() {
        let (mut controller, _) = controller(MockGateway::with_assets(&["a", "b"]));
        controller.start().await;
        settle(&mut controller).await;

        controller.on_thumbnail(AssetId::new("a"), Err(AppError::ImageDecode("truncated".into())));

        assert_eq!(
            controller.view().calls.last(),
            Some(&ViewCall::Unavailable("a".to_string()))
        );
        assert!(controller.view().advance_enabled);
    }

    #[tokio::test]
    async fn test_invariants_after_every_step() {
        let (mut controller, _) = controller(MockGateway::with_assets(&["a", "b", "c", "d", "e"]));
        controller.start().await;
        assert_invariants(&controller);

        for step in 0..12 {
            if step % 3 == 0 {
                controller.on_delete();
            } else {
                controller.on_advance();
            }
            assert_invariants(&controller);
        }
        controller.on_commit_trash().await;
        assert_invariants(&controller);
        assert_eq!(controller.ui_state().trash_count, 0);
    }

    #[tokio::test]
    async fn test_run_loop_handles_actions_and_changes() {
        let (controller, gateway) = controller(MockGateway::with_assets(&["a", "b", "c"]));
        let handle = controller.handle();
        let task = tokio::spawn(controller.run());

        handle.advance().unwrap();
        handle.delete().unwrap();
        handle.commit_trash().unwrap();
        handle.quit().unwrap();

        let view = task.await.unwrap().unwrap();
        assert_eq!(gateway.deleted_batches(), vec![vec!["b".to_string()]]);
        assert_eq!(view.counter, 0);
        assert!(handle.advance().is_err());
    }

    #[tokio::test]
    async fn test_run_loop_reloads_on_library_change() {
        let (controller, gateway) = controller(MockGateway::with_assets(&["a", "b"]));
        let handle = controller.handle();
        let task = tokio::spawn(controller.run());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(gateway.fetch_calls(), 1);

        gateway.set_assets(&["new", "a", "b"]);
        gateway.notify_change();
        tokio::time::sleep(Duration::from_millis(20)).await;
        handle.quit().unwrap();

        let view = task.await.unwrap().unwrap();
        assert_eq!(gateway.fetch_calls(), 2);
        assert_eq!(view.last_image(), Some(Some(thumb_for("new"))));
    }

    const LIBRARY: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

    #[derive(Debug, Clone)]
    enum Step {
        Advance,
        Delete,
        Commit { fail: bool },
        /// Library now holds the first `n` assets
        LibraryChanged(usize),
        Access(bool),
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            3 => Just(Step::Advance),
            3 => Just(Step::Delete),
            2 => any::<bool>().prop_map(|fail| Step::Commit { fail }),
            1 => (0..=LIBRARY.len()).prop_map(Step::LibraryChanged),
            1 => any::<bool>().prop_map(Step::Access),
        ]
    }

    proptest! {
        #[test]
        fn invariants_hold_for_any_sequence(steps in prop::collection::vec(step(), 0..40)) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async {
                let (mut controller, gateway) = controller(MockGateway::with_assets(&LIBRARY));
                controller.start().await;
                assert_invariants(&controller);

                for step in steps {
                    let trash_before = controller.trash().count();

                    match step {
                        Step::Advance => controller.on_advance(),
                        Step::Delete => controller.on_delete(),
                        Step::Commit { fail } => {
                            gateway.fail_deletes(fail);
                            controller.on_commit_trash().await;
                            if fail {
                                assert_eq!(controller.trash().count(), trash_before);
                            } else {
                                assert_eq!(controller.trash().count(), 0);
                            }
                        }
                        Step::LibraryChanged(n) => {
                            gateway.set_assets(&LIBRARY[..n]);
                            controller.on_library_changed().await;
                        }
                        Step::Access(granted) => {
                            gateway.set_status(if granted {
                                PermissionStatus::Authorized
                            } else {
                                PermissionStatus::Denied
                            });
                            controller.on_library_changed().await;
                        }
                    }

                    assert_invariants(&controller);
                }
            });
        }
    }
}
