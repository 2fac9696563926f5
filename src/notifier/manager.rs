//! Update notifier implementation
//!
//! Turns update events into overlays and overlay clicks into actions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{error, info, warn};
use parking_lot::Mutex;

use super::error::{NotifierError, Result};
use super::opener::ExternalOpener;
use super::overlay::{OverlayHost, UpdateOverlay};
use super::types::{NotifyOutcome, OverlayAction, UpdateStatus};
use crate::config::AppConfig;
use crate::events::EventSource;

/// Shows an overlay whenever an update event reports a newer release
pub struct UpdateNotifier {
    config: AppConfig,
    host: Arc<dyn OverlayHost>,
    opener: Arc<dyn ExternalOpener>,
    subscribed: AtomicBool,
    // ids of mounted overlays, oldest first
    mounted: Mutex<Vec<String>>,
}

impl UpdateNotifier {
    /// Creates a new UpdateNotifier instance
    pub fn new(
        config: AppConfig,
        host: Arc<dyn OverlayHost>,
        opener: Arc<dyn ExternalOpener>,
    ) -> Self {
        Self {
            config,
            host,
            opener,
            subscribed: AtomicBool::new(false),
            mounted: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Listens to the update event for the rest of the process lifetime.
    ///
    /// Only the first call registers a listener.
    pub fn subscribe(self: &Arc<Self>, source: &dyn EventSource) -> Result<()> {
        let event = self.config.update_event.clone();
        if self.subscribed.swap(true, Ordering::SeqCst) {
            warn!("Update notifier already listens to '{}'", event);
            return Err(NotifierError::AlreadySubscribed(event));
        }

        let notifier = self.clone();
        source.listen(
            &event,
            Box::new(move |raw| {
                notifier.handle_payload(raw);
            }),
        );
        info!("Update notifier listening to '{}'", event);
        Ok(())
    }

    /// Handles one raw event payload
    pub fn handle_payload(&self, raw: &str) -> NotifyOutcome {
        match UpdateStatus::parse(raw) {
            Some(UpdateStatus::Update { current, latest }) => {
                match self.show_update_overlay(&latest, &current) {
                    Ok(id) => NotifyOutcome::Shown(id),
                    Err(e) => {
                        error!("Failed to show update overlay: {}, payload: {}", e, raw);
                        NotifyOutcome::Reported(raw.to_string())
                    }
                }
            }
            Some(UpdateStatus::UpToDate { current }) => {
                info!("Up to date: {}", current);
                NotifyOutcome::UpToDate(current)
            }
            Some(UpdateStatus::Error { .. }) | None => {
                error!("Error checking updates: {}", raw);
                NotifyOutcome::Reported(raw.to_string())
            }
        }
    }

    /// Mounts a new overlay. Earlier overlays stay where they are.
    fn show_update_overlay(&self, latest: &str, current: &str) -> Result<String> {
        let overlay = UpdateOverlay::new(latest, current);
        self.host.mount(&overlay)?;
        self.mounted.lock().push(overlay.id.clone());

        info!(
            "Update available: {} (current {}), overlay {}",
            latest, current, overlay.id
        );
        Ok(overlay.id)
    }

    /// Applies a button click to a mounted overlay.
    ///
    /// The overlay is claimed before anything else happens, so each overlay
    /// acts at most once. `Open` opens the release page and then removes the
    /// overlay. If opening fails the overlay stays mounted and the error is
    /// returned. A failed removal is only logged.
    pub fn resolve(&self, overlay_id: &str, action: OverlayAction) -> Result<()> {
        let position = {
            let mut mounted = self.mounted.lock();
            let position = mounted
                .iter()
                .position(|id| id == overlay_id)
                .ok_or_else(|| NotifierError::OverlayNotFound(overlay_id.to_string()))?;
            mounted.remove(position);
            position
        };

        if action == OverlayAction::Open {
            if let Err(e) = self.opener.open_url(&self.config.release_url) {
                let mut mounted = self.mounted.lock();
                let position = position.min(mounted.len());
                mounted.insert(position, overlay_id.to_string());
                return Err(e);
            }
            info!("Opened release page {}", self.config.release_url);
        }

        if let Err(e) = self.host.unmount(overlay_id) {
            error!("Failed to remove overlay {}: {}", overlay_id, e);
        }
        log::debug!("Overlay {} closed with '{}'", overlay_id, action.as_str());
        Ok(())
    }

    pub fn is_mounted(&self, overlay_id: &str) -> bool {
        self.mounted.lock().iter().any(|id| id == overlay_id)
    }

    /// Ids of the mounted overlays, oldest first
    pub fn mounted_overlays(&self) -> Vec<String> {
        self.mounted.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LocalEventBus;
    use crate::logger::captured_logs;
    use crate::notifier::opener::testing::RecordingOpener;
    use crate::notifier::overlay::MemoryOverlayHost;
    use log::Level;
    use serde_json::json;

    const RELEASE_URL: &str = "https://github.com/eoliann/wup-web/releases/latest";

    struct Fixture {
        notifier: Arc<UpdateNotifier>,
        host: Arc<MemoryOverlayHost>,
        opener: Arc<RecordingOpener>,
    }

    fn fixture_with(opener: RecordingOpener) -> Fixture {
        let host = Arc::new(MemoryOverlayHost::new());
        let opener = Arc::new(opener);
        let notifier = Arc::new(UpdateNotifier::new(
            AppConfig::default(),
            host.clone(),
            opener.clone(),
        ));
        Fixture {
            notifier,
            host,
            opener,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(RecordingOpener::default())
    }

    fn shown_id(outcome: NotifyOutcome) -> String {
        match outcome {
            NotifyOutcome::Shown(id) => id,
            other => panic!("expected an overlay, got {:?}", other),
        }
    }

    fn logged(level: Level, needle: &str) -> bool {
        captured_logs()
            .iter()
            .any(|(l, line)| *l == level && line.contains(needle))
    }

    #[test]
    fn test_update_shows_overlay_with_both_versions() {
        let f = fixture();
        let outcome = f
            .notifier
            .handle_payload(r#"{"status":"update","current":"1.0.0","latest":"1.2.0"}"#);
        let id = shown_id(outcome);

        let overlays = f.host.overlays();
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].id, id);
        assert_eq!(overlays[0].latest, "1.2.0");
        assert_eq!(overlays[0].current, "1.0.0");

        let html = overlays[0].to_html();
        assert!(html.contains("1.2.0"));
        assert!(html.contains("1.0.0"));
        assert_eq!(f.notifier.mounted_overlays(), vec![id]);
    }

    #[test]
    fn test_up_to_date_shows_nothing_and_logs_info() {
        let f = fixture();
        let outcome = f
            .notifier
            .handle_payload(r#"{"status":"up_to_date","current":"7.3.1-uptodate"}"#);

        assert_eq!(outcome, NotifyOutcome::UpToDate("7.3.1-uptodate".into()));
        assert!(f.host.is_empty());
        assert!(logged(Level::Info, "Up to date: 7.3.1-uptodate"));
    }

    #[test]
    fn test_up_to_date_without_current_is_not_an_error() {
        let f = fixture();
        let raw = r#"{"status":"up_to_date","note":"no-current-4a2f"}"#;

        assert_eq!(
            f.notifier.handle_payload(raw),
            NotifyOutcome::UpToDate(String::new())
        );
        assert!(f.host.is_empty());
        assert!(!logged(Level::Error, "no-current-4a2f"));
    }

    #[test]
    fn test_update_without_latest_is_reported() {
        let f = fixture();
        let raw = r#"{"status":"update","current":"1.0.0-nolatest"}"#;

        assert_eq!(
            f.notifier.handle_payload(raw),
            NotifyOutcome::Reported(raw.to_string())
        );
        assert!(f.host.is_empty());
        assert!(logged(Level::Error, raw));
    }

    #[test]
    fn test_error_status_logs_payload_intact() {
        let f = fixture();
        let raw = r#"{"status":"error","message":"network failure 5d1e"}"#;

        assert_eq!(
            f.notifier.handle_payload(raw),
            NotifyOutcome::Reported(raw.to_string())
        );
        assert!(f.host.is_empty());
        assert!(logged(Level::Error, raw));
    }

    #[test]
    fn test_unknown_status_is_reported() {
        let f = fixture();
        let raw = r#"{"status":"rollback","current":"9.9.9-unknown"}"#;

        assert_eq!(
            f.notifier.handle_payload(raw),
            NotifyOutcome::Reported(raw.to_string())
        );
        assert!(f.host.is_empty());
        assert!(logged(Level::Error, raw));
    }

    #[test]
    fn test_open_invokes_opener_once_and_removes_overlay() {
        let f = fixture();
        let id = shown_id(
            f.notifier
                .handle_payload(r#"{"status":"update","current":"1.0.0","latest":"1.2.0"}"#),
        );

        f.notifier.resolve(&id, OverlayAction::Open).unwrap();
        assert_eq!(f.opener.opened(), vec![RELEASE_URL.to_string()]);
        assert!(f.host.is_empty());
        assert!(!f.notifier.is_mounted(&id));

        // a second click finds nothing to act on
        assert!(matches!(
            f.notifier.resolve(&id, OverlayAction::Open),
            Err(NotifierError::OverlayNotFound(_))
        ));
        assert_eq!(f.opener.opened().len(), 1);
    }

    #[test]
    fn test_later_removes_overlay_without_opening() {
        let f = fixture();
        let id = shown_id(
            f.notifier
                .handle_payload(r#"{"status":"update","current":"1.0.0","latest":"1.2.0"}"#),
        );

        f.notifier.resolve(&id, OverlayAction::Later).unwrap();
        assert!(f.opener.opened().is_empty());
        assert!(f.host.is_empty());
    }

    #[test]
    fn test_failed_open_keeps_overlay() {
        let f = fixture_with(RecordingOpener::failing("no handler"));
        let id = shown_id(
            f.notifier
                .handle_payload(r#"{"status":"update","current":"1.0.0","latest":"1.2.0"}"#),
        );

        let err = f.notifier.resolve(&id, OverlayAction::Open).unwrap_err();
        assert!(matches!(err, NotifierError::OpenError { .. }));
        assert_eq!(f.host.len(), 1);
        assert!(f.notifier.is_mounted(&id));

        f.notifier.resolve(&id, OverlayAction::Later).unwrap();
        assert!(f.host.is_empty());
    }

    #[test]
    fn test_consecutive_updates_stack_overlays() {
        let f = fixture();
        let first = shown_id(
            f.notifier
                .handle_payload(r#"{"status":"update","current":"1.0.0","latest":"1.1.0"}"#),
        );
        let second = shown_id(
            f.notifier
                .handle_payload(r#"{"status":"update","current":"1.0.0","latest":"1.2.0"}"#),
        );

        assert_ne!(first, second);
        assert_eq!(f.host.len(), 2);
        assert_eq!(f.notifier.mounted_overlays(), vec![first.clone(), second]);

        f.notifier.resolve(&first, OverlayAction::Later).unwrap();
        assert_eq!(f.host.len(), 1);
        assert_eq!(f.host.overlays()[0].latest, "1.2.0");
    }

    #[test]
    fn test_resolve_unknown_overlay() {
        let f = fixture();
        assert!(matches!(
            f.notifier.resolve("update-overlay-missing", OverlayAction::Later),
            Err(NotifierError::OverlayNotFound(id)) if id == "update-overlay-missing"
        ));
        assert!(f.opener.opened().is_empty());
    }

    #[test]
    fn test_subscribe_handles_bus_events() {
        let f = fixture();
        let bus = LocalEventBus::new();
        f.notifier.subscribe(&bus).unwrap();

        bus.emit(
            "update_available",
            &json!({ "status": "update", "current": "1.0.0", "latest": "1.2.0" }),
        )
        .unwrap();
        bus.emit(
            "update_available",
            &json!({ "status": "up_to_date", "current": "1.2.0" }),
        )
        .unwrap();

        assert_eq!(f.host.len(), 1);
        assert_eq!(f.host.overlays()[0].latest, "1.2.0");
    }

    #[test]
    fn test_subscribe_only_once() {
        let f = fixture();
        let bus = LocalEventBus::new();

        f.notifier.subscribe(&bus).unwrap();
        assert!(matches!(
            f.notifier.subscribe(&bus),
            Err(NotifierError::AlreadySubscribed(event)) if event == "update_available"
        ));
        assert_eq!(bus.listener_count("update_available"), 1);
    }

    #[test]
    fn test_failed_removal_still_opens_only_once() {
        struct FlakyHost {
            inner: MemoryOverlayHost,
            unmount_calls: Mutex<usize>,
        }
        impl OverlayHost for FlakyHost {
            fn mount(&self, overlay: &UpdateOverlay) -> Result<()> {
                self.inner.mount(overlay)
            }
            fn unmount(&self, overlay_id: &str) -> Result<()> {
                let mut calls = self.unmount_calls.lock();
                *calls += 1;
                if *calls == 1 {
                    return Err(NotifierError::HostError("eval failed".into()));
                }
                self.inner.unmount(overlay_id)
            }
        }

        let opener = Arc::new(RecordingOpener::default());
        let notifier = UpdateNotifier::new(
            AppConfig::default(),
            Arc::new(FlakyHost {
                inner: MemoryOverlayHost::new(),
                unmount_calls: Mutex::new(0),
            }),
            opener.clone(),
        );
        let id = shown_id(
            notifier.handle_payload(r#"{"status":"update","current":"1.0.0","latest":"1.2.0"}"#),
        );

        notifier.resolve(&id, OverlayAction::Open).unwrap();
        assert!(matches!(
            notifier.resolve(&id, OverlayAction::Open),
            Err(NotifierError::OverlayNotFound(_))
        ));
        assert_eq!(opener.opened(), vec![RELEASE_URL.to_string()]);
        assert!(notifier.mounted_overlays().is_empty());
        assert!(logged(Level::Error, "eval failed"));
    }

    #[test]
    fn test_concurrent_open_clicks_open_once() {
        let f = fixture();
        let id = shown_id(
            f.notifier
                .handle_payload(r#"{"status":"update","current":"1.0.0","latest":"1.2.0"}"#),
        );

        let successes = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| f.notifier.resolve(&id, OverlayAction::Open).is_ok()))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|ok| *ok)
                .count()
        });

        assert_eq!(successes, 1);
        assert_eq!(f.opener.opened().len(), 1);
        assert!(f.host.is_empty());
    }

    #[test]
    fn test_failed_open_keeps_mount_order() {
        let f = fixture_with(RecordingOpener::failing("no handler"));
        let first = shown_id(
            f.notifier
                .handle_payload(r#"{"status":"update","current":"1.0.0","latest":"1.1.0"}"#),
        );
        let second = shown_id(
            f.notifier
                .handle_payload(r#"{"status":"update","current":"1.0.0","latest":"1.2.0"}"#),
        );

        assert!(f.notifier.resolve(&first, OverlayAction::Open).is_err());
        assert_eq!(f.notifier.mounted_overlays(), vec![first, second]);
    }

    #[test]
    fn test_mount_failure_is_reported() {
        struct BrokenHost;
        impl OverlayHost for BrokenHost {
            fn mount(&self, _overlay: &UpdateOverlay) -> Result<()> {
                Err(NotifierError::HostError("main window not ready".into()))
            }
            fn unmount(&self, _overlay_id: &str) -> Result<()> {
                Ok(())
            }
        }

        let notifier = UpdateNotifier::new(
            AppConfig::default(),
            Arc::new(BrokenHost),
            Arc::new(RecordingOpener::default()),
        );
        let raw = r#"{"status":"update","current":"1.0.0","latest":"3.0.0-broken"}"#;

        assert_eq!(
            notifier.handle_payload(raw),
            NotifyOutcome::Reported(raw.to_string())
        );
        assert!(notifier.mounted_overlays().is_empty());
        assert!(logged(Level::Error, "main window not ready"));
    }

    #[cfg(feature = "desktop-test")]
    mod app_handle {
        use super::*;
        use crate::test::get_mock_app;
        use tauri::Emitter;

        #[test]
        fn test_app_events_drive_the_notifier() {
            let app = get_mock_app();
            let f = fixture();
            f.notifier.subscribe(app.handle()).unwrap();

            app.emit(
                "update_available",
                json!({ "status": "update", "current": "1.0.0", "latest": "4.5.6-mock" }),
            )
            .unwrap();
            assert_eq!(f.host.len(), 1);
            assert_eq!(f.host.overlays()[0].latest, "4.5.6-mock");

            app.emit(
                "update_available",
                json!({ "status": "up_to_date", "current": "4.5.7-mock" }),
            )
            .unwrap();
            assert_eq!(f.host.len(), 1);
            assert!(logged(Level::Info, "Up to date: 4.5.7-mock"));

            app.emit(
                "update_available",
                json!({ "status": "error", "message": "offline-4.5.8-mock" }),
            )
            .unwrap();
            assert_eq!(f.host.len(), 1);
            assert!(logged(Level::Error, "offline-4.5.8-mock"));
        }

        #[test]
        fn test_other_app_events_are_ignored() {
            let app = get_mock_app();
            let f = fixture();
            f.notifier.subscribe(app.handle()).unwrap();

            app.emit(
                "autostart_changed",
                json!({ "status": "update", "current": "1.0.0", "latest": "1.2.0" }),
            )
            .unwrap();
            assert!(f.host.is_empty());
        }
    }
}
