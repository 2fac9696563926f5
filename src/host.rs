//! Desktop implementations of the notifier seams
//!
//! Overlays are injected into the main webview as DOM elements, URLs are
//! handed to the opener plugin.

use tauri::{AppHandle, Manager, Runtime, Wry};
use tauri_plugin_opener::OpenerExt;

use crate::constants::CMD_RESOLVE_UPDATE_OVERLAY;
use crate::notifier::{
    mount_script, unmount_script, ExternalOpener, NotifierError, OverlayHost, UpdateOverlay,
};

type NotifierResult<T> = std::result::Result<T, NotifierError>;

/// Mounts overlays into a webview window through `eval`
pub struct WebviewOverlayHost<R: Runtime = Wry> {
    app: AppHandle<R>,
    window_label: String,
}

impl<R: Runtime> WebviewOverlayHost<R> {
    pub fn new(app: AppHandle<R>, window_label: &str) -> Self {
        Self {
            app,
            window_label: window_label.to_string(),
        }
    }

    fn eval(&self, script: &str) -> NotifierResult<()> {
        let window = self
            .app
            .get_webview_window(&self.window_label)
            .ok_or_else(|| {
                NotifierError::HostError(format!("window '{}' not found", self.window_label))
            })?;
        window
            .eval(script)
            .map_err(|e| NotifierError::HostError(e.to_string()))
    }
}

impl<R: Runtime> OverlayHost for WebviewOverlayHost<R> {
    fn mount(&self, overlay: &UpdateOverlay) -> NotifierResult<()> {
        self.eval(&mount_script(overlay, CMD_RESOLVE_UPDATE_OVERLAY))
    }

    fn unmount(&self, overlay_id: &str) -> NotifierResult<()> {
        self.eval(&unmount_script(overlay_id))
    }
}

/// Opens URLs with the system's default handler
pub struct TauriOpener {
    app: AppHandle,
}

impl TauriOpener {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl ExternalOpener for TauriOpener {
    fn open_url(&self, url: &str) -> NotifierResult<()> {
        self.app
            .opener()
            .open_url(url, None::<&str>)
            .map_err(|e| NotifierError::OpenError {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}
