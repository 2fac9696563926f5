use std::sync::Arc;

use log::error;
use tauri::State;

use crate::error::Result;
use crate::notifier::{OverlayAction, UpdateNotifier};

/// Routes a click on an update overlay button
///
/// # Example
///
/// ```js
/// await invoke('resolve_update_overlay', { overlayId: 'update-overlay-…', action: 'open' });
/// ```
#[tauri::command]
pub fn resolve_update_overlay(
    notifier: State<'_, Arc<UpdateNotifier>>,
    overlay_id: String,
    action: OverlayAction,
) -> Result<()> {
    notifier.resolve(&overlay_id, action).map_err(|e| {
        error!("Failed to resolve overlay {}: {}", overlay_id, e);
        e.into()
    })
}

/// Opens the latest release page without going through an overlay
#[tauri::command]
pub fn open_release_page(
    notifier: State<'_, Arc<UpdateNotifier>>,
    opener: State<'_, Arc<dyn crate::notifier::ExternalOpener>>,
) -> Result<()> {
    opener
        .open_url(&notifier.config().release_url)
        .map_err(Into::into)
}
