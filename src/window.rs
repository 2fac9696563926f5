//! Main window management
//!
//! The shell has a single webview window. Closing it only hides it, the tray
//! brings it back.

use log::warn;
use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder, Window};

use crate::config::AppConfig;
use crate::constants::MAIN_WINDOW_LABEL;
use crate::error::{AppError, Result};

/// Creates the main window pointing at the configured page
pub fn create_main_window(app: &AppHandle, config: &AppConfig) -> Result<WebviewWindow> {
    let url = config
        .window_url
        .parse::<tauri::Url>()
        .map_err(|e| AppError::General {
            message: format!("Invalid window url '{}': {}", config.window_url, e),
        })?;
    let title = config.window_title_with_version(&app.package_info().version.to_string());

    let window = WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, WebviewUrl::External(url))
        .title(&title)
        .inner_size(1200.0, 800.0)
        .visible(true)
        .build()?;

    log::info!("Main window created: {}", title);
    Ok(window)
}

/// Shows, restores and focuses a window
pub fn show_and_focus_window(app: &AppHandle, label: &str) {
    if let Some(window) = app.get_webview_window(label) {
        if window.is_minimized().unwrap_or(false) {
            if let Err(e) = window.unminimize() {
                warn!("Failed to unminimize window '{}': {}", label, e);
            }
        }
        if let Err(e) = window.show() {
            warn!("Failed to show window '{}': {}", label, e);
        }
        if let Err(e) = window.set_focus() {
            warn!("Failed to focus window '{}': {}", label, e);
        }
    } else {
        warn!("Window '{}' not found", label);
    }
}

pub fn hide_window(app: &AppHandle, label: &str) {
    if let Some(window) = app.get_webview_window(label) {
        if let Err(e) = window.hide() {
            warn!("Failed to hide window '{}': {}", label, e);
        }
    }
}

/// Closing the main window hides it instead of quitting
pub fn handle_window_event(window: &Window, event: &tauri::WindowEvent) {
    if let tauri::WindowEvent::CloseRequested { api, .. } = event {
        if window.label() == MAIN_WINDOW_LABEL {
            api.prevent_close();
            if let Err(e) = window.hide() {
                warn!("Failed to hide window '{}': {}", window.label(), e);
            } else {
                log::debug!("Window '{}' hidden", window.label());
            }
        }
    }
}
