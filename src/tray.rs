use std::sync::Arc;

use tauri::menu::{MenuBuilder, MenuEvent, MenuItem};
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
use tauri::{AppHandle, Manager};
use tauri_plugin_autostart::ManagerExt;

use crate::commands::window::quit_window;
use crate::constants::{MAIN_WINDOW_LABEL, TRAY_ID};
use crate::notifier::{ExternalOpener, UpdateNotifier};
use crate::window::{hide_window, show_and_focus_window};

/// Create system tray menu, or replace the menu of the existing tray
///
/// # Arguments
/// - `app`: The app handle
/// - `tray_id`: Optional tray id, if not provided, will use default tray id
///
/// # Returns
/// - `Result<(), String>`: A result indicating the success or failure of the operation
pub fn create_tray(app: &AppHandle, tray_id: Option<String>) -> Result<(), String> {
    let autostart_on = app.autolaunch().is_enabled().unwrap_or_else(|e| {
        log::warn!("Failed to read autostart state: {}", e);
        false
    });

    let version_item = MenuItem::with_id(
        app,
        "version",
        &rust_i18n::t!("tray.version", version = app.package_info().version.to_string()),
        false,
        None::<&str>,
    )
    .map_err(|e| e.to_string())?;

    let show_item = MenuItem::with_id(app, "show", &rust_i18n::t!("tray.show"), true, None::<&str>)
        .map_err(|e| e.to_string())?;

    let hide_item = MenuItem::with_id(app, "hide", &rust_i18n::t!("tray.hide"), true, None::<&str>)
        .map_err(|e| e.to_string())?;

    let about_item =
        MenuItem::with_id(app, "about", &rust_i18n::t!("tray.about"), true, None::<&str>)
            .map_err(|e| e.to_string())?;

    let autostart_label = if autostart_on {
        rust_i18n::t!("tray.autostart_on")
    } else {
        rust_i18n::t!("tray.autostart_off")
    };
    let autostart_item = MenuItem::with_id(app, "autostart", &autostart_label, true, None::<&str>)
        .map_err(|e| e.to_string())?;

    let quit_item = MenuItem::with_id(
        app,
        "quit",
        &rust_i18n::t!("tray.quit"),
        true,
        Some("CmdOrCtrl+Q"),
    )
    .map_err(|e| e.to_string())?;

    let menu = MenuBuilder::new(app)
        .item(&version_item)
        .separator()
        .item(&show_item)
        .item(&hide_item)
        .item(&about_item)
        .separator()
        .item(&autostart_item)
        .item(&quit_item)
        .build()
        .map_err(|e| e.to_string())?;

    let tray_id = tray_id.unwrap_or(TRAY_ID.to_string());
    if let Some(tray) = app.tray_by_id(&tray_id) {
        log::debug!("Updating tray menu, autostart: {}", autostart_on);
        tray.set_menu(Some(menu)).map_err(|e| e.to_string())?;
        return Ok(());
    }

    let tray = TrayIconBuilder::with_id(&tray_id)
        .tooltip(app.package_info().name.clone())
        .menu(&menu)
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| handle_tray_event(app, event))
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                show_and_focus_window(tray.app_handle(), MAIN_WINDOW_LABEL);
            }
        })
        .build(app)
        .map_err(|e| e.to_string())?;

    if let Some(icon) = app.default_window_icon() {
        let _ = tray.set_icon(Some(icon.clone()));
    } else {
        log::warn!("No icon found for tray");
        let _ = tray.set_title(Some(app.package_info().name.clone()));
    }

    Ok(())
}

/// Handle system tray events
fn handle_tray_event(app: &AppHandle, event: MenuEvent) {
    match event.id().as_ref() {
        "show" => show_and_focus_window(app, MAIN_WINDOW_LABEL),
        "hide" => hide_window(app, MAIN_WINDOW_LABEL),
        "about" => {
            let (Some(notifier), Some(opener)) = (
                app.try_state::<Arc<UpdateNotifier>>(),
                app.try_state::<Arc<dyn ExternalOpener>>(),
            ) else {
                log::error!("Notifier state not ready");
                return;
            };
            if let Err(e) = opener.open_url(&notifier.config().project_url) {
                log::error!("Failed to open project page: {}", e);
            }
        }
        "autostart" => toggle_autostart(app),
        "quit" => {
            if let Err(e) = quit_window(app.clone()) {
                log::error!("Failed to quit application: {}", e);
            }
        }
        _ => {}
    }
}

fn toggle_autostart(app: &AppHandle) {
    let autolaunch = app.autolaunch();
    let enabled = autolaunch.is_enabled().unwrap_or(false);
    let result = if enabled {
        autolaunch.disable()
    } else {
        autolaunch.enable()
    };

    match result {
        Ok(()) => {
            log::info!("Autostart {}", if enabled { "disabled" } else { "enabled" });
            if let Err(e) = create_tray(app, None) {
                log::error!("Failed to refresh tray menu: {}", e);
            }
        }
        Err(e) => log::error!("Autostart toggle failed: {}", e),
    }
}
