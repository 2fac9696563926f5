//! WUP Web shell: a desktop window around WhatsApp Web that offers the
//! latest release whenever an `update_available` event reports one.
//!
//! # Cargo features
//!
//! * `desktop` - the Tauri shell (window, tray, webview overlays, opener and
//!   autostart plugins) and the `wup-web` binary. It needs the platform
//!   webview libraries, so it is off by default: the notifier, events,
//!   config, logging and i18n build and test without them.
//! * `desktop-test` - `desktop` plus Tauri's mock runtime, for testing the
//!   desktop wiring (`cargo test --features desktop-test`).

// modules
mod config;
mod constants;
pub mod error;
mod events;
mod lang;
mod logger;
mod notifier;

#[cfg(feature = "desktop")]
mod commands;
#[cfg(feature = "desktop")]
mod host;
#[cfg(feature = "desktop")]
mod tray;
#[cfg(feature = "desktop")]
mod window;


use rust_i18n::i18n;

pub use config::AppConfig;
pub use constants::{EVENT_UPDATE_AVAILABLE, RELEASE_URL};
pub use events::{EventError, EventHandler, EventSource, ListenerId, LocalEventBus};
pub use lang::{get_system_locale, normalize_locale};
pub use logger::setup_logger;
pub use notifier::*;

// Initialize internationalization with the "i18n" directory next to Cargo.toml
i18n!("i18n", fallback = "en");

#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use std::sync::Arc;

    use log::{error, info};
    use tauri::Manager;

    use crate::commands::notifier::*;
    use crate::commands::window::*;
    use crate::config::AppConfig;
    use crate::constants::{CFG_PLUGIN_SECTION, MAIN_WINDOW_LABEL};
    use crate::host::{TauriOpener, WebviewOverlayHost};
    use crate::lang::apply_system_locale;
    use crate::logger::setup_logger;
    use crate::notifier::{ExternalOpener, UpdateNotifier};
    use crate::tray::create_tray;
    use crate::window::{create_main_window, handle_window_event};

    /// The entry point for the Tauri application.
    ///
    /// Creates the main window and the tray, then starts listening to the
    /// update event. Whoever checks for updates emits it:
    ///
    /// ```js
    /// import { emit } from '@tauri-apps/api/event';
    ///
    /// await emit('update_available', { status: 'update', current: '1.0.0', latest: '1.2.0' });
    /// ```
    pub async fn run() -> crate::error::Result<()> {
        let context = tauri::generate_context!();
        let config = AppConfig::from_value(context.config().plugins.0.get(CFG_PLUGIN_SECTION));

        tauri::Builder::default()
            .plugin(tauri_plugin_autostart::init(
                tauri_plugin_autostart::MacosLauncher::LaunchAgent,
                None::<Vec<&str>>,
            ))
            .plugin(tauri_plugin_opener::init())
            .invoke_handler(tauri::generate_handler![
                // notifier
                resolve_update_overlay,
                open_release_page,
                // window
                quit_window,
            ])
            .on_window_event(|window, event| handle_window_event(window, event))
            .setup(move |app| {
                match app.path().app_log_dir() {
                    Ok(log_dir) => {
                        if let Err(e) = setup_logger(&log_dir) {
                            eprintln!("Failed to set up logger: {}", e);
                        }
                    }
                    Err(e) => eprintln!("Failed to retrieve log directory: {}", e),
                }

                // labels of the tray and of every overlay follow this locale
                apply_system_locale();

                let handle = app.handle().clone();
                create_main_window(&handle, &config)?;

                let opener: Arc<dyn ExternalOpener> = Arc::new(TauriOpener::new(handle.clone()));
                let notifier = Arc::new(UpdateNotifier::new(
                    config.clone(),
                    Arc::new(WebviewOverlayHost::new(handle.clone(), MAIN_WINDOW_LABEL)),
                    opener.clone(),
                ));
                notifier.subscribe(&handle)?;
                app.manage(notifier);
                app.manage(opener);

                if let Err(e) = create_tray(&handle, None) {
                    error!("Failed to create tray: {}", e);
                }

                info!("{} started", app.package_info().name);
                Ok(())
            })
            .run(context)?;

        Ok(())
    }
}
