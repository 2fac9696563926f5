// =================================================
// Update notifications
// =================================================
// Event emitted by the host whenever an update check finished
pub const EVENT_UPDATE_AVAILABLE: &str = "update_available";
// Where the "Open" button of the update overlay leads
pub const RELEASE_URL: &str = "https://github.com/eoliann/wup-web/releases/latest";
// Prefix of the DOM id given to every mounted update overlay
pub const OVERLAY_ID_PREFIX: &str = "update-overlay-";
// Command invoked by the overlay buttons from the webview
pub const CMD_RESOLVE_UPDATE_OVERLAY: &str = "resolve_update_overlay";

// =================================================
// Shell
// =================================================
pub const PROJECT_URL: &str = "https://github.com/eoliann/wup-web";
pub const DEFAULT_WINDOW_URL: &str = "https://web.whatsapp.com/";
pub const DEFAULT_WINDOW_TITLE: &str = "WUP Web";
pub const MAIN_WINDOW_LABEL: &str = "main";
pub const TRAY_ID: &str = "wup-web";

// Name of the tauri.conf.json plugins section holding `AppConfig`
pub const CFG_PLUGIN_SECTION: &str = "updateNotifier";

pub const LOG_FILE_NAME: &str = "wup-web.log";
