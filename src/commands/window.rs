use tauri::{command, AppHandle, Manager};

use crate::error::Result;

/// Quit the application
///
/// # Arguments
/// - `app` - The app handle
#[command]
pub fn quit_window(app: AppHandle) -> Result<()> {
    for (_, window) in app.webview_windows() {
        window.close()?;
    }
    app.exit(0);
    Ok(())
}
