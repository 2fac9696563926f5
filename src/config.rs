//! Application configuration
//!
//! Every field falls back to the values in [`crate::constants`], so an empty
//! or missing configuration section yields a working shell. On the desktop the
//! section is read from `tauri.conf.json > plugins > updateNotifier`.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_WINDOW_TITLE, DEFAULT_WINDOW_URL, EVENT_UPDATE_AVAILABLE, PROJECT_URL, RELEASE_URL,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Name of the event carrying update check results
    pub update_event: String,
    /// Page opened by the "Open" button of the update overlay
    pub release_url: String,
    /// Page opened by the "About" tray item
    pub project_url: String,
    /// Page loaded by the main window
    pub window_url: String,
    /// Main window title, the package version is appended at runtime
    pub window_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            update_event: EVENT_UPDATE_AVAILABLE.to_string(),
            release_url: RELEASE_URL.to_string(),
            project_url: PROJECT_URL.to_string(),
            window_url: DEFAULT_WINDOW_URL.to_string(),
            window_title: DEFAULT_WINDOW_TITLE.to_string(),
        }
    }
}

impl AppConfig {
    /// Builds the config from an optional JSON section.
    ///
    /// Absent sections give the defaults. An invalid section is logged and
    /// also gives the defaults, the shell should still start.
    pub fn from_value(value: Option<&serde_json::Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };

        match serde_json::from_value::<AppConfig>(value.clone()) {
            Ok(config) => config,
            Err(e) => {
                warn!("Invalid update notifier config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Main window title including the package version
    pub fn window_title_with_version(&self, version: &str) -> String {
        format!("{} {}", self.window_title, version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_section_uses_defaults() {
        let config = AppConfig::from_value(None);
        assert_eq!(config.update_event, "update_available");
        assert_eq!(
            config.release_url,
            "https://github.com/eoliann/wup-web/releases/latest"
        );
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let value = json!({ "releaseUrl": "https://example.com/releases" });
        let config = AppConfig::from_value(Some(&value));

        assert_eq!(config.release_url, "https://example.com/releases");
        assert_eq!(config.update_event, EVENT_UPDATE_AVAILABLE);
        assert_eq!(config.window_url, DEFAULT_WINDOW_URL);
    }

    #[test]
    fn test_invalid_section_falls_back() {
        let value = json!({ "releaseUrl": 42 });
        assert_eq!(AppConfig::from_value(Some(&value)), AppConfig::default());
    }

    #[test]
    fn test_window_title_with_version() {
        let config = AppConfig::default();
        assert_eq!(config.window_title_with_version("1.2.0"), "WUP Web 1.2.0");
    }
}
