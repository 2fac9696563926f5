//! Type definitions for update notifications
//!
//! Defines the payload carried by the update event and the results of
//! handling it.

use serde::{Deserialize, Serialize};

/// Payload of one update event, tagged by its `status` field
///
/// ```json
/// { "status": "update", "current": "1.0.0", "latest": "1.2.0" }
/// { "status": "up_to_date", "current": "1.2.0" }
/// { "status": "error", "message": "network failure" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateStatus {
    /// A newer release exists, `latest` is required
    Update {
        #[serde(default)]
        current: String,
        latest: String,
    },

    /// The running version is the latest one
    UpToDate {
        #[serde(default)]
        current: String,
    },

    /// The update check failed
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl UpdateStatus {
    /// Parses a raw event payload.
    ///
    /// Returns `None` for anything that is not one of the known shapes
    /// (invalid JSON, unknown status, `update` without `latest`).
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// What handling one payload led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// An overlay was mounted, carries its id
    Shown(String),

    /// Nothing to do, carries the current version
    UpToDate(String),

    /// The payload was logged as an error, carries the raw payload
    Reported(String),
}

/// Buttons of the update overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayAction {
    /// Open the release page, then close the overlay
    Open,
    /// Close the overlay
    Later,
}

impl OverlayAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlayAction::Open => "open",
            OverlayAction::Later => "later",
        }
    }
}
