//! Error types for update notifications

use serde::Serialize;

/// Errors that can occur while showing or resolving an update overlay
#[derive(Debug, thiserror::Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum NotifierError {
    /// The notifier listens to its event exactly once per process
    #[error("Already subscribed to event '{0}'")]
    AlreadySubscribed(String),

    /// No overlay with this id is mounted (never shown, or already removed)
    #[error("Update overlay '{0}' is not mounted")]
    OverlayNotFound(String),

    /// The overlay host could not mount or remove an overlay
    #[error("Overlay host error: {0}")]
    HostError(String),

    /// The external-open capability failed
    #[error("Failed to open {url}: {message}")]
    OpenError { url: String, message: String },
}

pub type Result<T> = std::result::Result<T, NotifierError>;
