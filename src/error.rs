use serde::Serialize;
use thiserror::Error;

/// The single, unified error type for the entire application.
///
/// This enum wraps all module-specific errors, providing a consistent structure
/// for error handling across the backend and for serialization to the frontend.
/// The `#[serde(tag = "module", content = "details")]` attribute ensures that
/// the JSON output is clean and predictable.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "module", content = "details")]
pub enum AppError {
    #[error(transparent)]
    Notifier(#[from] crate::notifier::NotifierError),

    #[error(transparent)]
    Event(#[from] crate::events::EventError),

    /// Logger setup failures (log directory, log file, global logger)
    #[error("{message}")]
    Logger { message: String },

    #[error("{message}")]
    General { message: String },
}

// This allows Tauri commands to return AppError directly.
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        let error_message = error.to_string();

        match serde_json::to_value(&error) {
            Ok(mut value) => {
                if let Some(obj) = value.as_object_mut() {
                    obj.insert(
                        "message".to_string(),
                        serde_json::Value::String(error_message),
                    );
                }
                serde_json::to_string(&value).unwrap_or_else(|e| {
                    serde_json::json!({
                        "module": "Internal",
                        "details": {
                            "kind": "SerializationFailed",
                            "message": format!("Failed to re-serialize error value: {}", e)
                        },
                        "message": "An unexpected error occurred during error handling.".to_string()
                    })
                    .to_string()
                })
            }
            Err(e) => serde_json::json!({
                "module": "Internal",
                "details": {
                    "kind": "SerializationFailed",
                    "message": format!("Failed to serialize error: {}", e)
                },
                "message": error_message
            })
            .to_string(),
        }
    }
}

#[cfg(feature = "desktop")]
impl From<tauri::Error> for AppError {
    fn from(err: tauri::Error) -> Self {
        AppError::General {
            message: err.to_string(),
        }
    }
}

/// A universal Result type for Tauri commands and other fallible functions.
pub type Result<T> = std::result::Result<T, AppError>;
