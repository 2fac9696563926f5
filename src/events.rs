//! Named application events
//!
//! Payloads travel as raw JSON text, the way the webview event system hands
//! them over. Listeners decide for themselves how to parse them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

/// Identifies one registered listener
pub type ListenerId = u32;

/// Callback receiving the raw JSON payload of an event
pub type EventHandler = Box<dyn Fn(&str) + Send + Sync + 'static>;

#[derive(Debug, thiserror::Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum EventError {
    #[error("Failed to serialize payload of event '{event}': {message}")]
    SerializeError { event: String, message: String },
}

/// Something that delivers named events to listeners
pub trait EventSource {
    /// Registers `handler` for every future `event`
    fn listen(&self, event: &str, handler: EventHandler) -> ListenerId;
}

/// In-process event bus.
///
/// `emit` calls every listener of the event synchronously, in registration
/// order, before returning. Listeners run outside the internal lock so they
/// may emit or listen themselves.
#[derive(Default)]
pub struct LocalEventBus {
    next_id: AtomicU32,
    listeners: Mutex<HashMap<String, Vec<Arc<dyn Fn(&str) + Send + Sync>>>>,
}

impl LocalEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes `payload` to JSON and emits it.
    ///
    /// Returns the number of listeners that received the event.
    pub fn emit<T: Serialize>(&self, event: &str, payload: &T) -> Result<usize, EventError> {
        let raw = serde_json::to_string(payload).map_err(|e| EventError::SerializeError {
            event: event.to_string(),
            message: e.to_string(),
        })?;
        Ok(self.emit_raw(event, &raw))
    }

    /// Emits an already serialized payload
    pub fn emit_raw(&self, event: &str, raw: &str) -> usize {
        let handlers: Vec<_> = self
            .listeners
            .lock()
            .get(event)
            .map(|list| list.to_vec())
            .unwrap_or_default();

        if handlers.is_empty() {
            log::debug!("No listener for event '{}'", event);
        }

        for handler in &handlers {
            handler(raw);
        }
        handlers.len()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.lock().get(event).map_or(0, Vec::len)
    }
}

impl EventSource for LocalEventBus {
    fn listen(&self, event: &str, handler: EventHandler) -> ListenerId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .entry(event.to_string())
            .or_default()
            .push(Arc::from(handler));
        id
    }
}

#[cfg(feature = "desktop")]
impl<R: tauri::Runtime> EventSource for tauri::AppHandle<R> {
    fn listen(&self, event: &str, handler: EventHandler) -> ListenerId {
        use tauri::Listener;

        self.listen_any(event.to_string(), move |e| handler(e.payload()))
    }
}
