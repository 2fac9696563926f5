//! Update overlay view model and the hosts that display it
//!
//! An overlay is a full-screen backdrop holding one card with the two version
//! strings and two buttons. The notifier decides *when* overlays exist, an
//! [`OverlayHost`] decides *how* they are shown: the desktop shell injects the
//! rendered markup into its webview, headless runs keep them in memory.

use html_escape::{encode_double_quoted_attribute, encode_text};
use parking_lot::Mutex;
use rust_i18n::t;
use uuid::Uuid;

use super::error::Result;
use super::types::OverlayAction;
use crate::constants::OVERLAY_ID_PREFIX;

/// One mounted (or about to be mounted) update overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOverlay {
    pub id: String,
    pub latest: String,
    pub current: String,
    pub title: String,
    pub open_label: String,
    pub later_label: String,
}

impl UpdateOverlay {
    /// Creates an overlay with a fresh id and labels in the active locale
    pub fn new(latest: &str, current: &str) -> Self {
        Self {
            id: format!("{}{}", OVERLAY_ID_PREFIX, Uuid::new_v4()),
            latest: latest.to_string(),
            current: current.to_string(),
            title: t!("notifier.title").to_string(),
            open_label: t!("notifier.open").to_string(),
            later_label: t!("notifier.later").to_string(),
        }
    }

    /// Renders the overlay as a single root element.
    ///
    /// Buttons are found through `data-action` inside the root element, so
    /// several stacked overlays never share element ids.
    pub fn to_html(&self) -> String {
        format!(
            r#"<div id="{id}" role="dialog" aria-modal="true" class="fixed inset-0 flex items-center justify-center bg-black bg-opacity-50 z-50"><div class="bg-white rounded-xl shadow-xl p-6 w-96 text-center"><h2 class="text-xl font-bold mb-4">{title}</h2><p>{latest_label}: <b>{latest}</b><br/>{current_label}: <b>{current}</b></p><div class="mt-6 flex justify-center gap-4"><button data-action="{open}" class="px-4 py-2 bg-blue-600 text-white rounded">{open_label}</button><button data-action="{later}" class="px-4 py-2 bg-gray-300 rounded">{later_label}</button></div></div></div>"#,
            id = encode_double_quoted_attribute(&self.id),
            title = encode_text(&self.title),
            latest_label = encode_text(&t!("notifier.latest")),
            latest = encode_text(&self.latest),
            current_label = encode_text(&t!("notifier.current")),
            current = encode_text(&self.current),
            open = OverlayAction::Open.as_str(),
            later = OverlayAction::Later.as_str(),
            open_label = encode_text(&self.open_label),
            later_label = encode_text(&self.later_label),
        )
    }
}

/// JavaScript that appends the overlay to `document.body` and routes its
/// button clicks to `command` as `{ overlayId, action }`.
pub fn mount_script(overlay: &UpdateOverlay, command: &str) -> String {
    format!(
        r#"(() => {{
  const holder = document.createElement("div");
  holder.innerHTML = {html};
  const root = holder.firstElementChild;
  document.body.appendChild(root);
  root.querySelectorAll("button[data-action]").forEach((button) => {{
    button.addEventListener("click", () => {{
      window.__TAURI__.core.invoke({command}, {{ overlayId: {id}, action: button.dataset.action }});
    }});
  }});
}})();"#,
        html = js_string(&overlay.to_html()),
        command = js_string(command),
        id = js_string(&overlay.id),
    )
}

/// JavaScript that removes the overlay element, if it is still there
pub fn unmount_script(overlay_id: &str) -> String {
    format!(
        "document.getElementById({})?.remove();",
        js_string(overlay_id)
    )
}

// JSON string literals are valid JavaScript string literals
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Displays update overlays
pub trait OverlayHost: Send + Sync {
    /// Shows the overlay on top of everything else
    fn mount(&self, overlay: &UpdateOverlay) -> Result<()>;

    /// Removes the overlay with the given id
    fn unmount(&self, overlay_id: &str) -> Result<()>;
}

/// Keeps overlays in memory, newest last
#[derive(Default)]
pub struct MemoryOverlayHost {
    overlays: Mutex<Vec<UpdateOverlay>>,
}

impl MemoryOverlayHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the mounted overlays in mount order
    pub fn overlays(&self) -> Vec<UpdateOverlay> {
        self.overlays.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.overlays.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.lock().is_empty()
    }
}

impl OverlayHost for MemoryOverlayHost {
    fn mount(&self, overlay: &UpdateOverlay) -> Result<()> {
        self.overlays.lock().push(overlay.clone());
        Ok(())
    }

    fn unmount(&self, overlay_id: &str) -> Result<()> {
        self.overlays.lock().retain(|o| o.id != overlay_id);
        Ok(())
    }
}
