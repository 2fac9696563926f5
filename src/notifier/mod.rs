//! Update notification module
//!
//! Listens to the update event and offers the user the latest release.
//! Displaying overlays and opening URLs are delegated to the host through
//! [`OverlayHost`] and [`ExternalOpener`].

mod error;
mod manager;
mod opener;
mod overlay;
mod types;

pub use error::*;
pub use manager::UpdateNotifier;
pub use opener::ExternalOpener;
pub use overlay::{mount_script, unmount_script, MemoryOverlayHost, OverlayHost, UpdateOverlay};
pub use types::*;
