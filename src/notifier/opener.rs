//! External-open capability
//!
//! Launching a URL in the system's default handler belongs to the host.
//! The desktop shell backs this with the opener plugin.

use super::error::Result;

/// Opens URLs outside of the application
pub trait ExternalOpener: Send + Sync {
    fn open_url(&self, url: &str) -> Result<()>;
}
