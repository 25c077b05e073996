use crate::error::ActionError;

/// Port for the OS clipboard
pub trait ClipboardPort: Send + Sync {
    /// Blocking - caller should run in spawn_blocking
    fn copy_text(&self, text: &str) -> Result<(), ActionError>;
}

/// Port for launching the default web browser
pub trait BrowserPort: Send + Sync {
    /// Blocking - caller should run in spawn_blocking
    fn open_url(&self, url: &str) -> Result<(), ActionError>;
}
