use gitact_core::ports::ClipboardPort;
use gitact_core::ActionError;
use std::sync::Mutex;
use tracing::debug;

/// Clipboard adapter backed by `arboard`.
///
/// The handle is kept alive for the life of the adapter: on X11 the copied
/// text is served by the owning process and disappears with the handle.
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardPort for SystemClipboard {
    fn copy_text(&self, text: &str) -> Result<(), ActionError> {
        let mut guard = self
            .handle
            .lock()
            .map_err(|_| ActionError::ClipboardUnavailable("clipboard lock poisoned".to_string()))?;

        if guard.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ActionError::ClipboardUnavailable(e.to_string()))?;
            *guard = Some(clipboard);
        }

        let clipboard = guard
            .as_mut()
            .ok_or_else(|| ActionError::ClipboardUnavailable("no clipboard handle".to_string()))?;

        clipboard
            .set_text(text.to_string())
            .map_err(|e| ActionError::ClipboardUnavailable(e.to_string()))?;

        debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}
