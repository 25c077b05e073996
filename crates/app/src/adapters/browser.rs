use gitact_core::ports::BrowserPort;
use gitact_core::ActionError;
use tracing::debug;

/// Opens urls with the platform's default handler via the `open` crate
#[derive(Debug, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    pub fn new() -> Self {
        Self
    }
}

impl BrowserPort for SystemBrowser {
    fn open_url(&self, url: &str) -> Result<(), ActionError> {
        if !platform_supported() {
            return Err(ActionError::OsUnsupported(std::env::consts::OS.to_string()));
        }

        debug!("Opening {} in browser", url);
        open::that(url).map_err(|e| ActionError::BrowserUnsupported(e.to_string()))
    }
}

fn platform_supported() -> bool {
    cfg!(any(target_os = "macos", target_os = "windows", unix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_platforms_supported() {
        if cfg!(any(target_os = "linux", target_os = "macos", target_os = "windows")) {
            assert!(platform_supported());
        }
    }
}
