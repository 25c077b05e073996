use crate::app::load::LoadEpoch;
use crate::app::notification::NotificationId;
use std::time::Duration;

/// Effects the dashboard asks the outer shell to perform.
///
/// The dashboard never does I/O itself; it emits these and the app service
/// runs them, reporting back through `AppEvent`s.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch repositories and events for `username`, both tagged with `epoch`
    Load { username: String, epoch: LoadEpoch },

    /// Put `text` on the clipboard, then notify with `success_message`
    CopyToClipboard { text: String, success_message: String },

    /// Open `url` in the default browser, then notify with `success_message`
    OpenUrl { url: String, success_message: String },

    /// Fire `NotificationExpired { id }` after `after`
    ExpireNotification { id: NotificationId, after: Duration },

    /// Quit the application
    Quit,
}
