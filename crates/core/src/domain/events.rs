use super::{event::ActivityEvent, repo::RepositoryRecord};
use crate::app::load::LoadEpoch;
use crate::app::notification::NotificationId;
use crate::error::FetchError;

/// Messages delivered into the dashboard loop, one at a time.
///
/// Every background task ends by sending exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The repositories fetch of load `epoch` finished
    ReposLoaded {
        epoch: LoadEpoch,
        result: Result<Vec<RepositoryRecord>, FetchError>,
    },

    /// The events fetch of load `epoch` finished
    EventsLoaded {
        epoch: LoadEpoch,
        result: Result<Vec<ActivityEvent>, FetchError>,
    },

    /// A side effect finished and wants to tell the user about it
    Notify { message: String, success: bool },

    /// The expiry timer of notification `id` fired
    NotificationExpired { id: NotificationId },

    /// Animation tick for the loading spinner
    Tick,

    /// User requested to quit the application
    QuitRequested,
}
