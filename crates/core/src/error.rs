use thiserror::Error;

/// Failures of the GitHub data source.
///
/// These never abort the dashboard; they surface as failure notifications.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("user '{username}' not found")]
    NotFound { username: String },

    #[error("rate limit exceeded (HTTP {status})")]
    RateLimited { status: u16, reset: Option<i64> },

    #[error("http error {status}")]
    Http { status: u16 },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("error parsing JSON: {0}")]
    Decode(String),
}

/// Failures of the fire-and-forget side effects (clipboard, browser).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("could not open browser: {0}")]
    BrowserUnsupported(String),

    #[error("OS not supported: {0}")]
    OsUnsupported(String),
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::NotFound { username: "ghost".to_string() };
        assert_eq!(err.to_string(), "user 'ghost' not found");

        let err = FetchError::Http { status: 502 };
        assert_eq!(err.to_string(), "http error 502");

        let err = FetchError::RateLimited { status: 403, reset: None };
        assert_eq!(err.to_string(), "rate limit exceeded (HTTP 403)");
    }

    #[test]
    fn test_action_error_messages() {
        let err = ActionError::OsUnsupported("plan9".to_string());
        assert_eq!(err.to_string(), "OS not supported: plan9");
    }
}
