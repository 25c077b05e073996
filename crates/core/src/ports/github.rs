use crate::domain::{ActivityEvent, RepositoryRecord};
use crate::error::FetchResult;
use serde::{Deserialize, Serialize};

/// Below this many remaining requests the rate limit is worth a warning
pub const RATE_LIMIT_WARN_BELOW: u32 = 10;

/// Core API quota as reported by `/rate_limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    pub limit: u32,
    pub remaining: u32,
    /// Unix timestamp at which the quota resets
    pub reset: i64,
}

impl RateLimit {
    pub fn is_nearly_exhausted(&self) -> bool {
        self.remaining < RATE_LIMIT_WARN_BELOW
    }
}

/// Port for the GitHub REST API.
///
/// All methods are blocking - callers should run them in spawn_blocking.
pub trait GitHubPort: Send + Sync {
    /// Recent public events of `username`, newest first
    fn fetch_events(&self, username: &str) -> FetchResult<Vec<ActivityEvent>>;

    /// Repositories of `username`, sorted by stars descending. May still
    /// contain private entries; ingestion filters them.
    fn fetch_public_repositories(&self, username: &str) -> FetchResult<Vec<RepositoryRecord>>;

    /// Current core rate limit. Advisory only.
    fn rate_limit(&self) -> FetchResult<RateLimit>;
}
