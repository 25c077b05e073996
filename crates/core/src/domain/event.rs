use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const GITHUB_WEB: &str = "https://github.com";

/// Kind of a GitHub activity event, decoded from the API's `type` tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Push,
    Issues,
    Watch,
    Fork,
    Create,
    Delete,
    PullRequest,
    Release,
    Public,
    /// Any tag we don't classify; the raw tag is kept for display
    Other(String),
}

impl EventKind {
    /// The API tag for this kind, e.g. `PushEvent`
    pub fn tag(&self) -> &str {
        match self {
            EventKind::Push => "PushEvent",
            EventKind::Issues => "IssuesEvent",
            EventKind::Watch => "WatchEvent",
            EventKind::Fork => "ForkEvent",
            EventKind::Create => "CreateEvent",
            EventKind::Delete => "DeleteEvent",
            EventKind::PullRequest => "PullRequestEvent",
            EventKind::Release => "ReleaseEvent",
            EventKind::Public => "PublicEvent",
            EventKind::Other(tag) => tag,
        }
    }
}

impl From<&str> for EventKind {
    fn from(tag: &str) -> Self {
        match tag {
            "PushEvent" => EventKind::Push,
            "IssuesEvent" => EventKind::Issues,
            "WatchEvent" => EventKind::Watch,
            "ForkEvent" => EventKind::Fork,
            "CreateEvent" => EventKind::Create,
            "DeleteEvent" => EventKind::Delete,
            "PullRequestEvent" => EventKind::PullRequest,
            "ReleaseEvent" => EventKind::Release,
            "PublicEvent" => EventKind::Public,
            other => EventKind::Other(other.to_string()),
        }
    }
}

impl From<String> for EventKind {
    fn from(tag: String) -> Self {
        EventKind::from(tag.as_str())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        kind.tag().to_string()
    }
}

/// Repository reference carried by an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRepo {
    /// `owner/name`
    pub name: String,
    /// API url of the repository
    #[serde(default)]
    pub url: String,
}

/// One GitHub activity item. Events keep the API's reverse-chronological
/// order; nothing in gitact re-sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn new(kind: EventKind, repo_name: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            repo: EventRepo {
                name: repo_name.to_string(),
                url: format!("https://api.github.com/repos/{}", repo_name),
            },
            created_at,
        }
    }

    /// Short one-line description, e.g. "Pushed to owner/repo"
    pub fn summary(&self) -> String {
        let repo = &self.repo.name;
        match &self.kind {
            EventKind::Push => format!("Pushed to {}", repo),
            EventKind::Issues => format!("Issue in {}", repo),
            EventKind::Watch => format!("Starred {}", repo),
            EventKind::Fork => format!("Forked {}", repo),
            EventKind::Create => format!("Created {}", repo),
            EventKind::PullRequest => format!("PR in {}", repo),
            other => {
                let tag = other.tag();
                format!("{} in {}", tag.strip_suffix("Event").unwrap_or(tag), repo)
            }
        }
    }

    pub fn repo_html_url(&self) -> String {
        repo_html_url(&self.repo.name)
    }
}

/// Web url for an `owner/name` repository
pub fn repo_html_url(full_name: &str) -> String {
    format!("{}/{}", GITHUB_WEB, full_name)
}

/// Clone url for an `owner/name` repository
pub fn repo_clone_url(full_name: &str) -> String {
    format!("{}/{}.git", GITHUB_WEB, full_name)
}
