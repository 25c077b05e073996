use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata snapshot of one repository as returned by the GitHub API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "html_url")]
    pub url: String,
    pub clone_url: String,
    #[serde(rename = "stargazers_count")]
    pub stars: u64,
    #[serde(rename = "forks_count")]
    pub forks: u64,
    #[serde(default)]
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub private: bool,
}

impl RepositoryRecord {
    pub fn is_public(&self) -> bool {
        !self.private
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Case-insensitive substring match over name and description.
    /// `query_lower` must already be lowercased.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
            || self.description_or_empty().to_lowercase().contains(query_lower)
    }

    pub fn clone_command(&self) -> String {
        format!("git clone {}", self.clone_url)
    }
}

impl std::fmt::Display for RepositoryRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.full_name, self.url)
    }
}

/// Drop every record that is not public. This is the only way records
/// enter the working set.
pub fn retain_public(records: Vec<RepositoryRecord>) -> Vec<RepositoryRecord> {
    records.into_iter().filter(RepositoryRecord::is_public).collect()
}

/// Stable sort by star count, highest first
pub fn sort_by_stars(records: &mut [RepositoryRecord]) {
    records.sort_by(|a, b| b.stars.cmp(&a.stars));
}

/// Indices of the records matching `query`, in their original order.
/// An empty query matches everything.
pub fn filter_indices(records: &[RepositoryRecord], query: &str) -> Vec<usize> {
    let query_lower = query.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, repo)| query_lower.is_empty() || repo.matches(&query_lower))
        .map(|(index, _)| index)
        .collect()
}
