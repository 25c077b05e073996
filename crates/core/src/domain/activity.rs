use super::event::{repo_clone_url, repo_html_url, ActivityEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-repository activity derived from an event batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoActivity {
    pub name: String,
    pub url: String,
    pub clone_url: String,
    pub count: usize,
    pub last_activity: DateTime<Utc>,
}

/// Group events by repository name, most active first.
///
/// Events without a repository name are ignored. Repositories with equal
/// counts keep the order in which they were first seen.
pub fn aggregate_by_repository(events: &[ActivityEvent]) -> Vec<RepoActivity> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut repos: Vec<RepoActivity> = Vec::new();

    for event in events {
        let name = event.repo.name.as_str();
        if name.is_empty() {
            continue;
        }

        match index.get(name) {
            Some(&i) => {
                let entry = &mut repos[i];
                entry.count += 1;
                if event.created_at > entry.last_activity {
                    entry.last_activity = event.created_at;
                }
            }
            None => {
                index.insert(name, repos.len());
                repos.push(RepoActivity {
                    name: name.to_string(),
                    url: repo_html_url(name),
                    clone_url: repo_clone_url(name),
                    count: 1,
                    last_activity: event.created_at,
                });
            }
        }
    }

    repos.sort_by(|a, b| b.count.cmp(&a.count));
    repos
}
