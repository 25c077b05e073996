use crate::domain::{
    aggregate_by_repository, compute_stats, grade_for, retain_public, ActivityEvent, AggregateStats, Grade,
    RepoActivity, RepoSummary, RepositoryRecord,
};

/// Working data set of the dashboard and everything derived from it.
///
/// Each batch replaces the previous one as a whole, together with its
/// derived values, so readers never see stats from one batch next to
/// events from another.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReadProjection {
    /// Public repositories, in API order (stars, descending)
    repositories: Vec<RepositoryRecord>,

    /// Events, newest first as delivered
    events: Vec<ActivityEvent>,

    stats: AggregateStats,

    /// Event activity grouped per repository, most active first
    repo_activity: Vec<RepoActivity>,
}

impl ReadProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the repository set. Non-public records are dropped here.
    /// Returns how many records were dropped.
    pub fn replace_repositories(&mut self, raw: Vec<RepositoryRecord>) -> usize {
        let received = raw.len();
        self.repositories = retain_public(raw);
        received - self.repositories.len()
    }

    /// Replace the event batch and recompute its stats and activity
    pub fn replace_events(&mut self, events: Vec<ActivityEvent>) {
        self.stats = compute_stats(&events);
        self.repo_activity = aggregate_by_repository(&events);
        self.events = events;
    }

    pub fn repositories(&self) -> &[RepositoryRecord] {
        &self.repositories
    }

    pub fn events(&self) -> &[ActivityEvent] {
        &self.events
    }

    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    pub fn repo_activity(&self) -> &[RepoActivity] {
        &self.repo_activity
    }

    pub fn grade(&self) -> Grade {
        grade_for(&self.stats)
    }

    pub fn summary(&self) -> RepoSummary {
        RepoSummary::from_repositories(&self.repositories)
    }
}
