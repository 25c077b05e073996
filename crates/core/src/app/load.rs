//! Two-slot readiness gate for the repositories and events fetches.
//!
//! A load starts both fetches at once. Each slot is `Pending` until its
//! fetch reports back, success or failure; the dashboard is ready once
//! both slots are done. Completion order does not matter.

/// Identifies one load request. Increases by one on every `begin`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadEpoch(pub u64);

impl std::fmt::Display for LoadEpoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadSource {
    Repositories,
    Events,
}

impl std::fmt::Display for LoadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadSource::Repositories => f.write_str("repositories"),
            LoadSource::Events => f.write_str("activity"),
        }
    }
}

/// Where one fetch stands. "Done" means attempted, not necessarily succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotState {
    #[default]
    Pending,
    Succeeded,
    Failed,
}

impl SlotState {
    pub fn is_done(&self) -> bool {
        !matches!(self, SlotState::Pending)
    }
}

/// Result of reporting a fetch completion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Recorded; `ready` tells whether both slots are now done
    Accepted { ready: bool },
    /// Belongs to a superseded load and was ignored
    Stale,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadCoordinator {
    epoch: LoadEpoch,
    repositories: SlotState,
    events: SlotState,
    loading: bool,
}

impl LoadCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a (re)load: both slots go back to pending and readiness is
    /// lost until both new fetches report. Calling this while a load is in
    /// flight is allowed; the older load's completions become stale.
    pub fn begin(&mut self) -> LoadEpoch {
        self.epoch = LoadEpoch(self.epoch.0 + 1);
        self.repositories = SlotState::Pending;
        self.events = SlotState::Pending;
        self.loading = true;
        self.epoch
    }

    /// Record the outcome of one fetch
    pub fn complete(&mut self, source: LoadSource, epoch: LoadEpoch, ok: bool) -> Completion {
        if epoch != self.epoch {
            return Completion::Stale;
        }

        let state = if ok { SlotState::Succeeded } else { SlotState::Failed };
        match source {
            LoadSource::Repositories => self.repositories = state,
            LoadSource::Events => self.events = state,
        }

        let ready = self.is_ready();
        if ready {
            self.loading = false;
        }
        Completion::Accepted { ready }
    }

    pub fn epoch(&self) -> LoadEpoch {
        self.epoch
    }

    pub fn slot(&self, source: LoadSource) -> SlotState {
        match source {
            LoadSource::Repositories => self.repositories,
            LoadSource::Events => self.events,
        }
    }

    pub fn repositories_loaded(&self) -> bool {
        self.repositories.is_done()
    }

    pub fn events_loaded(&self) -> bool {
        self.events.is_done()
    }

    /// Both fetches of the current load have reported
    pub fn is_ready(&self) -> bool {
        self.repositories_loaded() && self.events_loaded()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
