use gitact_core::app::{LoadCoordinator, NotificationLifecycle, ReadProjection, DEFAULT_NOTIFICATION_TTL};
use gitact_core::domain::{format_number, ActivityEvent, RepositoryRecord};
use std::time::Duration;

use super::stats::detailed_stats;

/// Rows of chrome around the table (header, notification, help)
const TABLE_CHROME_ROWS: u16 = 8;

/// Rows of chrome around the list views
const LIST_CHROME_ROWS: u16 = 10;

/// The TUI Model - this represents the complete UI state
/// This is separate from the core ReadProjection to allow UI-specific state
#[derive(Debug)]
pub struct TuiModel {
    /// GitHub user being shown
    pub username: String,

    /// Working data set (public repositories, events, derived stats)
    pub projection: ReadProjection,

    /// Tracks the two fetches of the current load
    pub load: LoadCoordinator,

    /// Transient status message
    pub notification: NotificationLifecycle,

    /// Current view mode
    pub mode: ViewMode,

    /// Search input state
    pub input: InputState,

    pub repo_list: RepoListState,
    pub activity_list: ActivityListState,
    pub table: RepoTableState,
    pub stats: StatsState,

    /// UI-specific state
    pub ui_state: UiState,

    /// Whether the application should quit
    pub should_quit: bool,
}

/// Terminal-level UI state
#[derive(Debug, Default)]
pub struct UiState {
    /// Terminal size
    pub terminal_width: u16,
    pub terminal_height: u16,

    /// Whether the full key help is shown
    pub show_help: bool,

    /// Loading spinner frame, advanced on every tick
    pub spinner_frame: usize,
}

/// Input state for the search bar
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether keys are routed to the search bar
    pub active: bool,

    /// Current input text
    pub text: String,
}

/// Different view modes for the TUI
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    RepositoryList,
    RepositoryTable,
    Statistics,
    ActivityFeed,
}

impl ViewMode {
    /// Successor in the ring List -> Table -> Statistics -> Activity -> List
    pub fn next(self) -> Self {
        match self {
            ViewMode::RepositoryList => ViewMode::RepositoryTable,
            ViewMode::RepositoryTable => ViewMode::Statistics,
            ViewMode::Statistics => ViewMode::ActivityFeed,
            ViewMode::ActivityFeed => ViewMode::RepositoryList,
        }
    }

    /// Predecessor in the same ring
    pub fn prev(self) -> Self {
        match self {
            ViewMode::RepositoryList => ViewMode::ActivityFeed,
            ViewMode::RepositoryTable => ViewMode::RepositoryList,
            ViewMode::Statistics => ViewMode::RepositoryTable,
            ViewMode::ActivityFeed => ViewMode::Statistics,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            ViewMode::RepositoryList => "📋 List View",
            ViewMode::RepositoryTable => "📊 Table View",
            ViewMode::Statistics => "📈 Statistics",
            ViewMode::ActivityFeed => "⚡ Activity",
        }
    }
}

/// Items backing the repository list: indices into the projection's
/// repositories, possibly narrowed by a search
#[derive(Debug, Default)]
pub struct RepoListState {
    pub title: String,
    pub items: Vec<usize>,
    pub selected: usize,
    /// Query of the last submitted search, if the list is filtered
    pub query: Option<String>,
}

#[derive(Debug, Default)]
pub struct ActivityListState {
    pub title: String,
    pub len: usize,
    pub selected: usize,
}

/// One formatted table row: name, stars, forks, language, updated
pub type TableRow = [String; 5];

#[derive(Debug, Default)]
pub struct RepoTableState {
    pub rows: Vec<TableRow>,
    pub selected: usize,
    /// Visible rows, derived from the terminal height
    pub height: u16,
}

#[derive(Debug, Default)]
pub struct StatsState {
    pub lines: Vec<String>,
    pub scroll: usize,
}

impl TuiModel {
    pub fn new(username: impl Into<String>) -> Self {
        Self::with_notification_ttl(username, DEFAULT_NOTIFICATION_TTL)
    }

    pub fn with_notification_ttl(username: impl Into<String>, ttl: Duration) -> Self {
        let mut model = Self {
            username: username.into(),
            projection: ReadProjection::new(),
            load: LoadCoordinator::new(),
            notification: NotificationLifecycle::new(ttl),
            mode: ViewMode::default(),
            input: InputState::default(),
            repo_list: RepoListState::default(),
            activity_list: ActivityListState::default(),
            table: RepoTableState::default(),
            stats: StatsState::default(),
            ui_state: UiState::default(),
            should_quit: false,
        };
        model.rebuild_repo_list();
        model.rebuild_activity_list();
        model
    }

    /// The dashboard is shown once both fetches of the current load finished
    pub fn is_ready(&self) -> bool {
        self.load.is_ready()
    }

    /// Switch to `mode` and re-derive the data backing it
    pub fn enter_view(&mut self, mode: ViewMode) {
        self.mode = mode;
        match mode {
            ViewMode::RepositoryList => self.rebuild_repo_list(),
            ViewMode::ActivityFeed => self.rebuild_activity_list(),
            ViewMode::Statistics => self.rebuild_stats(),
            ViewMode::RepositoryTable => {}
        }
    }

    /// Full, unfiltered repository list
    pub fn rebuild_repo_list(&mut self) {
        let count = self.projection.repositories().len();
        self.repo_list.items = (0..count).collect();
        self.repo_list.query = None;
        self.repo_list.title = format!("📁 Public Repositories ({})", count);
        self.repo_list.selected = 0;
    }

    /// Narrow the repository list to matches of `query`; an empty query
    /// restores the full list
    pub fn filter_repo_list(&mut self, query: &str) {
        if query.is_empty() {
            self.rebuild_repo_list();
            return;
        }

        let repos = self.projection.repositories();
        self.repo_list.items = gitact_core::domain::filter_indices(repos, query);
        self.repo_list.title = format!(
            "📁 Repositories matching '{}' ({})",
            query,
            self.repo_list.items.len()
        );
        self.repo_list.query = Some(query.to_string());
        self.repo_list.selected = 0;
    }

    pub fn rebuild_activity_list(&mut self) {
        let count = self.projection.events().len();
        self.activity_list.len = count;
        self.activity_list.title = format!("⚡ Recent Activity ({} events)", count);
        self.activity_list.selected = self.activity_list.selected.min(count.saturating_sub(1));
    }

    pub fn rebuild_table(&mut self) {
        self.table.rows = self
            .projection
            .repositories()
            .iter()
            .map(table_row)
            .collect();
        self.table.height = self.ui_state.terminal_height.saturating_sub(TABLE_CHROME_ROWS);
        self.table.selected = self.table.selected.min(self.table.rows.len().saturating_sub(1));
    }

    pub fn rebuild_stats(&mut self) {
        self.stats.lines = detailed_stats(&self.projection);
        self.stats.scroll = 0;
    }

    /// Replace the working repository set and re-derive every view built on it
    pub fn replace_repositories(&mut self, repos: Vec<RepositoryRecord>) -> usize {
        let dropped = self.projection.replace_repositories(repos);
        match self.repo_list.query.clone() {
            Some(query) => self.filter_repo_list(&query),
            None => self.rebuild_repo_list(),
        }
        self.rebuild_table();
        if self.mode == ViewMode::Statistics {
            self.rebuild_stats();
        }
        dropped
    }

    /// Replace the event batch and re-derive every view built on it
    pub fn replace_events(&mut self, events: Vec<ActivityEvent>) {
        self.projection.replace_events(events);
        self.rebuild_activity_list();
        if self.mode == ViewMode::Statistics {
            self.rebuild_stats();
        }
    }

    /// Visible rows of the list views
    pub fn list_height(&self) -> usize {
        self.ui_state.terminal_height.saturating_sub(LIST_CHROME_ROWS) as usize
    }

    /// Repository under the cursor in the list or table view
    pub fn selected_repository(&self) -> Option<&RepositoryRecord> {
        let repos = self.projection.repositories();
        match self.mode {
            ViewMode::RepositoryList => self
                .repo_list
                .items
                .get(self.repo_list.selected)
                .and_then(|&i| repos.get(i)),
            ViewMode::RepositoryTable => repos.get(self.table.selected),
            _ => None,
        }
    }

    /// Event under the cursor in the activity view
    pub fn selected_event(&self) -> Option<&ActivityEvent> {
        if self.mode != ViewMode::ActivityFeed {
            return None;
        }
        self.projection.events().get(self.activity_list.selected)
    }

    /// Header line with the repository totals, empty while there are none
    pub fn totals_line(&self) -> String {
        let repos = self.projection.repositories();
        if repos.is_empty() {
            return String::new();
        }
        let stars: u64 = repos.iter().map(|r| r.stars).sum();
        let forks: u64 = repos.iter().map(|r| r.forks).sum();
        format!(
            "📊 {} repos • ⭐ {} stars • 🍴 {} forks",
            repos.len(),
            format_number(stars),
            format_number(forks)
        )
    }
}

fn table_row(repo: &RepositoryRecord) -> TableRow {
    let language = match repo.language.as_deref() {
        Some(language) if !language.is_empty() => language.to_string(),
        _ => "-".to_string(),
    };
    [
        repo.name.clone(),
        format_number(repo.stars),
        format_number(repo.forks),
        language,
        repo.updated_at.format("%Y-%m-%d").to_string(),
    ]
}
