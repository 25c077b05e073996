use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use gitact_core::app::{Command, Completion, LoadSource};
use gitact_core::domain::{repo_clone_url, repo_html_url, AppEvent};
use tracing::{debug, info};

use super::model::{TuiModel, ViewMode};

/// Messages that can be sent from the TUI to the application service
#[derive(Debug, Clone, PartialEq)]
pub enum TuiMessage {
    /// Send a command to the app service
    Command(Command),

    /// Send several commands, in order
    Batch(Vec<Command>),

    /// No action needed
    None,
}

impl TuiMessage {
    /// Flatten into the commands to send
    pub fn into_commands(self) -> Vec<Command> {
        match self {
            TuiMessage::Command(cmd) => vec![cmd],
            TuiMessage::Batch(cmds) => cmds,
            TuiMessage::None => Vec::new(),
        }
    }
}

/// Which side effect a repository action key asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RepoAction {
    CopyClone,
    CopyUrl,
    Open,
}

/// The Update function - handles user input and app events and updates
/// the model accordingly. All I/O leaves as `Command`s.
pub struct TuiUpdate;

impl TuiUpdate {
    /// Begin a (re)load of both data sources
    pub fn start_load(model: &mut TuiModel) -> Command {
        let epoch = model.load.begin();
        info!("Starting load {} for {}", epoch, model.username);
        Command::Load {
            username: model.username.clone(),
            epoch,
        }
    }

    /// Handle a key press and update the model accordingly
    /// Returns a TuiMessage that should be sent to the app service
    pub fn handle_key(model: &mut TuiModel, key: KeyCode, modifiers: KeyModifiers) -> Result<TuiMessage> {
        // The search bar captures everything while it's open
        if model.input.active {
            return Self::handle_search_keys(model, key, modifiers);
        }

        // Only the loading screen is visible until both sources answer
        if !model.is_ready() && !Self::allowed_while_loading(key, modifiers) {
            return Ok(TuiMessage::None);
        }

        if let Some(msg) = Self::handle_global_keys(model, key, modifiers)? {
            return Ok(msg);
        }

        match model.mode {
            ViewMode::RepositoryList => Self::handle_repo_list_keys(model, key),
            ViewMode::RepositoryTable => Self::handle_repo_table_keys(model, key),
            ViewMode::Statistics => Self::handle_stats_keys(model, key),
            ViewMode::ActivityFeed => Self::handle_activity_keys(model, key),
        }
    }

    fn allowed_while_loading(key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
            KeyCode::Char('q') | KeyCode::Char('?') | KeyCode::Esc => true,
            _ => false,
        }
    }

    /// Handle terminal resize
    pub fn handle_resize(model: &mut TuiModel, width: u16, height: u16) -> Result<TuiMessage> {
        let height_changed = model.ui_state.terminal_height != height;
        model.ui_state.terminal_width = width;
        model.ui_state.terminal_height = height;
        if height_changed {
            model.rebuild_table();
        }
        Ok(TuiMessage::None)
    }

    /// Apply an event from the app service. Returns follow-up commands
    /// (notification expiry timers).
    pub fn handle_event(model: &mut TuiModel, event: AppEvent) -> Vec<Command> {
        match event {
            AppEvent::ReposLoaded { epoch, result } => {
                match model.load.complete(LoadSource::Repositories, epoch, result.is_ok()) {
                    Completion::Stale => {
                        debug!("Dropping repositories of superseded load {}", epoch);
                        Vec::new()
                    }
                    Completion::Accepted { ready } => {
                        let cmds = match result {
                            Ok(repos) => {
                                let dropped = model.replace_repositories(repos);
                                if dropped > 0 {
                                    debug!("Dropped {} non-public repositories", dropped);
                                }
                                Vec::new()
                            }
                            Err(e) => vec![Self::notify(model, format!("❌ Error loading repositories: {}", e), false)],
                        };
                        if ready {
                            info!("Load {} complete", epoch);
                        }
                        cmds
                    }
                }
            }

            AppEvent::EventsLoaded { epoch, result } => {
                match model.load.complete(LoadSource::Events, epoch, result.is_ok()) {
                    Completion::Stale => {
                        debug!("Dropping events of superseded load {}", epoch);
                        Vec::new()
                    }
                    Completion::Accepted { ready } => {
                        let cmds = match result {
                            Ok(events) => {
                                model.replace_events(events);
                                Vec::new()
                            }
                            Err(e) => vec![Self::notify(model, format!("❌ Error loading activity: {}", e), false)],
                        };
                        if ready {
                            info!("Load {} complete", epoch);
                        }
                        cmds
                    }
                }
            }

            AppEvent::Notify { message, success } => vec![Self::notify(model, message, success)],

            AppEvent::NotificationExpired { id } => {
                model.notification.expire(id);
                Vec::new()
            }

            AppEvent::Tick => {
                model.ui_state.spinner_frame = model.ui_state.spinner_frame.wrapping_add(1);
                Vec::new()
            }

            AppEvent::QuitRequested => {
                model.should_quit = true;
                Vec::new()
            }
        }
    }

    /// Show a notification and return the timer that expires it
    fn notify(model: &mut TuiModel, message: impl Into<String>, success: bool) -> Command {
        let id = model.notification.notify(message, success);
        Command::ExpireNotification {
            id,
            after: model.notification.ttl(),
        }
    }

    fn quit(model: &mut TuiModel) -> TuiMessage {
        model.should_quit = true;
        TuiMessage::Command(Command::Quit)
    }

    /// Handle global keys that work in any view
    fn handle_global_keys(model: &mut TuiModel, key: KeyCode, modifiers: KeyModifiers) -> Result<Option<TuiMessage>> {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Ok(Some(Self::quit(model))),

            KeyCode::Char('q') => Ok(Some(Self::quit(model))),

            KeyCode::Esc => {
                // Esc dismisses a notification first
                if model.notification.current().is_some() {
                    model.notification.clear();
                    Ok(Some(TuiMessage::None))
                } else {
                    Ok(Some(Self::quit(model)))
                }
            }

            KeyCode::Char('?') => {
                model.ui_state.show_help = !model.ui_state.show_help;
                Ok(Some(TuiMessage::None))
            }

            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                model.enter_view(model.mode.next());
                Ok(Some(TuiMessage::None))
            }

            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                model.enter_view(model.mode.prev());
                Ok(Some(TuiMessage::None))
            }

            KeyCode::Char('r') => {
                let load = Self::start_load(model);
                let expire = Self::notify(model, "🔄 Refreshing data...", true);
                Ok(Some(TuiMessage::Batch(vec![load, expire])))
            }

            _ => Ok(None),
        }
    }

    /// Handle keys while the search bar is open
    fn handle_search_keys(model: &mut TuiModel, key: KeyCode, modifiers: KeyModifiers) -> Result<TuiMessage> {
        match key {
            KeyCode::Esc => Self::cancel_search(model),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Self::cancel_search(model),

            KeyCode::Enter => {
                let query = std::mem::take(&mut model.input.text);
                model.input.active = false;
                model.filter_repo_list(&query);
                info!("Search '{}' matched {} repositories", query, model.repo_list.items.len());
            }

            KeyCode::Backspace => {
                model.input.text.pop();
            }

            KeyCode::Char(c) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                model.input.text.push(c);
            }

            _ => {}
        }
        Ok(TuiMessage::None)
    }

    fn cancel_search(model: &mut TuiModel) {
        model.input.active = false;
        model.input.text.clear();
        model.rebuild_repo_list();
    }

    fn handle_repo_list_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        if key == KeyCode::Char('/') {
            model.input.active = true;
            model.input.text.clear();
            return Ok(TuiMessage::None);
        }

        if let Some(action) = repo_action(key) {
            return Ok(Self::repository_action(model, action));
        }

        let page = model.list_height();
        let len = model.repo_list.items.len();
        move_cursor(&mut model.repo_list.selected, len, page, key);
        Ok(TuiMessage::None)
    }

    fn handle_repo_table_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        if let Some(action) = repo_action(key) {
            return Ok(Self::repository_action(model, action));
        }

        let page = model.table.height as usize;
        let len = model.table.rows.len();
        move_cursor(&mut model.table.selected, len, page, key);
        Ok(TuiMessage::None)
    }

    fn handle_stats_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        let page = model.list_height();
        let len = model.stats.lines.len();
        move_cursor(&mut model.stats.scroll, len, page, key);
        Ok(TuiMessage::None)
    }

    fn handle_activity_keys(model: &mut TuiModel, key: KeyCode) -> Result<TuiMessage> {
        if let Some(action) = repo_action(key) {
            let Some(event) = model.selected_event() else {
                return Ok(TuiMessage::None);
            };
            let name = event.repo.name.clone();
            if name.is_empty() {
                return Ok(TuiMessage::None);
            }
            let url = repo_html_url(&name);
            let clone_command = format!("git clone {}", repo_clone_url(&name));
            return Ok(TuiMessage::Command(action_command(action, &name, url, clone_command)));
        }

        let page = model.list_height();
        let len = model.activity_list.len;
        move_cursor(&mut model.activity_list.selected, len, page, key);
        Ok(TuiMessage::None)
    }

    /// Copy/open the repository under the cursor
    fn repository_action(model: &TuiModel, action: RepoAction) -> TuiMessage {
        match model.selected_repository() {
            Some(repo) => TuiMessage::Command(action_command(action, &repo.name, repo.url.clone(), repo.clone_command())),
            None => TuiMessage::None,
        }
    }
}

fn repo_action(key: KeyCode) -> Option<RepoAction> {
    match key {
        KeyCode::Char('c') => Some(RepoAction::CopyClone),
        KeyCode::Char('x') => Some(RepoAction::CopyUrl),
        KeyCode::Char('o') => Some(RepoAction::Open),
        _ => None,
    }
}

fn action_command(action: RepoAction, name: &str, url: String, clone_command: String) -> Command {
    match action {
        RepoAction::CopyClone => Command::CopyToClipboard {
            text: clone_command,
            success_message: format!("📋 Clone command copied: {}", name),
        },
        RepoAction::CopyUrl => Command::CopyToClipboard {
            text: url,
            success_message: format!("📋 URL copied: {}", name),
        },
        RepoAction::Open => Command::OpenUrl {
            url,
            success_message: format!("🌐 Opened in browser: {}", name),
        },
    }
}

/// Move a cursor over `len` items; `page` is the visible row count
fn move_cursor(cursor: &mut usize, len: usize, page: usize, key: KeyCode) {
    if len == 0 {
        *cursor = 0;
        return;
    }
    let last = len - 1;
    let page = page.max(1);

    *cursor = match key {
        KeyCode::Up | KeyCode::Char('k') => cursor.saturating_sub(1),
        KeyCode::Down | KeyCode::Char('j') => (*cursor + 1).min(last),
        KeyCode::PageUp => cursor.saturating_sub(page),
        KeyCode::PageDown => (*cursor + page).min(last),
        KeyCode::Home | KeyCode::Char('g') => 0,
        KeyCode::End | KeyCode::Char('G') => last,
        _ => *cursor,
    };
}
