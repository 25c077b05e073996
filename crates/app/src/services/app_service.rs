use anyhow::Result;
use gitact_core::app::{Command, LoadEpoch, NotificationId};
use gitact_core::domain::AppEvent;
use gitact_core::error::{FetchError, FetchResult};
use gitact_core::ports::{BrowserPort, ClipboardPort, GitHubPort};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Runs the side effects the dashboard asks for.
///
/// Every command is executed on a background task; blocking port calls go
/// through `spawn_blocking`. Each task reports back with exactly one
/// `AppEvent` on the event channel.
pub struct AppService {
    // Ports (dependency injection)
    github: Arc<dyn GitHubPort>,
    clipboard: Arc<dyn ClipboardPort>,
    browser: Arc<dyn BrowserPort>,

    // Events delivered to the dashboard loop
    event_tx: mpsc::UnboundedSender<AppEvent>,

    command_rx: mpsc::UnboundedReceiver<Command>,

    tasks: JoinSet<()>,
}

impl AppService {
    pub fn new(
        github: Arc<dyn GitHubPort>,
        clipboard: Arc<dyn ClipboardPort>,
        browser: Arc<dyn BrowserPort>,
    ) -> (Self, mpsc::UnboundedReceiver<AppEvent>, mpsc::UnboundedSender<Command>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let service = Self {
            github,
            clipboard,
            browser,
            event_tx,
            command_rx,
            tasks: JoinSet::new(),
        };

        (service, event_rx, command_tx)
    }

    /// Sender for events that don't originate from a command (ticks, etc.)
    pub fn event_sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_tx.clone()
    }

    /// Handle a command (CQRS Command side)
    pub fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Load { username, epoch } => {
                info!("Loading data for {} (load {})", username, epoch);
                self.load_repositories(username.clone(), epoch);
                self.load_events(username, epoch);
            }
            Command::CopyToClipboard { text, success_message } => {
                debug!("Copying {} bytes to clipboard", text.len());
                let clipboard = self.clipboard.clone();
                let event_tx = self.event_tx.clone();

                self.tasks.spawn(async move {
                    let result = tokio::task::spawn_blocking(move || clipboard.copy_text(&text)).await;
                    let event = match result {
                        Ok(Ok(())) => AppEvent::Notify { message: success_message, success: true },
                        Ok(Err(e)) => {
                            warn!("Clipboard copy failed: {}", e);
                            AppEvent::Notify { message: format!("❌ Copy Error: {}", e), success: false }
                        }
                        Err(e) => {
                            error!("Clipboard task panicked: {}", e);
                            AppEvent::Notify { message: format!("❌ Copy Error: {}", e), success: false }
                        }
                    };
                    let _ = event_tx.send(event);
                });
            }
            Command::OpenUrl { url, success_message } => {
                info!("Opening {} in browser", url);
                let browser = self.browser.clone();
                let event_tx = self.event_tx.clone();

                self.tasks.spawn(async move {
                    let result = tokio::task::spawn_blocking(move || browser.open_url(&url)).await;
                    let event = match result {
                        Ok(Ok(())) => AppEvent::Notify { message: success_message, success: true },
                        Ok(Err(e)) => {
                            warn!("Browser open failed: {}", e);
                            AppEvent::Notify { message: format!("❌ Error opening browser: {}", e), success: false }
                        }
                        Err(e) => {
                            error!("Browser task panicked: {}", e);
                            AppEvent::Notify { message: format!("❌ Error opening browser: {}", e), success: false }
                        }
                    };
                    let _ = event_tx.send(event);
                });
            }
            Command::ExpireNotification { id, after } => {
                self.schedule_expiry(id, after);
            }
            Command::Quit => {
                info!("Quit command received");
                let _ = self.event_tx.send(AppEvent::QuitRequested);
            }
        }
    }

    fn load_repositories(&mut self, username: String, epoch: LoadEpoch) {
        let github = self.github.clone();
        let event_tx = self.event_tx.clone();

        self.tasks.spawn(async move {
            let result = run_blocking(move || github.fetch_public_repositories(&username)).await;
            match &result {
                Ok(repos) => info!("Load {}: fetched {} repositories", epoch, repos.len()),
                Err(e) => warn!("Load {}: repositories failed: {}", epoch, e),
            }
            let _ = event_tx.send(AppEvent::ReposLoaded { epoch, result });
        });
    }

    fn load_events(&mut self, username: String, epoch: LoadEpoch) {
        let github = self.github.clone();
        let event_tx = self.event_tx.clone();

        self.tasks.spawn(async move {
            let result = run_blocking(move || github.fetch_events(&username)).await;
            match &result {
                Ok(events) => info!("Load {}: fetched {} events", epoch, events.len()),
                Err(e) => warn!("Load {}: events failed: {}", epoch, e),
            }
            let _ = event_tx.send(AppEvent::EventsLoaded { epoch, result });
        });
    }

    fn schedule_expiry(&mut self, id: NotificationId, after: Duration) {
        let event_tx = self.event_tx.clone();

        self.tasks.spawn(async move {
            tokio::time::sleep(after).await;
            let _ = event_tx.send(AppEvent::NotificationExpired { id });
        });
    }

    /// Process commands until the command channel closes or `Quit` arrives
    pub async fn run(mut self) -> Result<()> {
        info!("Starting AppService");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(Command::Quit) => {
                            self.handle_command(Command::Quit);
                            break;
                        }
                        Some(cmd) => self.handle_command(cmd),
                        None => {
                            info!("Command channel closed, stopping service");
                            break;
                        }
                    }
                }

                // Reap finished background tasks
                task_result = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    if let Some(Err(e)) = task_result {
                        if !e.is_cancelled() {
                            error!("Background task panicked: {}", e);
                        }
                    }
                }
            }
        }

        info!("Shutting down background tasks");
        self.tasks.abort_all();

        Ok(())
    }
}

/// Run a blocking port call off the async runtime
async fn run_blocking<T, F>(f: F) -> FetchResult<T>
where
    F: FnOnce() -> FetchResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) => Err(FetchError::Transport(format!("background task failed: {}", e))),
    }
}

impl Drop for AppService {
    fn drop(&mut self) {
        // Abort all background tasks when the service is dropped
        self.tasks.abort_all();
    }
}
