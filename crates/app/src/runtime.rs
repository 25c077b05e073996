// Composition root and main loop of the interactive dashboard

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gitact_core::app::Command;
use gitact_core::domain::AppEvent;
use gitact_core::error::FetchResult;
use gitact_core::ports::{AppConfig, BrowserPort, ClipboardPort, GitHubPort, RateLimit};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::adapters::{browser::SystemBrowser, clipboard::SystemClipboard};
use crate::config::TOKEN_ENV;
use crate::services::AppService;
use crate::tui::{TuiModel, TuiUpdate, TuiView};

/// How long quitting waits for in-flight API requests before abandoning them
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// The running dashboard: service, model and terminal wired together
pub struct Dashboard {
    /// Executes commands on background tasks
    app_service: AppService,

    /// The TUI model (MVU pattern)
    tui_model: TuiModel,

    /// Event receiver from the app service
    event_rx: mpsc::UnboundedReceiver<AppEvent>,

    /// Command sender to the app service
    command_tx: mpsc::UnboundedSender<Command>,

    tick_interval: Duration,
}

impl Dashboard {
    /// This is the composition root - where dependency injection happens
    pub fn new(username: &str, config: &AppConfig, github: Arc<dyn GitHubPort>) -> Self {
        let clipboard: Arc<dyn ClipboardPort> = Arc::new(SystemClipboard::new());
        let browser: Arc<dyn BrowserPort> = Arc::new(SystemBrowser::new());

        let (app_service, event_rx, command_tx) = AppService::new(github, clipboard, browser);
        let tui_model = TuiModel::with_notification_ttl(username, config.ui.notification_ttl());

        Self {
            app_service,
            tui_model,
            event_rx,
            command_tx,
            tick_interval: config.ui.tick_interval(),
        }
    }

    /// Take over the terminal and run until the user quits
    pub async fn run(self) -> Result<()> {
        info!("Starting dashboard for {}", self.tui_model.username);

        let Dashboard {
            app_service,
            mut tui_model,
            event_rx,
            command_tx,
            tick_interval,
        } = self;

        // Start the application service in the background
        let app_service_handle = tokio::spawn(app_service.run());

        let mut terminal = setup_terminal()?;
        let result = run_main_loop(&mut tui_model, &mut terminal, event_rx, &command_tx, tick_interval).await;

        // Restore the terminal even when the loop failed
        let restored = shutdown(&mut terminal);

        // Closing the command channel stops the service
        drop(command_tx);
        match app_service_handle.await {
            Ok(Err(e)) => error!("App service failed: {}", e),
            Err(e) => error!("App service task failed: {:?}", e),
            Ok(Ok(())) => {}
        }

        result.and(restored)
    }
}

/// Stop the runtime without waiting on blocking fetches that are still
/// stuck in the network. Their results would be discarded anyway.
pub fn shutdown_runtime(runtime: tokio::runtime::Runtime) {
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
}

/// Advisory only: warn when few API requests are left, never fail
pub fn check_rate_limit(github: &dyn GitHubPort) {
    let result = github.rate_limit();
    match &result {
        Ok(limit) => info!("Rate limit: {}/{} remaining", limit.remaining, limit.limit),
        Err(e) => warn!("Could not check rate limit: {}", e),
    }

    if let Some(advisory) = rate_limit_advisory(&result) {
        eprintln!("⚠️  Warning: {}", advisory);
    }
}

/// The message shown before the dashboard starts, if any
pub fn rate_limit_advisory(result: &FetchResult<RateLimit>) -> Option<String> {
    match result {
        Ok(limit) if limit.is_nearly_exhausted() => Some(format!(
            "only {} of {} API requests remaining. Set {} to raise the limit.",
            limit.remaining, limit.limit, TOKEN_ENV
        )),
        Ok(_) => None,
        Err(e) => Some(format!(
            "could not check the API rate limit ({}). Set {} if requests start failing.",
            e, TOKEN_ENV
        )),
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to initialize terminal")
}

fn send_commands(command_tx: &mpsc::UnboundedSender<Command>, cmds: Vec<Command>) {
    for cmd in cmds {
        info!("Sending command to app service: {:?}", cmd);
        if let Err(e) = command_tx.send(cmd) {
            error!("Failed to send command: {}", e);
        }
    }
}

/// Main application loop - coordinates TUI and app service
async fn run_main_loop(
    tui_model: &mut TuiModel,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut event_rx: mpsc::UnboundedReceiver<AppEvent>,
    command_tx: &mpsc::UnboundedSender<Command>,
    tick_interval: Duration,
) -> Result<()> {
    let size = terminal.size()?;
    TuiUpdate::handle_resize(tui_model, size.width, size.height)?;

    // Initial load
    let load = TuiUpdate::start_load(tui_model);
    send_commands(command_tx, vec![load]);

    let mut last_tick = Instant::now();
    let mut needs_redraw = true;

    loop {
        // Handle events from the app service
        while let Ok(event) = event_rx.try_recv() {
            let follow_up = TuiUpdate::handle_event(tui_model, event);
            send_commands(command_tx, follow_up);
            needs_redraw = true;
        }

        if last_tick.elapsed() >= tick_interval {
            TuiUpdate::handle_event(tui_model, AppEvent::Tick);
            last_tick = Instant::now();
            if !tui_model.is_ready() {
                needs_redraw = true;
            }
        }

        // Handle user input
        if event::poll(Duration::from_millis(10))? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    let message = TuiUpdate::handle_key(tui_model, key_event.code, key_event.modifiers)?;
                    send_commands(command_tx, message.into_commands());
                    needs_redraw = true;
                }
                Event::Resize(width, height) => {
                    TuiUpdate::handle_resize(tui_model, width, height)?;
                    needs_redraw = true;
                }
                _ => {}
            }
        }

        if tui_model.should_quit {
            info!("Quit requested, exiting main loop");
            break;
        }

        if needs_redraw {
            terminal.draw(|frame| TuiView::render(tui_model, frame))?;
            needs_redraw = false;
        }

        // Small sleep to prevent busy waiting
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    Ok(())
}

/// Clean shutdown
fn shutdown(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    info!("Restoring terminal");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitact_core::error::FetchError;

    #[test]
    fn test_rate_limit_advisory() {
        let plenty = RateLimit { limit: 60, remaining: 59, reset: 0 };
        assert_eq!(rate_limit_advisory(&Ok(plenty)), None);

        let low = RateLimit { limit: 60, remaining: 3, reset: 0 };
        let advisory = rate_limit_advisory(&Ok(low)).unwrap_or_default();
        assert!(advisory.contains("only 3 of 60"));
        assert!(advisory.contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_rate_limit_failure_is_reported() {
        let err = FetchError::Transport("connection refused".to_string());
        let advisory = rate_limit_advisory(&Err(err)).unwrap_or_default();
        assert!(advisory.contains("could not check the API rate limit"));
        assert!(advisory.contains("connection refused"));
        assert!(advisory.contains("GITHUB_TOKEN"));
    }
}
