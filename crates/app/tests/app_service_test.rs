//! AppService executing commands against in-memory ports

use anyhow::Result;
use chrono::{TimeZone, Utc};
use gitact::runtime::shutdown_runtime;
use gitact::services::AppService;
use gitact_core::app::{Command, LoadEpoch, NotificationId};
use gitact_core::domain::{ActivityEvent, AppEvent, EventKind, RepositoryRecord};
use gitact_core::error::{ActionError, FetchError, FetchResult};
use gitact_core::ports::{BrowserPort, ClipboardPort, GitHubPort, RateLimit};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

struct FakeGitHub {
    repos: FetchResult<Vec<RepositoryRecord>>,
    events: FetchResult<Vec<ActivityEvent>>,
}

impl GitHubPort for FakeGitHub {
    fn fetch_events(&self, _username: &str) -> FetchResult<Vec<ActivityEvent>> {
        self.events.clone()
    }

    fn fetch_public_repositories(&self, _username: &str) -> FetchResult<Vec<RepositoryRecord>> {
        self.repos.clone()
    }

    fn rate_limit(&self) -> FetchResult<RateLimit> {
        Ok(RateLimit { limit: 60, remaining: 60, reset: 0 })
    }
}

/// A network that never answers in time
struct StalledGitHub {
    delay: Duration,
}

impl GitHubPort for StalledGitHub {
    fn fetch_events(&self, _username: &str) -> FetchResult<Vec<ActivityEvent>> {
        std::thread::sleep(self.delay);
        Ok(Vec::new())
    }

    fn fetch_public_repositories(&self, _username: &str) -> FetchResult<Vec<RepositoryRecord>> {
        std::thread::sleep(self.delay);
        Ok(Vec::new())
    }

    fn rate_limit(&self) -> FetchResult<RateLimit> {
        Ok(RateLimit { limit: 60, remaining: 60, reset: 0 })
    }
}

#[derive(Default)]
struct FakeClipboard {
    copied: Mutex<Vec<String>>,
    broken: bool,
}

impl ClipboardPort for FakeClipboard {
    fn copy_text(&self, text: &str) -> Result<(), ActionError> {
        if self.broken {
            return Err(ActionError::ClipboardUnavailable("no display".to_string()));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct FakeBrowser {
    opened: Mutex<Vec<String>>,
}

impl BrowserPort for FakeBrowser {
    fn open_url(&self, url: &str) -> Result<(), ActionError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

fn sample_repo() -> RepositoryRecord {
    let at = Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap();
    RepositoryRecord {
        name: "hello".to_string(),
        full_name: "octocat/hello".to_string(),
        description: None,
        url: "https://github.com/octocat/hello".to_string(),
        clone_url: "https://github.com/octocat/hello.git".to_string(),
        stars: 3,
        forks: 1,
        language: None,
        created_at: at,
        updated_at: at,
        private: false,
    }
}

fn sample_event() -> ActivityEvent {
    ActivityEvent::new(
        EventKind::Push,
        "octocat/hello",
        Utc.with_ymd_and_hms(2023, 6, 2, 0, 0, 0).unwrap(),
    )
}

async fn next_event(event_rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> AppEvent {
    tokio::time::timeout(Duration::from_secs(5), event_rx.recv())
        .await
        .expect("timed out waiting for an event")
        .expect("event channel closed")
}

#[tokio::test]
async fn test_load_reports_both_sources_with_epoch() -> Result<()> {
    let github = Arc::new(FakeGitHub {
        repos: Ok(vec![sample_repo()]),
        events: Err(FetchError::RateLimited { status: 403, reset: None }),
    });
    let (service, mut event_rx, command_tx) =
        AppService::new(github, Arc::new(FakeClipboard::default()), Arc::new(FakeBrowser::default()));
    let handle = tokio::spawn(service.run());

    let epoch = LoadEpoch(7);
    command_tx.send(Command::Load { username: "octocat".to_string(), epoch })?;

    let mut repos_seen = false;
    let mut events_seen = false;
    for _ in 0..2 {
        match next_event(&mut event_rx).await {
            AppEvent::ReposLoaded { epoch: e, result } => {
                assert_eq!(e, epoch);
                assert_eq!(result, Ok(vec![sample_repo()]));
                repos_seen = true;
            }
            AppEvent::EventsLoaded { epoch: e, result } => {
                assert_eq!(e, epoch);
                assert_eq!(result, Err(FetchError::RateLimited { status: 403, reset: None }));
                events_seen = true;
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
    assert!(repos_seen && events_seen);

    command_tx.send(Command::Quit)?;
    assert_eq!(next_event(&mut event_rx).await, AppEvent::QuitRequested);
    handle.await??;
    Ok(())
}

#[tokio::test]
async fn test_events_fetch_result_is_forwarded() -> Result<()> {
    let github = Arc::new(FakeGitHub { repos: Ok(Vec::new()), events: Ok(vec![sample_event()]) });
    let (service, mut event_rx, command_tx) =
        AppService::new(github, Arc::new(FakeClipboard::default()), Arc::new(FakeBrowser::default()));
    let _handle = tokio::spawn(service.run());

    command_tx.send(Command::Load { username: "octocat".to_string(), epoch: LoadEpoch(1) })?;

    let mut events = None;
    for _ in 0..2 {
        if let AppEvent::EventsLoaded { result, .. } = next_event(&mut event_rx).await {
            events = Some(result);
        }
    }
    assert_eq!(events, Some(Ok(vec![sample_event()])));
    Ok(())
}

#[tokio::test]
async fn test_copy_and_open_notify() -> Result<()> {
    let github = Arc::new(FakeGitHub { repos: Ok(Vec::new()), events: Ok(Vec::new()) });
    let clipboard = Arc::new(FakeClipboard::default());
    let browser = Arc::new(FakeBrowser::default());
    let (service, mut event_rx, command_tx) = AppService::new(github, clipboard.clone(), browser.clone());
    let _handle = tokio::spawn(service.run());

    command_tx.send(Command::CopyToClipboard {
        text: "git clone https://github.com/octocat/hello.git".to_string(),
        success_message: "📋 Clone command copied: hello".to_string(),
    })?;
    assert_eq!(
        next_event(&mut event_rx).await,
        AppEvent::Notify { message: "📋 Clone command copied: hello".to_string(), success: true }
    );
    assert_eq!(
        clipboard.copied.lock().unwrap().as_slice(),
        ["git clone https://github.com/octocat/hello.git".to_string()]
    );

    command_tx.send(Command::OpenUrl {
        url: "https://github.com/octocat/hello".to_string(),
        success_message: "🌐 Opened in browser: hello".to_string(),
    })?;
    assert_eq!(
        next_event(&mut event_rx).await,
        AppEvent::Notify { message: "🌐 Opened in browser: hello".to_string(), success: true }
    );
    assert_eq!(browser.opened.lock().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_clipboard_failure_becomes_error_notification() -> Result<()> {
    let github = Arc::new(FakeGitHub { repos: Ok(Vec::new()), events: Ok(Vec::new()) });
    let clipboard = Arc::new(FakeClipboard { broken: true, ..Default::default() });
    let (service, mut event_rx, command_tx) = AppService::new(github, clipboard, Arc::new(FakeBrowser::default()));
    let _handle = tokio::spawn(service.run());

    command_tx.send(Command::CopyToClipboard {
        text: "https://github.com/octocat/hello".to_string(),
        success_message: "📋 URL copied: hello".to_string(),
    })?;
    assert_eq!(
        next_event(&mut event_rx).await,
        AppEvent::Notify {
            message: "❌ Copy Error: clipboard unavailable: no display".to_string(),
            success: false,
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_expiry_timer_fires() -> Result<()> {
    let github = Arc::new(FakeGitHub { repos: Ok(Vec::new()), events: Ok(Vec::new()) });
    let (service, mut event_rx, command_tx) =
        AppService::new(github, Arc::new(FakeClipboard::default()), Arc::new(FakeBrowser::default()));
    let _handle = tokio::spawn(service.run());

    command_tx.send(Command::ExpireNotification { id: NotificationId(4), after: Duration::from_millis(20) })?;
    assert_eq!(
        next_event(&mut event_rx).await,
        AppEvent::NotificationExpired { id: NotificationId(4) }
    );
    Ok(())
}

#[tokio::test]
async fn test_service_stops_when_commands_close() -> Result<()> {
    let github = Arc::new(FakeGitHub { repos: Ok(Vec::new()), events: Ok(Vec::new()) });
    let (service, _event_rx, command_tx) =
        AppService::new(github, Arc::new(FakeClipboard::default()), Arc::new(FakeBrowser::default()));
    let handle = tokio::spawn(service.run());

    drop(command_tx);
    tokio::time::timeout(Duration::from_secs(5), handle).await???;
    Ok(())
}

#[test]
fn test_quit_does_not_wait_for_stalled_fetches() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    let github = Arc::new(StalledGitHub { delay: Duration::from_secs(10) });
    let (service, mut event_rx, command_tx) =
        AppService::new(github, Arc::new(FakeClipboard::default()), Arc::new(FakeBrowser::default()));

    runtime.block_on(async {
        let handle = tokio::spawn(service.run());
        command_tx.send(Command::Load { username: "octocat".to_string(), epoch: LoadEpoch(1) })?;
        // Let both fetches reach the blocking pool
        tokio::time::sleep(Duration::from_millis(50)).await;
        command_tx.send(Command::Quit)?;

        assert_eq!(next_event(&mut event_rx).await, AppEvent::QuitRequested);
        drop(command_tx);
        tokio::time::timeout(Duration::from_secs(5), handle).await???;
        anyhow::Ok(())
    })?;

    let started = Instant::now();
    shutdown_runtime(runtime);
    assert!(started.elapsed() < Duration::from_secs(2));
    Ok(())
}
