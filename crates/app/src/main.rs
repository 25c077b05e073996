use anyhow::{Context, Result};
use clap::Parser;
use gitact::adapters::github::GitHubAdapter;
use gitact::cli::{usage, CliArgs, RunMode};
use gitact::config::{load_config, token_from_env};
use gitact::report::run_report;
use gitact::runtime::{check_rate_limit, shutdown_runtime, Dashboard};
use gitact_core::ports::{AppConfig, GitHubPort};
use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        error!("Application error: {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli_args = CliArgs::parse();

    let mode = match cli_args.mode() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, usage("gitact"));
            std::process::exit(1);
        }
    };

    let config = load_config(&cli_args, token_from_env());
    init_tracing(&config)?;

    // The blocking HTTP client is built and dropped outside the async runtime
    let github: Arc<dyn GitHubPort> = Arc::new(GitHubAdapter::new(&config.github)?);

    match mode {
        RunMode::Report { username } => run_report(github.as_ref(), &username),
        RunMode::Dashboard { username } => {
            check_rate_limit(github.as_ref());

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;

            let dashboard = Dashboard::new(&username, &config, github.clone());
            let result = runtime.block_on(dashboard.run());
            shutdown_runtime(runtime);

            info!("gitact shut down cleanly");
            result
        }
    }
}

/// Log to the configured file, or stderr when none is set.
/// Filter comes from RUST_LOG.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}
