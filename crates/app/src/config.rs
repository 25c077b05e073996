use anyhow::Result;
use gitact_core::ports::{AppConfig, ConfigStore};
use tracing::info;

use crate::adapters::persistence::FileConfigStore;
use crate::cli::CliArgs;

/// Environment variable holding the optional API token
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Load the config file named by `--config` (or the default one) and
/// layer the CLI flags and `token` on top of it.
///
/// A config file that can't be read or created is not fatal: the cause is
/// reported on stderr and the defaults are used instead.
pub fn load_config(cli_args: &CliArgs, token: Option<String>) -> AppConfig {
    let config = match load_config_file(cli_args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("⚠️  Warning: {:#}; using default settings", e);
            AppConfig::default()
        }
    };
    apply_overrides(config, cli_args, token)
}

fn load_config_file(cli_args: &CliArgs) -> Result<AppConfig> {
    let store = match &cli_args.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new()?,
    };
    info!("Loading config from {}", store.path().display());

    store.load()
}

/// CLI args override config file; the token only ever comes from the environment
pub fn apply_overrides(mut config: AppConfig, cli_args: &CliArgs, token: Option<String>) -> AppConfig {
    if let Some(log_file) = &cli_args.log_file {
        config.log_file = Some(log_file.clone());
    }

    config.github.token = token.filter(|t| !t.trim().is_empty());
    config
}

/// Token from the environment, if set
pub fn token_from_env() -> Option<String> {
    std::env::var(TOKEN_ENV).ok()
}
