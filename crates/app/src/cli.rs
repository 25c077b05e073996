use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "gitact", version, disable_version_flag = true)]
#[command(about = "Explore a GitHub user's public repositories and recent activity from the terminal")]
#[command(after_help = "Set GITHUB_TOKEN to raise the API rate limit (60 -> 5,000 requests/hour).")]
#[command(arg = clap::Arg::new("version")
    .short('v')
    .long("version")
    .action(clap::ArgAction::Version)
    .help("Print version"))]
pub struct CliArgs {
    /// GitHub username to open in the interactive dashboard
    pub username: Option<String>,

    /// Print every public repository of USERNAME with statistics and exit
    #[arg(long, value_name = "USERNAME", conflicts_with = "username")]
    pub repos: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (overrides config)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// What the process was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Dashboard { username: String },
    Report { username: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("a GitHub username is required")]
    MissingUsername,

    #[error("username can't be empty")]
    EmptyUsername,
}

impl CliArgs {
    pub fn mode(&self) -> Result<RunMode, UsageError> {
        if let Some(username) = &self.repos {
            return Ok(RunMode::Report { username: non_empty(username)? });
        }

        match &self.username {
            Some(username) => Ok(RunMode::Dashboard { username: non_empty(username)? }),
            None => Err(UsageError::MissingUsername),
        }
    }
}

fn non_empty(username: &str) -> Result<String, UsageError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        Err(UsageError::EmptyUsername)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Short usage text printed when no username was given
pub fn usage(bin: &str) -> String {
    format!(
        "Usage: {bin} <username>\n   or: {bin} --repos <username>\nExample: {bin} octocat\n         {bin} --repos octocat\n\nuse '{bin} --help' for more information."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_username() {
        let args = CliArgs::parse_from(["gitact", "octocat"]);
        assert_eq!(args.username, Some("octocat".to_string()));
        assert_eq!(args.mode(), Ok(RunMode::Dashboard { username: "octocat".to_string() }));
    }

    #[test]
    fn test_cli_parse_repos_report() {
        let args = CliArgs::parse_from(["gitact", "--repos", "torvalds"]);
        assert_eq!(args.username, None);
        assert_eq!(args.mode(), Ok(RunMode::Report { username: "torvalds".to_string() }));
    }

    #[test]
    fn test_cli_parse_no_args() {
        let args = CliArgs::parse_from(["gitact"]);
        assert_eq!(args.mode(), Err(UsageError::MissingUsername));
    }

    #[test]
    fn test_cli_blank_username_rejected() {
        let args = CliArgs::parse_from(["gitact", "   "]);
        assert_eq!(args.mode(), Err(UsageError::EmptyUsername));

        let args = CliArgs::parse_from(["gitact", "--repos", ""]);
        assert_eq!(args.mode(), Err(UsageError::EmptyUsername));
    }

    #[test]
    fn test_cli_parse_with_config_and_log_file() {
        let args = CliArgs::parse_from([
            "gitact",
            "octocat",
            "--config", "/custom/config.toml",
            "--log-file", "/tmp/gitact.log",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/gitact.log")));
    }

    #[test]
    fn test_cli_repos_requires_value() {
        assert!(CliArgs::try_parse_from(["gitact", "--repos"]).is_err());
    }

    #[test]
    fn test_cli_version_flags() {
        let err = CliArgs::try_parse_from(["gitact", "-v"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);

        let err = CliArgs::try_parse_from(["gitact", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);

        let err = CliArgs::try_parse_from(["gitact", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_usage_mentions_both_forms() {
        let text = usage("gitact");
        assert!(text.contains("gitact <username>"));
        assert!(text.contains("gitact --repos <username>"));
    }
}
