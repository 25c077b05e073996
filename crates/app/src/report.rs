//! One-shot `--repos` report printed to stdout

use anyhow::{Context, Result};
use gitact_core::domain::{retain_public, sort_by_stars, RepoSummary, RepositoryRecord};
use gitact_core::ports::GitHubPort;
use std::io::Write;
use tracing::info;

/// Fetch every public repository of `username` and print the report.
/// Blocking; call it outside the async runtime.
pub fn run_report(github: &dyn GitHubPort, username: &str) -> Result<()> {
    println!("🔍 Fetching public repositories for user: {}", username);

    let repos = github
        .fetch_public_repositories(username)
        .context("Error fetching public repositories")?;
    info!("Report: fetched {} repositories for {}", repos.len(), username);

    let mut repos = retain_public(repos);
    sort_by_stars(&mut repos);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_statistics(&mut out, &repos)?;
    write_repositories(&mut out, &repos)?;
    out.flush()?;
    Ok(())
}

/// Totals, averages, most starred/forked and languages
pub fn write_statistics<W: Write>(out: &mut W, repos: &[RepositoryRecord]) -> std::io::Result<()> {
    writeln!(out, "\n=== Public Repository Statistics ===")?;
    if repos.is_empty() {
        writeln!(out, "No public repositories found.")?;
        return Ok(());
    }

    let summary = RepoSummary::from_repositories(repos);
    writeln!(out, "📊 Total Repositories: {}", summary.count)?;
    writeln!(out, "⭐ Total Stars: {}", summary.total_stars)?;
    writeln!(out, "🍴 Total Forks: {}", summary.total_forks)?;
    writeln!(out, "📈 Average Stars per Repository: {:.1}", summary.average_stars())?;
    writeln!(out, "📈 Average Forks per Repository: {:.1}", summary.average_forks())?;

    writeln!(out)?;
    if let Some(repo) = &summary.most_starred {
        writeln!(out, "🏆 Most Starred Repository: {} ({} stars)", repo.full_name, repo.stars)?;
    }
    if let Some(repo) = &summary.most_forked {
        writeln!(out, "🏆 Most Forked Repository: {} ({} forks)", repo.full_name, repo.forks)?;
    }

    if !summary.languages.is_empty() {
        writeln!(out, "\n📝 Programming Languages Used:")?;
        for (language, count) in &summary.languages {
            writeln!(out, "   - {}: {} repositories", language, count)?;
        }
    }
    Ok(())
}

/// Every repository in the given order, then a summary line
pub fn write_repositories<W: Write>(out: &mut W, repos: &[RepositoryRecord]) -> std::io::Result<()> {
    writeln!(out, "\n=== Public Repositories ({} total) ===", repos.len())?;
    if repos.is_empty() {
        writeln!(out, "No public repositories found.")?;
        return Ok(());
    }

    for (i, repo) in repos.iter().enumerate() {
        writeln!(out, "\n{}. {}", i + 1, repo.full_name)?;
        writeln!(out, "   ⭐ Stars: {} | 🍴 Forks: {}", repo.stars, repo.forks)?;
        if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
            writeln!(out, "   📝 Language: {}", language)?;
        }
        if !repo.description_or_empty().is_empty() {
            writeln!(out, "   📋 Description: {}", repo.description_or_empty())?;
        }
        writeln!(out, "   🔗 URL: {}", repo.url)?;
        writeln!(
            out,
            "   📅 Created: {} | Updated: {}",
            repo.created_at.format("%Y-%m-%d"),
            repo.updated_at.format("%Y-%m-%d")
        )?;
    }

    let total_stars: u64 = repos.iter().map(|r| r.stars).sum();
    writeln!(out, "\n📊 Summary: {} repositories with {} total stars", repos.len(), total_stars)?;
    Ok(())
}
