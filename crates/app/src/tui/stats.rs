//! Text of the statistics view

use gitact_core::app::ReadProjection;
use gitact_core::domain::format_number;

const TOP_COUNT: usize = 5;

/// Detailed statistics for the current working data, one entry per line
pub fn detailed_stats(projection: &ReadProjection) -> Vec<String> {
    let mut lines = vec!["📊 Detailed Statistics".to_string(), String::new()];

    let repos = projection.repositories();
    if !repos.is_empty() {
        let summary = projection.summary();

        lines.push("🗂️ Repository Overview:".to_string());
        lines.push(format!("   Total Repositories: {}", summary.count));
        lines.push(format!("   Total Stars: {}", format_number(summary.total_stars)));
        lines.push(format!("   Total Forks: {}", format_number(summary.total_forks)));
        lines.push(format!("   Average Stars: {:.1}", summary.average_stars()));
        lines.push(String::new());

        lines.push("🏆 Top Repositories by Stars:".to_string());
        for (i, repo) in repos.iter().take(TOP_COUNT).enumerate() {
            lines.push(format!("   {}. {} - ⭐ {}", i + 1, repo.name, format_number(repo.stars)));
        }
        lines.push(String::new());

        if !summary.languages.is_empty() {
            lines.push("💻 Programming Languages:".to_string());
            for (language, count) in &summary.languages {
                lines.push(format!("   {}: {} repositories", language, count));
            }
            lines.push(String::new());
        }
    }

    if !projection.events().is_empty() {
        let stats = projection.stats();
        lines.push("⚡ Activity Statistics:".to_string());
        lines.push(format!("   Push Events: {}", stats.push));
        lines.push(format!("   Pull Request Events: {}", stats.pull_request));
        lines.push(format!("   Issue Events: {}", stats.issues));
        lines.push(format!("   Create Events: {}", stats.create));
        lines.push(format!("   Watch Events: {}", stats.watch));
        lines.push(format!("   Total Events: {}", stats.total));
        lines.push(format!("   Activity Grade: {}", projection.grade()));

        let active = projection.repo_activity();
        if !active.is_empty() {
            lines.push(String::new());
            lines.push("🔥 Most Active Repositories:".to_string());
            for (i, repo) in active.iter().take(TOP_COUNT).enumerate() {
                lines.push(format!(
                    "   {}. {} - {} events (last {})",
                    i + 1,
                    repo.name,
                    repo.count,
                    repo.last_activity.format("%Y-%m-%d")
                ));
            }
        }
    }

    lines
}
