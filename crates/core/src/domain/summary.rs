use super::repo::RepositoryRecord;

/// Totals over a repository set, shown in the statistics view and the
/// `--repos` report
#[derive(Debug, Clone, PartialEq)]
pub struct RepoSummary {
    pub count: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub most_starred: Option<RepositoryRecord>,
    pub most_forked: Option<RepositoryRecord>,
    /// Language and number of repositories using it, most used first
    pub languages: Vec<(String, usize)>,
}

impl RepoSummary {
    pub fn from_repositories(repos: &[RepositoryRecord]) -> Self {
        let mut total_stars = 0;
        let mut total_forks = 0;
        let mut most_starred: Option<&RepositoryRecord> = None;
        let mut most_forked: Option<&RepositoryRecord> = None;
        let mut languages: Vec<(String, usize)> = Vec::new();

        for repo in repos {
            total_stars += repo.stars;
            total_forks += repo.forks;

            // First record wins ties
            if most_starred.map_or(true, |best| repo.stars > best.stars) {
                most_starred = Some(repo);
            }
            if most_forked.map_or(true, |best| repo.forks > best.forks) {
                most_forked = Some(repo);
            }

            if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
                match languages.iter_mut().find(|(name, _)| name == language) {
                    Some((_, count)) => *count += 1,
                    None => languages.push((language.to_string(), 1)),
                }
            }
        }

        languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            count: repos.len(),
            total_stars,
            total_forks,
            most_starred: most_starred.cloned(),
            most_forked: most_forked.cloned(),
            languages,
        }
    }

    pub fn average_stars(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total_stars as f64 / self.count as f64
    }

    pub fn average_forks(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.total_forks as f64 / self.count as f64
    }
}

/// Compact count: 1234 -> "1.2k", 2500000 -> "2.5M"
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repo::fixtures::repo;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1.0k");
        assert_eq!(format_number(1_540), "1.5k");
        assert_eq!(format_number(2_500_000), "2.5M");
    }

    #[test]
    fn test_summary_totals() {
        let mut go = repo("gopher", "", 30);
        go.language = Some("Go".to_string());
        go.forks = 40;
        let mut untyped = repo("notes", "", 5);
        untyped.language = None;
        let repos = vec![repo("big", "", 100), go, repo("small", "", 1), untyped];

        let summary = RepoSummary::from_repositories(&repos);

        assert_eq!(summary.count, 4);
        assert_eq!(summary.total_stars, 136);
        assert_eq!(summary.most_starred.as_ref().map(|r| r.name.as_str()), Some("big"));
        assert_eq!(summary.most_forked.as_ref().map(|r| r.name.as_str()), Some("big"));
        assert_eq!(summary.languages, vec![("Rust".to_string(), 2), ("Go".to_string(), 1)]);
        assert!((summary.average_stars() - 34.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_empty() {
        let summary = RepoSummary::from_repositories(&[]);
        assert_eq!(summary.count, 0);
        assert!(summary.most_starred.is_none());
        assert_eq!(summary.average_stars(), 0.0);
    }
}
