use super::event::{ActivityEvent, EventKind};
use serde::{Deserialize, Serialize};

/// Counts of events by kind over one batch.
///
/// Always rebuilt in full from a batch by [`compute_stats`]; never edited
/// counter by counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub push: usize,
    pub issues: usize,
    pub watch: usize,
    pub fork: usize,
    pub create: usize,
    pub delete: usize,
    pub pull_request: usize,
    pub release: usize,
    pub public: usize,
    pub other: usize,
    pub total: usize,
}

impl AggregateStats {
    /// Sum of every bucket; equal to `total` for any computed value
    pub fn bucket_sum(&self) -> usize {
        self.push
            + self.issues
            + self.watch
            + self.fork
            + self.create
            + self.delete
            + self.pull_request
            + self.release
            + self.public
            + self.other
    }

    /// push x1.0, pull request x3.0, create x1.0, issues x1.5, watch x0.5
    pub fn weighted_score(&self) -> f64 {
        self.push as f64 * 1.0
            + self.pull_request as f64 * 3.0
            + self.create as f64 * 1.0
            + self.issues as f64 * 1.5
            + self.watch as f64 * 0.5
    }
}

/// Classify every event into its bucket in a single pass
pub fn compute_stats(events: &[ActivityEvent]) -> AggregateStats {
    let mut stats = AggregateStats::default();

    for event in events {
        stats.total += 1;
        match event.kind {
            EventKind::Push => stats.push += 1,
            EventKind::Issues => stats.issues += 1,
            EventKind::Watch => stats.watch += 1,
            EventKind::Fork => stats.fork += 1,
            EventKind::Create => stats.create += 1,
            EventKind::Delete => stats.delete += 1,
            EventKind::PullRequest => stats.pull_request += 1,
            EventKind::Release => stats.release += 1,
            EventKind::Public => stats.public += 1,
            EventKind::Other(_) => stats.other += 1,
        }
    }

    stats
}

/// Activity grade, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    F,
    D,
    C,
    B,
    BPlus,
    A,
    APlus,
    S,
    SPlus,
}

/// Lower score bound of each grade above F, best first
const GRADE_THRESHOLDS: [(f64, Grade); 8] = [
    (100.0, Grade::SPlus),
    (70.0, Grade::S),
    (40.0, Grade::APlus),
    (25.0, Grade::A),
    (15.0, Grade::BPlus),
    (8.0, Grade::B),
    (3.0, Grade::C),
    (1.0, Grade::D),
];

impl Grade {
    pub fn for_score(score: f64) -> Grade {
        GRADE_THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::F => "F",
            Grade::D => "D",
            Grade::C => "C",
            Grade::B => "B",
            Grade::BPlus => "B+",
            Grade::A => "A",
            Grade::APlus => "A+",
            Grade::S => "S",
            Grade::SPlus => "S+",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade for a batch. An empty batch is always F.
pub fn grade_for(stats: &AggregateStats) -> Grade {
    if stats.total == 0 {
        return Grade::F;
    }
    Grade::for_score(stats.weighted_score())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn events(kinds: &[(EventKind, usize)]) -> Vec<ActivityEvent> {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        kinds
            .iter()
            .flat_map(|(kind, n)| (0..*n).map(move |_| ActivityEvent::new(kind.clone(), "me/repo", at)))
            .collect()
    }

    #[test]
    fn test_compute_stats_counts_every_event() {
        let batch = events(&[
            (EventKind::Push, 4),
            (EventKind::Fork, 1),
            (EventKind::Release, 2),
            (EventKind::Other("GollumEvent".to_string()), 3),
        ]);

        let stats = compute_stats(&batch);

        assert_eq!(stats.total, batch.len());
        assert_eq!(stats.bucket_sum(), stats.total);
        assert_eq!(stats.push, 4);
        assert_eq!(stats.fork, 1);
        assert_eq!(stats.release, 2);
        assert_eq!(stats.other, 3);
    }

    #[test]
    fn test_compute_stats_empty() {
        let stats = compute_stats(&[]);
        assert_eq!(stats, AggregateStats::default());
        assert_eq!(grade_for(&stats), Grade::F);
    }

    #[test]
    fn test_grade_scenario_push_issue_watch() {
        let batch = events(&[(EventKind::Push, 3), (EventKind::Issues, 2), (EventKind::Watch, 1)]);
        let stats = compute_stats(&batch);

        assert_eq!(stats.total, 6);
        assert!((stats.weighted_score() - 6.5).abs() < f64::EPSILON);
        assert_eq!(grade_for(&stats), Grade::C);
        assert_eq!(grade_for(&stats).to_string(), "C");
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::for_score(0.0), Grade::F);
        assert_eq!(Grade::for_score(0.5), Grade::F);
        assert_eq!(Grade::for_score(1.0), Grade::D);
        assert_eq!(Grade::for_score(3.0), Grade::C);
        assert_eq!(Grade::for_score(8.0), Grade::B);
        assert_eq!(Grade::for_score(15.0), Grade::BPlus);
        assert_eq!(Grade::for_score(25.0), Grade::A);
        assert_eq!(Grade::for_score(40.0), Grade::APlus);
        assert_eq!(Grade::for_score(70.0), Grade::S);
        assert_eq!(Grade::for_score(100.0), Grade::SPlus);
        assert_eq!(Grade::for_score(1000.0), Grade::SPlus);
    }

    #[test]
    fn test_grade_is_monotonic_in_score() {
        let mut previous = Grade::F;
        let mut score = 0.0;
        while score < 150.0 {
            let grade = Grade::for_score(score);
            assert!(grade >= previous, "grade dropped at score {}", score);
            previous = grade;
            score += 0.25;
        }
    }

    #[test]
    fn test_zero_total_is_f_even_with_score() {
        // Hand-built stats whose counters disagree with total
        let stats = AggregateStats { push: 50, total: 0, ..Default::default() };
        assert_eq!(grade_for(&stats), Grade::F);
    }

    #[test]
    fn test_only_unweighted_kinds_grade_f() {
        let batch = events(&[(EventKind::Fork, 5), (EventKind::Delete, 5)]);
        assert_eq!(grade_for(&compute_stats(&batch)), Grade::F);
    }
}
