use crate::model::{CommitRecord, WeeklyBucket};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Weekly commit and PR counts over one shared, gap-free grid of Monday
/// week-start keys. The PR series is zero-filled wherever only ordinary
/// commits happened, and both series cover every week between the first and
/// last populated one.
#[derive(Debug, Clone)]
pub struct WeeklyActivity {
    pub commits: BTreeMap<NaiveDate, u64>,
    pub prs: BTreeMap<NaiveDate, u64>,
}

/// Derived scalars for one weekly series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub total: u64,
    pub max: u64,
    /// Mean over weeks with a non-zero count; 0.0 for an empty series.
    pub mean_active: f64,
}

impl WeeklyActivity {
    pub fn from_records(records: &[CommitRecord]) -> Self {
        let mut commits: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        let mut prs: BTreeMap<NaiveDate, u64> = BTreeMap::new();

        for record in records {
            let week = record.week_start();
            *commits.entry(week).or_insert(0) += 1;
            if record.is_pr {
                *prs.entry(week).or_insert(0) += 1;
            }
        }

        // PR weeks are a subset of commit weeks, so the union's bounds are the
        // commit series' bounds. Walk Monday to Monday and fill the gaps.
        if let (Some(&first), Some(&last)) =
            (commits.keys().next(), commits.keys().next_back())
        {
            let mut week = first;
            while week <= last {
                commits.entry(week).or_insert(0);
                prs.entry(week).or_insert(0);
                week += Duration::days(7);
            }
        }

        Self { commits, prs }
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Week keys in ascending order (identical for both series).
    pub fn weeks(&self) -> Vec<NaiveDate> {
        self.commits.keys().copied().collect()
    }

    pub fn buckets(&self) -> Vec<WeeklyBucket> {
        self.commits
            .iter()
            .map(|(&week_start, &commits)| WeeklyBucket {
                week_start,
                commits,
                prs: self.prs.get(&week_start).copied().unwrap_or(0),
            })
            .collect()
    }

    pub fn commit_stats(&self) -> SeriesStats {
        series_stats(&self.commits)
    }

    pub fn pr_stats(&self) -> SeriesStats {
        series_stats(&self.prs)
    }
}

fn series_stats(series: &BTreeMap<NaiveDate, u64>) -> SeriesStats {
    let total: u64 = series.values().sum();
    let max = series.values().copied().max().unwrap_or(0);
    let active = series.values().filter(|&&c| c > 0).count();
    let mean_active = if active == 0 {
        0.0
    } else {
        total as f64 / active as f64
    };

    SeriesStats {
        total,
        max,
        mean_active,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;

    fn record(ts: &str, author: &str, is_pr: bool) -> CommitRecord {
        CommitRecord {
            hash: format!("h-{ts}"),
            author: author.to_string(),
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S")
                .unwrap()
                .and_utc(),
            message: if is_pr {
                "Merge pull request #1 from a/b".to_string()
            } else {
                "work".to_string()
            },
            is_pr,
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn monday_and_thursday_share_one_bucket() {
        let activity = WeeklyActivity::from_records(&[
            record("2025-06-02 09:00:00", "alice", false),
            record("2025-06-05 17:00:00", "bob", false),
        ]);
        assert_eq!(activity.commits.len(), 1);
        assert_eq!(activity.commits[&date("2025-06-02")], 2);
    }

    #[test]
    fn series_sums_match_their_sources() {
        let records = vec![
            record("2025-06-02 09:00:00", "alice", false),
            record("2025-06-03 09:00:00", "alice", true),
            record("2025-06-10 09:00:00", "bob", true),
            record("2025-06-24 09:00:00", "bob", false),
        ];
        let activity = WeeklyActivity::from_records(&records);

        let commit_sum: u64 = activity.commits.values().sum();
        let pr_sum: u64 = activity.prs.values().sum();
        assert_eq!(commit_sum, records.len() as u64);
        assert_eq!(pr_sum, records.iter().filter(|r| r.is_pr).count() as u64);
    }

    #[test]
    fn both_series_share_a_gap_free_key_set() {
        // Commits in the weeks of Jun 2 and Jun 23; nothing in between.
        let activity = WeeklyActivity::from_records(&[
            record("2025-06-02 09:00:00", "alice", false),
            record("2025-06-24 09:00:00", "bob", true),
        ]);

        let weeks = activity.weeks();
        assert_eq!(
            weeks,
            vec![
                date("2025-06-02"),
                date("2025-06-09"),
                date("2025-06-16"),
                date("2025-06-23"),
            ]
        );
        assert_eq!(
            activity.prs.keys().copied().collect::<Vec<_>>(),
            weeks,
            "PR series must be reindexed onto the commit grid"
        );
        assert_eq!(activity.commits[&date("2025-06-09")], 0);
        assert_eq!(activity.prs[&date("2025-06-02")], 0);
        assert_eq!(activity.prs[&date("2025-06-23")], 1);
    }

    #[test]
    fn empty_input_produces_empty_series_and_zero_stats() {
        let activity = WeeklyActivity::from_records(&[]);
        assert!(activity.is_empty());
        assert!(activity.buckets().is_empty());

        let stats = activity.commit_stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.max, 0);
        assert_eq!(stats.mean_active, 0.0);
    }

    #[test]
    fn mean_divides_by_active_weeks_only() {
        // 3 commits in week one, 1 in week three, zero-filled week two.
        let activity = WeeklyActivity::from_records(&[
            record("2025-06-02 09:00:00", "alice", false),
            record("2025-06-03 09:00:00", "alice", false),
            record("2025-06-04 09:00:00", "alice", false),
            record("2025-06-17 09:00:00", "bob", false),
        ]);
        let stats = activity.commit_stats();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.max, 3);
        assert_eq!(stats.mean_active, 2.0);
    }

    #[test]
    fn buckets_are_ordered_and_zipped() {
        let activity = WeeklyActivity::from_records(&[
            record("2025-06-02 09:00:00", "alice", true),
            record("2025-06-09 09:00:00", "bob", false),
        ]);
        let buckets = activity.buckets();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].week_start, date("2025-06-02"));
        assert_eq!(buckets[0].commits, 1);
        assert_eq!(buckets[0].prs, 1);
        assert_eq!(buckets[1].prs, 0);
    }

    #[test]
    fn sunday_commit_lands_in_the_preceding_monday_week() {
        let activity =
            WeeklyActivity::from_records(&[record("2025-06-08 23:00:00", "alice", false)]);
        assert_eq!(activity.commits[&date("2025-06-02")], 1);
    }
}
