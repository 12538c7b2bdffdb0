use crate::error::{PulseError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One row of the git log export, timezone-normalized to UTC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub is_pr: bool,
}

impl CommitRecord {
    /// Monday on or before this commit's date.
    pub fn week_start(&self) -> NaiveDate {
        crate::util::week_start(self.timestamp.date_naive())
    }
}

/// Inclusive date-range filter. Bounds are compared at date granularity;
/// time of day is ignored.
#[derive(Debug, Clone, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range from optional `YYYY-MM-DD` bounds. A start after the end
    /// is rejected before any filtering happens.
    pub fn resolve(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let start = start.map(parse_bound).transpose()?;
        let end = end.map(parse_bound).transpose()?;

        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(PulseError::InvalidRange(format!(
                    "start ({}) is after end ({})",
                    s, e
                )));
            }
        }

        Ok(Self { start, end })
    }

    pub fn is_bounded(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        let date = timestamp.date_naive();
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }

    pub fn filter(&self, records: Vec<CommitRecord>) -> Vec<CommitRecord> {
        records
            .into_iter()
            .filter(|r| self.contains(&r.timestamp))
            .collect()
    }
}

fn parse_bound(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| PulseError::InvalidDate(format!("expected YYYY-MM-DD, got '{input}'")))
}

/// One week of aggregated activity, as emitted by `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyBucket {
    pub week_start: NaiveDate,
    pub commits: u64,
    pub prs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub input_path: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub total_commits: u64,
    pub total_prs: u64,
    pub buckets: Vec<WeeklyBucket>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn record(ts: &str) -> CommitRecord {
        CommitRecord {
            hash: "abc123".to_string(),
            author: "alice".to_string(),
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S")
                .unwrap()
                .and_utc(),
            message: "update docs".to_string(),
            is_pr: false,
        }
    }

    #[test]
    fn resolve_rejects_inverted_bounds() {
        let err = DateRange::resolve(Some("2025-06-01"), Some("2025-01-01")).unwrap_err();
        assert!(err.to_string().contains("after"));
    }

    #[test]
    fn resolve_rejects_garbage_dates() {
        assert!(DateRange::resolve(Some("June 1st"), None).is_err());
        assert!(DateRange::resolve(None, Some("2025-13-40")).is_err());
    }

    #[test]
    fn open_ended_range_accepts_everything() {
        let range = DateRange::resolve(None, None).unwrap();
        assert!(!range.is_bounded());
        assert!(range.contains(&record("1999-01-01 00:00:00").timestamp));
    }

    #[test]
    fn bounds_are_inclusive_at_date_granularity() {
        let range = DateRange::resolve(Some("2025-06-01"), Some("2025-06-30")).unwrap();
        // Late on the end date still passes; the day after does not.
        assert!(range.contains(&record("2025-06-01 00:00:00").timestamp));
        assert!(range.contains(&record("2025-06-30 23:59:59").timestamp));
        assert!(!range.contains(&record("2025-05-31 23:59:59").timestamp));
        assert!(!range.contains(&record("2025-07-01 00:00:00").timestamp));
    }

    #[test]
    fn filter_is_idempotent() {
        let range = DateRange::resolve(Some("2025-06-01"), Some("2025-06-07")).unwrap();
        let records = vec![
            record("2025-05-30 12:00:00"),
            record("2025-06-03 12:00:00"),
            record("2025-06-09 12:00:00"),
        ];

        let once = range.filter(records);
        let hashes: Vec<_> = once.iter().map(|r| r.timestamp).collect();
        let twice = range.filter(once.clone());
        assert_eq!(twice.len(), 1);
        assert_eq!(
            twice.iter().map(|r| r.timestamp).collect::<Vec<_>>(),
            hashes
        );
    }

    #[test]
    fn week_start_is_monday_of_the_commit_week() {
        let rec = record("2025-06-05 09:30:00");
        assert_eq!(
            rec.week_start(),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
    }
}
