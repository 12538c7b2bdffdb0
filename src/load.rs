use crate::classify::PrMatcher;
use crate::error::{PulseError, Result};
use crate::model::CommitRecord;
use crate::progress::Progress;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, Trim};
use std::path::Path;

/// Loaded records plus the number of rows discarded for unparseable dates.
#[derive(Debug)]
pub struct LoadOutcome {
    pub records: Vec<CommitRecord>,
    pub dropped: usize,
}

/// Read a 4-column headerless CSV export (hash, author, date, message) and
/// produce records sorted by timestamp ascending. Quoted and unquoted fields
/// are both accepted; rows whose date cannot be parsed are dropped and
/// counted. A row with the wrong number of fields is fatal.
pub fn load_commits(
    path: &Path,
    matcher: &PrMatcher,
    progress: &dyn Progress,
) -> Result<LoadOutcome> {
    if !path.exists() {
        return Err(PulseError::InputNotFound(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        if row.len() != 4 {
            let line = row.position().map_or(idx as u64 + 1, |p| p.line());
            return Err(PulseError::MalformedRecord {
                line,
                found: row.len(),
            });
        }

        let Some(timestamp) = parse_commit_date(&row[2]) else {
            dropped += 1;
            continue;
        };

        let message = row[3].to_string();
        records.push(CommitRecord {
            hash: row[0].to_string(),
            author: row[1].to_string(),
            timestamp,
            is_pr: matcher.is_pr(&message),
            message,
        });
    }

    records.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    progress.info(&format!(
        "Loaded {} commits ({} rows dropped)",
        records.len(),
        dropped
    ));

    Ok(LoadOutcome { records, dropped })
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %z",
    "%a %b %e %H:%M:%S %Y %z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%a %b %e %H:%M:%S %Y",
];

/// Parse a commit date, normalizing mixed timezone offsets to UTC.
///
/// Accepts RFC 3339, ISO-like `YYYY-MM-DD HH:MM:SS [±HHMM]`, git's textual
/// default (`Wed Jun 4 10:15:00 2025 +0200`), and bare dates. When an offset
/// is present it is honored; otherwise the trailing offset token (if any) is
/// stripped and the remainder taken as already-UTC.
pub fn parse_commit_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(input, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let stripped = strip_offset_suffix(input);

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(stripped, fmt) {
            return Some(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(stripped, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    None
}

/// Drop a trailing `±HHMM` token, e.g. the `+0200` in git's textual format.
fn strip_offset_suffix(input: &str) -> &str {
    if let Some((head, tail)) = input.rsplit_once(' ') {
        let looks_like_offset = tail.len() == 5
            && (tail.starts_with('+') || tail.starts_with('-'))
            && tail[1..].chars().all(|c| c.is_ascii_digit());
        if looks_like_offset {
            return head.trim_end();
        }
    }
    input
}
