use crate::aggregate::WeeklyActivity;
use crate::model::CommitRecord;
use console::style;
use std::collections::{HashMap, HashSet};

/// Print the summary block: date range, totals, authors, weekly stats.
/// `records` must already be filtered and sorted by timestamp ascending.
pub fn print_summary(records: &[CommitRecord], activity: &WeeklyActivity, top: usize) {
    if records.is_empty() {
        println!("No commits in the selected range");
        return;
    }

    let first = &records[0];
    let last = &records[records.len() - 1];
    let pr_count = records.iter().filter(|r| r.is_pr).count();
    let unique_authors: HashSet<&str> = records.iter().map(|r| r.author.as_str()).collect();

    println!("{}", style("Commit Activity Summary").bold());
    println!("{}", "─".repeat(50));
    println!(
        "Date range: {} to {}",
        style(first.timestamp.format("%Y-%m-%d")).dim(),
        style(last.timestamp.format("%Y-%m-%d")).dim()
    );
    println!("Total commits: {}", style(records.len()).cyan());
    println!("Pull requests merged: {}", style(pr_count).cyan());
    println!("Unique authors: {}", style(unique_authors.len()).yellow());

    if top > 0 {
        println!("\n{}", style("Top authors").bold());
        for (name, count) in top_authors(records, top) {
            println!("  {:<32} {:>6}", name, count);
        }
    }

    let commit_stats = activity.commit_stats();
    let pr_stats = activity.pr_stats();

    println!("\n{}", style("Weekly activity").bold());
    println!("Average commits per week: {:.1}", commit_stats.mean_active);
    println!("Max commits in a week: {}", commit_stats.max);
    println!("Average PRs per week: {:.1}", pr_stats.mean_active);
    println!("Max PRs in a week: {}", pr_stats.max);
}

/// Authors ranked by commit count descending; ties keep the author seen
/// first in the (timestamp-ordered) input ahead.
pub fn top_authors(records: &[CommitRecord], limit: usize) -> Vec<(String, u64)> {
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        let entry = counts.entry(record.author.as_str()).or_insert((0, idx));
        entry.0 += 1;
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(name, (count, _))| (name.to_string(), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn record(ts: &str, author: &str) -> CommitRecord {
        CommitRecord {
            hash: "h".to_string(),
            author: author.to_string(),
            timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S")
                .unwrap()
                .and_utc(),
            message: "work".to_string(),
            is_pr: false,
        }
    }

    #[test]
    fn top_authors_orders_by_count_descending() {
        let records = vec![
            record("2025-06-02 09:00:00", "alice"),
            record("2025-06-02 10:00:00", "bob"),
            record("2025-06-02 11:00:00", "bob"),
        ];
        let ranked = top_authors(&records, 5);
        assert_eq!(ranked[0], ("bob".to_string(), 2));
        assert_eq!(ranked[1], ("alice".to_string(), 1));
    }

    #[test]
    fn ties_break_by_first_seen_order() {
        let records = vec![
            record("2025-06-02 09:00:00", "carol"),
            record("2025-06-02 10:00:00", "alice"),
            record("2025-06-02 11:00:00", "alice"),
            record("2025-06-02 12:00:00", "carol"),
        ];
        let ranked = top_authors(&records, 5);
        assert_eq!(ranked[0].0, "carol");
        assert_eq!(ranked[1].0, "alice");
    }

    #[test]
    fn limit_truncates_the_ranking() {
        let records = vec![
            record("2025-06-02 09:00:00", "a"),
            record("2025-06-02 10:00:00", "b"),
            record("2025-06-02 11:00:00", "c"),
        ];
        assert_eq!(top_authors(&records, 2).len(), 2);
    }

    #[test]
    fn empty_records_rank_nobody() {
        assert!(top_authors(&[], 5).is_empty());
    }
}
