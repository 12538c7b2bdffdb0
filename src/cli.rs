use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use crate::aggregate::WeeklyActivity;
use crate::chart::{render_svg, ChartStyle};
use crate::classify::PrMatcher;
use crate::load;
use crate::model::{ActivityOutput, DateRange, SCHEMA_VERSION};
use crate::progress::{ConsoleProgress, Progress, SilentProgress};
use crate::report;

#[derive(Parser)]
#[command(name = "gpulse")]
#[command(about = "Weekly git commit and pull-request activity charts from git log CSV exports")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Path to the git log CSV export (hash, author, date, message)")]
    pub input: PathBuf,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Keep commits on or after this date")]
    pub start_date: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Keep commits on or before this date")]
    pub end_date: Option<String>,

    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        help = "Write the charts as an SVG image; without FILE a timestamped name is used"
    )]
    pub output: Option<Option<PathBuf>>,

    #[arg(long, help = "Show the charts in an interactive terminal view")]
    pub interactive: bool,

    #[arg(long, help = "Output the weekly series as JSON")]
    pub json: bool,

    #[arg(long, value_name = "N", default_value_t = 5, help = "Number of authors listed in the summary")]
    pub top: usize,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let range = DateRange::resolve(self.start_date.as_deref(), self.end_date.as_deref())
            .context("Failed to resolve date range")?;

        let progress: &dyn Progress = if self.json {
            &SilentProgress
        } else {
            &ConsoleProgress
        };

        let matcher = PrMatcher::new().context("Failed to compile the PR merge pattern")?;
        let outcome = load::load_commits(&self.input, &matcher, progress)
            .context("Failed to load commit data")?;

        let records = if range.is_bounded() {
            let filtered = range.filter(outcome.records);
            progress.info(&format!("Filtered to {} commits", filtered.len()));
            filtered
        } else {
            outcome.records
        };

        let activity = WeeklyActivity::from_records(&records);

        if self.json {
            let output = ActivityOutput {
                version: SCHEMA_VERSION,
                generated_at: Utc::now(),
                input_path: self.input.display().to_string(),
                start_date: self.start_date.clone(),
                end_date: self.end_date.clone(),
                total_commits: records.len() as u64,
                total_prs: records.iter().filter(|r| r.is_pr).count() as u64,
                buckets: activity.buckets(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        report::print_summary(&records, &activity, self.top);

        // Nothing to draw; the summary already said so.
        if records.is_empty() {
            return Ok(());
        }

        if let Some(output) = self.output {
            let path = output.unwrap_or_else(default_output_path);
            let svg = render_svg(&activity, &ChartStyle::default());
            fs::write(&path, svg)
                .with_context(|| format!("Failed to write chart to {}", path.display()))?;
            println!("Chart saved to {}", path.display());
        }

        if self.interactive {
            crate::tui::run(&activity).context("Interactive display failed")?;
        }

        Ok(())
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "commit-activity-{}.svg",
        Utc::now().format("%Y%m%d-%H%M%S")
    ))
}
