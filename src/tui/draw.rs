use std::collections::BTreeMap;

use chrono::NaiveDate;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{BarChart, Block, Borders};
use ratatui::Frame;

use crate::aggregate::WeeklyActivity;
use crate::chart::month_ticks;

/// Two side-by-side bar charts, one per weekly series.
pub fn draw_activity(f: &mut Frame, area: Rect, activity: &WeeklyActivity) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let weeks = activity.weeks();
    let labels = bar_labels(&weeks);

    draw_series(
        f,
        chunks[0],
        &weeks,
        &labels,
        &activity.commits,
        "Commits per week (q to quit)",
        Color::Green,
    );
    draw_series(
        f,
        chunks[1],
        &weeks,
        &labels,
        &activity.prs,
        "PRs per week",
        Color::Blue,
    );
}

fn draw_series(
    f: &mut Frame,
    area: Rect,
    weeks: &[NaiveDate],
    labels: &[String],
    series: &BTreeMap<NaiveDate, u64>,
    title: &str,
    color: Color,
) {
    let data: Vec<(&str, u64)> = weeks
        .iter()
        .zip(labels.iter())
        .map(|(week, label)| (label.as_str(), series.get(week).copied().unwrap_or(0)))
        .collect();

    let chart = BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .data(&data)
        .bar_width(6)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color));

    f.render_widget(chart, area);
}

/// Month labels under the first week of each month, blank elsewhere.
/// `Jun '25` is squeezed to `Jun'25` so it fits under a 6-cell bar.
fn bar_labels(weeks: &[NaiveDate]) -> Vec<String> {
    let mut labels = vec![String::new(); weeks.len()];
    for (idx, label) in month_ticks(weeks) {
        labels[idx] = label.replace(' ', "");
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn labels_mark_month_start_weeks_only() {
        let start: NaiveDate = "2025-06-23".parse().unwrap();
        let weeks: Vec<NaiveDate> = (0..3).map(|i| start + Duration::days(7 * i)).collect();

        let labels = bar_labels(&weeks);
        assert_eq!(labels, vec!["", "Jul'25", ""]);
    }
}
