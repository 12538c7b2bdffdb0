pub mod svg;

pub use svg::render_svg;

use crate::util::month_label;
use chrono::{Datelike, Duration, NaiveDate};

/// Explicit chart styling, passed into the renderers. There is no global
/// style state.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub font_family: String,
    pub commit_color: String,
    pub pr_color: String,
    pub background: String,
    pub grid_color: String,
    pub text_color: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 320,
            font_family: "Arial, sans-serif".to_string(),
            // GitHub's light green and blue
            commit_color: "#57d193".to_string(),
            pr_color: "#54aeff".to_string(),
            background: "#ffffff".to_string(),
            grid_color: "#d0d7de".to_string(),
            text_color: "#24292f".to_string(),
        }
    }
}

/// Tick positions for the x axis: the index of each week bucket that contains
/// the first day of a calendar month, labeled like `Jun '25`.
pub fn month_ticks(weeks: &[NaiveDate]) -> Vec<(usize, String)> {
    let mut ticks = Vec::new();
    for (idx, &week) in weeks.iter().enumerate() {
        let week_end = week + Duration::days(6);
        if week.day() == 1 {
            ticks.push((idx, month_label(week)));
        } else if week.month() != week_end.month() || week.year() != week_end.year() {
            ticks.push((idx, month_label(week_end)));
        }
    }
    ticks
}
