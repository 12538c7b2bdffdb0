use super::{month_ticks, ChartStyle};
use crate::aggregate::WeeklyActivity;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt::Write;

const MARGIN: f64 = 16.0;
const AXIS_LEFT: f64 = 44.0;
const AXIS_BOTTOM: f64 = 36.0;
const PANEL_TOP: f64 = 30.0;

/// Render the two weekly series as a side-by-side SVG bar chart document.
/// Pure presentation: consumes the aggregated series and a style, computes
/// nothing else.
pub fn render_svg(activity: &WeeklyActivity, style: &ChartStyle) -> String {
    let mut out = String::new();
    let width = f64::from(style.width);
    let height = f64::from(style.height);

    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}">"#,
        w = style.width,
        h = style.height,
        font = style.font_family
    );
    let _ = writeln!(
        out,
        r#"  <rect x="0" y="0" width="{w}" height="{h}" fill="{bg}"/>"#,
        w = style.width,
        h = style.height,
        bg = style.background
    );

    if activity.is_empty() {
        let _ = writeln!(
            out,
            r#"  <text x="{x:.1}" y="{y:.1}" text-anchor="middle" font-size="14" fill="{color}">No data in date range</text>"#,
            x = width / 2.0,
            y = height / 2.0,
            color = style.text_color
        );
        out.push_str("</svg>\n");
        return out;
    }

    let weeks = activity.weeks();
    let panel_width = (width - 3.0 * MARGIN) / 2.0;
    let panel_height = height - 2.0 * MARGIN;

    let left = Panel {
        x: MARGIN,
        y: MARGIN,
        width: panel_width,
        height: panel_height,
    };
    let right = Panel {
        x: 2.0 * MARGIN + panel_width,
        ..left
    };

    draw_panel(
        &mut out,
        left,
        &weeks,
        &activity.commits,
        "Commits / week",
        &style.commit_color,
        style,
    );
    draw_panel(
        &mut out,
        right,
        &weeks,
        &activity.prs,
        "PRs / week",
        &style.pr_color,
        style,
    );

    out.push_str("</svg>\n");
    out
}

#[derive(Clone, Copy)]
struct Panel {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

fn draw_panel(
    out: &mut String,
    panel: Panel,
    weeks: &[NaiveDate],
    series: &BTreeMap<NaiveDate, u64>,
    title: &str,
    bar_color: &str,
    style: &ChartStyle,
) {
    let plot_x = panel.x + AXIS_LEFT;
    let plot_y = panel.y + PANEL_TOP;
    let plot_width = panel.width - AXIS_LEFT - 8.0;
    let plot_height = panel.height - PANEL_TOP - AXIS_BOTTOM;
    let base_y = plot_y + plot_height;

    let max = series.values().copied().max().unwrap_or(0);
    // Integer y ticks: four-ish divisions, never fractional.
    let step = (max as f64 / 4.0).ceil().max(1.0) as u64;
    let scale_top = ((max + step - 1) / step).max(1) * step;

    let _ = writeln!(
        out,
        r#"  <text x="{x:.1}" y="{y:.1}" font-size="13" font-weight="bold" fill="{color}">{title}</text>"#,
        x = plot_x,
        y = panel.y + 16.0,
        color = style.text_color
    );

    // Horizontal gridlines with integer labels.
    let mut value = 0u64;
    while value <= scale_top {
        let y = base_y - (value as f64 / scale_top as f64) * plot_height;
        let _ = writeln!(
            out,
            r#"  <line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="{grid}" stroke-width="0.5"/>"#,
            x1 = plot_x,
            x2 = plot_x + plot_width,
            y = y,
            grid = style.grid_color
        );
        let _ = writeln!(
            out,
            r#"  <text x="{x:.1}" y="{y:.1}" text-anchor="end" font-size="10" fill="{color}">{value}</text>"#,
            x = plot_x - 6.0,
            y = y + 3.5,
            color = style.text_color
        );
        value += step;
    }

    let slot = plot_width / weeks.len() as f64;
    let bar_width = (slot * 0.7).max(1.0);
    let radius = (bar_width / 2.0).min(3.0);

    for (idx, week) in weeks.iter().enumerate() {
        let count = series.get(week).copied().unwrap_or(0);
        let bar_height = (count as f64 / scale_top as f64) * plot_height;
        let x = plot_x + idx as f64 * slot + (slot - bar_width) / 2.0;
        // Zero weeks still emit a bar; at height 0 it is simply invisible.
        let _ = writeln!(
            out,
            r#"  <rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" rx="{rx:.1}" fill="{fill}" stroke="{bg}" stroke-width="0.5"/>"#,
            x = x,
            y = base_y - bar_height,
            w = bar_width,
            h = bar_height,
            rx = radius,
            fill = bar_color,
            bg = style.background
        );
    }

    // Month ticks under the axis.
    for (idx, label) in month_ticks(weeks) {
        let x = plot_x + idx as f64 * slot + slot / 2.0;
        let _ = writeln!(
            out,
            r#"  <line x1="{x:.1}" y1="{y1:.1}" x2="{x:.1}" y2="{y2:.1}" stroke="{grid}" stroke-width="1"/>"#,
            x = x,
            y1 = base_y,
            y2 = base_y + 4.0,
            grid = style.grid_color
        );
        let _ = writeln!(
            out,
            r#"  <text x="{x:.1}" y="{y:.1}" text-anchor="middle" font-size="10" fill="{color}">{label}</text>"#,
            x = x,
            y = base_y + 18.0,
            color = style.text_color
        );
    }

    let _ = writeln!(
        out,
        r#"  <line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="{color}" stroke-width="1"/>"#,
        x1 = plot_x,
        x2 = plot_x + plot_width,
        y = base_y,
        color = style.text_color
    );
}
