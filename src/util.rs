use chrono::{Datelike, Duration, NaiveDate};

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Month tick label, e.g. `Jun '25`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b '%y").to_string()
}
