//! Date helpers for chat administration

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::commands::Week;

const WEEKDAYS_SHORT: [&str; 7] = ["вс", "пн", "вт", "ср", "чт", "пт", "сб"];

/// `YYYY-MM-DD` key of a date
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date_key(date_key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_key, "%Y-%m-%d").ok()
}

/// Next occurrence of `weekday` strictly after `today` (today itself maps a week ahead)
pub fn next_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let current = today.weekday().num_days_from_sunday() as i64;
    let target = weekday.num_days_from_sunday() as i64;
    let mut days_until = target - current;
    if days_until <= 0 {
        days_until += 7;
    }
    today + Duration::days(days_until)
}

/// The seven days starting today (or a week from today), minus `off_day`
pub fn week_days(today: NaiveDate, week: Week, off_day: Weekday) -> Vec<NaiveDate> {
    let start = match week {
        Week::This => today,
        Week::Next => today + Duration::days(7),
    };
    (0..7)
        .map(|offset| start + Duration::days(offset))
        .filter(|day| day.weekday() != off_day)
        .collect()
}

/// Short label like `15.03 (вс)`
pub fn format_day(date: NaiveDate) -> String {
    format!(
        "{}.{:02} ({})",
        date.day(),
        date.month(),
        WEEKDAYS_SHORT[date.weekday().num_days_from_sunday() as usize]
    )
}

/// Same as [`format_day`] for a date-key, falling back to the raw key
pub fn format_date_key(date_key: &str) -> String {
    parse_date_key(date_key).map_or_else(|| date_key.to_string(), format_day)
}
