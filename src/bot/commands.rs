//! Administrator text command parsing
//!
//! Recognized shapes (matched on lower-cased, trimmed text):
//! - `покажи расписание`
//! - `расписание на эту|следующую неделю с 10 до 22`
//! - `в пятницу бронь на 15:00 на 3 часа`

use chrono::Weekday;
use once_cell::sync::Lazy;
use regex::Regex;

static BUILD_WEEK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"расписание\s+на\s+(эту|следующую)\s+неделю(?:\s*,?\s*все\s+дни)?\s+с\s+(\d+)\s+до\s+(\d+)")
        .expect("valid schedule command pattern")
});

static BOOK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:в|на)\s+([а-яё]+)\s+бронь\s+на\s+(\d+):(\d+)\s+на\s+(\d+)\s+час")
        .expect("valid booking command pattern")
});

const WEEKDAYS_FULL: [(&str, Weekday); 7] = [
    ("воскресенье", Weekday::Sun),
    ("понедельник", Weekday::Mon),
    ("вторник", Weekday::Tue),
    ("среда", Weekday::Wed),
    ("четверг", Weekday::Thu),
    ("пятница", Weekday::Fri),
    ("суббота", Weekday::Sat),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Week {
    This,
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    ShowSchedule,
    /// Hourly slots `[start_hour, end_hour)` on every working day of a week
    BuildWeek {
        week: Week,
        start_hour: u32,
        end_hour: u32,
    },
    /// Book `hours` hourly slots from `hour` on the next given weekday
    Book {
        weekday: Weekday,
        hour: u32,
        hours: u32,
    },
    /// A booking command naming a day that is not a weekday
    UnknownWeekday(String),
}

/// Parse administrator text; `None` when nothing is recognized
pub fn parse_command(text: &str) -> Option<AdminCommand> {
    let text = text.trim().to_lowercase();

    if text.contains("покажи") && text.contains("расписание") {
        return Some(AdminCommand::ShowSchedule);
    }
    if let Some(command) = parse_build_week(&text) {
        return Some(command);
    }
    parse_booking(&text)
}

fn parse_build_week(text: &str) -> Option<AdminCommand> {
    let caps = BUILD_WEEK.captures(text)?;
    let week = if &caps[1] == "эту" { Week::This } else { Week::Next };
    let start_hour: u32 = caps[2].parse().ok()?;
    let end_hour: u32 = caps[3].parse().ok()?;

    if start_hour >= 24 || end_hour <= start_hour || end_hour > 24 {
        return None;
    }
    Some(AdminCommand::BuildWeek {
        week,
        start_hour,
        end_hour,
    })
}

fn parse_booking(text: &str) -> Option<AdminCommand> {
    let caps = BOOK.captures(text)?;
    let hour: u32 = caps[2].parse().ok()?;
    let minutes: u32 = caps[3].parse().ok()?;
    let hours: u32 = caps[4].parse().ok()?;

    // The range must end by midnight of the same day
    if hour >= 24 || minutes != 0 || hours < 1 || hours > 24 - hour {
        return None;
    }
    Some(match parse_weekday(&caps[1]) {
        Some(weekday) => AdminCommand::Book {
            weekday,
            hour,
            hours,
        },
        None => AdminCommand::UnknownWeekday(caps[1].to_string()),
    })
}

/// Map a Russian weekday name in any grammatical case to a weekday.
///
/// Unknown forms fall back to the first full name starting with `name`.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let name = name.to_lowercase();
    let weekday = match name.as_str() {
        "понедельник" | "понедельника" | "понедельнику" | "понедельником" => Weekday::Mon,
        "вторник" | "вторника" | "вторнику" | "вторником" => Weekday::Tue,
        "среда" | "среды" | "среде" | "средой" | "среду" => Weekday::Wed,
        "четверг" | "четверга" | "четвергу" | "четвергом" => Weekday::Thu,
        "пятница" | "пятницы" | "пятнице" | "пятницей" | "пятницу" => Weekday::Fri,
        "суббота" | "субботы" | "субботе" | "субботой" | "субботу" => Weekday::Sat,
        "воскресенье" | "воскресенья" | "воскресенью" | "воскресеньем" => Weekday::Sun,
        _ => {
            return WEEKDAYS_FULL
                .iter()
                .find(|(full, _)| full.starts_with(name.as_str()))
                .map(|(_, weekday)| *weekday)
        }
    };
    Some(weekday)
}
