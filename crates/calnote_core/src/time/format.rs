//! Moment-style date pattern rendering.
//!
//! # Responsibility
//! - Render note-name and title patterns such as `YYYY-MM-DD`,
//!   `YYYY-[W]ww`, `YYYY-[Q]Q` or `YYYY年M月`.
//!
//! # Invariants
//! - Rendering is pure: same pattern, date and convention give the same text.
//! - `[...]` escapes literal text; any character that is not a token is
//!   copied through unchanged. Patterns are never rejected.
//! - Names (months, weekdays, ordinals) are English.

use crate::time::boundary::{quarter_of, week_of_year};
use crate::time::locale::WeekConvention;
use chrono::{Datelike, NaiveDateTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

// Longest alternatives first: the regex engine takes the leftmost match in
// alternation order.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\[[^\]]*\]|YYYY|YY|Qo|Q|MMMM|MMM|Mo|MM|M|DDDD|DDDo|DDD|Do|DD|D|dddd|ddd|do|dd|d|E|e|wo|ww|w|Wo|WW|W|gggg|gg|GGGG|GG|HH|H|hh|h|mm|m|ss|s|A|a",
    )
    .expect("valid date token regex")
});

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Renders `date` with a moment-style `pattern`.
///
/// Locale-dependent tokens (`w`, `ww`, `e`, `gggg`) follow `week`; ISO
/// tokens (`W`, `WW`, `E`, `GGGG`) ignore it.
pub fn format_date(date: NaiveDateTime, pattern: &str, week: WeekConvention) -> String {
    let mut output = String::with_capacity(pattern.len() + 8);
    let mut last = 0;
    for token in TOKEN_RE.find_iter(pattern) {
        output.push_str(&pattern[last..token.start()]);
        render_token(&mut output, token.as_str(), date, week);
        last = token.end();
    }
    output.push_str(&pattern[last..]);
    output
}

fn render_token(out: &mut String, token: &str, date: NaiveDateTime, week: WeekConvention) {
    let day = date.date();
    let weekday_sun0 = day.weekday().num_days_from_sunday();
    let text = match token {
        "YYYY" => pad_year(date.year()),
        "YY" => format!("{:02}", date.year().rem_euclid(100)),
        "Q" => quarter_of(date).to_string(),
        "Qo" => ordinal(quarter_of(date)),
        "MMMM" => MONTH_NAMES[date.month0() as usize].to_string(),
        "MMM" => MONTH_NAMES[date.month0() as usize][..3].to_string(),
        "MM" => format!("{:02}", date.month()),
        "Mo" => ordinal(date.month()),
        "M" => date.month().to_string(),
        "DDDD" => format!("{:03}", date.ordinal()),
        "DDDo" => ordinal(date.ordinal()),
        "DDD" => date.ordinal().to_string(),
        "DD" => format!("{:02}", date.day()),
        "Do" => ordinal(date.day()),
        "D" => date.day().to_string(),
        "dddd" => WEEKDAY_NAMES[weekday_sun0 as usize].to_string(),
        "ddd" => WEEKDAY_NAMES[weekday_sun0 as usize][..3].to_string(),
        "dd" => WEEKDAY_NAMES[weekday_sun0 as usize][..2].to_string(),
        "do" => ordinal(weekday_sun0),
        "d" => weekday_sun0.to_string(),
        "E" => day.weekday().number_from_monday().to_string(),
        "e" => ((7 + weekday_sun0 - week.first_day.num_days_from_sunday()) % 7).to_string(),
        "ww" => format!("{:02}", week_of_year(day, week).1),
        "wo" => ordinal(week_of_year(day, week).1),
        "w" => week_of_year(day, week).1.to_string(),
        "WW" => format!("{:02}", day.iso_week().week()),
        "Wo" => ordinal(day.iso_week().week()),
        "W" => day.iso_week().week().to_string(),
        "gggg" => pad_year(week_of_year(day, week).0),
        "gg" => format!("{:02}", week_of_year(day, week).0.rem_euclid(100)),
        "GGGG" => pad_year(day.iso_week().year()),
        "GG" => format!("{:02}", day.iso_week().year().rem_euclid(100)),
        "HH" => format!("{:02}", date.hour()),
        "H" => date.hour().to_string(),
        "hh" => format!("{:02}", hour12(date.hour())),
        "h" => hour12(date.hour()).to_string(),
        "mm" => format!("{:02}", date.minute()),
        "m" => date.minute().to_string(),
        "ss" => format!("{:02}", date.second()),
        "s" => date.second().to_string(),
        "A" => meridiem(date.hour()).to_string(),
        "a" => meridiem(date.hour()).to_ascii_lowercase(),
        literal => literal
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(literal)
            .to_string(),
    };
    out.push_str(&text);
}

fn pad_year(year: i32) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{year:04}")
    }
}

fn hour12(hour: u32) -> u32 {
    match hour % 12 {
        0 => 12,
        other => other,
    }
}

fn meridiem(hour: u32) -> &'static str {
    if hour < 12 {
        "AM"
    } else {
        "PM"
    }
}

fn ordinal(value: u32) -> String {
    let suffix = match (value % 10, value % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{value}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::format_date;
    use crate::time::locale::WeekConvention;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 5))
            .expect("valid test date")
    }

    #[test]
    fn default_note_patterns_render() {
        let date = at(2024, 3, 15, 9, 0);
        let week = WeekConvention::MONDAY_FIRST;
        assert_eq!(format_date(date, "YYYY-MM-DD", week), "2024-03-15");
        assert_eq!(format_date(date, "YYYY-[W]ww", week), "2024-W11");
        assert_eq!(format_date(date, "YYYY-MM", week), "2024-03");
        assert_eq!(format_date(date, "YYYY-[Q]Q", week), "2024-Q1");
        assert_eq!(format_date(date, "YYYY", week), "2024");
    }

    #[test]
    fn bracketed_text_and_unknown_characters_pass_through() {
        let date = at(2024, 3, 15, 9, 0);
        let week = WeekConvention::SUNDAY_FIRST;
        assert_eq!(format_date(date, "[YYYY] YYYY", week), "YYYY 2024");
        assert_eq!(format_date(date, "YYYY年M月", week), "2024年3月");
        assert_eq!(format_date(date, "M月D日", week), "3月15日");
    }

    #[test]
    fn names_ordinals_and_clock_tokens() {
        let date = at(2024, 3, 1, 13, 7);
        let week = WeekConvention::SUNDAY_FIRST;
        assert_eq!(
            format_date(date, "dddd, MMMM Do YYYY", week),
            "Friday, March 1st 2024"
        );
        assert_eq!(format_date(date, "ddd MMM D", week), "Fri Mar 1");
        assert_eq!(format_date(date, "hh:mm A", week), "01:07 PM");
        assert_eq!(format_date(date, "HH:mm:ss", week), "13:07:05");
    }

    #[test]
    fn week_year_tokens_follow_convention() {
        let date = at(2024, 12, 30, 0, 0);
        assert_eq!(
            format_date(date, "gggg-[W]ww", WeekConvention::MONDAY_FIRST),
            "2025-W01"
        );
        assert_eq!(format_date(date, "GGGG-[W]WW", WeekConvention::SUNDAY_FIRST), "2025-W01");
        assert_eq!(format_date(date, "YYYY", WeekConvention::MONDAY_FIRST), "2024");
    }
}
