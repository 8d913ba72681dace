//! Week conventions and locale lookup.
//!
//! A convention is the first weekday plus the first-week rule: week 1 of a
//! year is the first week holding at least `min_days_in_first_week` days of
//! that year (4 gives ISO-8601 numbering, 1 gives "the week with Jan 1").

use chrono::Weekday;

/// First weekday and first-week rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekConvention {
    pub first_day: Weekday,
    pub min_days_in_first_week: u32,
}

impl WeekConvention {
    /// US-style weeks: Sunday first, week 1 contains Jan 1.
    pub const SUNDAY_FIRST: Self = Self {
        first_day: Weekday::Sun,
        min_days_in_first_week: 1,
    };

    /// ISO-style weeks: Monday first, week 1 contains Jan 4.
    pub const MONDAY_FIRST: Self = Self {
        first_day: Weekday::Mon,
        min_days_in_first_week: 4,
    };

    const SATURDAY_FIRST: Self = Self {
        first_day: Weekday::Sat,
        min_days_in_first_week: 1,
    };
}

impl Default for WeekConvention {
    fn default() -> Self {
        Self::SUNDAY_FIRST
    }
}

const LOCALE_CONVENTIONS: &[(&str, WeekConvention)] = &[
    ("en", WeekConvention::SUNDAY_FIRST),
    ("en-us", WeekConvention::SUNDAY_FIRST),
    ("en-ca", WeekConvention::SUNDAY_FIRST),
    ("en-gb", WeekConvention::MONDAY_FIRST),
    ("en-ie", WeekConvention::MONDAY_FIRST),
    ("ja", WeekConvention::SUNDAY_FIRST),
    ("ko", WeekConvention::SUNDAY_FIRST),
    ("he", WeekConvention::SUNDAY_FIRST),
    ("pt-br", WeekConvention::SUNDAY_FIRST),
    ("ar", WeekConvention::SATURDAY_FIRST),
    ("zh", WeekConvention::MONDAY_FIRST),
    ("zh-cn", WeekConvention::MONDAY_FIRST),
    ("de", WeekConvention::MONDAY_FIRST),
    ("fr", WeekConvention::MONDAY_FIRST),
    ("es", WeekConvention::MONDAY_FIRST),
    ("it", WeekConvention::MONDAY_FIRST),
    ("nl", WeekConvention::MONDAY_FIRST),
    ("pt", WeekConvention::MONDAY_FIRST),
    ("ru", WeekConvention::MONDAY_FIRST),
    ("pl", WeekConvention::MONDAY_FIRST),
    ("sv", WeekConvention::MONDAY_FIRST),
    ("da", WeekConvention::MONDAY_FIRST),
    ("nb", WeekConvention::MONDAY_FIRST),
    ("fi", WeekConvention::MONDAY_FIRST),
];

/// Resolves a locale tag (`de`, `en_GB.UTF-8`, `zh-CN`) to its convention.
///
/// Tries the full tag, then the bare language. Unknown or empty tags fall
/// back to Sunday-first weeks.
pub fn convention_for_locale(tag: &str) -> WeekConvention {
    let normalized = normalize_tag(tag);
    if normalized.is_empty() {
        return WeekConvention::default();
    }
    let language = normalized
        .split('-')
        .next()
        .unwrap_or(normalized.as_str())
        .to_string();
    lookup(normalized.as_str())
        .or_else(|| lookup(language.as_str()))
        .unwrap_or_default()
}

/// Reads the process locale from `LC_ALL`, `LC_TIME` then `LANG`.
///
/// `C` and `POSIX` count as unset.
pub fn system_locale() -> Option<String> {
    ["LC_ALL", "LC_TIME", "LANG"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
}

fn lookup(tag: &str) -> Option<WeekConvention> {
    LOCALE_CONVENTIONS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, convention)| *convention)
}

fn normalize_tag(tag: &str) -> String {
    let base = tag.split(['.', '@']).next().unwrap_or("");
    base.trim().replace('_', "-").to_ascii_lowercase()
}
