//! Start-of-period resolution.
//!
//! # Responsibility
//! - Map any instant to the first instant (00:00:00) of its day, week,
//!   month, quarter or year.
//! - Number weeks under a configurable `WeekConvention`.
//!
//! # Invariants
//! - Every resolver is idempotent: `f(f(d)) == f(d)`.
//! - Inputs are taken by value (`NaiveDateTime` is `Copy`); nothing shared is
//!   mutated.
//! - Day counting (leap years, month lengths) is left to `chrono`.

use crate::model::period::{PeriodKind, ViewMode};
use crate::time::locale::WeekConvention;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Midnight at the start of `date`'s day.
pub fn start_of_day(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// Midnight on the most recent `week.first_day` on or before `date`.
pub fn start_of_week(date: NaiveDateTime, week: WeekConvention) -> NaiveDateTime {
    week_start_date(date.date(), week).and_time(NaiveTime::MIN)
}

/// Midnight on day 1 of `date`'s month.
pub fn start_of_month(date: NaiveDateTime) -> NaiveDateTime {
    first_of_month(date.year(), date.month0()).unwrap_or_else(|| start_of_day(date))
}

/// Midnight on day 1 of the first month of `date`'s quarter.
///
/// Quarter index is `month0 / 3`, so results fall on January, April, July or
/// October.
pub fn start_of_quarter(date: NaiveDateTime) -> NaiveDateTime {
    let quarter = date.month0() / 3;
    first_of_month(date.year(), quarter * 3).unwrap_or_else(|| start_of_day(date))
}

/// Midnight on January 1 of `date`'s year.
pub fn start_of_year(date: NaiveDateTime) -> NaiveDateTime {
    first_of_month(date.year(), 0).unwrap_or_else(|| start_of_day(date))
}

/// Dispatches to the resolver for `period`.
pub fn start_of(period: PeriodKind, date: NaiveDateTime, week: WeekConvention) -> NaiveDateTime {
    match period {
        PeriodKind::Daily => start_of_day(date),
        PeriodKind::Weekly => start_of_week(date, week),
        PeriodKind::Monthly => start_of_month(date),
        PeriodKind::Quarterly => start_of_quarter(date),
        PeriodKind::Yearly => start_of_year(date),
    }
}

/// Start of the period a calendar view mode displays.
pub fn start_of_view(mode: ViewMode, date: NaiveDateTime, week: WeekConvention) -> NaiveDateTime {
    start_of(mode.period(), date, week)
}

/// 1-based quarter number of `date`.
pub fn quarter_of(date: NaiveDateTime) -> u32 {
    date.month0() / 3 + 1
}

/// Week-numbering year and week number of `date` under `week`.
///
/// The week belongs to the year that holds at least
/// `min_days_in_first_week` of its days, so late-December dates can land in
/// week 1 of the next year and early-January dates in the last week of the
/// previous one.
pub fn week_of_year(date: NaiveDate, week: WeekConvention) -> (i32, u32) {
    let start = week_start_date(date, week);
    let min_days = week.min_days_in_first_week.clamp(1, 7);
    let decider = start
        .checked_add_days(Days::new(u64::from(7 - min_days)))
        .unwrap_or(start);
    let week_year = decider.year();
    let first_week = NaiveDate::from_ymd_opt(week_year, 1, min_days)
        .map(|anchor| week_start_date(anchor, week))
        .unwrap_or(start);
    let days = (start - first_week).num_days();
    let number = u32::try_from(days / 7 + 1).unwrap_or(1);
    (week_year, number)
}

fn week_start_date(date: NaiveDate, week: WeekConvention) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_sunday()
        - week.first_day.num_days_from_sunday())
        % 7;
    date.checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(date)
}

fn first_of_month(year: i32, month0: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).map(|day| day.and_time(NaiveTime::MIN))
}
