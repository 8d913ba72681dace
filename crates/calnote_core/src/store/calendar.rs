//! Calendar navigation state.
//!
//! # Responsibility
//! - Hold view mode, displayed date and today for one open calendar view.
//! - Step the displayed date by the active view mode's period.
//! - Derive view titles and forward note requests to injected actions.
//!
//! # Invariants
//! - Steps clone-then-shift the displayed date; a date that sits on a period
//!   start stays on one after any number of steps in that mode.
//! - `set_view_mode` does not re-derive the displayed date; callers that
//!   want a different granularity normalize it themselves.
//! - `navigate_today` stores the raw current instant; renderers use
//!   `period_start()` when they need the normalized boundary.
//! - State lives only as long as the store (no persistence).

use crate::model::period::ViewMode;
use crate::model::settings::Settings;
use crate::service::open_service::OpenOutcome;
use crate::time::boundary::{quarter_of, start_of_view, start_of_week};
use crate::time::clock::Clock;
use crate::time::format::format_date;
use chrono::{Days, Months, NaiveDateTime};
use log::debug;

const YEAR_TITLE_PATTERN: &str = "YYYY年";
const MONTH_TITLE_PATTERN: &str = "YYYY年M月";
const WEEK_DAY_PATTERN: &str = "M月D日";

/// Note-opening capability handed to the store at construction.
///
/// Implementors perform the actual open-or-create; the store only decides
/// whether a period is enabled.
#[allow(async_fn_in_trait)]
pub trait NoteActions {
    async fn open_daily_note(&self, date: NaiveDateTime, new_split: bool) -> Option<OpenOutcome>;
    async fn open_weekly_note(&self, date: NaiveDateTime, new_split: bool) -> Option<OpenOutcome>;
    async fn open_monthly_note(&self, date: NaiveDateTime, new_split: bool)
        -> Option<OpenOutcome>;
    async fn open_quarterly_note(
        &self,
        date: NaiveDateTime,
        new_split: bool,
    ) -> Option<OpenOutcome>;
    async fn open_yearly_note(&self, date: NaiveDateTime, new_split: bool) -> Option<OpenOutcome>;
}

impl<A: NoteActions + ?Sized> NoteActions for &A {
    async fn open_daily_note(&self, date: NaiveDateTime, new_split: bool) -> Option<OpenOutcome> {
        (**self).open_daily_note(date, new_split).await
    }

    async fn open_weekly_note(&self, date: NaiveDateTime, new_split: bool) -> Option<OpenOutcome> {
        (**self).open_weekly_note(date, new_split).await
    }

    async fn open_monthly_note(
        &self,
        date: NaiveDateTime,
        new_split: bool,
    ) -> Option<OpenOutcome> {
        (**self).open_monthly_note(date, new_split).await
    }

    async fn open_quarterly_note(
        &self,
        date: NaiveDateTime,
        new_split: bool,
    ) -> Option<OpenOutcome> {
        (**self).open_quarterly_note(date, new_split).await
    }

    async fn open_yearly_note(&self, date: NaiveDateTime, new_split: bool) -> Option<OpenOutcome> {
        (**self).open_yearly_note(date, new_split).await
    }
}

/// Navigation state machine for one calendar view.
pub struct CalendarStore<A: NoteActions, C: Clock> {
    actions: A,
    clock: C,
    settings: Settings,
    view_mode: ViewMode,
    displayed_date: Option<NaiveDateTime>,
    today: Option<NaiveDateTime>,
}

impl<A: NoteActions, C: Clock> CalendarStore<A, C> {
    /// Creates an inactive store: month view, no displayed date, no today.
    pub fn new(actions: A, clock: C, settings: Settings) -> Self {
        Self {
            actions,
            clock,
            settings,
            view_mode: ViewMode::Month,
            displayed_date: None,
            today: None,
        }
    }

    /// Prepares the store for a newly shown view.
    ///
    /// Sets `today` and the displayed date to now and the view mode to the
    /// configured default.
    pub fn activate(&mut self) {
        let now = self.clock.now();
        self.today = Some(now);
        self.displayed_date = Some(now);
        self.view_mode = self.settings.default_view;
        debug!(
            "event=calendar_activate module=store status=ok view={}",
            self.view_mode.as_str()
        );
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replaces the settings snapshot after the settings surface saved.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn displayed_date(&self) -> Option<NaiveDateTime> {
        self.displayed_date
    }

    pub fn set_displayed_date(&mut self, date: NaiveDateTime) {
        self.displayed_date = Some(date);
    }

    pub fn today(&self) -> Option<NaiveDateTime> {
        self.today
    }

    pub fn set_today(&mut self, date: NaiveDateTime) {
        self.today = Some(date);
    }

    /// Moves one period back; no-op until a date is displayed.
    pub fn navigate_previous(&mut self) {
        self.step(false);
    }

    /// Moves one period forward; no-op until a date is displayed.
    pub fn navigate_next(&mut self) {
        self.step(true);
    }

    /// Displays the current instant as-is.
    pub fn navigate_today(&mut self) {
        self.displayed_date = Some(self.clock.now());
    }

    /// Start of the displayed period under the current view mode.
    pub fn period_start(&self) -> Option<NaiveDateTime> {
        self.displayed_date
            .map(|date| start_of_view(self.view_mode, date, self.settings.week_convention()))
    }

    /// Displayed year (`YYYY`), or empty before the first date is set.
    pub fn year_title(&self) -> String {
        self.displayed_date
            .map(|date| format_date(date, "YYYY", self.settings.week_convention()))
            .unwrap_or_default()
    }

    /// Human-readable label of the displayed period.
    pub fn view_title(&self) -> String {
        let Some(date) = self.displayed_date else {
            return String::new();
        };
        let week = self.settings.week_convention();
        match self.view_mode {
            ViewMode::Year => format_date(date, YEAR_TITLE_PATTERN, week),
            ViewMode::Quarter => format!(
                "{} Q{}",
                format_date(date, YEAR_TITLE_PATTERN, week),
                quarter_of(date)
            ),
            ViewMode::Week => {
                let start = start_of_week(date, week);
                let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
                format!(
                    "{} - {}",
                    format_date(start, WEEK_DAY_PATTERN, week),
                    format_date(end, WEEK_DAY_PATTERN, week)
                )
            }
            ViewMode::Month => format_date(date, MONTH_TITLE_PATTERN, week),
        }
    }

    pub async fn open_daily_note(
        &self,
        date: NaiveDateTime,
        new_split: bool,
    ) -> Option<OpenOutcome> {
        if !self.settings.daily_note.enabled {
            return None;
        }
        self.actions.open_daily_note(date, new_split).await
    }

    pub async fn open_weekly_note(
        &self,
        date: NaiveDateTime,
        new_split: bool,
    ) -> Option<OpenOutcome> {
        if !self.settings.weekly_note.enabled {
            return None;
        }
        self.actions.open_weekly_note(date, new_split).await
    }

    pub async fn open_monthly_note(
        &self,
        date: NaiveDateTime,
        new_split: bool,
    ) -> Option<OpenOutcome> {
        if !self.settings.monthly_note.enabled {
            return None;
        }
        self.actions.open_monthly_note(date, new_split).await
    }

    pub async fn open_quarterly_note(
        &self,
        date: NaiveDateTime,
        new_split: bool,
    ) -> Option<OpenOutcome> {
        if !self.settings.quarterly_note.enabled {
            return None;
        }
        self.actions.open_quarterly_note(date, new_split).await
    }

    pub async fn open_yearly_note(
        &self,
        date: NaiveDateTime,
        new_split: bool,
    ) -> Option<OpenOutcome> {
        if !self.settings.yearly_note.enabled {
            return None;
        }
        self.actions.open_yearly_note(date, new_split).await
    }

    fn step(&mut self, forward: bool) {
        let Some(date) = self.displayed_date else {
            return;
        };
        let stepped = match (self.view_mode, forward) {
            (ViewMode::Year, true) => date.checked_add_months(Months::new(12)),
            (ViewMode::Year, false) => date.checked_sub_months(Months::new(12)),
            (ViewMode::Quarter, true) => date.checked_add_months(Months::new(3)),
            (ViewMode::Quarter, false) => date.checked_sub_months(Months::new(3)),
            (ViewMode::Week, true) => date.checked_add_days(Days::new(7)),
            (ViewMode::Week, false) => date.checked_sub_days(Days::new(7)),
            (ViewMode::Month, true) => date.checked_add_months(Months::new(1)),
            (ViewMode::Month, false) => date.checked_sub_months(Months::new(1)),
        };
        match stepped {
            Some(next) => self.displayed_date = Some(next),
            None => debug!(
                "event=calendar_step module=store status=skip reason=out_of_range view={}",
                self.view_mode.as_str()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CalendarStore, NoteActions};
    use crate::model::period::ViewMode;
    use crate::model::settings::Settings;
    use crate::service::open_service::OpenOutcome;
    use crate::time::clock::FixedClock;
    use chrono::{NaiveDate, NaiveDateTime};

    struct NoActions;

    impl NoteActions for NoActions {
        async fn open_daily_note(&self, _: NaiveDateTime, _: bool) -> Option<OpenOutcome> {
            None
        }
        async fn open_weekly_note(&self, _: NaiveDateTime, _: bool) -> Option<OpenOutcome> {
            None
        }
        async fn open_monthly_note(&self, _: NaiveDateTime, _: bool) -> Option<OpenOutcome> {
            None
        }
        async fn open_quarterly_note(&self, _: NaiveDateTime, _: bool) -> Option<OpenOutcome> {
            None
        }
        async fn open_yearly_note(&self, _: NaiveDateTime, _: bool) -> Option<OpenOutcome> {
            None
        }
    }

    fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid test date")
    }

    #[test]
    fn month_steps_clamp_to_month_end() {
        let mut store = CalendarStore::new(
            NoActions,
            FixedClock(midnight(2024, 1, 31)),
            Settings::default(),
        );
        store.set_displayed_date(midnight(2024, 1, 31));
        store.navigate_next();
        assert_eq!(store.displayed_date(), Some(midnight(2024, 2, 29)));
    }

    #[test]
    fn titles_are_empty_before_first_date() {
        let store = CalendarStore::new(
            NoActions,
            FixedClock(midnight(2024, 1, 1)),
            Settings::default(),
        );
        assert_eq!(store.view_title(), "");
        assert_eq!(store.year_title(), "");
        assert_eq!(store.period_start(), None);
    }

    #[test]
    fn year_and_quarter_titles() {
        let mut store = CalendarStore::new(
            NoActions,
            FixedClock(midnight(2024, 5, 1)),
            Settings::default(),
        );
        store.set_displayed_date(midnight(2024, 5, 1));
        store.set_view_mode(ViewMode::Year);
        assert_eq!(store.view_title(), "2024年");
        store.set_view_mode(ViewMode::Quarter);
        assert_eq!(store.view_title(), "2024年 Q2");
        store.set_view_mode(ViewMode::Month);
        assert_eq!(store.view_title(), "2024年5月");
    }
}
