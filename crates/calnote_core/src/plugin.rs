//! Command surface exposed to the host.
//!
//! # Responsibility
//! - Map the five `open-*-note` commands onto the open-or-create flow and
//!   `show-calendar-view` onto a freshly activated navigation store.
//! - Normalize target dates to their period start before path resolution.
//! - Serve as the note-actions capability for calendar views it creates.
//!
//! # Invariants
//! - A command for a disabled period is a no-op (`None`).
//! - Settings are read per invocation from the latest snapshot; the plugin
//!   never writes them, it only receives replacements via `set_settings`.

use crate::host::{UserPrompt, Workspace};
use crate::model::period::PeriodKind;
use crate::model::settings::Settings;
use crate::service::open_service::{NoteOpener, OpenOutcome, OpenPolicy};
use crate::store::calendar::{CalendarStore, NoteActions};
use crate::time::boundary::start_of;
use crate::time::clock::Clock;
use crate::vault::Vault;
use chrono::NaiveDateTime;
use log::debug;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Command id for opening the daily note.
pub const COMMAND_OPEN_DAILY_NOTE: &str = "open-daily-note";
/// Command id for opening the weekly note.
pub const COMMAND_OPEN_WEEKLY_NOTE: &str = "open-weekly-note";
/// Command id for opening the monthly note.
pub const COMMAND_OPEN_MONTHLY_NOTE: &str = "open-monthly-note";
/// Command id for opening the quarterly note.
pub const COMMAND_OPEN_QUARTERLY_NOTE: &str = "open-quarterly-note";
/// Command id for opening the yearly note.
pub const COMMAND_OPEN_YEARLY_NOTE: &str = "open-yearly-note";
/// Command id for showing the calendar view.
pub const COMMAND_SHOW_CALENDAR_VIEW: &str = "show-calendar-view";

const SUPPORTED_COMMAND_IDS: &[&str] = &[
    COMMAND_OPEN_DAILY_NOTE,
    COMMAND_OPEN_WEEKLY_NOTE,
    COMMAND_OPEN_MONTHLY_NOTE,
    COMMAND_OPEN_QUARTERLY_NOTE,
    COMMAND_OPEN_YEARLY_NOTE,
    COMMAND_SHOW_CALENDAR_VIEW,
];

/// Host-invocable note command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    OpenDailyNote,
    OpenWeeklyNote,
    OpenMonthlyNote,
    OpenQuarterlyNote,
    OpenYearlyNote,
    ShowCalendarView,
}

impl CommandId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenDailyNote => COMMAND_OPEN_DAILY_NOTE,
            Self::OpenWeeklyNote => COMMAND_OPEN_WEEKLY_NOTE,
            Self::OpenMonthlyNote => COMMAND_OPEN_MONTHLY_NOTE,
            Self::OpenQuarterlyNote => COMMAND_OPEN_QUARTERLY_NOTE,
            Self::OpenYearlyNote => COMMAND_OPEN_YEARLY_NOTE,
            Self::ShowCalendarView => COMMAND_SHOW_CALENDAR_VIEW,
        }
    }

    /// User-facing command name.
    pub fn title(self) -> &'static str {
        match self {
            Self::OpenDailyNote => "Open daily note",
            Self::OpenWeeklyNote => "Open weekly note",
            Self::OpenMonthlyNote => "Open monthly note",
            Self::OpenQuarterlyNote => "Open quarterly note",
            Self::OpenYearlyNote => "Open yearly note",
            Self::ShowCalendarView => "Show calendar view",
        }
    }

    /// Period a note command opens; `None` for view commands.
    pub fn period(self) -> Option<PeriodKind> {
        match self {
            Self::OpenDailyNote => Some(PeriodKind::Daily),
            Self::OpenWeeklyNote => Some(PeriodKind::Weekly),
            Self::OpenMonthlyNote => Some(PeriodKind::Monthly),
            Self::OpenQuarterlyNote => Some(PeriodKind::Quarterly),
            Self::OpenYearlyNote => Some(PeriodKind::Yearly),
            Self::ShowCalendarView => None,
        }
    }
}

/// Returns every supported command id string.
pub fn supported_command_ids() -> &'static [&'static str] {
    SUPPORTED_COMMAND_IDS
}

/// Parses one command id string.
pub fn parse_command_id(value: &str) -> Result<CommandId, CommandIdError> {
    match value.trim() {
        "" => Err(CommandIdError::Empty),
        COMMAND_OPEN_DAILY_NOTE => Ok(CommandId::OpenDailyNote),
        COMMAND_OPEN_WEEKLY_NOTE => Ok(CommandId::OpenWeeklyNote),
        COMMAND_OPEN_MONTHLY_NOTE => Ok(CommandId::OpenMonthlyNote),
        COMMAND_OPEN_QUARTERLY_NOTE => Ok(CommandId::OpenQuarterlyNote),
        COMMAND_OPEN_YEARLY_NOTE => Ok(CommandId::OpenYearlyNote),
        COMMAND_SHOW_CALENDAR_VIEW => Ok(CommandId::ShowCalendarView),
        other => Err(CommandIdError::Unsupported(other.to_string())),
    }
}

/// Command id parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandIdError {
    Empty,
    Unsupported(String),
}

impl Display for CommandIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "command id must not be empty"),
            Self::Unsupported(value) => write!(f, "command id is unsupported: {value}"),
        }
    }
}

impl Error for CommandIdError {}

/// Periodic-notes plugin: settings snapshot, orchestrator and clock.
pub struct CalendarPlugin<V: Vault, W: Workspace, P: UserPrompt, C: Clock> {
    settings: RefCell<Settings>,
    opener: NoteOpener<V, W, P>,
    clock: C,
}

impl<V: Vault, W: Workspace, P: UserPrompt, C: Clock> CalendarPlugin<V, W, P, C> {
    pub fn new(settings: Settings, vault: V, workspace: W, prompt: P, clock: C) -> Self {
        Self {
            settings: RefCell::new(settings),
            opener: NoteOpener::new(vault, workspace, prompt),
            clock,
        }
    }

    /// Copy of the current settings snapshot.
    pub fn settings(&self) -> Settings {
        self.settings.borrow().clone()
    }

    /// Replaces the settings snapshot after the settings surface saved.
    pub fn set_settings(&self, settings: Settings) {
        *self.settings.borrow_mut() = settings;
    }

    pub fn opener(&self) -> &NoteOpener<V, W, P> {
        &self.opener
    }

    /// Creates an activated calendar view wired back to this plugin.
    pub fn show_calendar_view(&self) -> CalendarStore<&Self, &C> {
        let mut store = CalendarStore::new(self, &self.clock, self.settings());
        store.activate();
        store
    }

    /// Runs one note command for "now" in the reusable pane.
    ///
    /// View commands open nothing and return `None`; hosts serve them with
    /// `show_calendar_view`.
    pub async fn run_command(&self, command: CommandId) -> Option<OpenOutcome> {
        let kind = command.period()?;
        self.open_periodic_note(kind, None, false).await
    }

    /// Opens (or creates) the note of `kind` containing `date`.
    ///
    /// `date` defaults to now. Non-daily dates are moved to their period
    /// start first. Returns `None` when the period is disabled.
    pub async fn open_periodic_note(
        &self,
        kind: PeriodKind,
        date: Option<NaiveDateTime>,
        new_split: bool,
    ) -> Option<OpenOutcome> {
        let settings = self.settings();
        let config = settings.note(kind);
        if !config.enabled {
            debug!("event=command_run module=plugin status=skip reason=disabled period={kind}");
            return None;
        }
        let policy = OpenPolicy::from_settings(&settings);
        let date = date.unwrap_or_else(|| self.clock.now());
        let target = match kind {
            PeriodKind::Daily => date,
            other => start_of(other, date, policy.week),
        };
        Some(
            self.opener
                .open_or_create(config, target, policy, new_split)
                .await,
        )
    }
}

impl<V: Vault, W: Workspace, P: UserPrompt, C: Clock> NoteActions for CalendarPlugin<V, W, P, C> {
    async fn open_daily_note(&self, date: NaiveDateTime, new_split: bool) -> Option<OpenOutcome> {
        self.open_periodic_note(PeriodKind::Daily, Some(date), new_split)
            .await
    }

    async fn open_weekly_note(&self, date: NaiveDateTime, new_split: bool) -> Option<OpenOutcome> {
        self.open_periodic_note(PeriodKind::Weekly, Some(date), new_split)
            .await
    }

    async fn open_monthly_note(
        &self,
        date: NaiveDateTime,
        new_split: bool,
    ) -> Option<OpenOutcome> {
        self.open_periodic_note(PeriodKind::Monthly, Some(date), new_split)
            .await
    }

    async fn open_quarterly_note(
        &self,
        date: NaiveDateTime,
        new_split: bool,
    ) -> Option<OpenOutcome> {
        self.open_periodic_note(PeriodKind::Quarterly, Some(date), new_split)
            .await
    }

    async fn open_yearly_note(&self, date: NaiveDateTime, new_split: bool) -> Option<OpenOutcome> {
        self.open_periodic_note(PeriodKind::Yearly, Some(date), new_split)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command_id, supported_command_ids, CommandId, CommandIdError};
    use crate::model::period::PeriodKind;

    #[test]
    fn parses_all_supported_command_ids() {
        for value in supported_command_ids() {
            let command = parse_command_id(value).expect("supported id parses");
            assert_eq!(command.as_str(), *value);
        }
        assert_eq!(
            parse_command_id("open-quarterly-note").expect("quarterly parse"),
            CommandId::OpenQuarterlyNote
        );
        assert_eq!(
            CommandId::OpenQuarterlyNote.period(),
            Some(PeriodKind::Quarterly)
        );
        assert_eq!(CommandId::ShowCalendarView.period(), None);
    }

    #[test]
    fn rejects_empty_and_unknown_command_ids() {
        assert_eq!(parse_command_id("  "), Err(CommandIdError::Empty));
        assert_eq!(
            parse_command_id("open-hourly-note"),
            Err(CommandIdError::Unsupported("open-hourly-note".to_string()))
        );
    }
}
