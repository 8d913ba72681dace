use calnote_core::{
    parse_command_id, CalendarPlugin, FileHandle, FixedClock, MemoryVault, NoteActions,
    OpenFileOptions, OpenOutcome, Settings, UserPrompt, ViewMode, WeekStart, Workspace,
    WorkspaceError,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::cell::RefCell;

#[derive(Default)]
struct RecordingWorkspace {
    opened: RefCell<Vec<(String, bool)>>,
}

impl Workspace for RecordingWorkspace {
    async fn open_file(
        &self,
        file: &FileHandle,
        options: OpenFileOptions,
    ) -> Result<(), WorkspaceError> {
        self.opened
            .borrow_mut()
            .push((file.path().to_string(), options.new_split));
        Ok(())
    }
}

struct AcceptAll;

impl UserPrompt for AcceptAll {
    async fn confirm(&self, _title: &str, _message: &str) -> bool {
        true
    }

    fn notice(&self, _message: &str) {}
}

fn friday_afternoon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 15)
        .and_then(|date| date.and_hms_opt(15, 40, 0))
        .expect("valid test instant")
}

fn all_enabled_monday() -> Settings {
    let mut settings = Settings {
        week_start: WeekStart::Monday,
        should_confirm_before_create: false,
        ..Settings::default()
    };
    settings.weekly_note.enabled = true;
    settings.monthly_note.enabled = true;
    settings.quarterly_note.enabled = true;
    settings.yearly_note.enabled = true;
    settings
}

#[tokio::test]
async fn commands_open_notes_for_now_at_period_start() {
    let vault = MemoryVault::new();
    let workspace = RecordingWorkspace::default();
    let plugin = CalendarPlugin::new(
        all_enabled_monday(),
        &vault,
        &workspace,
        AcceptAll,
        FixedClock(friday_afternoon()),
    );

    for id in [
        "open-daily-note",
        "open-weekly-note",
        "open-monthly-note",
        "open-quarterly-note",
        "open-yearly-note",
    ] {
        let command = parse_command_id(id).expect("known command");
        let outcome = plugin.run_command(command).await;
        assert!(
            matches!(outcome, Some(OpenOutcome::Opened { created: true, .. })),
            "{id} creates its note"
        );
    }

    assert_eq!(
        vault.file_paths(),
        vec![
            "2024-03-15.md",
            "months/2024-03.md",
            "quarters/2024-Q1.md",
            "weeks/2024-W11.md",
            "years/2024.md",
        ]
    );
    assert!(workspace.opened.borrow().iter().all(|(_, split)| !split));
}

#[tokio::test]
async fn disabled_period_is_a_no_op() {
    let vault = MemoryVault::new();
    let workspace = RecordingWorkspace::default();
    let plugin = CalendarPlugin::new(
        Settings::default(),
        &vault,
        &workspace,
        AcceptAll,
        FixedClock(friday_afternoon()),
    );

    let command = parse_command_id("open-weekly-note").expect("known command");
    assert!(plugin.run_command(command).await.is_none());
    assert!(vault.file_paths().is_empty());
    assert!(workspace.opened.borrow().is_empty());
}

#[tokio::test]
async fn settings_replacement_applies_to_next_command() {
    let vault = MemoryVault::new().with_folder("daily/2024/03");
    let workspace = RecordingWorkspace::default();
    let plugin = CalendarPlugin::new(
        Settings::default(),
        &vault,
        &workspace,
        AcceptAll,
        FixedClock(friday_afternoon()),
    );

    let mut settings = plugin.settings();
    settings.daily_note.folder = "daily".to_string();
    settings.daily_note.format = "YYYY/MM/DD".to_string();
    plugin.set_settings(settings);

    let command = parse_command_id("open-daily-note").expect("known command");
    let outcome = plugin.run_command(command).await;
    assert_eq!(
        outcome.as_ref().and_then(OpenOutcome::file).map(FileHandle::path),
        Some("daily/2024/03/15.md")
    );
}

#[tokio::test]
async fn calendar_view_routes_clicks_through_the_plugin() {
    let vault = MemoryVault::new();
    let workspace = RecordingWorkspace::default();
    let settings = Settings {
        default_view: ViewMode::Week,
        ..all_enabled_monday()
    };
    let plugin = CalendarPlugin::new(
        settings,
        &vault,
        &workspace,
        AcceptAll,
        FixedClock(friday_afternoon()),
    );

    let mut view = plugin.show_calendar_view();
    assert_eq!(view.view_mode(), ViewMode::Week);
    assert_eq!(view.view_title(), "3月11日 - 3月17日");

    view.navigate_next();
    let shown = view.displayed_date().expect("view is active");
    let outcome = view.open_weekly_note(shown, true).await;

    assert_eq!(
        outcome.as_ref().and_then(OpenOutcome::file).map(FileHandle::path),
        Some("weeks/2024-W12.md")
    );
    assert_eq!(
        *workspace.opened.borrow(),
        vec![("weeks/2024-W12.md".to_string(), true)]
    );
}

#[tokio::test]
async fn plugin_acts_as_note_actions_for_arbitrary_dates() {
    let vault = MemoryVault::new();
    let workspace = RecordingWorkspace::default();
    let plugin = CalendarPlugin::new(
        all_enabled_monday(),
        &vault,
        &workspace,
        AcceptAll,
        FixedClock(friday_afternoon()),
    );

    let mid_august = NaiveDate::from_ymd_opt(2024, 8, 15)
        .and_then(|date| date.and_hms_opt(23, 0, 0))
        .expect("valid test instant");
    plugin.open_weekly_note(mid_august, false).await;
    plugin.open_quarterly_note(mid_august, false).await;

    assert_eq!(
        vault.file_paths(),
        vec!["quarters/2024-Q3.md", "weeks/2024-W33.md"]
    );
}
