//! `calnote` command-line entry point.
//!
//! Runs the periodic-note commands against a vault directory, with the
//! terminal standing in for panes and confirmation dialogs.

mod terminal;

use anyhow::{bail, Context, Result};
use calnote_core::{
    default_log_level, init_logging, resolve_note_path, CalendarPlugin, CommandId, FsVault,
    JsonFileStorage, OpenOutcome, PeriodKind, Settings, SettingsService, SystemClock, ViewMode,
    WeekStart,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};
use terminal::{TerminalPrompt, TerminalWorkspace};

#[derive(Parser)]
#[command(name = "calnote")]
#[command(about = "Open and create daily, weekly, monthly, quarterly and yearly notes")]
struct Cli {
    /// Vault root directory
    #[arg(long, default_value = ".")]
    vault: PathBuf,

    /// Settings file (default: <vault>/.calnote/data.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write rolling log files to this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OpenArgs {
    /// Target date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<String>,

    /// Open in a new split instead of the current pane
    #[arg(long)]
    new_split: bool,

    /// Create a missing note without asking
    #[arg(short, long)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    OpenDailyNote(OpenArgs),
    OpenWeeklyNote(OpenArgs),
    OpenMonthlyNote(OpenArgs),
    OpenQuarterlyNote(OpenArgs),
    OpenYearlyNote(OpenArgs),
    /// Print the calendar view title and the note for the shown period
    Calendar {
        /// year|quarter|month|week (default: configured view)
        #[arg(long)]
        view: Option<ViewMode>,

        /// Date to show (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Periods to move from the shown date; negative moves back
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        step: i32,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsCommand>,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    Show,
    DefaultView {
        view: ViewMode,
    },
    WeekStart {
        #[arg(value_enum)]
        value: WeekStartArg,
    },
    ConfirmBeforeCreate {
        #[arg(action = ArgAction::Set)]
        enabled: bool,
    },
    /// Locale tag used for week numbering, or "system-default"
    Locale {
        tag: String,
    },
    WordsPerDot {
        words: u32,
    },
    /// Change one periodic-note config
    Note {
        #[arg(value_enum)]
        period: PeriodArg,

        #[arg(long)]
        enabled: Option<bool>,

        #[arg(long)]
        folder: Option<String>,

        /// Date pattern; an empty value restores the default
        #[arg(long)]
        format: Option<String>,

        #[arg(long)]
        template: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PeriodArg {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl PeriodArg {
    fn kind(self) -> PeriodKind {
        match self {
            Self::Daily => PeriodKind::Daily,
            Self::Weekly => PeriodKind::Weekly,
            Self::Monthly => PeriodKind::Monthly,
            Self::Quarterly => PeriodKind::Quarterly,
            Self::Yearly => PeriodKind::Yearly,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum WeekStartArg {
    Sunday,
    Monday,
    Locale,
}

impl From<WeekStartArg> for WeekStart {
    fn from(value: WeekStartArg) -> Self {
        match value {
            WeekStartArg::Sunday => WeekStart::Sunday,
            WeekStartArg::Monday => WeekStart::Monday,
            WeekStartArg::Locale => WeekStart::Locale,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        start_logging(log_dir, cli.log_level.as_deref())?;
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.vault.join(".calnote").join("data.json"));
    let mut settings = SettingsService::load(JsonFileStorage::new(&config_path))
        .await
        .with_context(|| format!("failed to load settings from {}", config_path.display()))?;

    match cli.command {
        Commands::OpenDailyNote(args) => {
            open_note(&cli.vault, settings.settings(), CommandId::OpenDailyNote, args).await
        }
        Commands::OpenWeeklyNote(args) => {
            open_note(&cli.vault, settings.settings(), CommandId::OpenWeeklyNote, args).await
        }
        Commands::OpenMonthlyNote(args) => {
            open_note(&cli.vault, settings.settings(), CommandId::OpenMonthlyNote, args).await
        }
        Commands::OpenQuarterlyNote(args) => {
            open_note(&cli.vault, settings.settings(), CommandId::OpenQuarterlyNote, args).await
        }
        Commands::OpenYearlyNote(args) => {
            open_note(&cli.vault, settings.settings(), CommandId::OpenYearlyNote, args).await
        }
        Commands::Calendar { view, date, step } => {
            show_calendar(&cli.vault, settings.settings(), view, date.as_deref(), step).await
        }
        Commands::Settings { action } => {
            update_settings(&mut settings, action.unwrap_or(SettingsCommand::Show)).await
        }
    }
}

fn start_logging(log_dir: &Path, level: Option<&str>) -> Result<()> {
    let log_dir = std::path::absolute(log_dir)
        .with_context(|| format!("invalid log directory {}", log_dir.display()))?;
    let level = level.unwrap_or(default_log_level());
    init_logging(level, &log_dir.to_string_lossy()).map_err(anyhow::Error::msg)
}

fn parse_date(value: &str) -> Result<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date `{value}`; expected YYYY-MM-DD"))?;
    Ok(date.and_time(NaiveTime::MIN))
}

fn plugin_for(
    vault_root: &Path,
    settings: &Settings,
    assume_yes: bool,
) -> CalendarPlugin<FsVault, TerminalWorkspace, TerminalPrompt, SystemClock> {
    CalendarPlugin::new(
        settings.clone(),
        FsVault::new(vault_root),
        TerminalWorkspace::new(vault_root),
        TerminalPrompt::new(assume_yes),
        SystemClock,
    )
}

async fn open_note(
    vault_root: &Path,
    settings: &Settings,
    command: CommandId,
    args: OpenArgs,
) -> Result<()> {
    let date = args.date.as_deref().map(parse_date).transpose()?;
    let plugin = plugin_for(vault_root, settings, args.yes);
    let Some(kind) = command.period() else {
        bail!("{} does not open a note", command.as_str());
    };
    info!("event=command_run module=cli status=start command={}", command.as_str());

    match plugin.open_periodic_note(kind, date, args.new_split).await {
        None => bail!(
            "{kind} notes are disabled; enable them with `calnote settings note {kind} --enabled true`"
        ),
        Some(OpenOutcome::Opened { .. }) => Ok(()),
        Some(OpenOutcome::Declined) => {
            if let Some(err) = plugin.opener().prompt().take_failure() {
                bail!(
                    "{}: could not ask for confirmation ({err}); rerun with --yes to create the note",
                    command.title()
                );
            }
            eprintln!("{}: note not created", command.title());
            Ok(())
        }
        Some(OpenOutcome::Failed(err)) => Err(err.into()),
    }
}

async fn show_calendar(
    vault_root: &Path,
    settings: &Settings,
    view: Option<ViewMode>,
    date: Option<&str>,
    step: i32,
) -> Result<()> {
    let plugin = plugin_for(vault_root, settings, false);
    info!(
        "event=command_run module=cli status=start command={}",
        CommandId::ShowCalendarView.as_str()
    );
    let mut calendar = plugin.show_calendar_view();
    if let Some(view) = view {
        calendar.set_view_mode(view);
    }
    if let Some(date) = date {
        calendar.set_displayed_date(parse_date(date)?);
    }
    for _ in 0..step.unsigned_abs() {
        if step > 0 {
            calendar.navigate_next();
        } else {
            calendar.navigate_previous();
        }
    }

    println!("{}", calendar.year_title());
    println!("{}", calendar.view_title());

    let Some(start) = calendar.period_start() else {
        return Ok(());
    };
    let kind = calendar.view_mode().period();
    let config = settings.note(kind);
    if config.enabled {
        let path = resolve_note_path(config, start, settings.week_convention());
        let state = match plugin.opener().notes().exists(&path).await? {
            Some(_) => "exists",
            None => "missing",
        };
        println!("{kind} note: {path} ({state})");
    }
    Ok(())
}

async fn update_settings(
    service: &mut SettingsService<JsonFileStorage>,
    action: SettingsCommand,
) -> Result<()> {
    match action {
        SettingsCommand::Show => {}
        SettingsCommand::DefaultView { view } => service.set_default_view(view).await?,
        SettingsCommand::WeekStart { value } => service.set_week_start(value.into()).await?,
        SettingsCommand::ConfirmBeforeCreate { enabled } => {
            service.set_confirm_before_create(enabled).await?
        }
        SettingsCommand::Locale { tag } => service.set_locale_override(tag).await?,
        SettingsCommand::WordsPerDot { words } => service.set_words_per_dot(words).await?,
        SettingsCommand::Note {
            period,
            enabled,
            folder,
            format,
            template,
        } => {
            let kind = period.kind();
            if let Some(enabled) = enabled {
                service.set_note_enabled(kind, enabled).await?;
            }
            if let Some(folder) = folder {
                service.set_note_folder(kind, folder).await?;
            }
            if let Some(format) = format {
                service.set_note_format(kind, format).await?;
            }
            if let Some(template) = template {
                service.set_note_template(kind, template).await?;
            }
        }
    }

    let document = service.settings().to_persisted()?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
