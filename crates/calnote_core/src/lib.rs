//! Core logic for calnote, a calendar of periodic notes.
//!
//! Date boundaries, note path resolution, open-or-create orchestration,
//! calendar navigation state and the settings model live here. Host
//! capabilities (file store, panes, prompts, clock) are injected through
//! the traits in [`vault`], [`host`] and [`time::clock`].

pub mod host;
pub mod logging;
pub mod model;
pub mod plugin;
pub mod service;
pub mod store;
pub mod time;
pub mod vault;

pub use host::{OpenFileOptions, UserPrompt, Workspace, WorkspaceError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::period::{PeriodKind, ViewMode, WeekStart};
pub use model::settings::{PeriodicNoteConfig, Settings};
pub use plugin::{parse_command_id, supported_command_ids, CalendarPlugin, CommandId};
pub use service::note_service::PeriodicNoteService;
pub use service::open_service::{NoteOpener, OpenNoteError, OpenOutcome, OpenPolicy};
pub use service::settings_service::{
    JsonFileStorage, SettingsError, SettingsResult, SettingsService, SettingsStorage,
};
pub use store::calendar::{CalendarStore, NoteActions};
pub use time::clock::{Clock, FixedClock, SystemClock};
pub use time::locale::WeekConvention;
pub use vault::{
    normalize_path, resolve_note_path, resolve_path, FileHandle, FsVault, MemoryVault, Vault,
    VaultEntry, VaultError, VaultResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
