//! Open-or-create orchestration for periodic notes.
//!
//! # Responsibility
//! - Run one request through resolve -> look up -> confirm -> create -> open.
//! - Convert host failures into exactly one user-visible notice.
//!
//! # Invariants
//! - Steps of one request run strictly in sequence.
//! - Existence is always checked before any creation attempt.
//! - A declined confirmation is a clean abort: no file, no pane, no notice.
//! - No retries; a failure stops the request before a pane is opened.
//!
//! Two interleaved requests for the same missing path can both pass the
//! existence check; the vault then rejects the second create and that
//! request fails with a notice.

use crate::host::{OpenFileOptions, UserPrompt, Workspace, WorkspaceError};
use crate::model::settings::{PeriodicNoteConfig, Settings};
use crate::service::note_service::PeriodicNoteService;
use crate::time::locale::WeekConvention;
use crate::vault::path::resolve_note_path;
use crate::vault::{FileHandle, Vault, VaultError};
use chrono::NaiveDateTime;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Title of the create confirmation.
pub const CREATE_CONFIRM_TITLE: &str = "Create Note";
/// Notice shown when creating a note fails.
pub const CREATE_FAILED_NOTICE: &str = "Failed to create note";
/// Notice shown when looking up or opening a note fails.
pub const OPEN_FAILED_NOTICE: &str = "Failed to open note";

/// Failure of one open-or-create request.
#[derive(Debug)]
pub enum OpenNoteError {
    /// Existence lookup failed.
    Lookup(VaultError),
    /// Folder or file creation failed.
    Create(VaultError),
    /// The workspace could not open the file.
    Open(WorkspaceError),
}

impl OpenNoteError {
    /// User-visible notice for this failure.
    pub fn notice(&self) -> &'static str {
        match self {
            Self::Create(_) => CREATE_FAILED_NOTICE,
            Self::Lookup(_) | Self::Open(_) => OPEN_FAILED_NOTICE,
        }
    }
}

impl Display for OpenNoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lookup(err) => write!(f, "note lookup failed: {err}"),
            Self::Create(err) => write!(f, "note creation failed: {err}"),
            Self::Open(err) => write!(f, "{err}"),
        }
    }
}

impl Error for OpenNoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lookup(err) | Self::Create(err) => Some(err),
            Self::Open(err) => Some(err),
        }
    }
}

impl From<WorkspaceError> for OpenNoteError {
    fn from(value: WorkspaceError) -> Self {
        Self::Open(value)
    }
}

/// How a request ended.
#[derive(Debug)]
pub enum OpenOutcome {
    /// The note is open in a pane.
    Opened { file: FileHandle, created: bool },
    /// The user declined to create the missing note.
    Declined,
    /// A host failure aborted the request; a notice was shown.
    Failed(OpenNoteError),
}

impl OpenOutcome {
    pub fn file(&self) -> Option<&FileHandle> {
        match self {
            Self::Opened { file, .. } => Some(file),
            _ => None,
        }
    }
}

/// Creation and rendering policy taken from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenPolicy {
    pub confirm_before_create: bool,
    pub week: WeekConvention,
}

impl OpenPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            confirm_before_create: settings.should_confirm_before_create,
            week: settings.week_convention(),
        }
    }
}

/// Open-or-create orchestrator over injected host capabilities.
pub struct NoteOpener<V: Vault, W: Workspace, P: UserPrompt> {
    notes: PeriodicNoteService<V>,
    workspace: W,
    prompt: P,
}

impl<V: Vault, W: Workspace, P: UserPrompt> NoteOpener<V, W, P> {
    pub fn new(vault: V, workspace: W, prompt: P) -> Self {
        Self {
            notes: PeriodicNoteService::new(vault),
            workspace,
            prompt,
        }
    }

    pub fn notes(&self) -> &PeriodicNoteService<V> {
        &self.notes
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Opens the note for `date`, creating it first when missing.
    ///
    /// Never returns an error: failures are logged, shown once through
    /// `UserPrompt::notice`, and reported as `OpenOutcome::Failed`.
    pub async fn open_or_create(
        &self,
        config: &PeriodicNoteConfig,
        date: NaiveDateTime,
        policy: OpenPolicy,
        new_split: bool,
    ) -> OpenOutcome {
        match self.try_open_or_create(config, date, policy, new_split).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("event=note_open module=open status=error error={err}");
                self.prompt.notice(err.notice());
                OpenOutcome::Failed(err)
            }
        }
    }

    async fn try_open_or_create(
        &self,
        config: &PeriodicNoteConfig,
        date: NaiveDateTime,
        policy: OpenPolicy,
        new_split: bool,
    ) -> Result<OpenOutcome, OpenNoteError> {
        let path = resolve_note_path(config, date, policy.week);

        let (file, created) = match self
            .notes
            .exists(&path)
            .await
            .map_err(OpenNoteError::Lookup)?
        {
            Some(file) => (file, false),
            None => {
                if policy.confirm_before_create {
                    let message =
                        format!("File {path} does not exist. Would you like to create it?");
                    if !self.prompt.confirm(CREATE_CONFIRM_TITLE, &message).await {
                        info!("event=note_open module=open status=skip reason=declined path={path}");
                        return Ok(OpenOutcome::Declined);
                    }
                }
                let file = self
                    .notes
                    .create_note(&path, &config.folder, &config.template)
                    .await
                    .map_err(OpenNoteError::Create)?;
                (file, true)
            }
        };

        self.workspace
            .open_file(&file, OpenFileOptions::focused(new_split))
            .await?;
        info!(
            "event=note_open module=open status=ok path={} created={} new_split={}",
            file.path(),
            created,
            new_split
        );
        Ok(OpenOutcome::Opened { file, created })
    }
}
