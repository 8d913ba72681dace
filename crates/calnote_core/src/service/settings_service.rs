//! Settings load/mutate/persist service.
//!
//! # Responsibility
//! - Load settings once by merging persisted data over defaults.
//! - Apply settings-surface mutations and persist after every one.
//!
//! # Invariants
//! - The service is the only writer of its `Settings` value.
//! - A mutation is visible in memory even when persisting it fails; the
//!   failure is returned to the caller.
//! - An empty note format falls back to that period's default format.
//! - `JsonFileStorage` replaces the file through a sibling `.tmp` rename, so
//!   an interrupted save leaves the previous document in place.

use crate::model::period::{PeriodKind, ViewMode, WeekStart};
use crate::model::settings::{PeriodicNoteConfig, Settings};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings persistence failure.
#[derive(Debug)]
pub enum SettingsError {
    /// Reading or writing the backing store failed.
    Storage {
        location: String,
        source: std::io::Error,
    },
    /// Persisted data is not valid settings JSON.
    Parse(serde_json::Error),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage { location, source } => {
                write!(f, "settings storage failed at `{location}`: {source}")
            }
            Self::Parse(err) => write!(f, "invalid settings data: {err}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Host persistence for the settings document.
#[allow(async_fn_in_trait)]
pub trait SettingsStorage {
    /// Returns the stored document, or `None` when nothing was saved yet.
    async fn load_data(&self) -> SettingsResult<Option<serde_json::Value>>;
    async fn save_data(&self, data: &serde_json::Value) -> SettingsResult<()>;
}

/// Settings document stored as one JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        PathBuf::from(temp)
    }

    fn storage_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Storage {
            location: self.path.display().to_string(),
            source,
        }
    }
}

impl SettingsStorage for JsonFileStorage {
    async fn load_data(&self) -> SettingsResult<Option<serde_json::Value>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.storage_error(err)),
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    async fn save_data(&self, data: &serde_json::Value) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|err| self.storage_error(err))?;
            }
        }
        let text = serde_json::to_string_pretty(data)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, text)
            .await
            .map_err(|err| self.storage_error(err))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|err| self.storage_error(err))
    }
}

/// Owner of the process-wide settings value.
pub struct SettingsService<S: SettingsStorage> {
    storage: S,
    settings: Settings,
}

impl<S: SettingsStorage> SettingsService<S> {
    /// Loads persisted settings merged over defaults.
    ///
    /// # Errors
    /// - Returns an error when storage cannot be read or holds invalid data.
    pub async fn load(storage: S) -> SettingsResult<Self> {
        let data = storage.load_data().await?;
        let had_data = data.is_some();
        let settings = Settings::from_persisted(data)?;
        info!("event=settings_load module=settings status=ok persisted={had_data}");
        Ok(Self { storage, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Writes the current settings to storage.
    pub async fn save(&self) -> SettingsResult<()> {
        let data = self.settings.to_persisted()?;
        self.storage.save_data(&data).await?;
        debug!("event=settings_save module=settings status=ok");
        Ok(())
    }

    /// Applies one mutation and persists the result.
    pub async fn update(&mut self, mutate: impl FnOnce(&mut Settings)) -> SettingsResult<()> {
        mutate(&mut self.settings);
        self.save().await
    }

    pub async fn set_default_view(&mut self, view: ViewMode) -> SettingsResult<()> {
        self.update(|settings| settings.default_view = view).await
    }

    pub async fn set_confirm_before_create(&mut self, confirm: bool) -> SettingsResult<()> {
        self.update(|settings| settings.should_confirm_before_create = confirm)
            .await
    }

    pub async fn set_week_start(&mut self, week_start: WeekStart) -> SettingsResult<()> {
        self.update(|settings| settings.week_start = week_start).await
    }

    pub async fn set_locale_override(&mut self, locale: impl Into<String>) -> SettingsResult<()> {
        let locale = locale.into();
        self.update(|settings| settings.locale_override = locale)
            .await
    }

    pub async fn set_words_per_dot(&mut self, words: u32) -> SettingsResult<()> {
        self.update(|settings| settings.words_per_dot = words).await
    }

    pub async fn set_note_enabled(&mut self, kind: PeriodKind, enabled: bool) -> SettingsResult<()> {
        self.update(|settings| settings.note_mut(kind).enabled = enabled)
            .await
    }

    pub async fn set_note_folder(
        &mut self,
        kind: PeriodKind,
        folder: impl Into<String>,
    ) -> SettingsResult<()> {
        let folder = folder.into();
        self.update(|settings| settings.note_mut(kind).folder = folder)
            .await
    }

    /// Sets a note format; blank input restores the period default.
    pub async fn set_note_format(
        &mut self,
        kind: PeriodKind,
        format: impl Into<String>,
    ) -> SettingsResult<()> {
        let mut format = format.into();
        if format.trim().is_empty() {
            format = PeriodicNoteConfig::default_for(kind).format;
        }
        self.update(|settings| settings.note_mut(kind).format = format)
            .await
    }

    pub async fn set_note_template(
        &mut self,
        kind: PeriodKind,
        template: impl Into<String>,
    ) -> SettingsResult<()> {
        let template = template.into();
        self.update(|settings| settings.note_mut(kind).template = template)
            .await
    }
}
