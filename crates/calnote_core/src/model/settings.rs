//! Calendar settings model and persisted-document merge.
//!
//! # Responsibility
//! - Hold the five periodic-note configs and the general options.
//! - Merge a persisted JSON document over built-in defaults.
//!
//! # Invariants
//! - Top-level fields present in persisted data override defaults one by one.
//! - Each period sub-record is merged field by field over that period's own
//!   defaults, so documents written before a sub-field existed keep its
//!   default instead of dropping it.
//! - Unknown persisted fields are ignored.

use crate::model::period::{PeriodKind, ViewMode, WeekStart};
use crate::time::locale::{self, WeekConvention};
use serde::{Deserialize, Serialize};

/// Locale override value meaning "use the operating system locale".
pub const SYSTEM_DEFAULT_LOCALE: &str = "system-default";

const DEFAULT_WORDS_PER_DOT: u32 = 250;

/// Per-period note configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicNoteConfig {
    pub enabled: bool,
    /// Vault-relative folder; empty means vault root.
    pub folder: String,
    /// Moment-style date pattern rendered into the file stem.
    pub format: String,
    /// Vault-relative template path; empty means no seed content.
    pub template: String,
}

impl PeriodicNoteConfig {
    /// Built-in defaults for one period kind.
    pub fn default_for(kind: PeriodKind) -> Self {
        let (enabled, folder, format) = match kind {
            PeriodKind::Daily => (true, "", "YYYY-MM-DD"),
            PeriodKind::Weekly => (false, "weeks", "YYYY-[W]ww"),
            PeriodKind::Monthly => (false, "months", "YYYY-MM"),
            PeriodKind::Quarterly => (false, "quarters", "YYYY-[Q]Q"),
            PeriodKind::Yearly => (false, "years", "YYYY"),
        };
        Self {
            enabled,
            folder: folder.to_string(),
            format: format.to_string(),
            template: String::new(),
        }
    }

    fn merged_with(mut self, persisted: PersistedNoteConfig) -> Self {
        if let Some(enabled) = persisted.enabled {
            self.enabled = enabled;
        }
        if let Some(folder) = persisted.folder {
            self.folder = folder;
        }
        if let Some(format) = persisted.format {
            self.format = format;
        }
        if let Some(template) = persisted.template {
            self.template = template;
        }
        self
    }
}

/// Process-wide calendar settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Rendering hint only; carried for round-tripping.
    pub words_per_dot: u32,
    pub week_start: WeekStart,
    pub should_confirm_before_create: bool,
    pub default_view: ViewMode,
    pub locale_override: String,
    pub daily_note: PeriodicNoteConfig,
    pub weekly_note: PeriodicNoteConfig,
    pub monthly_note: PeriodicNoteConfig,
    pub quarterly_note: PeriodicNoteConfig,
    pub yearly_note: PeriodicNoteConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            words_per_dot: DEFAULT_WORDS_PER_DOT,
            week_start: WeekStart::Locale,
            should_confirm_before_create: true,
            default_view: ViewMode::Month,
            locale_override: SYSTEM_DEFAULT_LOCALE.to_string(),
            daily_note: PeriodicNoteConfig::default_for(PeriodKind::Daily),
            weekly_note: PeriodicNoteConfig::default_for(PeriodKind::Weekly),
            monthly_note: PeriodicNoteConfig::default_for(PeriodKind::Monthly),
            quarterly_note: PeriodicNoteConfig::default_for(PeriodKind::Quarterly),
            yearly_note: PeriodicNoteConfig::default_for(PeriodKind::Yearly),
        }
    }
}

impl Settings {
    /// Builds settings from a persisted document merged over defaults.
    ///
    /// `None` (nothing persisted yet) yields the defaults.
    ///
    /// # Errors
    /// - Returns an error when a known field has the wrong JSON type.
    pub fn from_persisted(data: Option<serde_json::Value>) -> Result<Self, serde_json::Error> {
        let Some(data) = data else {
            return Ok(Self::default());
        };
        if data.is_null() {
            return Ok(Self::default());
        }
        let persisted: PersistedSettings = serde_json::from_value(data)?;
        Ok(Self::default().merged_with(persisted))
    }

    /// Serializes the full settings record for persistence.
    pub fn to_persisted(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn note(&self, kind: PeriodKind) -> &PeriodicNoteConfig {
        match kind {
            PeriodKind::Daily => &self.daily_note,
            PeriodKind::Weekly => &self.weekly_note,
            PeriodKind::Monthly => &self.monthly_note,
            PeriodKind::Quarterly => &self.quarterly_note,
            PeriodKind::Yearly => &self.yearly_note,
        }
    }

    pub fn note_mut(&mut self, kind: PeriodKind) -> &mut PeriodicNoteConfig {
        match kind {
            PeriodKind::Daily => &mut self.daily_note,
            PeriodKind::Weekly => &mut self.weekly_note,
            PeriodKind::Monthly => &mut self.monthly_note,
            PeriodKind::Quarterly => &mut self.quarterly_note,
            PeriodKind::Yearly => &mut self.yearly_note,
        }
    }

    /// Resolves `week_start` (and the locale for `WeekStart::Locale`) into
    /// the convention used by week boundaries and week-number tokens.
    pub fn week_convention(&self) -> WeekConvention {
        match self.week_start {
            WeekStart::Sunday => WeekConvention::SUNDAY_FIRST,
            WeekStart::Monday => WeekConvention::MONDAY_FIRST,
            WeekStart::Locale => {
                let tag = if self.locale_override.trim() == SYSTEM_DEFAULT_LOCALE {
                    locale::system_locale()
                } else {
                    Some(self.locale_override.clone())
                };
                locale::convention_for_locale(tag.as_deref().unwrap_or(""))
            }
        }
    }

    fn merged_with(mut self, persisted: PersistedSettings) -> Self {
        if let Some(value) = persisted.words_per_dot {
            self.words_per_dot = value;
        }
        if let Some(value) = persisted.week_start {
            self.week_start = value;
        }
        if let Some(value) = persisted.should_confirm_before_create {
            self.should_confirm_before_create = value;
        }
        if let Some(value) = persisted.default_view {
            self.default_view = value;
        }
        if let Some(value) = persisted.locale_override {
            self.locale_override = value;
        }
        let notes = [
            (PeriodKind::Daily, persisted.daily_note),
            (PeriodKind::Weekly, persisted.weekly_note),
            (PeriodKind::Monthly, persisted.monthly_note),
            (PeriodKind::Quarterly, persisted.quarterly_note),
            (PeriodKind::Yearly, persisted.yearly_note),
        ];
        for (kind, note) in notes {
            if let Some(note) = note {
                let slot = self.note_mut(kind);
                *slot = slot.clone().merged_with(note);
            }
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSettings {
    words_per_dot: Option<u32>,
    week_start: Option<WeekStart>,
    should_confirm_before_create: Option<bool>,
    default_view: Option<ViewMode>,
    locale_override: Option<String>,
    daily_note: Option<PersistedNoteConfig>,
    weekly_note: Option<PersistedNoteConfig>,
    monthly_note: Option<PersistedNoteConfig>,
    quarterly_note: Option<PersistedNoteConfig>,
    yearly_note: Option<PersistedNoteConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct PersistedNoteConfig {
    enabled: Option<bool>,
    folder: Option<String>,
    format: Option<String>,
    template: Option<String>,
}
