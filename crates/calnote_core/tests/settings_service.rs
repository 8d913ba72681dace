use calnote_core::{
    JsonFileStorage, PeriodKind, PeriodicNoteConfig, SettingsError, SettingsResult,
    SettingsService, SettingsStorage, ViewMode, WeekStart,
};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::io::{Error as IoError, ErrorKind};

#[derive(Default)]
struct MemoryStorage {
    data: RefCell<Option<Value>>,
    saves: Cell<usize>,
    fail_saves: bool,
}

impl MemoryStorage {
    fn holding(value: Value) -> Self {
        Self {
            data: RefCell::new(Some(value)),
            ..Self::default()
        }
    }
}

impl SettingsStorage for MemoryStorage {
    async fn load_data(&self) -> SettingsResult<Option<Value>> {
        Ok(self.data.borrow().clone())
    }

    async fn save_data(&self, data: &Value) -> SettingsResult<()> {
        if self.fail_saves {
            return Err(SettingsError::Storage {
                location: "memory".to_string(),
                source: IoError::new(ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.saves.set(self.saves.get() + 1);
        *self.data.borrow_mut() = Some(data.clone());
        Ok(())
    }
}

#[tokio::test]
async fn empty_storage_loads_defaults() {
    let service = SettingsService::load(MemoryStorage::default())
        .await
        .expect("defaults load");

    let settings = service.settings();
    assert_eq!(settings.words_per_dot, 250);
    assert_eq!(settings.week_start, WeekStart::Locale);
    assert!(settings.should_confirm_before_create);
    assert_eq!(settings.default_view, ViewMode::Month);
    assert_eq!(settings.locale_override, "system-default");
    assert_eq!(service.storage().saves.get(), 0);
}

#[tokio::test]
async fn persisted_fields_override_defaults_and_unknown_keys_are_ignored() {
    let storage = MemoryStorage::holding(json!({
        "shouldConfirmBeforeCreate": false,
        "defaultView": "quarter",
        "weekStart": "monday",
        "monthlyNote": { "enabled": true, "folder": "journal/months" },
        "legacyOption": 3
    }));
    let service = SettingsService::load(storage).await.expect("merged load");

    let settings = service.settings();
    assert!(!settings.should_confirm_before_create);
    assert_eq!(settings.default_view, ViewMode::Quarter);
    assert_eq!(settings.week_start, WeekStart::Monday);
    assert!(settings.monthly_note.enabled);
    assert_eq!(settings.monthly_note.folder, "journal/months");
    assert_eq!(settings.monthly_note.format, "YYYY-MM");
    assert_eq!(
        settings.daily_note,
        PeriodicNoteConfig::default_for(PeriodKind::Daily)
    );
}

#[tokio::test]
async fn wrongly_typed_document_is_rejected() {
    let storage = MemoryStorage::holding(json!({ "wordsPerDot": "many" }));
    let err = SettingsService::load(storage)
        .await
        .err()
        .expect("type mismatch fails");
    assert!(matches!(err, SettingsError::Parse(_)));
}

#[tokio::test]
async fn every_mutation_is_persisted() {
    let mut service = SettingsService::load(MemoryStorage::default())
        .await
        .expect("defaults load");

    service
        .set_note_enabled(PeriodKind::Weekly, true)
        .await
        .expect("enable weekly");
    service
        .set_note_folder(PeriodKind::Weekly, "journal/weeks")
        .await
        .expect("set folder");
    service
        .set_default_view(ViewMode::Week)
        .await
        .expect("set view");

    let storage = service.storage();
    assert_eq!(storage.saves.get(), 3);
    let saved = storage.data.borrow().clone().expect("document saved");
    assert_eq!(saved["weeklyNote"]["enabled"], json!(true));
    assert_eq!(saved["weeklyNote"]["folder"], json!("journal/weeks"));
    assert_eq!(saved["defaultView"], json!("week"));
}

#[tokio::test]
async fn blank_format_restores_period_default() {
    let mut service = SettingsService::load(MemoryStorage::default())
        .await
        .expect("defaults load");

    service
        .set_note_format(PeriodKind::Quarterly, "YYYY [Quarter] Q")
        .await
        .expect("custom format");
    assert_eq!(service.settings().quarterly_note.format, "YYYY [Quarter] Q");

    service
        .set_note_format(PeriodKind::Quarterly, "   ")
        .await
        .expect("blank format");
    assert_eq!(service.settings().quarterly_note.format, "YYYY-[Q]Q");
}

#[tokio::test]
async fn failed_save_keeps_mutation_in_memory() {
    let storage = MemoryStorage {
        fail_saves: true,
        ..MemoryStorage::default()
    };
    let mut service = SettingsService::load(storage).await.expect("defaults load");

    let err = service
        .set_confirm_before_create(false)
        .await
        .expect_err("save fails");

    assert!(matches!(err, SettingsError::Storage { .. }));
    assert!(!service.settings().should_confirm_before_create);
}

#[tokio::test]
async fn json_file_storage_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(".calnote").join("data.json");

    let mut service = SettingsService::load(JsonFileStorage::new(&path))
        .await
        .expect("missing file loads defaults");
    service
        .set_week_start(WeekStart::Sunday)
        .await
        .expect("persist week start");
    service
        .set_note_template(PeriodKind::Daily, "templates/day.md")
        .await
        .expect("persist template");

    let reloaded = SettingsService::load(JsonFileStorage::new(&path))
        .await
        .expect("reload");
    assert_eq!(reloaded.settings(), service.settings());
    assert_eq!(reloaded.settings().daily_note.template, "templates/day.md");
}

#[tokio::test]
async fn interrupted_file_save_keeps_previous_document() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("data.json");
    let temp = dir.path().join("data.json.tmp");

    let mut service = SettingsService::load(JsonFileStorage::new(&path))
        .await
        .expect("missing file loads defaults");
    service
        .set_default_view(ViewMode::Week)
        .await
        .expect("persist view");
    assert!(!temp.exists());

    // The staging file cannot be written while a folder occupies its name.
    std::fs::create_dir(&temp).expect("block staging file");
    let err = service
        .set_default_view(ViewMode::Year)
        .await
        .expect_err("staging write fails");
    assert!(matches!(err, SettingsError::Storage { .. }));

    let reloaded = SettingsService::load(JsonFileStorage::new(&path))
        .await
        .expect("previous document still loads");
    assert_eq!(reloaded.settings().default_view, ViewMode::Week);
}
