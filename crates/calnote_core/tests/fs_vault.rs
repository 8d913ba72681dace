use calnote_core::{
    FileHandle, FsVault, NoteOpener, OpenFileOptions, OpenOutcome, OpenPolicy, PeriodKind,
    PeriodicNoteConfig, PeriodicNoteService, UserPrompt, Vault, VaultEntry, VaultError,
    WeekConvention, Workspace, WorkspaceError,
};
use chrono::NaiveDate;

struct NoopWorkspace;

impl Workspace for NoopWorkspace {
    async fn open_file(&self, _: &FileHandle, _: OpenFileOptions) -> Result<(), WorkspaceError> {
        Ok(())
    }
}

struct Decline;

impl UserPrompt for Decline {
    async fn confirm(&self, _: &str, _: &str) -> bool {
        false
    }

    fn notice(&self, _: &str) {}
}

#[tokio::test]
async fn entries_distinguish_files_and_folders() {
    let dir = tempfile::tempdir().expect("temp vault");
    std::fs::create_dir_all(dir.path().join("weeks")).expect("seed folder");
    std::fs::write(dir.path().join("weeks").join("2024-W11.md"), "body").expect("seed file");
    let vault = FsVault::new(dir.path());

    assert_eq!(
        vault.entry("weeks").await.expect("lookup"),
        Some(VaultEntry::Folder("weeks".to_string()))
    );
    assert_eq!(
        vault.entry("/weeks//2024-W11.md").await.expect("lookup"),
        Some(VaultEntry::File(FileHandle::new("weeks/2024-W11.md")))
    );
    assert_eq!(vault.entry("weeks/2024-W12.md").await.expect("lookup"), None);
}

#[tokio::test]
async fn create_file_never_overwrites() {
    let dir = tempfile::tempdir().expect("temp vault");
    let vault = FsVault::new(dir.path());

    let file = vault.create_file("note.md", "first").await.expect("create");
    assert_eq!(vault.read(&file).await.expect("read"), "first");

    let err = vault
        .create_file("note.md", "second")
        .await
        .expect_err("second create fails");
    assert!(matches!(err, VaultError::AlreadyExists(_)));
    assert_eq!(vault.read(&file).await.expect("read"), "first");
}

#[tokio::test]
async fn create_folder_rejects_existing_entries() {
    let dir = tempfile::tempdir().expect("temp vault");
    let vault = FsVault::new(dir.path());

    vault.create_folder("a/b").await.expect("nested folder");
    assert!(dir.path().join("a").join("b").is_dir());
    let err = vault.create_folder("a").await.expect_err("folder exists");
    assert!(matches!(err, VaultError::AlreadyExists(_)));
}

#[tokio::test]
async fn note_service_creates_seeded_note_on_disk() {
    let dir = tempfile::tempdir().expect("temp vault");
    std::fs::create_dir_all(dir.path().join("templates")).expect("seed folder");
    std::fs::write(dir.path().join("templates").join("month.md"), "# Month\n")
        .expect("seed template");
    let notes = PeriodicNoteService::new(FsVault::new(dir.path()));

    let file = notes
        .create_note("months/2024-03.md", "months", "templates/month.md")
        .await
        .expect("note created");

    assert_eq!(file.path(), "months/2024-03.md");
    let on_disk = std::fs::read_to_string(dir.path().join("months").join("2024-03.md"))
        .expect("note on disk");
    assert_eq!(on_disk, "# Month\n");
}

#[tokio::test]
async fn declined_confirmation_writes_nothing_to_disk() {
    let dir = tempfile::tempdir().expect("temp vault");
    let opener = NoteOpener::new(FsVault::new(dir.path()), NoopWorkspace, Decline);
    let config = PeriodicNoteConfig::default_for(PeriodKind::Yearly);
    let date = NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid test instant");
    let policy = OpenPolicy {
        confirm_before_create: true,
        week: WeekConvention::default(),
    };

    let outcome = opener.open_or_create(&config, date, policy, false).await;

    assert!(matches!(outcome, OpenOutcome::Declined));
    assert!(!dir.path().join("years").exists());
}
