//! Periodic-note existence and creation service.
//!
//! # Responsibility
//! - Look up notes live against the vault (no caching).
//! - Create missing notes with optional template seed content.
//!
//! # Invariants
//! - `create_note` re-checks existence before any mutation, so sequential
//!   calls for one path create at most one file and return the same handle.
//! - Template problems never block creation; the note is created empty.
//! - Host errors from folder or file creation are returned unchanged.

use crate::vault::path::normalize_path;
use crate::vault::{FileHandle, Vault, VaultEntry, VaultResult};
use log::{debug, info, warn};

/// Note existence/creation facade over a vault implementation.
pub struct PeriodicNoteService<V: Vault> {
    vault: V,
}

impl<V: Vault> PeriodicNoteService<V> {
    /// Creates a service over the provided vault.
    pub fn new(vault: V) -> Self {
        Self { vault }
    }

    /// Returns the file at `path`, or `None` when absent or a folder.
    pub async fn exists(&self, path: &str) -> VaultResult<Option<FileHandle>> {
        Ok(self
            .vault
            .entry(&normalize_path(path))
            .await?
            .and_then(VaultEntry::into_file))
    }

    /// Creates `folder` when it is non-empty and nothing occupies it.
    ///
    /// An existing entry of either kind is left untouched; a file squatting
    /// on the folder name surfaces later as the host's create error.
    pub async fn ensure_folder(&self, folder: &str) -> VaultResult<()> {
        if folder.trim().is_empty() {
            return Ok(());
        }
        let folder = normalize_path(folder);
        if folder == "/" {
            return Ok(());
        }
        if self.vault.entry(&folder).await?.is_none() {
            self.vault.create_folder(&folder).await?;
            info!("event=folder_create module=notes status=ok folder={folder}");
        }
        Ok(())
    }

    /// Returns template text, or an empty string when there is none.
    ///
    /// Empty paths, folders, missing files and read failures all mean
    /// "no template".
    pub async fn load_template(&self, template_path: &str) -> String {
        if template_path.trim().is_empty() {
            return String::new();
        }
        let path = normalize_path(template_path);
        let file = match self.vault.entry(&path).await {
            Ok(Some(VaultEntry::File(file))) => file,
            Ok(_) => {
                debug!("event=template_load module=notes status=skip reason=missing path={path}");
                return String::new();
            }
            Err(err) => {
                warn!("event=template_load module=notes status=error path={path} error={err}");
                return String::new();
            }
        };
        match self.vault.read(&file).await {
            Ok(content) => content,
            Err(err) => {
                warn!("event=template_read module=notes status=error path={path} error={err}");
                String::new()
            }
        }
    }

    /// Creates the note at `path` unless it already exists.
    ///
    /// Returns the existing handle when the file is already there; otherwise
    /// ensures `folder`, loads `template_path` and creates the file with the
    /// template text as its body.
    pub async fn create_note(
        &self,
        path: &str,
        folder: &str,
        template_path: &str,
    ) -> VaultResult<FileHandle> {
        let path = normalize_path(path);
        if let Some(existing) = self.exists(&path).await? {
            debug!("event=note_create module=notes status=skip reason=exists path={path}");
            return Ok(existing);
        }

        self.ensure_folder(folder).await?;
        let content = self.load_template(template_path).await;
        let file = self.vault.create_file(&path, &content).await?;
        info!(
            "event=note_create module=notes status=ok path={} seeded={}",
            file.path(),
            !content.is_empty()
        );
        Ok(file)
    }
}
