//! Directory-backed vault adapter.

use crate::vault::path::normalize_path;
use crate::vault::{FileHandle, Vault, VaultEntry, VaultError, VaultResult};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Vault rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute location of a vault path.
    pub fn absolute(&self, path: &str) -> PathBuf {
        let normalized = normalize_path(path);
        if normalized == "/" {
            return self.root.clone();
        }
        normalized
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }
}

impl Vault for FsVault {
    async fn entry(&self, path: &str) -> VaultResult<Option<VaultEntry>> {
        let normalized = normalize_path(path);
        let metadata = match tokio::fs::metadata(self.absolute(&normalized)).await {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(VaultError::io(normalized, err)),
        };
        if metadata.is_dir() {
            Ok(Some(VaultEntry::Folder(normalized)))
        } else {
            Ok(Some(VaultEntry::File(FileHandle::new(normalized))))
        }
    }

    async fn create_folder(&self, path: &str) -> VaultResult<()> {
        let normalized = normalize_path(path);
        let target = self.absolute(&normalized);
        if tokio::fs::metadata(&target).await.is_ok() {
            return Err(VaultError::AlreadyExists(normalized));
        }
        tokio::fs::create_dir_all(&target)
            .await
            .map_err(|err| VaultError::io(normalized, err))
    }

    async fn create_file(&self, path: &str, content: &str) -> VaultResult<FileHandle> {
        let normalized = normalize_path(path);
        let target = self.absolute(&normalized);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => VaultError::AlreadyExists(normalized.clone()),
                _ => VaultError::io(normalized.clone(), err),
            })?;
        file.write_all(content.as_bytes())
            .await
            .map_err(|err| VaultError::io(normalized.clone(), err))?;
        file.flush()
            .await
            .map_err(|err| VaultError::io(normalized.clone(), err))?;
        Ok(FileHandle::new(normalized))
    }

    async fn read(&self, file: &FileHandle) -> VaultResult<String> {
        tokio::fs::read_to_string(self.absolute(file.path()))
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => VaultError::NotFound(file.path().to_string()),
                _ => VaultError::io(file.path(), err),
            })
    }
}
