//! Host file-store contracts and adapters.
//!
//! # Responsibility
//! - Define the `Vault` contract the core reads and writes notes through.
//! - Provide an in-memory adapter and a directory-backed adapter.
//! - Own path normalization and periodic-note path derivation.
//!
//! # Invariants
//! - Vault paths are `/`-separated and relative to the vault root.
//! - Lookups distinguish files from folders; a folder never satisfies a
//!   file lookup.
//! - Adapters never overwrite: creating over an existing entry is an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod fs;
pub mod memory;
pub mod path;

pub use fs::FsVault;
pub use memory::MemoryVault;
pub use path::{normalize_path, resolve_note_path, resolve_path};

pub type VaultResult<T> = Result<T, VaultError>;

/// Handle to one file inside the vault.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileHandle {
    path: String,
}

impl FileHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Normalized vault-relative path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// File name including extension.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// File name without its final extension.
    pub fn basename(&self) -> &str {
        let name = self.name();
        match name.rfind('.') {
            Some(index) if index > 0 => &name[..index],
            _ => name,
        }
    }
}

impl Display for FileHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

/// Result of a path lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEntry {
    File(FileHandle),
    Folder(String),
}

impl VaultEntry {
    /// Returns the file handle when this entry is a file.
    pub fn into_file(self) -> Option<FileHandle> {
        match self {
            Self::File(file) => Some(file),
            Self::Folder(_) => None,
        }
    }
}

/// Host file-store failure, surfaced unchanged to the orchestrator.
#[derive(Debug)]
pub enum VaultError {
    /// An entry already occupies the path.
    AlreadyExists(String),
    /// A path component that must be a folder is a file.
    NotAFolder(String),
    /// The target file does not exist.
    NotFound(String),
    /// Underlying storage I/O failure.
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl VaultError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Display for VaultError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists(path) => write!(f, "vault entry already exists: {path}"),
            Self::NotAFolder(path) => write!(f, "vault path is not a folder: {path}"),
            Self::NotFound(path) => write!(f, "vault file not found: {path}"),
            Self::Io { path, source } => write!(f, "vault I/O failed at `{path}`: {source}"),
        }
    }
}

impl Error for VaultError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Host file store.
///
/// Every call is a suspension point on the host's event loop; callers run
/// one invocation's calls strictly in sequence.
#[allow(async_fn_in_trait)]
pub trait Vault {
    /// Looks up one path; `None` when nothing is there.
    async fn entry(&self, path: &str) -> VaultResult<Option<VaultEntry>>;
    /// Creates a folder (and missing parents).
    async fn create_folder(&self, path: &str) -> VaultResult<()>;
    /// Creates a new file with initial content.
    async fn create_file(&self, path: &str, content: &str) -> VaultResult<FileHandle>;
    /// Reads a file's full text content.
    async fn read(&self, file: &FileHandle) -> VaultResult<String>;
}

impl<V: Vault + ?Sized> Vault for &V {
    async fn entry(&self, path: &str) -> VaultResult<Option<VaultEntry>> {
        (**self).entry(path).await
    }

    async fn create_folder(&self, path: &str) -> VaultResult<()> {
        (**self).create_folder(path).await
    }

    async fn create_file(&self, path: &str, content: &str) -> VaultResult<FileHandle> {
        (**self).create_file(path, content).await
    }

    async fn read(&self, file: &FileHandle) -> VaultResult<String> {
        (**self).read(file).await
    }
}

#[cfg(test)]
mod tests {
    use super::FileHandle;

    #[test]
    fn file_handle_splits_name_parts() {
        let file = FileHandle::new("weeks/2024-W11.md");
        assert_eq!(file.name(), "2024-W11.md");
        assert_eq!(file.basename(), "2024-W11");
        assert_eq!(FileHandle::new(".hidden").basename(), ".hidden");
    }
}
