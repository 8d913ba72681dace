//! In-memory vault adapter.
//!
//! Single-threaded by construction (`RefCell`), matching the host's event
//! loop model. Used by tests and by embedders without a real file store.

use crate::vault::path::normalize_path;
use crate::vault::{FileHandle, Vault, VaultEntry, VaultError, VaultResult};
use std::cell::RefCell;
use std::collections::BTreeMap;

const ROOT: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    File(String),
    Folder,
}

/// Vault kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryVault {
    nodes: RefCell<BTreeMap<String, Node>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file, creating parent folders as needed.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        let path = normalize_path(path);
        {
            let mut nodes = self.nodes.borrow_mut();
            for parent in ancestors(&path) {
                nodes.entry(parent).or_insert(Node::Folder);
            }
            nodes.insert(path, Node::File(content.to_string()));
        }
        self
    }

    /// Seeds a folder and its parents.
    pub fn with_folder(self, path: &str) -> Self {
        let path = normalize_path(path);
        {
            let mut nodes = self.nodes.borrow_mut();
            for parent in ancestors(&path) {
                nodes.entry(parent).or_insert(Node::Folder);
            }
            if path != ROOT {
                nodes.insert(path, Node::Folder);
            }
        }
        self
    }

    /// Paths of every file, sorted.
    pub fn file_paths(&self) -> Vec<String> {
        self.nodes
            .borrow()
            .iter()
            .filter(|(_, node)| matches!(node, Node::File(_)))
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Text content of a file, if one exists at `path`.
    pub fn contents(&self, path: &str) -> Option<String> {
        match self.nodes.borrow().get(&normalize_path(path)) {
            Some(Node::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    pub fn is_folder(&self, path: &str) -> bool {
        let path = normalize_path(path);
        path == ROOT || matches!(self.nodes.borrow().get(&path), Some(Node::Folder))
    }
}

impl Vault for MemoryVault {
    async fn entry(&self, path: &str) -> VaultResult<Option<VaultEntry>> {
        let path = normalize_path(path);
        if path == ROOT {
            return Ok(Some(VaultEntry::Folder(path)));
        }
        let entry = match self.nodes.borrow().get(&path) {
            Some(Node::File(_)) => Some(VaultEntry::File(FileHandle::new(path.clone()))),
            Some(Node::Folder) => Some(VaultEntry::Folder(path.clone())),
            None => None,
        };
        Ok(entry)
    }

    async fn create_folder(&self, path: &str) -> VaultResult<()> {
        let path = normalize_path(path);
        if path == ROOT {
            return Err(VaultError::AlreadyExists(path));
        }
        let mut nodes = self.nodes.borrow_mut();
        if nodes.contains_key(&path) {
            return Err(VaultError::AlreadyExists(path));
        }
        for parent in ancestors(&path) {
            match nodes.get(&parent) {
                Some(Node::File(_)) => return Err(VaultError::NotAFolder(parent)),
                Some(Node::Folder) => {}
                None => {
                    nodes.insert(parent, Node::Folder);
                }
            }
        }
        nodes.insert(path, Node::Folder);
        Ok(())
    }

    async fn create_file(&self, path: &str, content: &str) -> VaultResult<FileHandle> {
        let path = normalize_path(path);
        let mut nodes = self.nodes.borrow_mut();
        if path == ROOT || nodes.contains_key(&path) {
            return Err(VaultError::AlreadyExists(path));
        }
        for parent in ancestors(&path) {
            match nodes.get(&parent) {
                Some(Node::Folder) => {}
                Some(Node::File(_)) => return Err(VaultError::NotAFolder(parent)),
                None => return Err(VaultError::NotFound(parent)),
            }
        }
        nodes.insert(path.clone(), Node::File(content.to_string()));
        Ok(FileHandle::new(path))
    }

    async fn read(&self, file: &FileHandle) -> VaultResult<String> {
        match self.nodes.borrow().get(file.path()) {
            Some(Node::File(content)) => Ok(content.clone()),
            _ => Err(VaultError::NotFound(file.path().to_string())),
        }
    }
}

/// Proper ancestor folders of a normalized path, outermost first.
fn ancestors(path: &str) -> Vec<String> {
    if path == ROOT {
        return Vec::new();
    }
    let segments: Vec<&str> = path.split('/').collect();
    (1..segments.len())
        .map(|depth| segments[..depth].join("/"))
        .collect()
}
