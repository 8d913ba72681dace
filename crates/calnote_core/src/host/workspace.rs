//! Pane-opening contract.

use crate::vault::FileHandle;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Where and how a file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenFileOptions {
    /// Split the active pane instead of reusing the unpinned one.
    pub new_split: bool,
    /// Focus the pane after opening.
    pub make_active: bool,
}

impl OpenFileOptions {
    /// Focused open, in a new split or the reusable pane.
    pub fn focused(new_split: bool) -> Self {
        Self {
            new_split,
            make_active: true,
        }
    }
}

/// Host failure while opening a pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceError {
    pub message: String,
}

impl WorkspaceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for WorkspaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "workspace open failed: {}", self.message)
    }
}

impl Error for WorkspaceError {}

/// Host workspace that displays files in panes.
#[allow(async_fn_in_trait)]
pub trait Workspace {
    async fn open_file(
        &self,
        file: &FileHandle,
        options: OpenFileOptions,
    ) -> Result<(), WorkspaceError>;
}

impl<W: Workspace + ?Sized> Workspace for &W {
    async fn open_file(
        &self,
        file: &FileHandle,
        options: OpenFileOptions,
    ) -> Result<(), WorkspaceError> {
        (**self).open_file(file, options).await
    }
}
