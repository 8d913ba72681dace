//! Host UI capabilities injected into the core.
//!
//! # Responsibility
//! - Describe pane opening and user prompting as narrow async contracts.
//! - Keep presentation details (modals, notices, panes) out of core logic.

pub mod prompt;
pub mod workspace;

pub use prompt::UserPrompt;
pub use workspace::{OpenFileOptions, Workspace, WorkspaceError};
