//! Terminal stand-ins for the host workspace and prompt.

use calnote_core::{FileHandle, OpenFileOptions, UserPrompt, Workspace, WorkspaceError};
use dialoguer::Confirm;
use log::warn;
use std::cell::RefCell;
use std::path::PathBuf;

/// Reports opened notes on stdout instead of showing a pane.
pub struct TerminalWorkspace {
    root: PathBuf,
}

impl TerminalWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Workspace for TerminalWorkspace {
    async fn open_file(
        &self,
        file: &FileHandle,
        options: OpenFileOptions,
    ) -> Result<(), WorkspaceError> {
        let pane = if options.new_split {
            "new split"
        } else {
            "current pane"
        };
        let location = file
            .path()
            .split('/')
            .fold(self.root.clone(), |acc, segment| acc.join(segment));
        println!("{} ({pane})", location.display());
        Ok(())
    }
}

/// Asks on the terminal; `assume_yes` skips the question.
///
/// A confirmation that could not be shown (no TTY, closed stdin) answers
/// "no" to the core and is kept for the caller in `take_failure`.
pub struct TerminalPrompt {
    assume_yes: bool,
    failure: RefCell<Option<String>>,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            failure: RefCell::new(None),
        }
    }

    /// Returns and clears the last confirmation failure.
    pub fn take_failure(&self) -> Option<String> {
        self.failure.borrow_mut().take()
    }

    fn record_answer(&self, answer: dialoguer::Result<bool>) -> bool {
        match answer {
            Ok(answer) => answer,
            Err(err) => {
                warn!("event=prompt_confirm module=cli status=error error={err}");
                *self.failure.borrow_mut() = Some(err.to_string());
                false
            }
        }
    }
}

impl UserPrompt for TerminalPrompt {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let answer = Confirm::new()
            .with_prompt(format!("{title}: {message}"))
            .default(true)
            .interact();
        self.record_answer(answer)
    }

    fn notice(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::TerminalPrompt;
    use calnote_core::UserPrompt;
    use std::io::{Error, ErrorKind};

    #[tokio::test]
    async fn assume_yes_confirms_without_asking() {
        let prompt = TerminalPrompt::new(true);
        assert!(prompt.confirm("New note", "Create it?").await);
        assert_eq!(prompt.take_failure(), None);
    }

    #[test]
    fn unreadable_terminal_is_kept_as_failure() {
        let prompt = TerminalPrompt::new(false);

        let error = Error::new(ErrorKind::NotConnected, "not a terminal");
        let answer = prompt.record_answer(Err(error.into()));

        assert!(!answer);
        let failure = prompt.take_failure().expect("failure recorded");
        assert!(failure.contains("not a terminal"));
        assert_eq!(prompt.take_failure(), None);
    }

    #[test]
    fn explicit_answers_leave_no_failure() {
        let prompt = TerminalPrompt::new(false);
        assert!(!prompt.record_answer(Ok(false)));
        assert!(prompt.record_answer(Ok(true)));
        assert_eq!(prompt.take_failure(), None);
    }
}
