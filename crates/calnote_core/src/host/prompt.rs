//! User confirmation and notice contract.

/// Asks the user questions and shows transient notices.
#[allow(async_fn_in_trait)]
pub trait UserPrompt {
    /// Resolves to `true` when the user accepts.
    async fn confirm(&self, title: &str, message: &str) -> bool;
    /// Shows a short user-visible message.
    fn notice(&self, message: &str);
}

impl<P: UserPrompt + ?Sized> UserPrompt for &P {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        (**self).confirm(title, message).await
    }

    fn notice(&self, message: &str) {
        (**self).notice(message)
    }
}
