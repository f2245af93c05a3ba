//! Ports onto the host's user-facing services.

use async_trait::async_trait;

use super::types::MessageParams;

/// Non-blocking toast notifications. `message_key` is localized by the host.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationPort: Send + Sync {
    fn warn(&self, message_key: &str, params: &MessageParams);
}

#[cfg_attr(test, mockall::automock)]
pub trait LocalizationPort: Send + Sync {
    /// Translate `key`, substituting `params`. Unknown keys come back unchanged.
    fn localize(&self, key: &str, params: &MessageParams) -> String;
}

/// Modal dialogs. Both calls suspend until the user answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DialogPort: Send + Sync {
    /// `None` when the user cancels.
    async fn prompt_text(&self, title: &str, placeholder: &str) -> Option<String>;
    async fn confirm(&self, title: &str, body: &str) -> bool;
}
