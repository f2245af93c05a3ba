//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Character documents and their items (owned by the sheet host)
//! - Flag storage the spell list blob lives in
//! - Sheet widgets, notifications, localization and dialogs
//! - Randomness (for testing)

mod error;
mod host;
mod testing;
pub mod types;
mod ui;

use std::sync::Arc;

// =============================================================================
// Host Ports
// =============================================================================
pub use host::{CharacterPort, FlagStorePort, SheetPort};
pub use ui::{DialogPort, LocalizationPort, NotificationPort};

pub use types::MessageParams;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use host::{MockCharacterPort, MockFlagStorePort, MockSheetPort};
#[cfg(test)]
pub use ui::{MockDialogPort, MockLocalizationPort, MockNotificationPort};
#[cfg(test)]
pub use testing::MockRandomPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::RandomPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;

/// Every host capability the engine consumes, bundled for injection.
#[derive(Clone)]
pub struct HostPorts {
    pub characters: Arc<dyn CharacterPort>,
    pub flags: Arc<dyn FlagStorePort>,
    pub sheet: Arc<dyn SheetPort>,
    pub notifications: Arc<dyn NotificationPort>,
    pub localization: Arc<dyn LocalizationPort>,
    pub dialogs: Arc<dyn DialogPort>,
    pub random: Arc<dyn RandomPort>,
}

impl HostPorts {
    /// Use one object for every host port, as the in-memory host does.
    pub fn from_host<H>(host: Arc<H>, random: Arc<dyn RandomPort>) -> Self
    where
        H: CharacterPort
            + FlagStorePort
            + SheetPort
            + NotificationPort
            + LocalizationPort
            + DialogPort
            + 'static,
    {
        Self {
            characters: host.clone(),
            flags: host.clone(),
            sheet: host.clone(),
            notifications: host.clone(),
            localization: host.clone(),
            dialogs: host,
            random,
        }
    }
}
