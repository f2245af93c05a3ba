//! Ports onto the character-sheet host: its documents, its flag storage and
//! its sheet widgets.

use async_trait::async_trait;
use serde_json::Value;
use spellbinder_domain::{
    ChangeOrigin, CharacterId, CharacterSummary, ClassItem, DisplayOptions, PreparedSpell,
    PreparedStateChange, SpellId,
};

use super::error::RepoError;

// =============================================================================
// Character documents
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterPort: Send + Sync {
    /// `None` if the host has no such character.
    async fn get_character(&self, id: &CharacterId)
        -> Result<Option<CharacterSummary>, RepoError>;

    /// Every player-owned character the host knows about.
    async fn list_player_characters(&self) -> Result<Vec<CharacterId>, RepoError>;

    async fn class_items(&self, id: &CharacterId) -> Result<Vec<ClassItem>, RepoError>;

    /// Ranked spells currently flagged prepared. Cantrips and
    /// always-prepared spells are never included.
    async fn currently_prepared_spells(
        &self,
        id: &CharacterId,
    ) -> Result<Vec<PreparedSpell>, RepoError>;

    /// Every ranked spell item the character owns, prepared or not.
    async fn ranked_spell_ids(&self, id: &CharacterId) -> Result<Vec<SpellId>, RepoError>;

    /// Apply every change as one host update.
    ///
    /// `origin` is handed to the host's pre-update interception so the
    /// preparation gate can recognise changes the engine authored.
    async fn batch_set_prepared_state(
        &self,
        id: &CharacterId,
        changes: Vec<PreparedStateChange>,
        origin: ChangeOrigin,
    ) -> Result<(), RepoError>;
}

// =============================================================================
// Flag storage
// =============================================================================

/// Opaque JSON values stored on a character under a property key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlagStorePort: Send + Sync {
    async fn read_blob(&self, id: &CharacterId, key: &str) -> Result<Option<Value>, RepoError>;
    async fn write_blob(&self, id: &CharacterId, key: &str, value: Value)
        -> Result<(), RepoError>;
    /// Removing an absent blob is not an error.
    async fn clear_blob(&self, id: &CharacterId, key: &str) -> Result<(), RepoError>;
}

// =============================================================================
// Sheet widgets
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SheetPort: Send + Sync {
    /// Push a list's search/filter/sort onto the spells tab filter widget
    /// and re-run its filtering and sorting. Absent fields stay as they are.
    async fn apply_list_filter_and_sort(
        &self,
        id: &CharacterId,
        options: &DisplayOptions,
    ) -> Result<(), RepoError>;
}
