//! Filter and sort preferences of the active list.
//!
//! These record what the user just did on the sheet, so they only persist;
//! nothing is pushed back to the sheet.

use std::sync::Arc;

use spellbinder_domain::{CharacterId, DisplayOptions, FilterCategory, SpellList};

use crate::entities::{SpellListRegistry, SpellListRepoError};

pub struct DisplayOptionsOps {
    registry: Arc<SpellListRegistry>,
}

impl DisplayOptionsOps {
    pub fn new(registry: Arc<SpellListRegistry>) -> Self {
        Self { registry }
    }

    /// Empty search, no filters, first sort mode.
    pub async fn clear_filters(
        &self,
        character_id: &CharacterId,
    ) -> Result<SpellList, SpellListRepoError> {
        self.edit(character_id, |_| DisplayOptions::cleared()).await
    }

    /// Alpha, then priority, then manual, then back to alpha.
    pub async fn cycle_sort(
        &self,
        character_id: &CharacterId,
    ) -> Result<SpellList, SpellListRepoError> {
        self.edit(character_id, DisplayOptions::with_next_sort).await
    }

    pub async fn set_search(
        &self,
        character_id: &CharacterId,
        text: impl Into<String>,
    ) -> Result<SpellList, SpellListRepoError> {
        let text = text.into();
        self.edit(character_id, move |options| options.with_search(text))
            .await
    }

    pub async fn toggle_filter(
        &self,
        character_id: &CharacterId,
        category: FilterCategory,
    ) -> Result<SpellList, SpellListRepoError> {
        self.edit(character_id, move |options| options.toggled(category))
            .await
    }

    async fn edit<F>(
        &self,
        character_id: &CharacterId,
        edit: F,
    ) -> Result<SpellList, SpellListRepoError>
    where
        F: FnOnce(DisplayOptions) -> DisplayOptions + Send,
    {
        let list = self
            .registry
            .for_character(character_id)
            .edit_active_display_options(edit)
            .await?;
        tracing::debug!(
            character_id = %character_id,
            list_id = %list.id,
            "Updated spell list display options"
        );
        Ok(list)
    }
}
