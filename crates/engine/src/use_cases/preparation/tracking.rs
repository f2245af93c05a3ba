//! Keep spell lists in step with prepared-state changes made on the sheet.
//!
//! Runs after the host has committed a spell item update.

use std::sync::Arc;

use spellbinder_domain::{
    ChangeOrigin, PreparationMode, SpellItem, SpellItemChanges, SpellListEntry, SpellListId,
};

use crate::entities::{SpellListRegistry, SpellListRepoError};

/// What the tracker did with an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingOutcome {
    Ignored,
    /// Number of entries added to the active list (0 if already present).
    AddedToActive(usize),
    RemovedFromActive(bool),
    RemovedFromAll(Vec<SpellListId>),
}

pub struct SpellTracker {
    registry: Arc<SpellListRegistry>,
}

impl SpellTracker {
    pub fn new(registry: Arc<SpellListRegistry>) -> Self {
        Self { registry }
    }

    /// `spell` is the post-update snapshot, `changes` the fields the update touched.
    pub async fn on_spell_updated(
        &self,
        spell: &SpellItem,
        changes: &SpellItemChanges,
        origin: ChangeOrigin,
    ) -> Result<TrackingOutcome, SpellListRepoError> {
        if !spell.is_spell() {
            return Ok(TrackingOutcome::Ignored);
        }
        let Some(owner) = spell.owner.as_ref() else {
            tracing::warn!(spell_id = %spell.id, "Updated spell has no owning character");
            return Ok(TrackingOutcome::Ignored);
        };
        if origin.is_system() {
            return Ok(TrackingOutcome::Ignored);
        }

        let repo = self.registry.for_character(owner);

        // A spell that stops counting as a prepared spell leaves every list.
        if changes.changes_spell_type() && !spell.counts_as_prepared_spell() {
            let changed = repo.remove_spell_from_all(&spell.id).await?;
            return Ok(TrackingOutcome::RemovedFromAll(changed));
        }

        if !spell.counts_as_prepared_spell() {
            return Ok(TrackingOutcome::Ignored);
        }
        if !changes.touches_prepared_state() && !changes.changes_spell_type() {
            return Ok(TrackingOutcome::Ignored);
        }

        let result = match spell.prepared {
            PreparationMode::NotPrepared => repo
                .remove_spell(&spell.id)
                .await
                .map(TrackingOutcome::RemovedFromActive),
            PreparationMode::Prepared => repo
                .add_spells(vec![SpellListEntry::new(
                    spell.id.clone(),
                    spell.source_class.clone(),
                )])
                .await
                .map(TrackingOutcome::AddedToActive),
            PreparationMode::AlwaysPrepared => repo
                .remove_spell_from_all(&spell.id)
                .await
                .map(TrackingOutcome::RemovedFromAll),
        };

        match result {
            Err(SpellListRepoError::NoActiveList(character_id)) => {
                tracing::debug!(
                    character_id = %character_id,
                    spell_id = %spell.id,
                    "No active spell list to track prepared state on"
                );
                Ok(TrackingOutcome::Ignored)
            }
            other => other,
        }
    }
}
