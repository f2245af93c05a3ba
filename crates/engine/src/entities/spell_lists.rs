//! Spell list repository: one per character.
//!
//! Every mutation is a whole-blob read-modify-write of the character's
//! [`SpellListCollection`]. Mutations on one repository are serialised by an
//! async mutex; public operations take the lock and delegate to `*_locked`
//! helpers so operations can compose without re-locking.

use serde_json::Value;
use spellbinder_domain::{
    CapacityProfile, ChangeOrigin, CharacterId, CharacterSummary, ClassItem, DisplayOptions,
    NewSpellList, Placement, ReconciliationPlan, SpellId, SpellList, SpellListCollection,
    SpellListEntry, SpellListError, SpellListId, SpellListPatch,
};
use tokio::sync::Mutex;

use crate::infrastructure::config::SpellListConfig;
use crate::infrastructure::ports::{HostPorts, MessageParams, RepoError};
use crate::messages;

/// Errors surfaced by spell list operations.
#[derive(Debug, thiserror::Error)]
pub enum SpellListRepoError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Spell list not found: {0}")]
    ListNotFound(SpellListId),
    /// Invariant violation: the stored collection has no active list.
    #[error("Character {0} has no active spell list")]
    NoActiveList(CharacterId),
    #[error("Cannot delete the default spell list")]
    CannotDeleteDefault,
    #[error("Duplicate spell list id: {0}")]
    DuplicateListId(SpellListId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl SpellListRepoError {
    fn from_domain(err: SpellListError, character_id: &CharacterId) -> Self {
        match err {
            SpellListError::NotFound(id) => Self::ListNotFound(id),
            SpellListError::NoActiveList => Self::NoActiveList(character_id.clone()),
            SpellListError::CannotDeleteDefault => Self::CannotDeleteDefault,
            SpellListError::DuplicateId(id) => Self::DuplicateListId(id),
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::CharacterNotFound(_) | Self::ListNotFound(_) => true,
            Self::Repo(e) => e.is_not_found(),
            _ => false,
        }
    }
}

/// What `reset` did to the character's collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The character cannot prepare spells; the blob was removed.
    Cleared,
    /// A fresh default list replaced the collection.
    Seeded {
        default_list: SpellList,
        unprepared: usize,
    },
}

/// Repository knobs taken from [`SpellListConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySettings {
    pub store_property: String,
    pub resync_active: bool,
}

impl From<&SpellListConfig> for RepositorySettings {
    fn from(config: &SpellListConfig) -> Self {
        Self {
            store_property: config.store_property.clone(),
            resync_active: config.resync_active,
        }
    }
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self::from(&SpellListConfig::default())
    }
}

pub struct SpellListRepository {
    character_id: CharacterId,
    host: HostPorts,
    settings: RepositorySettings,
    write_lock: Mutex<()>,
}

impl SpellListRepository {
    pub fn new(character_id: CharacterId, host: HostPorts, settings: RepositorySettings) -> Self {
        Self {
            character_id,
            host,
            settings,
            write_lock: Mutex::new(()),
        }
    }

    pub fn character_id(&self) -> &CharacterId {
        &self.character_id
    }

    /// Only the default list is undeletable.
    pub fn can_delete(list_id: &SpellListId) -> bool {
        !list_id.is_default()
    }

    /// Resolve the owning character.
    pub async fn character(&self) -> Result<CharacterSummary, SpellListRepoError> {
        self.host
            .characters
            .get_character(&self.character_id)
            .await?
            .ok_or_else(|| SpellListRepoError::CharacterNotFound(self.character_id.clone()))
    }

    pub async fn class_items(&self) -> Result<Vec<ClassItem>, SpellListRepoError> {
        Ok(self.host.characters.class_items(&self.character_id).await?)
    }

    pub async fn capacity_profile(&self) -> Result<CapacityProfile, SpellListRepoError> {
        Ok(CapacityProfile::from_class_items(&self.class_items().await?))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn get(&self, list_id: &SpellListId) -> Result<SpellList, SpellListRepoError> {
        self.character().await?;
        self.fetch()
            .await?
            .get(list_id)
            .cloned()
            .ok_or_else(|| SpellListRepoError::ListNotFound(list_id.clone()))
    }

    pub async fn get_all(&self) -> Result<Vec<SpellList>, SpellListRepoError> {
        self.character().await?;
        Ok(self.fetch().await?.into_lists())
    }

    /// The list `delete` would remove, without removing it.
    pub async fn get_deletable(
        &self,
        list_id: &SpellListId,
    ) -> Result<SpellList, SpellListRepoError> {
        self.character().await?;
        Self::ensure_deletable(list_id)?;
        let collection = self.fetch().await?;
        self.get_from(&collection, list_id)
    }

    pub async fn get_active(&self) -> Result<SpellList, SpellListRepoError> {
        self.character().await?;
        let collection = self.fetch().await?;
        collection.active().cloned().map_err(|e| self.domain_error(e))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a new, inactive list with a fresh id.
    pub async fn create(&self, new_list: NewSpellList) -> Result<SpellList, SpellListRepoError> {
        let _guard = self.write_lock.lock().await;
        self.character().await?;
        self.create_locked(new_list).await
    }

    pub async fn update(&self, patch: SpellListPatch) -> Result<SpellList, SpellListRepoError> {
        let _guard = self.write_lock.lock().await;
        self.character().await?;
        self.update_locked(patch).await
    }

    /// Rewrite the active list's display options. `edit` receives the stored
    /// options (or the empty set) and returns the replacement.
    pub async fn edit_active_display_options<F>(
        &self,
        edit: F,
    ) -> Result<SpellList, SpellListRepoError>
    where
        F: FnOnce(DisplayOptions) -> DisplayOptions + Send,
    {
        let _guard = self.write_lock.lock().await;
        self.character().await?;

        let collection = self.fetch().await?;
        let active = collection.active().map_err(|e| self.domain_error(e))?;
        let options = edit(active.display_options.clone().unwrap_or_default());
        self.update_locked(SpellListPatch::new(active.id.clone()).display_options(options))
            .await
    }

    /// Remove a list. If it was active, the default list is activated and
    /// synchronised.
    pub async fn delete(&self, list_id: &SpellListId) -> Result<SpellList, SpellListRepoError> {
        let _guard = self.write_lock.lock().await;
        self.character().await?;
        Self::ensure_deletable(list_id)?;

        let mut collection = self.fetch().await?;
        let removal = collection
            .remove(list_id)
            .map_err(|e| self.domain_error(e))?;
        self.save(&collection).await?;

        tracing::debug!(
            character_id = %self.character_id,
            list_id = %list_id,
            activated_default = removal.activated_default,
            "Deleted spell list"
        );

        if removal.activated_default {
            let active = collection
                .active()
                .cloned()
                .map_err(|e| self.domain_error(e))?;
            self.sync_locked(&active).await?;
        }

        Ok(removal.removed)
    }

    /// Make `list_id` the only active list, then push its membership onto
    /// the character's prepared spells.
    pub async fn activate(&self, list_id: &SpellListId) -> Result<SpellList, SpellListRepoError> {
        let _guard = self.write_lock.lock().await;
        self.character().await?;

        let mut collection = self.fetch().await?;
        let already_active = collection
            .get(list_id)
            .ok_or_else(|| SpellListRepoError::ListNotFound(list_id.clone()))?
            .is_active;

        if already_active && collection.active_count() == 1 && !self.settings.resync_active {
            tracing::debug!(list_id = %list_id, "Spell list already active, skipping sync");
            return self.get_from(&collection, list_id);
        }

        let active = collection
            .activate(list_id)
            .cloned()
            .map_err(|e| self.domain_error(e))?;
        self.save(&collection).await?;

        tracing::info!(
            character_id = %self.character_id,
            list_id = %list_id,
            "Activated spell list"
        );

        self.sync_locked(&active).await?;
        Ok(active)
    }

    /// Reorder `source` to sit directly before or after `target`.
    ///
    /// Returns whether anything moved; missing or equal ids are a no-op.
    pub async fn move_list(
        &self,
        source: &SpellListId,
        placement: Placement,
        target: &SpellListId,
    ) -> Result<bool, SpellListRepoError> {
        let _guard = self.write_lock.lock().await;
        self.character().await?;

        let mut collection = self.fetch().await?;
        let moved = collection.move_relative(source, placement, target);
        if moved {
            self.save(&collection).await?;
        }
        Ok(moved)
    }

    /// Duplicate a list under a fresh id. A blank or absent name becomes the
    /// localized "copy of" name.
    pub async fn copy(
        &self,
        list_id: &SpellListId,
        new_name: Option<String>,
    ) -> Result<SpellList, SpellListRepoError> {
        let _guard = self.write_lock.lock().await;
        self.character().await?;

        let collection = self.fetch().await?;
        let source = self.get_from(&collection, list_id)?;

        let name = match new_name.map(|n| n.trim().to_string()) {
            Some(name) if !name.is_empty() => name,
            _ => self.host.localization.localize(
                messages::COPY_LIST_NAME,
                &MessageParams::new().with(messages::PARAM_ORIGINAL_NAME, source.name.as_str()),
            ),
        };

        let mut copy = NewSpellList::named(name).with_spells(source.spells);
        if let Some(options) = source.display_options {
            copy = copy.with_display_options(options);
        }
        self.create_locked(copy).await
    }

    /// Add entries to the active list, skipping ids already on it.
    pub async fn add_spells(
        &self,
        entries: Vec<SpellListEntry>,
    ) -> Result<usize, SpellListRepoError> {
        let _guard = self.write_lock.lock().await;
        self.character().await?;

        let mut collection = self.fetch().await?;
        let added = collection
            .add_to_active(entries)
            .map_err(|e| self.domain_error(e))?;
        if added > 0 {
            self.save(&collection).await?;
        }
        Ok(added)
    }

    /// Remove a spell from the active list only.
    pub async fn remove_spell(&self, spell_id: &SpellId) -> Result<bool, SpellListRepoError> {
        let _guard = self.write_lock.lock().await;
        self.character().await?;

        let mut collection = self.fetch().await?;
        let removed = collection
            .remove_from_active(spell_id)
            .map_err(|e| self.domain_error(e))?;
        if removed {
            self.save(&collection).await?;
        }
        Ok(removed)
    }

    /// Remove a spell from every list with a single write.
    pub async fn remove_spell_from_all(
        &self,
        spell_id: &SpellId,
    ) -> Result<Vec<SpellListId>, SpellListRepoError> {
        let _guard = self.write_lock.lock().await;
        self.character().await?;

        let mut collection = self.fetch().await?;
        let changed = collection.remove_from_all(spell_id);
        if !changed.is_empty() {
            self.save(&collection).await?;
        }
        tracing::debug!(
            character_id = %self.character_id,
            spell_id = %spell_id,
            lists_changed = changed.len(),
            "Removed spell from all lists"
        );
        Ok(changed)
    }

    /// Discard every list. Spellcasters get a fresh default list and lose
    /// all prepared flags; everyone else loses the blob.
    pub async fn reset(&self) -> Result<ResetOutcome, SpellListRepoError> {
        let _guard = self.write_lock.lock().await;
        self.character().await?;
        self.reset_locked().await
    }

    /// Seed or clear the collection when it disagrees with the character's
    /// ability to prepare spells. Returns the resulting lists.
    pub async fn ensure_initialized(&self) -> Result<Vec<SpellList>, SpellListRepoError> {
        let _guard = self.write_lock.lock().await;
        self.character().await?;

        let collection = self.fetch().await?;
        let can_prepare = self.capacity_profile().await?.can_prepare_spells();

        let needs_seed = can_prepare && collection.is_empty();
        let stale = !can_prepare && !collection.is_empty();
        if !(needs_seed || stale) {
            return Ok(collection.into_lists());
        }

        match self.reset_locked().await? {
            ResetOutcome::Cleared => Ok(Vec::new()),
            ResetOutcome::Seeded { default_list, .. } => Ok(vec![default_list]),
        }
    }

    // =========================================================================
    // Locked helpers
    // =========================================================================

    async fn create_locked(&self, new_list: NewSpellList) -> Result<SpellList, SpellListRepoError> {
        let mut collection = self.fetch().await?;
        let id = SpellListId::generate(self.host.random.gen_uuid());
        let list = new_list.into_list(id);
        collection
            .push(list.clone())
            .map_err(|e| self.domain_error(e))?;
        self.save(&collection).await?;

        tracing::debug!(
            character_id = %self.character_id,
            list_id = %list.id,
            "Created spell list"
        );
        Ok(list)
    }

    async fn update_locked(&self, patch: SpellListPatch) -> Result<SpellList, SpellListRepoError> {
        let mut collection = self.fetch().await?;
        let updated = collection
            .update(patch)
            .cloned()
            .map_err(|e| self.domain_error(e))?;
        self.save(&collection).await?;
        Ok(updated)
    }

    async fn reset_locked(&self) -> Result<ResetOutcome, SpellListRepoError> {
        let profile = self.capacity_profile().await?;
        if !profile.can_prepare_spells() {
            self.host
                .flags
                .clear_blob(&self.character_id, &self.settings.store_property)
                .await?;
            tracing::info!(character_id = %self.character_id, "Cleared spell lists");
            return Ok(ResetOutcome::Cleared);
        }

        let name = self
            .host
            .localization
            .localize(messages::DEFAULT_LIST_NAME, &MessageParams::new());
        let collection = SpellListCollection::seeded(name);
        self.save(&collection).await?;

        let prepared = self
            .host
            .characters
            .currently_prepared_spells(&self.character_id)
            .await?;
        let plan = ReconciliationPlan::unprepare_all(&prepared);
        let unprepared = plan.len();
        self.apply_plan(plan).await?;

        tracing::info!(
            character_id = %self.character_id,
            unprepared,
            "Reset spell lists"
        );

        let default_list = collection
            .active()
            .cloned()
            .map_err(|e| self.domain_error(e))?;
        Ok(ResetOutcome::Seeded {
            default_list,
            unprepared,
        })
    }

    /// Make the character's prepared spells match `target`, then show the
    /// list's display options on the sheet.
    async fn sync_locked(&self, target: &SpellList) -> Result<(), SpellListRepoError> {
        let prepared = self
            .host
            .characters
            .currently_prepared_spells(&self.character_id)
            .await?;
        let ranked = self
            .host
            .characters
            .ranked_spell_ids(&self.character_id)
            .await?;
        let plan = ReconciliationPlan::compute(&prepared, target, &ranked);

        if !plan.skipped.is_empty() {
            tracing::debug!(
                character_id = %self.character_id,
                list_id = %target.id,
                skipped = ?plan.skipped,
                "List entries without a ranked spell left unprepared"
            );
        }
        tracing::debug!(
            character_id = %self.character_id,
            list_id = %target.id,
            to_prepare = plan.to_prepare.len(),
            to_unprepare = plan.to_unprepare.len(),
            "Synchronising prepared spells"
        );

        self.apply_plan(plan).await?;

        let options = target.display_options.clone().unwrap_or_default();
        self.host
            .sheet
            .apply_list_filter_and_sort(&self.character_id, &options)
            .await?;
        Ok(())
    }

    async fn apply_plan(&self, plan: ReconciliationPlan) -> Result<(), SpellListRepoError> {
        if plan.is_empty() {
            return Ok(());
        }
        self.host
            .characters
            .batch_set_prepared_state(
                &self.character_id,
                plan.into_changes(),
                ChangeOrigin::SystemReconciliation,
            )
            .await?;
        Ok(())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    async fn fetch(&self) -> Result<SpellListCollection, SpellListRepoError> {
        let blob = self
            .host
            .flags
            .read_blob(&self.character_id, &self.settings.store_property)
            .await?;
        match blob {
            None | Some(Value::Null) => Ok(SpellListCollection::default()),
            Some(value) => serde_json::from_value(value)
                .map_err(|e| RepoError::serialization(e).into()),
        }
    }

    async fn save(&self, collection: &SpellListCollection) -> Result<(), SpellListRepoError> {
        let value = serde_json::to_value(collection).map_err(RepoError::serialization)?;
        self.host
            .flags
            .write_blob(&self.character_id, &self.settings.store_property, value)
            .await?;
        Ok(())
    }

    fn get_from(
        &self,
        collection: &SpellListCollection,
        list_id: &SpellListId,
    ) -> Result<SpellList, SpellListRepoError> {
        collection
            .get(list_id)
            .cloned()
            .ok_or_else(|| SpellListRepoError::ListNotFound(list_id.clone()))
    }

    fn ensure_deletable(list_id: &SpellListId) -> Result<(), SpellListRepoError> {
        if Self::can_delete(list_id) {
            Ok(())
        } else {
            Err(SpellListRepoError::CannotDeleteDefault)
        }
    }

    fn domain_error(&self, err: SpellListError) -> SpellListRepoError {
        SpellListRepoError::from_domain(err, &self.character_id)
    }
}
