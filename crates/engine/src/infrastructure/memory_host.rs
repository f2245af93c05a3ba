//! In-memory character-sheet host.
//!
//! Implements every host port over plain maps. Useful for tests and for
//! embedders that keep character state themselves. Dialog answers are
//! scripted with [`InMemoryHost::queue_prompt`] / [`InMemoryHost::queue_confirm`];
//! an empty queue cancels.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use spellbinder_domain::{
    ChangeOrigin, CharacterId, CharacterSummary, ClassItem, DisplayOptions, PreparedSpell,
    PreparedStateChange, SpellId, SpellItem, SpellItemChanges,
};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{
    CharacterPort, DialogPort, FlagStorePort, LocalizationPort, MessageParams, NotificationPort,
    RepoError, SheetPort,
};
use crate::messages;

/// A notification as the user would have seen it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWarning {
    pub key: String,
    pub params: MessageParams,
    pub message: String,
}

/// One `batch_set_prepared_state` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedBatch {
    pub character_id: CharacterId,
    pub changes: Vec<PreparedStateChange>,
    pub origin: ChangeOrigin,
}

#[derive(Debug, Clone)]
struct StoredCharacter {
    summary: CharacterSummary,
    player_owned: bool,
    classes: Vec<ClassItem>,
    spells: Vec<SpellItem>,
}

#[derive(Debug, Default)]
struct HostState {
    characters: BTreeMap<CharacterId, StoredCharacter>,
    blobs: HashMap<(CharacterId, String), Value>,
    applied_options: HashMap<CharacterId, DisplayOptions>,
    batches: Vec<RecordedBatch>,
}

impl HostState {
    fn character(&self, id: &CharacterId) -> Result<&StoredCharacter, RepoError> {
        self.characters
            .get(id)
            .ok_or_else(|| RepoError::not_found("Character", id))
    }

    fn character_mut(&mut self, id: &CharacterId) -> Result<&mut StoredCharacter, RepoError> {
        self.characters
            .get_mut(id)
            .ok_or_else(|| RepoError::not_found("Character", id))
    }
}

pub struct InMemoryHost {
    state: RwLock<HostState>,
    translations: HashMap<String, String>,
    warnings: Mutex<Vec<RecordedWarning>>,
    prompts: Mutex<VecDeque<Option<String>>>,
    confirms: Mutex<VecDeque<bool>>,
    blob_writes: AtomicUsize,
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHost {
    /// An empty host with the English message templates.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HostState::default()),
            translations: messages::ENGLISH
                .iter()
                .map(|(key, template)| (key.to_string(), template.to_string()))
                .collect(),
            warnings: Mutex::new(Vec::new()),
            prompts: Mutex::new(VecDeque::new()),
            confirms: Mutex::new(VecDeque::new()),
            blob_writes: AtomicUsize::new(0),
        }
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    pub async fn add_character(&self, summary: CharacterSummary, player_owned: bool) {
        let mut state = self.state.write().await;
        state.characters.insert(
            summary.id.clone(),
            StoredCharacter {
                summary,
                player_owned,
                classes: Vec::new(),
                spells: Vec::new(),
            },
        );
    }

    pub async fn add_class(&self, id: &CharacterId, class: ClassItem) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.character_mut(id)?.classes.push(class);
        Ok(())
    }

    /// Remove every class item, leaving the character unable to prepare spells.
    pub async fn clear_classes(&self, id: &CharacterId) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.character_mut(id)?.classes.clear();
        Ok(())
    }

    /// Embed a spell item; its owner is set to `id`.
    pub async fn add_spell(&self, id: &CharacterId, spell: SpellItem) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let character = state.character_mut(id)?;
        let spell = spell.owned_by(id.clone());
        character.spells.retain(|s| s.id != spell.id);
        character.spells.push(spell);
        Ok(())
    }

    /// Delete a spell item. Lists that mention it are not told.
    pub async fn remove_spell(
        &self,
        id: &CharacterId,
        spell_id: &SpellId,
    ) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.character_mut(id)?.spells.retain(|s| &s.id != spell_id);
        Ok(())
    }

    pub fn queue_prompt(&self, answer: Option<&str>) {
        lock(&self.prompts).push_back(answer.map(str::to_string));
    }

    pub fn queue_confirm(&self, answer: bool) {
        lock(&self.confirms).push_back(answer);
    }

    // =========================================================================
    // Item updates
    // =========================================================================

    /// Commit changes to a spell item and return the post-update snapshot.
    ///
    /// This is the host's own write path; running the preparation gate
    /// before it and the spell tracker after it is the caller's job.
    pub async fn apply_spell_change(
        &self,
        id: &CharacterId,
        spell_id: &SpellId,
        changes: &SpellItemChanges,
    ) -> Result<SpellItem, RepoError> {
        let mut state = self.state.write().await;
        let spell = state
            .character_mut(id)?
            .spells
            .iter_mut()
            .find(|s| &s.id == spell_id)
            .ok_or_else(|| RepoError::not_found("Spell", spell_id))?;
        spell.apply(changes);
        Ok(spell.clone())
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    pub async fn spell(&self, id: &CharacterId, spell_id: &SpellId) -> Option<SpellItem> {
        let state = self.state.read().await;
        state
            .characters
            .get(id)?
            .spells
            .iter()
            .find(|s| &s.id == spell_id)
            .cloned()
    }

    /// Ids of spells flagged prepared, in item order.
    pub async fn prepared_spell_ids(&self, id: &CharacterId) -> Vec<SpellId> {
        self.currently_prepared_spells(id)
            .await
            .map(|spells| spells.into_iter().map(|s| s.spell_id).collect())
            .unwrap_or_default()
    }

    pub async fn blob(&self, id: &CharacterId, key: &str) -> Option<Value> {
        let state = self.state.read().await;
        state.blobs.get(&(id.clone(), key.to_string())).cloned()
    }

    /// Number of `write_blob` calls so far.
    pub fn blob_writes(&self) -> usize {
        self.blob_writes.load(Ordering::SeqCst)
    }

    pub async fn batches(&self) -> Vec<RecordedBatch> {
        self.state.read().await.batches.clone()
    }

    pub async fn applied_options(&self, id: &CharacterId) -> Option<DisplayOptions> {
        self.state.read().await.applied_options.get(id).cloned()
    }

    pub fn warnings(&self) -> Vec<RecordedWarning> {
        lock(&self.warnings).clone()
    }

    fn render(&self, key: &str, params: &MessageParams) -> String {
        let template = self
            .translations
            .get(key)
            .map(String::as_str)
            .unwrap_or(key);
        params.iter().fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl CharacterPort for InMemoryHost {
    async fn get_character(
        &self,
        id: &CharacterId,
    ) -> Result<Option<CharacterSummary>, RepoError> {
        let state = self.state.read().await;
        Ok(state.characters.get(id).map(|c| c.summary.clone()))
    }

    async fn list_player_characters(&self) -> Result<Vec<CharacterId>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .characters
            .values()
            .filter(|c| c.player_owned)
            .map(|c| c.summary.id.clone())
            .collect())
    }

    async fn class_items(&self, id: &CharacterId) -> Result<Vec<ClassItem>, RepoError> {
        let state = self.state.read().await;
        Ok(state.character(id)?.classes.clone())
    }

    async fn currently_prepared_spells(
        &self,
        id: &CharacterId,
    ) -> Result<Vec<PreparedSpell>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .character(id)?
            .spells
            .iter()
            .filter(|s| s.is_ranked() && s.is_prepared())
            .map(|s| PreparedSpell {
                spell_id: s.id.clone(),
                source_class: s.source_class.clone(),
            })
            .collect())
    }

    async fn ranked_spell_ids(&self, id: &CharacterId) -> Result<Vec<SpellId>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .character(id)?
            .spells
            .iter()
            .filter(|s| s.is_ranked())
            .map(|s| s.id.clone())
            .collect())
    }

    async fn batch_set_prepared_state(
        &self,
        id: &CharacterId,
        changes: Vec<PreparedStateChange>,
        origin: ChangeOrigin,
    ) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let character = state.character_mut(id)?;

        // All or nothing.
        if let Some(missing) = changes
            .iter()
            .find(|c| !character.spells.iter().any(|s| s.id == c.spell_id))
        {
            return Err(RepoError::not_found("Spell", &missing.spell_id));
        }
        for change in &changes {
            if let Some(spell) = character.spells.iter_mut().find(|s| s.id == change.spell_id) {
                spell.prepared = change.new_state;
            }
        }

        state.batches.push(RecordedBatch {
            character_id: id.clone(),
            changes,
            origin,
        });
        Ok(())
    }
}

#[async_trait]
impl FlagStorePort for InMemoryHost {
    async fn read_blob(&self, id: &CharacterId, key: &str) -> Result<Option<Value>, RepoError> {
        Ok(self.blob(id, key).await)
    }

    async fn write_blob(
        &self,
        id: &CharacterId,
        key: &str,
        value: Value,
    ) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.character(id)?;
        state.blobs.insert((id.clone(), key.to_string()), value);
        self.blob_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear_blob(&self, id: &CharacterId, key: &str) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.blobs.remove(&(id.clone(), key.to_string()));
        Ok(())
    }
}

#[async_trait]
impl SheetPort for InMemoryHost {
    async fn apply_list_filter_and_sort(
        &self,
        id: &CharacterId,
        options: &DisplayOptions,
    ) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let applied = state.applied_options.entry(id.clone()).or_default();
        // Absent fields keep the widget's current value.
        if let Some(search) = &options.search {
            applied.search = Some(search.clone());
        }
        if let Some(filter) = &options.filter {
            applied.filter = Some(filter.clone());
        }
        if let Some(sort) = options.sort {
            applied.sort = Some(sort);
        }
        Ok(())
    }
}

impl NotificationPort for InMemoryHost {
    fn warn(&self, message_key: &str, params: &MessageParams) {
        let message = self.render(message_key, params);
        tracing::warn!(key = message_key, "{}", message);
        lock(&self.warnings).push(RecordedWarning {
            key: message_key.to_string(),
            params: params.clone(),
            message,
        });
    }
}

impl LocalizationPort for InMemoryHost {
    fn localize(&self, key: &str, params: &MessageParams) -> String {
        self.render(key, params)
    }
}

#[async_trait]
impl DialogPort for InMemoryHost {
    async fn prompt_text(&self, _title: &str, _placeholder: &str) -> Option<String> {
        lock(&self.prompts).pop_front().flatten()
    }

    async fn confirm(&self, _title: &str, _body: &str) -> bool {
        lock(&self.confirms).pop_front().unwrap_or(false)
    }
}
