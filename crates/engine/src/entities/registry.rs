//! Registry of per-character spell list repositories.
//!
//! Owned by the embedding application. Repositories are created on first
//! use and dropped with [`SpellListRegistry::release`] when a character's
//! session ends.

use std::sync::Arc;

use dashmap::DashMap;
use spellbinder_domain::CharacterId;

use super::spell_lists::{RepositorySettings, SpellListRepository};
use crate::infrastructure::ports::HostPorts;

pub struct SpellListRegistry {
    host: HostPorts,
    settings: RepositorySettings,
    repositories: DashMap<CharacterId, Arc<SpellListRepository>>,
}

impl SpellListRegistry {
    pub fn new(host: HostPorts, settings: RepositorySettings) -> Self {
        Self {
            host,
            settings,
            repositories: DashMap::new(),
        }
    }

    /// The repository for `character_id`, created if needed. Repeated calls
    /// return the same instance so its write lock covers every caller.
    pub fn for_character(&self, character_id: &CharacterId) -> Arc<SpellListRepository> {
        let entry = self
            .repositories
            .entry(character_id.clone())
            .or_insert_with(|| {
                tracing::debug!(character_id = %character_id, "Creating spell list repository");
                Arc::new(SpellListRepository::new(
                    character_id.clone(),
                    self.host.clone(),
                    self.settings.clone(),
                ))
            });
        Arc::clone(entry.value())
    }

    /// Forget a character's repository. Returns whether one existed.
    pub fn release(&self, character_id: &CharacterId) -> bool {
        self.repositories.remove(character_id).is_some()
    }

    pub fn clear(&self) {
        self.repositories.clear();
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    pub fn host(&self) -> &HostPorts {
        &self.host
    }
}
