//! SpellListCollection aggregate - every spell list of one character
//!
//! # Invariants
//!
//! - At most one list has `is_active = true`. Every mutation that changes
//!   activation keeps exactly one active list when one existed before.
//! - List ids are unique within the collection.
//! - The default list (id `"default"`) can never be removed.
//! - A failed mutation leaves the collection unchanged.
//!
//! The collection is persisted whole: callers load it, mutate it in memory and
//! write all of it back.

use serde::{Deserialize, Serialize};

use crate::entities::{SpellList, SpellListEntry, SpellListPatch};
use crate::error::SpellListError;
use crate::ids::{SpellId, SpellListId};

/// Where a moved list lands relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Placement {
    Before,
    After,
}

/// Outcome of removing a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRemoval {
    pub removed: SpellList,
    /// The removed list was active, so the default list took over.
    pub activated_default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellListCollection {
    lists: Vec<SpellList>,
}

impl SpellListCollection {
    pub fn new(lists: Vec<SpellList>) -> Self {
        Self { lists }
    }

    /// A fresh collection: just the active, empty default list.
    pub fn seeded(default_name: impl Into<String>) -> Self {
        Self {
            lists: vec![SpellList::default_list(default_name)],
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn lists(&self) -> &[SpellList] {
        &self.lists
    }

    pub fn into_lists(self) -> Vec<SpellList> {
        self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn get(&self, id: &SpellListId) -> Option<&SpellList> {
        self.lists.iter().find(|list| &list.id == id)
    }

    fn position(&self, id: &SpellListId) -> Option<usize> {
        self.lists.iter().position(|list| &list.id == id)
    }

    pub fn active(&self) -> Result<&SpellList, SpellListError> {
        self.lists
            .iter()
            .find(|list| list.is_active)
            .ok_or(SpellListError::NoActiveList)
    }

    fn active_mut(&mut self) -> Result<&mut SpellList, SpellListError> {
        self.lists
            .iter_mut()
            .find(|list| list.is_active)
            .ok_or(SpellListError::NoActiveList)
    }

    pub fn active_count(&self) -> usize {
        self.lists.iter().filter(|list| list.is_active).count()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append a list. The caller is responsible for its active flag.
    pub fn push(&mut self, list: SpellList) -> Result<(), SpellListError> {
        if self.get(&list.id).is_some() {
            return Err(SpellListError::DuplicateId(list.id));
        }
        self.lists.push(list);
        Ok(())
    }

    /// Shallow-merge `patch` into its list and return the updated list.
    pub fn update(&mut self, patch: SpellListPatch) -> Result<&SpellList, SpellListError> {
        let index = self
            .position(&patch.id)
            .ok_or_else(|| SpellListError::NotFound(patch.id.clone()))?;
        patch.apply_to(&mut self.lists[index]);
        Ok(&self.lists[index])
    }

    /// Make `id` the only active list.
    ///
    /// An unknown id fails before any flag is touched, so the collection is
    /// never left without an active list.
    pub fn activate(&mut self, id: &SpellListId) -> Result<&SpellList, SpellListError> {
        let index = self
            .position(id)
            .ok_or_else(|| SpellListError::NotFound(id.clone()))?;
        for (i, list) in self.lists.iter_mut().enumerate() {
            list.is_active = i == index;
        }
        Ok(&self.lists[index])
    }

    /// Remove a list. Removing the active list hands activation to the
    /// default list in the same mutation.
    pub fn remove(&mut self, id: &SpellListId) -> Result<ListRemoval, SpellListError> {
        if id.is_default() {
            return Err(SpellListError::CannotDeleteDefault);
        }

        let index = self
            .position(id)
            .ok_or_else(|| SpellListError::NotFound(id.clone()))?;
        let default_id = SpellListId::default_list();
        let was_active = self.lists[index].is_active;
        if was_active && self.get(&default_id).is_none() {
            return Err(SpellListError::NotFound(default_id));
        }

        let removed = self.lists.remove(index);
        if was_active {
            self.activate(&default_id)?;
        }

        Ok(ListRemoval {
            removed,
            activated_default: was_active,
        })
    }

    /// Move `source` directly before or after `target`.
    ///
    /// Returns `false` (and changes nothing) when either id is missing, the
    /// ids are equal, or `source` already sits in that position.
    pub fn move_relative(
        &mut self,
        source: &SpellListId,
        placement: Placement,
        target: &SpellListId,
    ) -> bool {
        if source == target {
            return false;
        }
        let (Some(source_index), Some(_)) = (self.position(source), self.position(target)) else {
            return false;
        };

        let mut reordered = self.lists.clone();
        let moved = reordered.remove(source_index);
        let Some(target_index) = reordered.iter().position(|list| &list.id == target) else {
            return false;
        };
        let insert_at = match placement {
            Placement::Before => target_index,
            Placement::After => target_index + 1,
        };
        reordered.insert(insert_at, moved);

        if reordered == self.lists {
            return false;
        }
        self.lists = reordered;
        true
    }

    /// Add entries to the active list, skipping ids already on it.
    /// Returns how many were added.
    pub fn add_to_active(
        &mut self,
        entries: impl IntoIterator<Item = SpellListEntry>,
    ) -> Result<usize, SpellListError> {
        Ok(self.active_mut()?.add_entries(entries))
    }

    /// Remove a spell from the active list only.
    pub fn remove_from_active(&mut self, spell_id: &SpellId) -> Result<bool, SpellListError> {
        Ok(self.active_mut()?.remove_entry(spell_id))
    }

    /// Remove a spell from every list. Returns the ids of the lists that changed.
    pub fn remove_from_all(&mut self, spell_id: &SpellId) -> Vec<SpellListId> {
        self.lists
            .iter_mut()
            .filter_map(|list| list.remove_entry(spell_id).then(|| list.id.clone()))
            .collect()
    }
}
