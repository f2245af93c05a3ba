//! Spell list entity and the inputs used to create or change one.

use serde::{Deserialize, Serialize};

use crate::ids::{ClassIdentifier, SpellId, SpellListId};
use crate::value_objects::DisplayOptions;

/// One prepared spell on a list, and the class slot it counts against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellListEntry {
    pub id: SpellId,
    pub source_class: ClassIdentifier,
}

impl SpellListEntry {
    pub fn new(id: impl Into<SpellId>, source_class: impl Into<ClassIdentifier>) -> Self {
        Self {
            id: id.into(),
            source_class: source_class.into(),
        }
    }
}

/// A named, user-curated subset of a character's spells.
///
/// `spells` is unique by entry id and keeps insertion order for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellList {
    pub id: SpellListId,
    pub name: String,
    pub is_active: bool,
    #[serde(default)]
    pub spells: Vec<SpellListEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
}

impl SpellList {
    /// The reserved, undeletable list every spellcaster starts with.
    pub fn default_list(name: impl Into<String>) -> Self {
        Self {
            id: SpellListId::default_list(),
            name: name.into(),
            is_active: true,
            spells: Vec::new(),
            display_options: None,
        }
    }

    pub fn is_default(&self) -> bool {
        self.id.is_default()
    }

    pub fn contains(&self, spell_id: &SpellId) -> bool {
        self.spells.iter().any(|entry| &entry.id == spell_id)
    }

    /// Number of entries counting against `class`.
    pub fn count_for_class(&self, class: &ClassIdentifier) -> usize {
        self.spells
            .iter()
            .filter(|entry| &entry.source_class == class)
            .count()
    }

    pub fn spell_ids(&self) -> impl Iterator<Item = &SpellId> {
        self.spells.iter().map(|entry| &entry.id)
    }

    /// Append entries whose ids are not yet present. Returns how many were added.
    pub fn add_entries(&mut self, entries: impl IntoIterator<Item = SpellListEntry>) -> usize {
        let before = self.spells.len();
        for entry in entries {
            if !self.contains(&entry.id) {
                self.spells.push(entry);
            }
        }
        self.spells.len() - before
    }

    /// Remove the entry for `spell_id`. Returns whether one was removed.
    pub fn remove_entry(&mut self, spell_id: &SpellId) -> bool {
        match self.spells.iter().position(|entry| &entry.id == spell_id) {
            Some(index) => {
                self.spells.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Caller-supplied fields for a new list.
///
/// The id and active flag are never caller-controlled: new lists get a
/// fresh id and start inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSpellList {
    pub name: String,
    pub spells: Vec<SpellListEntry>,
    /// `None` means the new-list defaults.
    pub display_options: Option<DisplayOptions>,
}

impl NewSpellList {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_spells(mut self, spells: Vec<SpellListEntry>) -> Self {
        self.spells = spells;
        self
    }

    pub fn with_display_options(mut self, options: DisplayOptions) -> Self {
        self.display_options = Some(options);
        self
    }

    /// Build the list under `id`, dropping duplicate entries.
    pub fn into_list(self, id: SpellListId) -> SpellList {
        let mut list = SpellList {
            id,
            name: self.name,
            is_active: false,
            spells: Vec::new(),
            display_options: Some(
                self.display_options
                    .unwrap_or_else(DisplayOptions::new_list_defaults),
            ),
        };
        list.add_entries(self.spells);
        list
    }
}

/// A shallow change to an existing list. Absent fields are left as they are.
///
/// Activation is not patchable; it goes through the collection's `activate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellListPatch {
    pub id: SpellListId,
    pub name: Option<String>,
    pub spells: Option<Vec<SpellListEntry>>,
    pub display_options: Option<DisplayOptions>,
}

impl SpellListPatch {
    pub fn new(id: SpellListId) -> Self {
        Self {
            id,
            name: None,
            spells: None,
            display_options: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn spells(mut self, spells: Vec<SpellListEntry>) -> Self {
        self.spells = Some(spells);
        self
    }

    pub fn display_options(mut self, options: DisplayOptions) -> Self {
        self.display_options = Some(options);
        self
    }

    pub fn apply_to(self, list: &mut SpellList) {
        if let Some(name) = self.name {
            list.name = name;
        }
        if let Some(spells) = self.spells {
            list.spells.clear();
            list.add_entries(spells);
        }
        if let Some(options) = self.display_options {
            list.display_options = Some(options);
        }
    }
}
