//! Read-only snapshots of host documents.
//!
//! The character-sheet host owns characters and their items; these types are
//! the slices of them the spell list engine reads and the changes it asks for.

use serde::{Deserialize, Serialize};

use crate::ids::{CharacterId, ClassIdentifier, SpellId};
use crate::value_objects::{CastingMethod, PreparationMode};

/// The bits of a character record needed for lookups and messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSummary {
    pub id: CharacterId,
    pub name: String,
}

impl CharacterSummary {
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A class item on a character. `max_prepared` is absent for classes that
/// don't prepare spells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassItem {
    pub identifier: ClassIdentifier,
    pub name: String,
    #[serde(default)]
    pub max_prepared: Option<u32>,
}

impl ClassItem {
    pub fn new(identifier: impl Into<ClassIdentifier>, name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            max_prepared: None,
        }
    }

    pub fn with_max_prepared(mut self, max: u32) -> Self {
        self.max_prepared = Some(max);
        self
    }
}

/// A ranked spell currently flagged prepared on a character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedSpell {
    pub spell_id: SpellId,
    pub source_class: ClassIdentifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Spell,
    Class,
    #[serde(other)]
    Other,
}

/// A spell item as it looks right before (or right after) an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellItem {
    pub id: SpellId,
    pub name: String,
    pub kind: ItemKind,
    /// 0 for cantrips.
    pub level: u8,
    #[serde(default)]
    pub method: CastingMethod,
    pub prepared: PreparationMode,
    pub source_class: ClassIdentifier,
    /// The owning character, if the item is embedded in one.
    #[serde(default)]
    pub owner: Option<CharacterId>,
}

impl SpellItem {
    pub fn new(
        id: impl Into<SpellId>,
        name: impl Into<String>,
        level: u8,
        source_class: impl Into<ClassIdentifier>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Spell,
            level,
            method: CastingMethod::Spell,
            prepared: PreparationMode::NotPrepared,
            source_class: source_class.into(),
            owner: None,
        }
    }

    pub fn owned_by(mut self, owner: impl Into<CharacterId>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_prepared(mut self, prepared: PreparationMode) -> Self {
        self.prepared = prepared;
        self
    }

    pub fn with_method(mut self, method: CastingMethod) -> Self {
        self.method = method;
        self
    }

    pub fn is_spell(&self) -> bool {
        matches!(self.kind, ItemKind::Spell)
    }

    /// A spell of level 1 or higher. Cantrips are exempt from every list rule.
    pub fn is_ranked(&self) -> bool {
        self.is_spell() && self.level > 0
    }

    /// Ranked, cast with the prepared-casting method.
    pub fn counts_as_prepared_spell(&self) -> bool {
        self.is_ranked() && self.method.is_preparable()
    }

    pub fn is_prepared(&self) -> bool {
        matches!(self.prepared, PreparationMode::Prepared)
    }

    /// Apply committed changes to this snapshot.
    pub fn apply(&mut self, changes: &SpellItemChanges) {
        if let Some(prepared) = changes.prepared {
            self.prepared = prepared;
        }
        if let Some(level) = changes.level {
            self.level = level;
        }
        if let Some(method) = changes.method {
            self.method = method;
        }
    }
}

/// Fields of a spell item an update touches. `None` means untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellItemChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepared: Option<PreparationMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<CastingMethod>,
}

impl SpellItemChanges {
    pub fn prepared(mode: PreparationMode) -> Self {
        Self {
            prepared: Some(mode),
            ..Self::default()
        }
    }

    pub fn touches_prepared_state(&self) -> bool {
        self.prepared.is_some()
    }

    /// Level or casting method changed, so the spell may stop (or start)
    /// counting as a prepared spell.
    pub fn changes_spell_type(&self) -> bool {
        self.level.is_some() || self.method.is_some()
    }
}

/// One flag flip requested from the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedStateChange {
    pub spell_id: SpellId,
    pub new_state: PreparationMode,
}

impl PreparedStateChange {
    pub fn prepare(spell_id: SpellId) -> Self {
        Self {
            spell_id,
            new_state: PreparationMode::Prepared,
        }
    }

    pub fn unprepare(spell_id: SpellId) -> Self {
        Self {
            spell_id,
            new_state: PreparationMode::NotPrepared,
        }
    }
}
