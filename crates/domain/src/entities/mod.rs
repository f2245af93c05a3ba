//! Entities and host document snapshots.

pub mod character;
pub mod spell_list;

pub use character::{
    CharacterSummary, ClassItem, ItemKind, PreparedSpell, PreparedStateChange, SpellItem,
    SpellItemChanges,
};
pub use spell_list::{NewSpellList, SpellList, SpellListEntry, SpellListPatch};
