//! Spellbinder domain: spell lists, their collection invariants and the pure
//! algorithms behind activation and prepared-spell limits.
//!
//! Nothing in this crate performs I/O. The engine crate loads a
//! [`SpellListCollection`], mutates it through these types and writes it back.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{ListRemoval, Placement, SpellListCollection};

pub use entities::{
    CharacterSummary, ClassItem, ItemKind, NewSpellList, PreparedSpell, PreparedStateChange,
    SpellItem, SpellItemChanges, SpellList, SpellListEntry, SpellListPatch,
};

pub use error::{DomainError, SpellListError};

pub use ids::{CharacterId, ClassIdentifier, SpellId, SpellListId, DEFAULT_SPELL_LIST_ID};

pub use value_objects::{
    CapacityProfile, CapacityVerdict, CastingMethod, ChangeOrigin, DisplayOptions, FilterCategory,
    PreparationMode, ReconciliationPlan, SortMode,
};
