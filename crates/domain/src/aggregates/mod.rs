//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns outcome values from mutations instead of firing callbacks

pub mod spell_list_collection;

pub use spell_list_collection::{ListRemoval, Placement, SpellListCollection};
