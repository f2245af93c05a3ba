//! Entity modules - Domain capability encapsulation.
//!
//! They depend on host ports and provide the building blocks for use cases.

pub mod registry;
pub mod spell_lists;

pub use registry::SpellListRegistry;
pub use spell_lists::{RepositorySettings, ResetOutcome, SpellListRepoError, SpellListRepository};
