//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate the per-character spell list repositories.

pub mod preparation;
pub mod spell_lists;

// Re-export main types
pub use preparation::PreparationUseCases;
pub use spell_lists::SpellListUseCases;
