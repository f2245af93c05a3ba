//! Spellbinder engine library.
//!
//! Per-character spell lists kept in sync with the character's prepared
//! spells, plus the gate that enforces prepared-spell limits.
//!
//! ## Structure
//!
//! - `entities/` - Spell list repository and its per-character registry
//! - `use_cases/` - Preparation gate, spell tracking and list management
//! - `infrastructure/` - Host ports, reference adapters, config and logging
//! - `app` - Application composition

pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod messages;
pub mod use_cases;

/// End-to-end scenarios against the in-memory host.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
