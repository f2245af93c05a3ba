//! End-to-end spell list scenarios.
//!
//! These tests wire the App over [`InMemoryHost`] the way a sheet host
//! would: the preparation gate runs before every spell item update and the
//! spell tracker after it.

mod e2e_helpers;
mod spell_list_scenarios;

pub use e2e_helpers::*;
