//! Spell list use cases driven by the sheet UI.

use std::sync::Arc;

mod display_options;
mod management;

pub use display_options::DisplayOptionsOps;
pub use management::{ResetReport, SpellListManagement};

/// Container for spell list use cases.
pub struct SpellListUseCases {
    pub display: Arc<DisplayOptionsOps>,
    pub management: Arc<SpellListManagement>,
}

impl SpellListUseCases {
    pub fn new(display: Arc<DisplayOptionsOps>, management: Arc<SpellListManagement>) -> Self {
        Self {
            display,
            management,
        }
    }
}
