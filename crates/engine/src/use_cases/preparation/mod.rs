//! Hooks around the host's spell item updates.
//!
//! The host calls [`PreparationGate::check`] before committing a change to a
//! spell and [`SpellTracker::on_spell_updated`] after it.

use std::sync::Arc;

mod gate;
mod tracking;

pub use gate::{GateDecision, GateReason, PreparationGate, ProposedSpellChange};
pub use tracking::{SpellTracker, TrackingOutcome};

/// Container for preparation use cases.
pub struct PreparationUseCases {
    pub gate: Arc<PreparationGate>,
    pub tracker: Arc<SpellTracker>,
}

impl PreparationUseCases {
    pub fn new(gate: Arc<PreparationGate>, tracker: Arc<SpellTracker>) -> Self {
        Self { gate, tracker }
    }
}
