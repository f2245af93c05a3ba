//! Preparation gate.
//!
//! Runs before the host commits a change to a spell's prepared state and
//! vetoes changes that would exceed the character's prepared-spell limits.
//! Missing data never blocks play: anything the gate cannot resolve is
//! allowed with a warning in the log.

use std::sync::Arc;

use spellbinder_domain::{
    CapacityProfile, CapacityVerdict, ChangeOrigin, CharacterSummary, ClassIdentifier, ClassItem,
    PreparationMode, SpellItem, SpellItemChanges,
};

use crate::entities::SpellListRegistry;
use crate::infrastructure::ports::MessageParams;
use crate::messages;

/// A change the host is about to commit, and who asked for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProposedSpellChange {
    pub changes: SpellItemChanges,
    pub origin: ChangeOrigin,
}

impl ProposedSpellChange {
    pub fn user(changes: SpellItemChanges) -> Self {
        Self {
            changes,
            origin: ChangeOrigin::UserInitiated,
        }
    }

    pub fn system(changes: SpellItemChanges) -> Self {
        Self {
            changes,
            origin: ChangeOrigin::SystemReconciliation,
        }
    }
}

/// Which rule decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateReason {
    /// Not a ranked spell, or the prepared state is untouched.
    NotApplicable,
    /// Authored by list synchronisation.
    SystemReconciliation,
    /// Unpreparing or marking always-prepared is never limited.
    NotBecomingPrepared,
    /// Character or active list could not be resolved; allowed anyway.
    Unresolved,
    /// The spell is already on the active list.
    AlreadyListed,
    ClassLimitReached(ClassIdentifier),
    TotalLimitReached,
    WithinLimits,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    pub allow: bool,
    pub reason: GateReason,
}

impl GateDecision {
    fn allow(reason: GateReason) -> Self {
        Self {
            allow: true,
            reason,
        }
    }

    fn veto(reason: GateReason) -> Self {
        Self {
            allow: false,
            reason,
        }
    }
}

pub struct PreparationGate {
    registry: Arc<SpellListRegistry>,
}

impl PreparationGate {
    pub fn new(registry: Arc<SpellListRegistry>) -> Self {
        Self { registry }
    }

    /// Decide whether `proposed` may be applied to `spell` (its pre-update
    /// snapshot). The first matching rule wins.
    pub async fn check(&self, spell: &SpellItem, proposed: &ProposedSpellChange) -> GateDecision {
        if !spell.is_ranked() || !proposed.changes.touches_prepared_state() {
            return GateDecision::allow(GateReason::NotApplicable);
        }

        if proposed.origin.is_system() {
            return GateDecision::allow(GateReason::SystemReconciliation);
        }

        if proposed.changes.prepared != Some(PreparationMode::Prepared) {
            return GateDecision::allow(GateReason::NotBecomingPrepared);
        }

        let Some(owner) = spell.owner.as_ref() else {
            tracing::warn!(
                spell_id = %spell.id,
                "Spell has no owning character, allowing preparation"
            );
            return GateDecision::allow(GateReason::Unresolved);
        };

        let repo = self.registry.for_character(owner);
        let character = match repo.character().await {
            Ok(character) => character,
            Err(e) => {
                tracing::warn!(
                    character_id = %owner,
                    error = %e,
                    "Could not resolve character, allowing preparation"
                );
                return GateDecision::allow(GateReason::Unresolved);
            }
        };
        let active = match repo.get_active().await {
            Ok(active) => active,
            Err(e) => {
                tracing::warn!(
                    character_id = %owner,
                    error = %e,
                    "Could not resolve active spell list, allowing preparation"
                );
                return GateDecision::allow(GateReason::Unresolved);
            }
        };

        if active.contains(&spell.id) {
            return GateDecision::allow(GateReason::AlreadyListed);
        }

        let classes = match repo.class_items().await {
            Ok(classes) => classes,
            Err(e) => {
                tracing::warn!(
                    character_id = %owner,
                    error = %e,
                    "Could not read class items, allowing preparation"
                );
                return GateDecision::allow(GateReason::Unresolved);
            }
        };

        match CapacityProfile::from_class_items(&classes).evaluate(&active) {
            CapacityVerdict::Available => GateDecision::allow(GateReason::WithinLimits),
            CapacityVerdict::ClassFull(class) => {
                self.warn_class_full(&character, &classes, &class);
                tracing::debug!(
                    character_id = %owner,
                    spell_id = %spell.id,
                    class = %class,
                    "Class prepared-spell limit reached"
                );
                GateDecision::veto(GateReason::ClassLimitReached(class))
            }
            CapacityVerdict::TotalFull => {
                let params =
                    MessageParams::new().with(messages::PARAM_ACTOR_NAME, character.name.as_str());
                self.registry
                    .host()
                    .notifications
                    .warn(messages::WARN_EXCEEDS_GENERIC, &params);
                tracing::debug!(
                    character_id = %owner,
                    spell_id = %spell.id,
                    "Total prepared-spell limit reached"
                );
                GateDecision::veto(GateReason::TotalLimitReached)
            }
        }
    }

    fn warn_class_full(
        &self,
        character: &CharacterSummary,
        classes: &[ClassItem],
        class: &ClassIdentifier,
    ) {
        let params =
            MessageParams::new().with(messages::PARAM_ACTOR_NAME, character.name.as_str());
        let notifications = &self.registry.host().notifications;
        match classes.iter().find(|c| &c.identifier == class) {
            Some(item) => notifications.warn(
                messages::WARN_EXCEEDS_CLASS,
                &params.with(messages::PARAM_CLASS_NAME, item.name.as_str()),
            ),
            None => notifications.warn(messages::WARN_EXCEEDS_UNKNOWN_CLASS, &params),
        }
    }
}
