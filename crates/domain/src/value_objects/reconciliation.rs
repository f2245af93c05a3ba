//! Diff between a character's prepared spells and a list's membership.

use std::collections::HashSet;

use crate::entities::{PreparedSpell, PreparedStateChange, SpellList};
use crate::ids::SpellId;

/// The flag flips that make a character's prepared spells match a list.
///
/// Computed from one snapshot of both sides; applying it is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationPlan {
    /// List members not currently prepared, in list order.
    pub to_prepare: Vec<SpellId>,
    /// Prepared spells not on the list, in the order the host reported them.
    pub to_unprepare: Vec<SpellId>,
    /// List members left alone because the character has no ranked spell
    /// with that id (cantrips, deleted items).
    pub skipped: Vec<SpellId>,
}

impl ReconciliationPlan {
    /// `ranked` holds every ranked spell the character owns, prepared or not.
    /// Only those are ever flipped to prepared.
    pub fn compute(
        currently_prepared: &[PreparedSpell],
        target: &SpellList,
        ranked: &[SpellId],
    ) -> Self {
        let actual: HashSet<&SpellId> = currently_prepared.iter().map(|s| &s.spell_id).collect();
        let wanted: HashSet<&SpellId> = target.spell_ids().collect();
        let owned: HashSet<&SpellId> = ranked.iter().collect();

        let (to_prepare, skipped): (Vec<SpellId>, Vec<SpellId>) = target
            .spell_ids()
            .filter(|id| !actual.contains(id))
            .cloned()
            .partition(|id| owned.contains(id));

        let mut seen = HashSet::new();
        let to_unprepare = currently_prepared
            .iter()
            .map(|s| &s.spell_id)
            .filter(|id| !wanted.contains(id) && seen.insert(*id))
            .cloned()
            .collect();

        Self {
            to_prepare,
            to_unprepare,
            skipped,
        }
    }

    /// Every spell to unprepare, e.g. when a collection is reset.
    pub fn unprepare_all(currently_prepared: &[PreparedSpell]) -> Self {
        let mut seen = HashSet::new();
        Self {
            to_prepare: Vec::new(),
            skipped: Vec::new(),
            to_unprepare: currently_prepared
                .iter()
                .filter(|s| seen.insert(&s.spell_id))
                .map(|s| s.spell_id.clone())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_prepare.is_empty() && self.to_unprepare.is_empty()
    }

    pub fn len(&self) -> usize {
        self.to_prepare.len() + self.to_unprepare.len()
    }

    /// Flatten into one batch: preparations first, then removals.
    pub fn into_changes(self) -> Vec<PreparedStateChange> {
        self.to_prepare
            .into_iter()
            .map(PreparedStateChange::prepare)
            .chain(self.to_unprepare.into_iter().map(PreparedStateChange::unprepare))
            .collect()
    }
}
