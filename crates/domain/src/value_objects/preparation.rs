//! Prepared-state vocabulary shared by the repository, the gate and the host.

use serde::{Deserialize, Serialize};

/// A spell item's prepared flag as the host stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreparationMode {
    NotPrepared,
    Prepared,
    /// Granted by a feature; never counts against a list or a limit.
    AlwaysPrepared,
}

/// Who is asking for a prepared-state change.
///
/// Travels next to a change instead of inside it, so it can never end up in
/// the persisted item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeOrigin {
    /// A player toggling preparation on the sheet.
    #[default]
    UserInitiated,
    /// The spell list repository pushing a list's membership onto the character.
    SystemReconciliation,
}

impl ChangeOrigin {
    pub fn is_system(&self) -> bool {
        matches!(self, ChangeOrigin::SystemReconciliation)
    }
}

/// How a spell item is cast. Only `Spell` counts as a prepared-casting spell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CastingMethod {
    #[default]
    Spell,
    Pact,
    Innate,
    AtWill,
    Ritual,
    #[serde(other)]
    Other,
}

impl CastingMethod {
    pub fn is_preparable(&self) -> bool {
        matches!(self, CastingMethod::Spell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_defaults_to_user() {
        assert_eq!(ChangeOrigin::default(), ChangeOrigin::UserInitiated);
        assert!(ChangeOrigin::SystemReconciliation.is_system());
    }

    #[test]
    fn unknown_casting_methods_deserialize_as_other() {
        let method: CastingMethod = serde_json::from_str("\"psionic\"").unwrap();
        assert_eq!(method, CastingMethod::Other);
        assert!(!method.is_preparable());
    }
}
