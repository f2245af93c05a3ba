//! Prepared-spell capacity derived from a character's class items.

use std::collections::BTreeMap;

use crate::entities::{ClassItem, SpellList};
use crate::ids::ClassIdentifier;

/// Per-class prepared-spell maxima. Derived at query time, never persisted.
///
/// Classes without a positive maximum don't appear; a character whose profile
/// is empty cannot prepare spells at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityProfile {
    maxima: BTreeMap<ClassIdentifier, u32>,
}

/// Result of checking a list against a profile before one more spell is added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacityVerdict {
    /// Room for at least one more spell.
    Available,
    /// This class already has as many entries as its maximum.
    ClassFull(ClassIdentifier),
    /// The list holds as many entries as all class maxima together.
    TotalFull,
}

impl CapacityProfile {
    pub fn from_class_items(classes: &[ClassItem]) -> Self {
        let maxima = classes
            .iter()
            .filter_map(|class| match class.max_prepared {
                Some(max) if max > 0 => Some((class.identifier.clone(), max)),
                _ => None,
            })
            .collect();
        Self { maxima }
    }

    pub fn can_prepare_spells(&self) -> bool {
        !self.maxima.is_empty()
    }

    pub fn max_for(&self, class: &ClassIdentifier) -> Option<u32> {
        self.maxima.get(class).copied()
    }

    /// Total limit: the sum of every class maximum.
    pub fn total(&self) -> u32 {
        self.maxima
            .values()
            .fold(0u32, |sum, max| sum.saturating_add(*max))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClassIdentifier, u32)> {
        self.maxima.iter().map(|(class, max)| (class, *max))
    }

    /// Check every class in order, then the total. The first exhausted
    /// limit wins.
    pub fn evaluate(&self, list: &SpellList) -> CapacityVerdict {
        for (class, max) in self.iter() {
            if list.count_for_class(class) >= max as usize {
                return CapacityVerdict::ClassFull(class.clone());
            }
        }

        if list.spells.len() >= self.total() as usize {
            return CapacityVerdict::TotalFull;
        }

        CapacityVerdict::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SpellListEntry;

    fn classes() -> Vec<ClassItem> {
        vec![
            ClassItem::new("wizard", "Wizard").with_max_prepared(2),
            ClassItem::new("cleric", "Cleric").with_max_prepared(1),
            ClassItem::new("fighter", "Fighter"),
            ClassItem::new("warlock", "Warlock").with_max_prepared(0),
        ]
    }

    fn list_with(entries: &[(&str, &str)]) -> SpellList {
        let mut list = SpellList::default_list("Default");
        list.add_entries(entries.iter().map(|(id, class)| SpellListEntry::new(*id, *class)));
        list
    }

    #[test]
    fn only_positive_maxima_count() {
        let profile = CapacityProfile::from_class_items(&classes());
        assert!(profile.can_prepare_spells());
        assert_eq!(profile.total(), 3);
        assert_eq!(profile.max_for(&ClassIdentifier::new("fighter")), None);
        assert_eq!(profile.max_for(&ClassIdentifier::new("warlock")), None);
    }

    #[test]
    fn no_preparing_classes_means_cannot_prepare() {
        let profile = CapacityProfile::from_class_items(&[ClassItem::new("fighter", "Fighter")]);
        assert!(!profile.can_prepare_spells());
    }

    #[test]
    fn full_class_is_reported() {
        let profile = CapacityProfile::from_class_items(&classes());
        let list = list_with(&[("a", "wizard"), ("b", "wizard")]);
        assert_eq!(
            profile.evaluate(&list),
            CapacityVerdict::ClassFull(ClassIdentifier::new("wizard"))
        );
    }

    #[test]
    fn room_left_is_available() {
        let profile = CapacityProfile::from_class_items(&classes());
        let list = list_with(&[("a", "wizard")]);
        assert_eq!(profile.evaluate(&list), CapacityVerdict::Available);
    }

    #[test]
    fn entries_from_unknown_classes_fill_the_total() {
        let classes = [ClassItem::new("wizard", "Wizard").with_max_prepared(2)];
        let profile = CapacityProfile::from_class_items(&classes);
        let list = list_with(&[("a", "druid"), ("b", "druid")]);
        assert_eq!(profile.evaluate(&list), CapacityVerdict::TotalFull);
    }
}
