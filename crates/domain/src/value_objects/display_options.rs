//! Per-list preferences for the sheet's spell filter widget.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A toggleable property filter on the spells tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterCategory {
    Action,
    Bonus,
    Reaction,
    Concentration,
    Ritual,
    Prepared,
}

impl FilterCategory {
    pub const ALL: [FilterCategory; 6] = [
        FilterCategory::Action,
        FilterCategory::Bonus,
        FilterCategory::Reaction,
        FilterCategory::Concentration,
        FilterCategory::Ritual,
        FilterCategory::Prepared,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterCategory::Action => "action",
            FilterCategory::Bonus => "bonus",
            FilterCategory::Reaction => "reaction",
            FilterCategory::Concentration => "concentration",
            FilterCategory::Ritual => "ritual",
            FilterCategory::Prepared => "prepared",
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| DomainError::parse(format!("Unknown filter category: {}", s)))
    }
}

/// Sort order of the spells tab. Cycling walks `ALL` in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    Alpha,
    Priority,
    Manual,
}

impl SortMode {
    pub const ALL: [SortMode; 3] = [SortMode::Alpha, SortMode::Priority, SortMode::Manual];

    pub fn first() -> Self {
        Self::ALL[0]
    }

    /// The mode after this one, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Alpha => "alpha",
            SortMode::Priority => "priority",
            SortMode::Manual => "manual",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s.trim())
            .ok_or_else(|| DomainError::parse(format!("Unknown sort mode: {}", s)))
    }
}

/// Search text, filter set and sort mode remembered by a spell list.
///
/// Every field is optional; an absent field leaves the widget's current
/// value alone when the options are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<BTreeSet<FilterCategory>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortMode>,
}

impl DisplayOptions {
    /// Options given to newly created lists: show prepared spells by priority.
    pub fn new_list_defaults() -> Self {
        Self {
            search: None,
            filter: Some(BTreeSet::from([FilterCategory::Prepared])),
            sort: Some(SortMode::Priority),
        }
    }

    /// Options after "clear filters": empty search, no filters, first sort mode.
    pub fn cleared() -> Self {
        Self {
            search: Some(String::new()),
            filter: Some(BTreeSet::new()),
            sort: Some(SortMode::first()),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Add the category if absent, remove it if present.
    pub fn toggled(mut self, category: FilterCategory) -> Self {
        let filter = self.filter.get_or_insert_with(BTreeSet::new);
        if !filter.remove(&category) {
            filter.insert(category);
        }
        self
    }

    /// Advance the sort mode; an unset mode counts as the first one.
    pub fn with_next_sort(self) -> Self {
        let next = self.sort.unwrap_or_else(SortMode::first).next();
        self.with_sort(next)
    }
}
