//! Shared types for port traits.

use std::collections::BTreeMap;

/// Named substitutions for a localized message, e.g. `actorName`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageParams(BTreeMap<String, String>);

impl MessageParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
