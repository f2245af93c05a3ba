use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Host-assigned identifiers are opaque strings; we only refuse blank ones
/// when parsing untrusted input.
macro_rules! define_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Parse an identifier, rejecting empty or whitespace-only input.
            pub fn parse(value: &str) -> Result<Self, DomainError> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(concat!($label, " cannot be empty")));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

// Host document IDs
define_id!(CharacterId, "Character ID");
define_id!(SpellId, "Spell ID");

// Class identifier (e.g. "wizard"), the key prepared-spell maxima are stored under
define_id!(ClassIdentifier, "Class identifier");

// Spell list IDs
define_id!(SpellListId, "Spell list ID");

/// Reserved ID of the list every spellcaster starts with.
pub const DEFAULT_SPELL_LIST_ID: &str = "default";

impl SpellListId {
    /// The reserved ID of the default list.
    pub fn default_list() -> Self {
        Self::new(DEFAULT_SPELL_LIST_ID)
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_SPELL_LIST_ID
    }

    /// Derive a fresh list ID from a random UUID.
    ///
    /// Uses the 32-character simple form so IDs stay attribute-safe in the host.
    pub fn generate(seed: Uuid) -> Self {
        Self(seed.simple().to_string())
    }
}
