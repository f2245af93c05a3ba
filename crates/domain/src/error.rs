//! Unified error types for the domain layer
//!
//! `DomainError` covers value parsing and validation. `SpellListError` covers
//! violations of the spell list collection's invariants.

use thiserror::Error;

use crate::ids::SpellListId;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this in `FromStr` implementations when the input string
    /// doesn't match any known variant.
    ///
    /// # Example
    /// ```ignore
    /// impl FromStr for SortMode {
    ///     type Err = DomainError;
    ///     fn from_str(s: &str) -> Result<Self, Self::Err> {
    ///         match s {
    ///             "alpha" => Ok(Self::Alpha),
    ///             _ => Err(DomainError::parse(format!("Unknown sort mode: {}", s))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Errors raised by [`SpellListCollection`](crate::aggregates::SpellListCollection)
/// mutations. A failed mutation leaves the collection untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpellListError {
    #[error("Spell list not found: {0}")]
    NotFound(SpellListId),

    /// No list is flagged active. Correct writes never produce this state.
    #[error("No active spell list")]
    NoActiveList,

    #[error("Cannot delete the default spell list")]
    CannotDeleteDefault,

    #[error("Duplicate spell list id: {0}")]
    DuplicateId(SpellListId),
}
