// crates/contract-blueprint-core/src/core/identifiers.rs
// ============================================================================
// Module: Blueprint Identifiers
// Description: Opaque definition identifiers used as registry keys.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Definition identifiers key the blueprint definition registry and are the
//! targets of every `$ref` emitted in a blueprint. They are opaque strings;
//! uniqueness is enforced by the derivation engine, not by this wrapper.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// JSON pointer prefix for definition references.
pub const DEFINITIONS_POINTER_PREFIX: &str = "#/definitions/";

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Identifier of one registry-stored schema definition.
///
/// # Invariants
/// - Ordering is lexicographic on the raw string; registries rely on it for
///   deterministic output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionId(String);

impl DefinitionId {
    /// Creates a new definition identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `$ref` pointer targeting this definition.
    ///
    /// The identifier is escaped as a JSON pointer token (RFC 6901), so ids
    /// containing `/` or `~` still address a single `definitions` entry.
    #[must_use]
    pub fn ref_pointer(&self) -> String {
        let mut pointer = String::with_capacity(DEFINITIONS_POINTER_PREFIX.len() + self.0.len());
        pointer.push_str(DEFINITIONS_POINTER_PREFIX);
        for ch in self.0.chars() {
            match ch {
                '~' => pointer.push_str("~0"),
                '/' => pointer.push_str("~1"),
                other => pointer.push(other),
            }
        }
        pointer
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for DefinitionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DefinitionId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
