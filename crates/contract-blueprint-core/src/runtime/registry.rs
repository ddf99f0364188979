// crates/contract-blueprint-core/src/runtime/registry.rs
// ============================================================================
// Module: Definition Registry
// Description: Incrementally built map from definition id to schema node.
// Purpose: Deduplicate definitions and verify reference closure on finalize.
// Dependencies: crate::core::{blueprint, error, identifiers, schema, types}
// ============================================================================

//! ## Overview
//! The registry is owned by exactly one derivation session. Registering the
//! same node twice under one id is a no-op, so re-entrant derivation is safe;
//! registering a different node under a taken id is a collision.
//! [`DefinitionRegistry::finalize`] re-checks that every `$ref` resolves
//! before handing the map to assembly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::blueprint::Definitions;
use crate::core::error::BlueprintError;
use crate::core::identifiers::DefinitionId;
use crate::core::schema::SchemaNode;
use crate::core::types::TypeKey;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Outcome of a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The id was new and the node was stored.
    Inserted,
    /// An equal node was already stored under the id.
    Unchanged,
}

/// Stored definition with the type that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RegistryEntry {
    /// Type that registered the definition.
    origin: TypeKey,
    /// Finished schema node.
    node: SchemaNode,
}

/// Mapping from definition identifier to schema node.
///
/// # Invariants
/// - Each id maps to exactly one node; a conflicting insert is rejected.
/// - Iteration and finalization are ordered by id.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
    /// Registered definitions keyed by id.
    entries: BTreeMap<DefinitionId, RegistryEntry>,
}

impl DefinitionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `node` under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::DuplicateDefinitionId`] when `id` already
    /// holds a different node.
    pub fn register(
        &mut self,
        id: DefinitionId,
        origin: &TypeKey,
        node: SchemaNode,
    ) -> Result<Registration, BlueprintError> {
        if let Some(existing) = self.entries.get(&id) {
            if existing.node == node {
                return Ok(Registration::Unchanged);
            }
            return Err(BlueprintError::DuplicateDefinitionId {
                existing: existing.origin.to_string(),
                incoming: origin.to_string(),
                id,
            });
        }
        self.entries.insert(id, RegistryEntry {
            origin: origin.clone(),
            node,
        });
        Ok(Registration::Inserted)
    }

    /// Returns the node registered under `id`.
    #[must_use]
    pub fn lookup(&self, id: &DefinitionId) -> Option<&SchemaNode> {
        self.entries.get(id).map(|entry| &entry.node)
    }

    /// Returns `true` when `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &DefinitionId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the registry into an ordered definition map.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::DanglingReference`] for the first `$ref`
    /// (in id order) whose target is not registered.
    pub fn finalize(self) -> Result<Definitions, BlueprintError> {
        for (id, entry) in &self.entries {
            if let Some(target) = self.first_missing(&entry.node) {
                return Err(BlueprintError::DanglingReference {
                    from: id.to_string(),
                    target: target.clone(),
                });
            }
        }
        let map = self.entries.into_iter().map(|(id, entry)| (id, entry.node)).collect();
        Ok(Definitions::from_map(map))
    }

    /// Returns the first reference inside `node` with no registered target.
    fn first_missing<'a>(&self, node: &'a SchemaNode) -> Option<&'a DefinitionId> {
        let mut missing = None;
        node.for_each_reference(&mut |target| {
            if missing.is_none() && !self.entries.contains_key(target) {
                missing = Some(target);
            }
        });
        missing
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
