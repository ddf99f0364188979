// crates/contract-blueprint-core/src/core/error.rs
// ============================================================================
// Module: Blueprint Errors
// Description: Error taxonomy for derivation and blueprint assembly.
// Purpose: Report one specific, actionable failure per construction attempt.
// Dependencies: crate::core::{identifiers, types}, thiserror
// ============================================================================

//! ## Overview
//! Every failure is construction-time and fatal: a blueprint is either
//! returned complete and consistent, or not at all. Variants carry the
//! offending type key or definition identifier.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::identifiers::DefinitionId;
use crate::core::types::TypeKey;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while deriving definitions or assembling a blueprint.
///
/// # Invariants
/// - No partial registry or blueprint is observable once an error is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlueprintError {
    /// Two distinct types produced the same definition identifier.
    #[error("duplicate definition id {id}: claimed by {existing} and {incoming}")]
    DuplicateDefinitionId {
        /// Colliding identifier.
        id: DefinitionId,
        /// Type that reserved the identifier first.
        existing: String,
        /// Type that attempted to reuse it.
        incoming: String,
    },
    /// A reference points at an identifier missing from the registry.
    #[error("dangling reference from {from} to {target}")]
    DanglingReference {
        /// Owner of the dangling reference (definition id or validator label).
        from: String,
        /// Missing target identifier.
        target: DefinitionId,
    },
    /// An annotation was attached to a node shape that cannot carry it.
    #[error("misplaced annotation on {type_key}: {reason}")]
    MisplacedAnnotation {
        /// Type the annotation was registered for.
        type_key: TypeKey,
        /// Why the annotation does not fit.
        reason: String,
    },
    /// A schema reference was requested for a type outside the declared roots.
    #[error("type {0} is not reachable from the declared root types")]
    UnreferencedType(TypeKey),
    /// A type was referenced but never declared in the type universe.
    #[error("type {0} is referenced but not declared")]
    UndeclaredType(TypeKey),
    /// A type key was declared twice with different shapes.
    #[error("type {0} declared twice with conflicting shapes")]
    ConflictingDeclaration(TypeKey),
    /// A chain of bare aliases leads back to one of its own members.
    #[error("alias {0} resolves to itself through a chain of bare aliases")]
    AliasCycle(TypeKey),
    /// Two constructors of one sum type share an index.
    #[error("type {type_key} reuses constructor index {index}")]
    DuplicateConstructorIndex {
        /// Sum type declaring the constructors.
        type_key: TypeKey,
        /// Repeated index.
        index: u64,
    },
    /// Derivation exceeded the configured number of definitions.
    #[error("definition limit of {limit} exceeded")]
    DefinitionLimitExceeded {
        /// Configured maximum.
        limit: usize,
    },
    /// Derivation recursed deeper than the configured bound.
    #[error("derivation depth limit of {limit} exceeded at {type_key}")]
    DepthLimitExceeded {
        /// Configured maximum.
        limit: usize,
        /// Type being derived when the bound was hit.
        type_key: TypeKey,
    },
    /// An argument or parameter declared no purposes.
    #[error("argument {0} declares no purposes")]
    EmptyPurposeSet(String),
    /// Two validators share a title and redeemer purpose set.
    #[error("duplicate validator: {0}")]
    DuplicateValidator(String),
    /// Rendering or canonical hashing failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}
