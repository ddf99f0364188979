// crates/contract-blueprint-core/src/interfaces/mod.rs
// ============================================================================
// Module: Blueprint Interfaces
// Description: Front-end and observability seams for blueprint derivation.
// Purpose: Define how host types describe themselves and how derivation reports.
// Dependencies: crate::core, tracing
// ============================================================================

//! ## Overview
//! Two seams connect the engine to its collaborators:
//! - [`HasBlueprintDefinition`] lets Rust types declare their on-chain shape
//!   into a [`TypeUniverse`], replacing a hand-maintained type list.
//! - [`DerivationObserver`] receives derivation events. [`NoopObserver`]
//!   discards them; [`TracingObserver`] forwards them as `tracing` events.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod builtin;

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::error::BlueprintError;
use crate::core::identifiers::DefinitionId;
use crate::core::types::TypeKey;
use crate::core::types::TypeRef;
use crate::core::types::TypeUniverse;

// ============================================================================
// SECTION: Type Front-End
// ============================================================================

/// Host type with a statically known on-chain shape.
pub trait HasBlueprintDefinition {
    /// Returns the reference other shapes use to point at this type.
    fn type_ref() -> TypeRef;

    /// Declares this type and its dependencies into `universe`.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::ConflictingDeclaration`] when a dependency
    /// was already declared with a different shape.
    fn declare(universe: &mut TypeUniverse) -> Result<(), BlueprintError>;
}

// ============================================================================
// SECTION: Observer Events
// ============================================================================

/// Derivation event for a single definition.
#[derive(Debug, Clone, Copy)]
pub struct DefinitionEvent<'a> {
    /// Registry identifier.
    pub id: &'a DefinitionId,
    /// Originating type.
    pub type_key: &'a TypeKey,
    /// Derivation depth (roots are depth 0).
    pub depth: usize,
}

/// Summary emitted once a blueprint is assembled.
#[derive(Debug, Clone, Copy)]
pub struct AssemblySummary<'a> {
    /// Preamble title.
    pub title: &'a str,
    /// Number of validators.
    pub validators: usize,
    /// Number of registry definitions.
    pub definitions: usize,
}

// ============================================================================
// SECTION: Observer Trait
// ============================================================================

/// Sink for derivation and assembly events.
pub trait DerivationObserver: Send + Sync {
    /// Records a definition written into the registry.
    fn definition_registered(&self, event: DefinitionEvent<'_>);
    /// Records a reference to an already visited definition.
    fn definition_reused(&self, event: DefinitionEvent<'_>);
    /// Records a completed blueprint assembly.
    fn blueprint_assembled(&self, summary: AssemblySummary<'_>);
}

/// No-op observer.
///
/// # Invariants
/// - Events are intentionally discarded.
pub struct NoopObserver;

impl DerivationObserver for NoopObserver {
    fn definition_registered(&self, _event: DefinitionEvent<'_>) {}

    fn definition_reused(&self, _event: DefinitionEvent<'_>) {}

    fn blueprint_assembled(&self, _summary: AssemblySummary<'_>) {}
}

/// Observer that emits structured `tracing` events.
pub struct TracingObserver;

/// Target used for every event emitted by [`TracingObserver`].
pub const TRACING_TARGET: &str = "contract_blueprint::derive";

impl DerivationObserver for TracingObserver {
    fn definition_registered(&self, event: DefinitionEvent<'_>) {
        tracing::debug!(
            target: TRACING_TARGET,
            id = %event.id,
            type_key = %event.type_key,
            depth = event.depth,
            "definition registered"
        );
    }

    fn definition_reused(&self, event: DefinitionEvent<'_>) {
        tracing::trace!(
            target: TRACING_TARGET,
            id = %event.id,
            type_key = %event.type_key,
            depth = event.depth,
            "definition reused"
        );
    }

    fn blueprint_assembled(&self, summary: AssemblySummary<'_>) {
        tracing::info!(
            target: TRACING_TARGET,
            title = summary.title,
            validators = summary.validators,
            definitions = summary.definitions,
            "blueprint assembled"
        );
    }
}
