// crates/contract-blueprint-core/src/lib.rs
// ============================================================================
// Module: Contract Blueprint Core
// Description: Schema derivation and blueprint assembly for on-chain contracts.
// Purpose: Turn declared validator argument types into a CIP-0057 blueprint.
// Dependencies: serde, serde_json, serde_jcs, sha2, hex, thiserror, tracing
// ============================================================================

//! ## Overview
//! The core crate derives a flat, deduplicated registry of schema definitions
//! from a closed [`TypeUniverse`] and assembles it with validator metadata into
//! a [`ContractBlueprint`].
//! Invariants:
//! - Every `$ref` in a finished blueprint resolves to a registry definition.
//! - Each definition identifier maps to exactly one type.
//! - Output is deterministic: equal inputs render byte-identical documents.
//!
//! Pipeline: [`TypeUniverse`] -> [`derive_definitions`] -> [`Definitions`] ->
//! [`BlueprintAssembler`] -> [`ContractBlueprint`] -> [`render_pretty`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;
pub use crate::interfaces::AssemblySummary;
pub use crate::interfaces::DefinitionEvent;
pub use crate::interfaces::DerivationObserver;
pub use crate::interfaces::HasBlueprintDefinition;
pub use crate::interfaces::NoopObserver;
pub use crate::interfaces::TracingObserver;
pub use crate::interfaces::builtin::ByteString;
pub use crate::runtime::*;
