// crates/contract-blueprint-core/src/runtime/render.rs
// ============================================================================
// Module: Blueprint Rendering
// Description: Pretty and canonical JSON renderings of a blueprint.
// Purpose: Emit byte-stable documents for files and for hashing.
// Dependencies: crate::core::{blueprint, error, hashing}, serde_json
// ============================================================================

//! ## Overview
//! [`render_pretty`] keeps the declared key order (annotations, then shape
//! keys) with two-space indentation. [`render_canonical`] emits RFC 8785
//! canonical JSON, the same bytes [`ContractBlueprint::canonical_hash`]
//! digests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::blueprint::ContractBlueprint;
use crate::core::error::BlueprintError;
use crate::core::hashing::canonical_json_bytes;

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders `blueprint` as indented JSON with a trailing newline.
///
/// # Errors
///
/// Returns [`BlueprintError::Serialization`] when serialization fails.
pub fn render_pretty(blueprint: &ContractBlueprint) -> Result<String, BlueprintError> {
    let mut text = serde_json::to_string_pretty(blueprint)
        .map_err(|err| BlueprintError::Serialization(err.to_string()))?;
    text.push('\n');
    Ok(text)
}

/// Renders `blueprint` as RFC 8785 canonical JSON bytes.
///
/// # Errors
///
/// Returns [`BlueprintError::Serialization`] when canonicalization fails.
pub fn render_canonical(blueprint: &ContractBlueprint) -> Result<Vec<u8>, BlueprintError> {
    canonical_json_bytes(blueprint).map_err(|err| BlueprintError::Serialization(err.to_string()))
}

/// Converts `blueprint` into a JSON value.
///
/// # Errors
///
/// Returns [`BlueprintError::Serialization`] when serialization fails.
pub fn render_value(blueprint: &ContractBlueprint) -> Result<Value, BlueprintError> {
    serde_json::to_value(blueprint).map_err(|err| BlueprintError::Serialization(err.to_string()))
}
