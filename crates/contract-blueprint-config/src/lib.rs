// crates/contract-blueprint-config/src/lib.rs
// ============================================================================
// Module: Contract Blueprint Config Library
// Description: Canonical config model, validation, and example payloads.
// Purpose: Single source of truth for blueprint.toml semantics.
// Dependencies: contract-blueprint-core, serde, toml
// ============================================================================

//! ## Overview
//! `contract-blueprint-config` defines the TOML configuration for blueprint
//! derivation: preamble metadata, derivation options, assembly policy, and
//! hashing. Validation is strict and fail-closed; a loaded config converts
//! directly into the option types of `contract-blueprint-core`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
