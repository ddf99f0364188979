// crates/contract-blueprint-core/src/runtime/mod.rs
// ============================================================================
// Module: Contract Blueprint Runtime
// Description: Definition registry, resolver, derivation engine, and assembler.
// Purpose: Turn a closed type universe into a finished contract blueprint.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Runtime components run single-threaded and synchronously inside one
//! blueprint construction. A session owns its registry exclusively; nothing
//! here is shared across blueprints.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod assembler;
pub mod derive;
pub mod registry;
pub mod render;
pub mod resolver;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use assembler::ArgumentDecl;
pub use assembler::AssemblerOptions;
pub use assembler::BlueprintAssembler;
pub use assembler::ValidatorDecl;
pub use assembler::ValidatorUniqueness;
pub use derive::DEFAULT_MAX_DEFINITIONS;
pub use derive::DEFAULT_MAX_DEPTH;
pub use derive::DerivationOptions;
pub use derive::DerivationSession;
pub use derive::derive_definitions;
pub use registry::DefinitionRegistry;
pub use registry::Registration;
pub use render::render_canonical;
pub use render::render_pretty;
pub use render::render_value;
pub use resolver::DefinitionSink;
pub use resolver::ReferenceResolver;
