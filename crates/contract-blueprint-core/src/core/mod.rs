// crates/contract-blueprint-core/src/core/mod.rs
// ============================================================================
// Module: Contract Blueprint Core Types
// Description: Data model for types, schemas, annotations, and blueprints.
// Purpose: Provide the value types shared by derivation and assembly.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types are plain data: they hold no engine state and perform no I/O.
//! Serialization of schema nodes and blueprints is hand-ordered so rendered
//! documents are stable.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod annotation;
pub mod blueprint;
pub mod error;
pub mod hashing;
pub mod identifiers;
pub mod schema;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use annotation::AnnotationTable;
pub use annotation::merge_annotation;
pub use blueprint::ArgumentBlueprint;
pub use blueprint::BLUEPRINT_SCHEMA_URI;
pub use blueprint::CompiledValidator;
pub use blueprint::CompilerInfo;
pub use blueprint::ContractBlueprint;
pub use blueprint::Definitions;
pub use blueprint::ParameterBlueprint;
pub use blueprint::PlutusVersion;
pub use blueprint::Preamble;
pub use blueprint::Purpose;
pub use blueprint::PurposeSet;
pub use blueprint::ValidatorBlueprint;
pub use error::BlueprintError;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::DefinitionId;
pub use schema::Annotation;
pub use schema::BuiltinKind;
pub use schema::BytesBounds;
pub use schema::IntegerBounds;
pub use schema::ListBounds;
pub use schema::SchemaKind;
pub use schema::SchemaNode;
pub use types::ConstructorDecl;
pub use types::FieldDecl;
pub use types::Primitive;
pub use types::TypeDeclaration;
pub use types::TypeKey;
pub use types::TypeRef;
pub use types::TypeShape;
pub use types::TypeUniverse;
