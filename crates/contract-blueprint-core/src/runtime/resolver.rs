// crates/contract-blueprint-core/src/runtime/resolver.rs
// ============================================================================
// Module: Reference Resolver
// Description: Maps type references onto inline nodes or registry `$ref`s.
// Purpose: Enforce the closed root set and trigger derivation of named types.
// Dependencies: crate::core::{error, identifiers, schema, types}
// ============================================================================

//! ## Overview
//! Named types always resolve to a `$ref`; the resolver asks its
//! [`DefinitionSink`] for the id, and the sink schedules the type for
//! derivation on first encounter. Primitives, lists, maps, and pairs are
//! inlined, with any nested named type still resolved through the sink.
//!
//! The resolver only borrows the reachable key set, so it is `Copy` and never
//! recurses into another type's declaration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::error::BlueprintError;
use crate::core::identifiers::DefinitionId;
use crate::core::schema::BuiltinKind;
use crate::core::schema::SchemaNode;
use crate::core::types::Primitive;
use crate::core::types::TypeKey;
use crate::core::types::TypeRef;

// ============================================================================
// SECTION: Sink
// ============================================================================

/// Receiver of named-type resolution requests.
pub trait DefinitionSink {
    /// Returns the definition id for `key`, scheduling it when first seen.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError`] when deriving the type fails.
    fn definition_for(&mut self, key: &TypeKey) -> Result<DefinitionId, BlueprintError>;
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolver bound to the reachable key set of one derivation.
///
/// # Invariants
/// - Named keys outside `reachable` are never forwarded to the sink.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    /// Keys reachable from the declared roots.
    reachable: &'a BTreeSet<TypeKey>,
}

impl<'a> ReferenceResolver<'a> {
    /// Creates a resolver limited to `reachable`.
    #[must_use]
    pub const fn new(reachable: &'a BTreeSet<TypeKey>) -> Self {
        Self {
            reachable,
        }
    }

    /// Verifies `key` belongs to the closed root set.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::UnreferencedType`] when `key` is not
    /// reachable from the declared roots.
    pub fn check_reachable(&self, key: &TypeKey) -> Result<(), BlueprintError> {
        if self.reachable.contains(key) {
            Ok(())
        } else {
            Err(BlueprintError::UnreferencedType(key.clone()))
        }
    }

    /// Resolves `ty` to a schema node.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::UnreferencedType`] for named types outside
    /// the root set, or any error raised by the sink.
    pub fn resolve(
        self,
        ty: &TypeRef,
        sink: &mut dyn DefinitionSink,
    ) -> Result<SchemaNode, BlueprintError> {
        match ty {
            TypeRef::Named(key) => {
                self.check_reachable(key)?;
                let id = sink.definition_for(key)?;
                Ok(SchemaNode::reference(id))
            }
            TypeRef::Primitive(primitive) => Ok(inline_primitive(*primitive)),
            TypeRef::List {
                items,
            } => Ok(SchemaNode::list(self.resolve(items, sink)?)),
            TypeRef::Map {
                keys,
                values,
            } => {
                let keys = self.resolve(keys, sink)?;
                let values = self.resolve(values, sink)?;
                Ok(SchemaNode::map(keys, values))
            }
            TypeRef::Pair {
                left,
                right,
            } => {
                let left = self.resolve(left, sink)?;
                let right = self.resolve(right, sink)?;
                Ok(SchemaNode::pair(left, right))
            }
        }
    }
}

/// Returns the inline schema for a primitive.
#[must_use]
pub fn inline_primitive(primitive: Primitive) -> SchemaNode {
    match primitive {
        Primitive::Integer => SchemaNode::integer(),
        Primitive::Bytes => SchemaNode::bytes(),
        Primitive::Bool => SchemaNode::builtin(BuiltinKind::Boolean),
        Primitive::Unit => SchemaNode::builtin(BuiltinKind::Unit),
        Primitive::String => SchemaNode::builtin(BuiltinKind::String),
        Primitive::Data => SchemaNode::data(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
