// crates/contract-blueprint-core/src/core/annotation.rs
// ============================================================================
// Module: Annotation Merger
// Description: External annotation table and the pure merge onto schema nodes.
// Purpose: Overlay caller-supplied titles, descriptions, and comments.
// Dependencies: crate::core::{error, schema, types}
// ============================================================================

//! ## Overview
//! Annotations live outside the type declarations, keyed by type identity and
//! optionally by constructor index. The derivation engine looks them up once
//! per definition and merges them with [`merge_annotation`] before the node
//! enters the registry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::error::BlueprintError;
use crate::core::schema::Annotation;
use crate::core::schema::SchemaKind;
use crate::core::schema::SchemaNode;
use crate::core::types::TypeKey;

// ============================================================================
// SECTION: Annotation Table
// ============================================================================

/// Annotations supplied by the caller before derivation.
///
/// # Invariants
/// - At most one annotation per type and per (type, constructor index);
///   later inserts overlay earlier ones field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationTable {
    /// Whole-type annotations.
    types: BTreeMap<TypeKey, Annotation>,
    /// Per-constructor annotations keyed by type, then constructor index.
    constructors: BTreeMap<TypeKey, BTreeMap<u64, Annotation>>,
}

impl AnnotationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotates a whole type.
    pub fn annotate_type(&mut self, key: TypeKey, annotation: Annotation) -> &mut Self {
        self.types.entry(key).or_default().overlay(&annotation);
        self
    }

    /// Annotates one constructor of a type.
    pub fn annotate_constructor(
        &mut self,
        key: TypeKey,
        index: u64,
        annotation: Annotation,
    ) -> &mut Self {
        self.constructors.entry(key).or_default().entry(index).or_default().overlay(&annotation);
        self
    }

    /// Returns the whole-type annotation for `key`.
    #[must_use]
    pub fn for_type(&self, key: &TypeKey) -> Option<&Annotation> {
        self.types.get(key)
    }

    /// Iterates constructor annotations for `key` in index order.
    pub fn for_constructors(&self, key: &TypeKey) -> impl Iterator<Item = (u64, &Annotation)> {
        self.constructors.get(key).into_iter().flat_map(|by_index| {
            by_index.iter().map(|(index, annotation)| (*index, annotation))
        })
    }

    /// Returns `true` when no annotation is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.constructors.is_empty()
    }
}

// ============================================================================
// SECTION: Merge
// ============================================================================

/// Overlays annotations onto a derived node.
///
/// The type-level annotation applies to the node itself. The
/// constructor-level annotation applies to the `oneOf` entry (or the lone
/// constructor) whose index matches. Unset fields never clear existing
/// content.
///
/// # Errors
///
/// Returns [`BlueprintError::MisplacedAnnotation`] when a constructor-level
/// annotation targets a node without constructors or an index the node does
/// not declare.
pub fn merge_annotation(
    type_key: &TypeKey,
    mut node: SchemaNode,
    type_level: Option<&Annotation>,
    constructor_level: Option<(u64, &Annotation)>,
) -> Result<SchemaNode, BlueprintError> {
    if let Some(annotation) = type_level {
        node.annotation.overlay(annotation);
    }
    let Some((index, annotation)) = constructor_level else {
        return Ok(node);
    };
    let matched = match &mut node.kind {
        SchemaKind::OneOf(alternatives) => {
            let found = alternatives
                .iter_mut()
                .find(|alternative| constructor_index(alternative) == Some(index));
            if let Some(alternative) = found {
                alternative.annotation.overlay(annotation);
                true
            } else {
                false
            }
        }
        SchemaKind::Constructor {
            index: own, ..
        } => {
            let matched = *own == index;
            if matched {
                node.annotation.overlay(annotation);
            }
            matched
        }
        _ => {
            return Err(BlueprintError::MisplacedAnnotation {
                type_key: type_key.clone(),
                reason: String::from("constructor annotation on a type without constructors"),
            });
        }
    };
    if !matched {
        return Err(BlueprintError::MisplacedAnnotation {
            type_key: type_key.clone(),
            reason: format!("no constructor with index {index}"),
        });
    }
    Ok(node)
}

/// Returns the constructor index of a constructor node.
const fn constructor_index(node: &SchemaNode) -> Option<u64> {
    match &node.kind {
        SchemaKind::Constructor {
            index, ..
        } => Some(*index),
        _ => None,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
