// crates/contract-blueprint-core/src/core/schema.rs
// ============================================================================
// Module: Blueprint Schema Nodes
// Description: Schema node model emitted into blueprint definitions.
// Purpose: Describe on-chain data encodings with JSON Schema conventions.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A [`SchemaNode`] is one node of a blueprint schema: a `$ref`, a primitive,
//! a list or map, a constructor, or a `oneOf` over constructors. Every node
//! may carry a title, description, and `$comment`.
//!
//! Serialization writes keys in a fixed order (annotations first, then the
//! shape keys) and constructor fields in declaration order, so repeated
//! renders of equal nodes are byte-identical.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use crate::core::identifiers::DefinitionId;

// ============================================================================
// SECTION: Annotations
// ============================================================================

/// Human-facing metadata attachable to any schema node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// Short title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form `$comment`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Annotation {
    /// Annotation with only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Annotation with only a `$comment`.
    #[must_use]
    pub fn commented(comment: impl Into<String>) -> Self {
        Self {
            comment: Some(comment.into()),
            ..Self::default()
        }
    }

    /// Returns the annotation with a description set.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.comment.is_none()
    }

    /// Overlays the set fields of `overlay`; unset fields keep their value.
    pub fn overlay(&mut self, overlay: &Self) {
        if let Some(title) = &overlay.title {
            self.title = Some(title.clone());
        }
        if let Some(description) = &overlay.description {
            self.description = Some(description.clone());
        }
        if let Some(comment) = &overlay.comment {
            self.comment = Some(comment.clone());
        }
    }
}

// ============================================================================
// SECTION: Bounds
// ============================================================================

/// Optional integer validation keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IntegerBounds {
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    /// Exclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<i64>,
    /// Exclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<i64>,
    /// Required divisor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<i64>,
}

/// Optional byte string length keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BytesBounds {
    /// Minimum length in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,
    /// Maximum length in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,
}

/// Optional list length keywords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListBounds {
    /// Minimum item count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,
    /// Maximum item count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,
    /// Whether items must be distinct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
}

// ============================================================================
// SECTION: Schema Nodes
// ============================================================================

/// Builtin (non-`Data`) value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    /// `#unit`.
    Unit,
    /// `#boolean`.
    Boolean,
    /// `#integer`.
    Integer,
    /// `#bytes`.
    Bytes,
    /// `#string`.
    String,
}

impl BuiltinKind {
    /// Returns the `dataType` label.
    #[must_use]
    pub const fn data_type(self) -> &'static str {
        match self {
            Self::Unit => "#unit",
            Self::Boolean => "#boolean",
            Self::Integer => "#integer",
            Self::Bytes => "#bytes",
            Self::String => "#string",
        }
    }
}

/// Shape of a schema node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// Pointer into the definition registry.
    Reference(DefinitionId),
    /// Data-encoded integer.
    Integer(IntegerBounds),
    /// Data-encoded byte string.
    Bytes(BytesBounds),
    /// Data-encoded list.
    List {
        /// Item schema.
        items: Box<SchemaNode>,
        /// Length bounds.
        bounds: ListBounds,
    },
    /// Data-encoded map.
    Map {
        /// Key schema.
        keys: Box<SchemaNode>,
        /// Value schema.
        values: Box<SchemaNode>,
    },
    /// Constructor with ordered fields.
    Constructor {
        /// On-chain constructor tag.
        index: u64,
        /// Field schemas in declaration order.
        fields: Vec<SchemaNode>,
    },
    /// Alternatives, one per constructor.
    OneOf(Vec<SchemaNode>),
    /// Builtin value.
    Builtin(BuiltinKind),
    /// Builtin pair.
    Pair {
        /// First component schema.
        left: Box<SchemaNode>,
        /// Second component schema.
        right: Box<SchemaNode>,
    },
    /// Opaque on-chain data.
    Data,
}

/// Schema node with optional annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaNode {
    /// Title, description, and comment.
    pub annotation: Annotation,
    /// Node shape.
    pub kind: SchemaKind,
}

impl SchemaNode {
    /// Unannotated node of the given kind.
    #[must_use]
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            annotation: Annotation::default(),
            kind,
        }
    }

    /// `$ref` to `id`.
    #[must_use]
    pub fn reference(id: DefinitionId) -> Self {
        Self::new(SchemaKind::Reference(id))
    }

    /// Unbounded integer.
    #[must_use]
    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer(IntegerBounds::default()))
    }

    /// Unbounded byte string.
    #[must_use]
    pub fn bytes() -> Self {
        Self::new(SchemaKind::Bytes(BytesBounds::default()))
    }

    /// Unbounded list of `items`.
    #[must_use]
    pub fn list(items: Self) -> Self {
        Self::new(SchemaKind::List {
            items: Box::new(items),
            bounds: ListBounds::default(),
        })
    }

    /// Map from `keys` to `values`.
    #[must_use]
    pub fn map(keys: Self, values: Self) -> Self {
        Self::new(SchemaKind::Map {
            keys: Box::new(keys),
            values: Box::new(values),
        })
    }

    /// Constructor with the given tag and fields.
    #[must_use]
    pub fn constructor(index: u64, fields: Vec<Self>) -> Self {
        Self::new(SchemaKind::Constructor {
            index,
            fields,
        })
    }

    /// `oneOf` over `alternatives`.
    #[must_use]
    pub fn one_of(alternatives: Vec<Self>) -> Self {
        Self::new(SchemaKind::OneOf(alternatives))
    }

    /// Builtin value.
    #[must_use]
    pub fn builtin(kind: BuiltinKind) -> Self {
        Self::new(SchemaKind::Builtin(kind))
    }

    /// Builtin pair.
    #[must_use]
    pub fn pair(left: Self, right: Self) -> Self {
        Self::new(SchemaKind::Pair {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Opaque data.
    #[must_use]
    pub fn data() -> Self {
        Self::new(SchemaKind::Data)
    }

    /// Returns the node with `annotation` overlaid.
    #[must_use]
    pub fn annotated(mut self, annotation: &Annotation) -> Self {
        self.annotation.overlay(annotation);
        self
    }

    /// Visits every `$ref` target in this node and its children.
    pub fn for_each_reference<'a>(&'a self, visit: &mut impl FnMut(&'a DefinitionId)) {
        match &self.kind {
            SchemaKind::Reference(id) => visit(id),
            SchemaKind::List {
                items, ..
            } => items.for_each_reference(visit),
            SchemaKind::Map {
                keys,
                values,
            } => {
                keys.for_each_reference(visit);
                values.for_each_reference(visit);
            }
            SchemaKind::Pair {
                left,
                right,
            } => {
                left.for_each_reference(visit);
                right.for_each_reference(visit);
            }
            SchemaKind::Constructor {
                fields: children, ..
            }
            | SchemaKind::OneOf(children) => {
                for child in children {
                    child.for_each_reference(visit);
                }
            }
            SchemaKind::Integer(_)
            | SchemaKind::Bytes(_)
            | SchemaKind::Builtin(_)
            | SchemaKind::Data => {}
        }
    }
}

// ============================================================================
// SECTION: Serialization
// ============================================================================

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(title) = &self.annotation.title {
            map.serialize_entry("title", title)?;
        }
        if let Some(description) = &self.annotation.description {
            map.serialize_entry("description", description)?;
        }
        if let Some(comment) = &self.annotation.comment {
            map.serialize_entry("$comment", comment)?;
        }
        match &self.kind {
            SchemaKind::Reference(id) => {
                map.serialize_entry("$ref", &id.ref_pointer())?;
            }
            SchemaKind::Integer(bounds) => {
                map.serialize_entry("dataType", "integer")?;
                serialize_integer_bounds(&mut map, bounds)?;
            }
            SchemaKind::Bytes(bounds) => {
                map.serialize_entry("dataType", "bytes")?;
                serialize_optional(&mut map, "minLength", bounds.min_length.as_ref())?;
                serialize_optional(&mut map, "maxLength", bounds.max_length.as_ref())?;
            }
            SchemaKind::List {
                items,
                bounds,
            } => {
                map.serialize_entry("dataType", "list")?;
                map.serialize_entry("items", items)?;
                serialize_optional(&mut map, "minItems", bounds.min_items.as_ref())?;
                serialize_optional(&mut map, "maxItems", bounds.max_items.as_ref())?;
                serialize_optional(&mut map, "uniqueItems", bounds.unique_items.as_ref())?;
            }
            SchemaKind::Map {
                keys,
                values,
            } => {
                map.serialize_entry("dataType", "map")?;
                map.serialize_entry("keys", keys)?;
                map.serialize_entry("values", values)?;
            }
            SchemaKind::Constructor {
                index,
                fields,
            } => {
                map.serialize_entry("dataType", "constructor")?;
                map.serialize_entry("fields", fields)?;
                map.serialize_entry("index", index)?;
            }
            SchemaKind::OneOf(alternatives) => {
                map.serialize_entry("oneOf", alternatives)?;
            }
            SchemaKind::Builtin(kind) => {
                map.serialize_entry("dataType", kind.data_type())?;
            }
            SchemaKind::Pair {
                left,
                right,
            } => {
                map.serialize_entry("dataType", "#pair")?;
                map.serialize_entry("left", left)?;
                map.serialize_entry("right", right)?;
            }
            SchemaKind::Data => {}
        }
        map.end()
    }
}

/// Writes the integer keywords that are set.
fn serialize_integer_bounds<M: SerializeMap>(
    map: &mut M,
    bounds: &IntegerBounds,
) -> Result<(), M::Error> {
    serialize_optional(map, "minimum", bounds.minimum.as_ref())?;
    serialize_optional(map, "maximum", bounds.maximum.as_ref())?;
    serialize_optional(map, "exclusiveMinimum", bounds.exclusive_minimum.as_ref())?;
    serialize_optional(map, "exclusiveMaximum", bounds.exclusive_maximum.as_ref())?;
    serialize_optional(map, "multipleOf", bounds.multiple_of.as_ref())
}

/// Writes `key` only when `value` is present.
fn serialize_optional<M: SerializeMap, T: Serialize>(
    map: &mut M,
    key: &'static str,
    value: Option<&T>,
) -> Result<(), M::Error> {
    match value {
        Some(value) => map.serialize_entry(key, value),
        None => Ok(()),
    }
}
