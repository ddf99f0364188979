// crates/contract-blueprint-core/src/core/types.rs
// ============================================================================
// Module: Type Universe
// Description: Structural descriptions of the types a blueprint covers.
// Purpose: Define the closed input model consumed by the derivation engine.
// Dependencies: crate::core::{error, identifiers, schema}, serde
// ============================================================================

//! ## Overview
//! Front-ends describe every type reachable from a contract's validators as a
//! [`TypeDeclaration`]: a nominal [`TypeKey`] plus a sum-of-products shape
//! whose constructor fields are [`TypeRef`]s. The [`TypeUniverse`] is the
//! closed catalog of those declarations. Identity is nominal: two keys with the
//! same shape are still two types.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::error::BlueprintError;
use crate::core::identifiers::DefinitionId;
use crate::core::schema::BytesBounds;
use crate::core::schema::IntegerBounds;
use crate::core::schema::ListBounds;
use crate::interfaces::HasBlueprintDefinition;

// ============================================================================
// SECTION: Type Keys
// ============================================================================

/// Nominal identity of a declared type.
///
/// # Invariants
/// - Equality covers module, name, and type arguments; shape never matters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeKey {
    /// Defining module path.
    pub module: String,
    /// Type constructor name.
    pub name: String,
    /// Applied type arguments, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeKey>,
}

impl TypeKey {
    /// Creates a key for a type without arguments.
    #[must_use]
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Returns the key applied to the given type arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<Self>) -> Self {
        self.args = args;
        self
    }

    /// Returns the default definition identifier for this key.
    ///
    /// Unapplied types use their bare name; applied types append each
    /// argument's identifier separated by `_` (`List_Integer`).
    ///
    /// The joined text is not injective when names themselves contain `_`:
    /// `Map<A_B, C>` and `Map<A, B_C>` both yield `Map_A_B_C`. Derivation
    /// rejects such a pair with [`BlueprintError::DuplicateDefinitionId`];
    /// give one of them an explicit id with [`TypeDeclaration::with_id`].
    #[must_use]
    pub fn definition_id(&self) -> DefinitionId {
        DefinitionId::new(self.id_text())
    }

    /// Builds the raw identifier text.
    fn id_text(&self) -> String {
        let mut text = self.name.clone();
        for arg in &self.args {
            text.push('_');
            text.push_str(&arg.id_text());
        }
        text
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.module.is_empty() {
            f.write_str(&self.name)?;
        } else {
            write!(f, "{}.{}", self.module, self.name)?;
        }
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (position, arg) in self.args.iter().enumerate() {
                if position > 0 {
                    f.write_str(", ")?;
                }
                arg.fmt(f)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Type References
// ============================================================================

/// Primitive on-chain types that never need their own definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    /// Arbitrary-precision integer.
    Integer,
    /// Byte string.
    Bytes,
    /// Builtin boolean.
    Bool,
    /// Builtin unit.
    Unit,
    /// Builtin text string.
    String,
    /// Opaque on-chain data.
    Data,
}

/// Reference to a type from inside another type's shape.
///
/// Only [`TypeRef::Named`] resolves to a registry entry; every other variant
/// is inlined where it appears.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// Declared type, emitted as a `$ref`.
    Named(TypeKey),
    /// Primitive type, emitted inline.
    Primitive(Primitive),
    /// Homogeneous list.
    List {
        /// Element type.
        items: Box<TypeRef>,
    },
    /// Association list keyed by `keys`.
    Map {
        /// Key type.
        keys: Box<TypeRef>,
        /// Value type.
        values: Box<TypeRef>,
    },
    /// Builtin pair.
    Pair {
        /// First component type.
        left: Box<TypeRef>,
        /// Second component type.
        right: Box<TypeRef>,
    },
}

impl TypeRef {
    /// Reference to a declared type.
    #[must_use]
    pub const fn named(key: TypeKey) -> Self {
        Self::Named(key)
    }

    /// List of `items`.
    #[must_use]
    pub fn list(items: Self) -> Self {
        Self::List {
            items: Box::new(items),
        }
    }

    /// Map from `keys` to `values`.
    #[must_use]
    pub fn map(keys: Self, values: Self) -> Self {
        Self::Map {
            keys: Box::new(keys),
            values: Box::new(values),
        }
    }

    /// Pair of `left` and `right`.
    #[must_use]
    pub fn pair(left: Self, right: Self) -> Self {
        Self::Pair {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Appends every named key mentioned by this reference to `out`.
    pub fn collect_named<'a>(&'a self, out: &mut Vec<&'a TypeKey>) {
        match self {
            Self::Named(key) => out.push(key),
            Self::Primitive(_) => {}
            Self::List {
                items,
            } => items.collect_named(out),
            Self::Map {
                keys,
                values,
            } => {
                keys.collect_named(out);
                values.collect_named(out);
            }
            Self::Pair {
                left,
                right,
            } => {
                left.collect_named(out);
                right.collect_named(out);
            }
        }
    }
}

// ============================================================================
// SECTION: Declarations
// ============================================================================

/// Field of a constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Source field name, when the front-end has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Field type.
    pub ty: TypeRef,
}

impl FieldDecl {
    /// Positional field without a name.
    #[must_use]
    pub const fn positional(ty: TypeRef) -> Self {
        Self {
            name: None,
            ty,
        }
    }

    /// Named field.
    #[must_use]
    pub fn named(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }
}

/// Constructor of a record or sum type.
///
/// # Invariants
/// - `fields` are kept in declaration order; derivation never reorders them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstructorDecl {
    /// Constructor name.
    pub name: String,
    /// Explicit on-chain tag; defaults to the declaration position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    /// Constructor fields.
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl ConstructorDecl {
    /// Constructor with positional index and the given fields.
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<FieldDecl>) -> Self {
        Self {
            name: name.into(),
            index: None,
            fields,
        }
    }

    /// Returns the constructor with an explicit tag.
    #[must_use]
    pub const fn with_index(mut self, index: u64) -> Self {
        self.index = Some(index);
        self
    }
}

/// Structural shape of a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeShape {
    /// Named wrapper around an inline structural type.
    Alias(TypeRef),
    /// Integer with value bounds.
    BoundedInteger(IntegerBounds),
    /// Byte string with length bounds.
    BoundedBytes(BytesBounds),
    /// List with item bounds.
    BoundedList {
        /// Element type.
        items: TypeRef,
        /// Length and uniqueness bounds.
        bounds: ListBounds,
    },
    /// Single-constructor product type.
    Record(ConstructorDecl),
    /// Tagged union of constructors, in declaration order.
    Sum(Vec<ConstructorDecl>),
}

impl TypeShape {
    /// Returns every named key mentioned by the shape, in field order.
    #[must_use]
    pub fn referenced_types(&self) -> Vec<&TypeKey> {
        let mut out = Vec::new();
        match self {
            Self::Alias(ty)
            | Self::BoundedList {
                items: ty, ..
            } => ty.collect_named(&mut out),
            Self::BoundedInteger(_) | Self::BoundedBytes(_) => {}
            Self::Record(constructor) => {
                for field in &constructor.fields {
                    field.ty.collect_named(&mut out);
                }
            }
            Self::Sum(constructors) => {
                for field in constructors.iter().flat_map(|ctor| &ctor.fields) {
                    field.ty.collect_named(&mut out);
                }
            }
        }
        out
    }
}

/// Declaration of one type in the universe.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Nominal identity.
    pub key: TypeKey,
    /// Explicit definition identifier overriding the key-derived default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_override: Option<DefinitionId>,
    /// Structural shape.
    pub shape: TypeShape,
}

impl TypeDeclaration {
    /// Declares `key` with the given shape.
    #[must_use]
    pub const fn new(key: TypeKey, shape: TypeShape) -> Self {
        Self {
            key,
            id_override: None,
            shape,
        }
    }

    /// Declares a record type with positional constructor index 0.
    #[must_use]
    pub fn record(key: TypeKey, fields: Vec<FieldDecl>) -> Self {
        let constructor = ConstructorDecl::new(key.name.clone(), fields);
        Self::new(key, TypeShape::Record(constructor))
    }

    /// Declares a sum type.
    #[must_use]
    pub const fn sum(key: TypeKey, constructors: Vec<ConstructorDecl>) -> Self {
        Self::new(key, TypeShape::Sum(constructors))
    }

    /// Declares a named alias of an inline type.
    #[must_use]
    pub const fn alias(key: TypeKey, target: TypeRef) -> Self {
        Self::new(key, TypeShape::Alias(target))
    }

    /// Returns the declaration with an explicit definition identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<DefinitionId>) -> Self {
        self.id_override = Some(id.into());
        self
    }

    /// Returns the identifier this declaration registers under.
    #[must_use]
    pub fn definition_id(&self) -> DefinitionId {
        self.id_override.clone().unwrap_or_else(|| self.key.definition_id())
    }
}

// ============================================================================
// SECTION: Type Universe
// ============================================================================

/// Closed catalog of type declarations.
///
/// # Invariants
/// - Each key maps to exactly one declaration.
/// - Iteration is ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeUniverse {
    /// Declarations keyed by nominal identity.
    declarations: BTreeMap<TypeKey, TypeDeclaration>,
}

impl TypeUniverse {
    /// Creates an empty universe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration.
    ///
    /// Re-declaring an identical type is a no-op so front-ends can declare
    /// shared dependencies from several places.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::ConflictingDeclaration`] when the key is
    /// already declared with a different shape or identifier.
    pub fn declare(&mut self, declaration: TypeDeclaration) -> Result<(), BlueprintError> {
        match self.declarations.get(&declaration.key) {
            Some(existing) if existing == &declaration => Ok(()),
            Some(_) => Err(BlueprintError::ConflictingDeclaration(declaration.key)),
            None => {
                self.declarations.insert(declaration.key.clone(), declaration);
                Ok(())
            }
        }
    }

    /// Declares `T` and everything it depends on.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError`] when a declaration conflicts.
    pub fn declare_type<T: HasBlueprintDefinition + ?Sized>(
        &mut self,
    ) -> Result<TypeRef, BlueprintError> {
        T::declare(self)?;
        Ok(T::type_ref())
    }

    /// Returns `true` when `key` has been declared.
    #[must_use]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.declarations.contains_key(key)
    }

    /// Returns the declaration for `key`.
    #[must_use]
    pub fn get(&self, key: &TypeKey) -> Option<&TypeDeclaration> {
        self.declarations.get(key)
    }

    /// Returns the definition identifier for `key`.
    ///
    /// Undeclared keys fall back to the key-derived identifier; callers that
    /// need the declaration to exist check [`TypeUniverse::contains`] first.
    #[must_use]
    pub fn definition_id(&self, key: &TypeKey) -> DefinitionId {
        self.declarations
            .get(key)
            .map_or_else(|| key.definition_id(), TypeDeclaration::definition_id)
    }

    /// Number of declared types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns `true` when nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Computes the set of keys reachable from `roots`, roots included.
    ///
    /// # Errors
    ///
    /// Returns [`BlueprintError::UndeclaredType`] when a reachable key has no
    /// declaration.
    pub fn reachable_from<'a, I>(&self, roots: I) -> Result<BTreeSet<TypeKey>, BlueprintError>
    where
        I: IntoIterator<Item = &'a TypeKey>,
    {
        let mut reachable = BTreeSet::new();
        let mut pending: Vec<&TypeKey> = roots.into_iter().collect();
        while let Some(key) = pending.pop() {
            if reachable.contains(key) {
                continue;
            }
            let Some(declaration) = self.declarations.get(key) else {
                return Err(BlueprintError::UndeclaredType(key.clone()));
            };
            reachable.insert(key.clone());
            pending.extend(declaration.shape.referenced_types());
        }
        Ok(reachable)
    }
}
