// crates/contract-blueprint-core/src/interfaces/builtin.rs
// ============================================================================
// Module: Builtin Type Declarations
// Description: HasBlueprintDefinition impls for standard Rust types.
// Purpose: Map common host types onto their on-chain data encodings.
// Dependencies: crate::core::types, crate::interfaces
// ============================================================================

//! ## Overview
//! Standard types declare themselves under the `Prelude` module:
//!
//! | Rust type          | Definition id  | Shape                         |
//! |--------------------|----------------|-------------------------------|
//! | `i64`              | `Integer`      | integer                       |
//! | `bool`             | `Bool`         | `False` (0) / `True` (1)      |
//! | `()`               | `Unit`         | constructor 0, no fields      |
//! | `String`           | `String`       | `#string`                     |
//! | [`ByteString`]     | `ByteString`   | bytes                         |
//! | `Vec<T>`           | `List_T`       | list of `T`                   |
//! | `Option<T>`        | `Option_T`     | `None` (0) / `Some(T)` (1)    |
//! | `BTreeMap<K, V>`   | `Map_K_V`      | map from `K` to `V`           |

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::error::BlueprintError;
use crate::core::types::ConstructorDecl;
use crate::core::types::FieldDecl;
use crate::core::types::Primitive;
use crate::core::types::TypeDeclaration;
use crate::core::types::TypeKey;
use crate::core::types::TypeRef;
use crate::core::types::TypeUniverse;
use crate::interfaces::HasBlueprintDefinition;

// ============================================================================
// SECTION: Prelude Keys
// ============================================================================

/// Module name used for builtin declarations.
pub const PRELUDE_MODULE: &str = "Prelude";

/// Raw byte string, encoded on-chain as bytes rather than a list of integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteString(pub Vec<u8>);

/// Key for a prelude type.
fn prelude(name: &str) -> TypeKey {
    TypeKey::new(PRELUDE_MODULE, name)
}

/// Extracts the key behind a named reference.
fn key_of(reference: TypeRef) -> Option<TypeKey> {
    match reference {
        TypeRef::Named(key) => Some(key),
        _ => None,
    }
}

/// Key for a prelude type applied to the given argument references.
///
/// Inline arguments contribute no key; every builtin argument is named.
fn applied(name: &str, args: Vec<TypeRef>) -> TypeKey {
    prelude(name).with_args(args.into_iter().filter_map(key_of).collect())
}

// ============================================================================
// SECTION: Primitive Types
// ============================================================================

impl HasBlueprintDefinition for i64 {
    fn type_ref() -> TypeRef {
        TypeRef::named(prelude("Integer"))
    }

    fn declare(universe: &mut TypeUniverse) -> Result<(), BlueprintError> {
        let target = TypeRef::Primitive(Primitive::Integer);
        universe.declare(TypeDeclaration::alias(prelude("Integer"), target))
    }
}

impl HasBlueprintDefinition for bool {
    fn type_ref() -> TypeRef {
        TypeRef::named(prelude("Bool"))
    }

    fn declare(universe: &mut TypeUniverse) -> Result<(), BlueprintError> {
        universe.declare(TypeDeclaration::sum(
            prelude("Bool"),
            vec![
                ConstructorDecl::new("False", Vec::new()),
                ConstructorDecl::new("True", Vec::new()),
            ],
        ))
    }
}

impl HasBlueprintDefinition for () {
    fn type_ref() -> TypeRef {
        TypeRef::named(prelude("Unit"))
    }

    fn declare(universe: &mut TypeUniverse) -> Result<(), BlueprintError> {
        universe.declare(TypeDeclaration::record(prelude("Unit"), Vec::new()))
    }
}

impl HasBlueprintDefinition for String {
    fn type_ref() -> TypeRef {
        TypeRef::named(prelude("String"))
    }

    fn declare(universe: &mut TypeUniverse) -> Result<(), BlueprintError> {
        let target = TypeRef::Primitive(Primitive::String);
        universe.declare(TypeDeclaration::alias(prelude("String"), target))
    }
}

impl HasBlueprintDefinition for ByteString {
    fn type_ref() -> TypeRef {
        TypeRef::named(prelude("ByteString"))
    }

    fn declare(universe: &mut TypeUniverse) -> Result<(), BlueprintError> {
        let target = TypeRef::Primitive(Primitive::Bytes);
        universe.declare(TypeDeclaration::alias(prelude("ByteString"), target))
    }
}

// ============================================================================
// SECTION: Generic Containers
// ============================================================================

impl<T: HasBlueprintDefinition> HasBlueprintDefinition for Vec<T> {
    fn type_ref() -> TypeRef {
        TypeRef::named(applied("List", vec![T::type_ref()]))
    }

    fn declare(universe: &mut TypeUniverse) -> Result<(), BlueprintError> {
        T::declare(universe)?;
        let key = applied("List", vec![T::type_ref()]);
        universe.declare(TypeDeclaration::alias(key, TypeRef::list(T::type_ref())))
    }
}

impl<T: HasBlueprintDefinition> HasBlueprintDefinition for Option<T> {
    fn type_ref() -> TypeRef {
        TypeRef::named(applied("Option", vec![T::type_ref()]))
    }

    fn declare(universe: &mut TypeUniverse) -> Result<(), BlueprintError> {
        T::declare(universe)?;
        let key = applied("Option", vec![T::type_ref()]);
        universe.declare(TypeDeclaration::sum(
            key,
            vec![
                ConstructorDecl::new("None", Vec::new()),
                ConstructorDecl::new("Some", vec![FieldDecl::positional(T::type_ref())]),
            ],
        ))
    }
}

impl<K: HasBlueprintDefinition, V: HasBlueprintDefinition> HasBlueprintDefinition
    for BTreeMap<K, V>
{
    fn type_ref() -> TypeRef {
        TypeRef::named(applied("Map", vec![K::type_ref(), V::type_ref()]))
    }

    fn declare(universe: &mut TypeUniverse) -> Result<(), BlueprintError> {
        K::declare(universe)?;
        V::declare(universe)?;
        let key = applied("Map", vec![K::type_ref(), V::type_ref()]);
        universe.declare(TypeDeclaration::alias(key, TypeRef::map(K::type_ref(), V::type_ref())))
    }
}
