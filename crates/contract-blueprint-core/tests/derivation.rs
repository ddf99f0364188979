// crates/contract-blueprint-core/tests/derivation.rs
// ============================================================================
// Module: Derivation Engine Tests
// Description: Integration coverage for registry construction from roots.
// Purpose: Ensure dedup, nominal identity, recursion, and closure invariants.
// ============================================================================

//! ## Overview
//! Derives hand-declared universes through the public API and inspects the
//! resulting definitions.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use contract_blueprint_core::AnnotationTable;
use contract_blueprint_core::ArgumentDecl;
use contract_blueprint_core::BlueprintAssembler;
use contract_blueprint_core::BlueprintError;
use contract_blueprint_core::BytesBounds;
use contract_blueprint_core::ConstructorDecl;
use contract_blueprint_core::DefinitionId;
use contract_blueprint_core::Definitions;
use contract_blueprint_core::DerivationOptions;
use contract_blueprint_core::FieldDecl;
use contract_blueprint_core::HasBlueprintDefinition;
use contract_blueprint_core::IntegerBounds;
use contract_blueprint_core::ListBounds;
use contract_blueprint_core::NoopObserver;
use contract_blueprint_core::PlutusVersion;
use contract_blueprint_core::Preamble;
use contract_blueprint_core::Primitive;
use contract_blueprint_core::Purpose;
use contract_blueprint_core::TypeDeclaration;
use contract_blueprint_core::TypeKey;
use contract_blueprint_core::TypeRef;
use contract_blueprint_core::TypeShape;
use contract_blueprint_core::TypeUniverse;
use contract_blueprint_core::ValidatorDecl;
use contract_blueprint_core::derive_definitions;
use serde_json::json;

fn key(name: &str) -> TypeKey {
    TypeKey::new("Demo", name)
}

fn named(name: &str) -> TypeRef {
    TypeRef::named(key(name))
}

fn derive(universe: &TypeUniverse, roots: &[TypeKey]) -> Result<Definitions, BlueprintError> {
    derive_definitions(
        universe,
        roots,
        &AnnotationTable::new(),
        DerivationOptions::default(),
        &NoopObserver,
    )
}

fn json_of(definitions: &Definitions, id: &str) -> serde_json::Value {
    serde_json::to_value(definitions.get(&DefinitionId::new(id)).unwrap()).unwrap()
}

#[test]
fn type_shared_by_two_validators_is_derived_once() {
    let mut universe = TypeUniverse::new();
    universe
        .declare(TypeDeclaration::alias(key("Owner"), TypeRef::Primitive(Primitive::Bytes)))
        .unwrap();
    universe
        .declare(TypeDeclaration::record(key("MintRedeemer"), vec![FieldDecl::positional(named(
            "Owner",
        ))]))
        .unwrap();
    universe
        .declare(TypeDeclaration::record(key("SpendRedeemer"), vec![FieldDecl::positional(
            named("Owner"),
        )]))
        .unwrap();

    let blueprint = BlueprintAssembler::new(
        Preamble::new("shared", "1.0.0", PlutusVersion::V2),
        &universe,
    )
    .with_roots([key("MintRedeemer"), key("SpendRedeemer")])
    .with_validator(ValidatorDecl::new(
        "mint",
        ArgumentDecl::single(Purpose::Mint, named("MintRedeemer")),
    ))
    .with_validator(ValidatorDecl::new(
        "spend",
        ArgumentDecl::single(Purpose::Spend, named("SpendRedeemer")),
    ))
    .assemble()
    .unwrap();

    let ids: Vec<&str> = blueprint.definitions.ids().map(DefinitionId::as_str).collect();
    assert_eq!(ids, vec!["MintRedeemer", "Owner", "SpendRedeemer"]);
}

#[test]
fn structurally_equal_types_keep_distinct_entries() {
    let mut universe = TypeUniverse::new();
    universe
        .declare(TypeDeclaration::alias(key("PolicyId"), TypeRef::Primitive(Primitive::Bytes)))
        .unwrap();
    universe
        .declare(TypeDeclaration::alias(key("AssetName"), TypeRef::Primitive(Primitive::Bytes)))
        .unwrap();

    let definitions = derive(&universe, &[key("PolicyId"), key("AssetName")]).unwrap();

    assert_eq!(definitions.len(), 2);
    assert_eq!(json_of(&definitions, "PolicyId"), json_of(&definitions, "AssetName"));
}

#[test]
fn id_override_collision_is_rejected() {
    let mut universe = TypeUniverse::new();
    universe
        .declare(
            TypeDeclaration::alias(key("Lovelace"), TypeRef::Primitive(Primitive::Integer))
                .with_id("Amount"),
        )
        .unwrap();
    universe
        .declare(
            TypeDeclaration::alias(key("Tokens"), TypeRef::Primitive(Primitive::Integer))
                .with_id("Amount"),
        )
        .unwrap();

    let err = derive(&universe, &[key("Lovelace"), key("Tokens")]).unwrap_err();

    let BlueprintError::DuplicateDefinitionId {
        id, ..
    } = err
    else {
        panic!("expected duplicate definition id, got {err:?}");
    };
    assert_eq!(id.as_str(), "Amount");
}

#[test]
fn record_fields_keep_declaration_order() {
    let mut universe = TypeUniverse::new();
    universe
        .declare(TypeDeclaration::record(key("Order"), vec![
            FieldDecl::named("zeta", TypeRef::Primitive(Primitive::Bytes)),
            FieldDecl::named("alpha", TypeRef::Primitive(Primitive::Integer)),
            FieldDecl::named("mid", TypeRef::Primitive(Primitive::Data)),
        ]))
        .unwrap();

    let definitions = derive(&universe, &[key("Order")]).unwrap();

    assert_eq!(
        json_of(&definitions, "Order"),
        json!({
            "dataType": "constructor",
            "fields": [{ "dataType": "bytes" }, { "dataType": "integer" }, {}],
            "index": 0
        })
    );
}

#[test]
fn recursive_tree_derives_to_finite_registry() {
    let mut universe = TypeUniverse::new();
    universe
        .declare(TypeDeclaration::sum(key("Tree"), vec![
            ConstructorDecl::new("Leaf", vec![FieldDecl::positional(TypeRef::Primitive(
                Primitive::Integer,
            ))]),
            ConstructorDecl::new("Node", vec![FieldDecl::positional(TypeRef::list(named("Tree")))]),
        ]))
        .unwrap();

    let definitions = derive(&universe, &[key("Tree")]).unwrap();

    assert_eq!(definitions.len(), 1);
    assert_eq!(
        json_of(&definitions, "Tree"),
        json!({
            "oneOf": [
                {
                    "title": "Leaf",
                    "dataType": "constructor",
                    "fields": [{ "dataType": "integer" }],
                    "index": 0
                },
                {
                    "title": "Node",
                    "dataType": "constructor",
                    "fields": [{ "dataType": "list", "items": { "$ref": "#/definitions/Tree" } }],
                    "index": 1
                }
            ]
        })
    );
}

#[test]
fn mutually_recursive_types_reference_each_other() {
    let mut universe = TypeUniverse::new();
    universe
        .declare(TypeDeclaration::sum(key("Even"), vec![
            ConstructorDecl::new("Zero", Vec::new()),
            ConstructorDecl::new("SuccOdd", vec![FieldDecl::positional(named("Odd"))]),
        ]))
        .unwrap();
    universe
        .declare(TypeDeclaration::record(key("Odd"), vec![FieldDecl::positional(named("Even"))]))
        .unwrap();

    let definitions = derive(&universe, &[key("Even")]).unwrap();

    assert_eq!(
        json_of(&definitions, "Odd"),
        json!({
            "dataType": "constructor",
            "fields": [{ "$ref": "#/definitions/Even" }],
            "index": 0
        })
    );
}

#[test]
fn inline_structures_nest_named_references() {
    let mut universe = TypeUniverse::new();
    universe
        .declare(TypeDeclaration::alias(key("Key"), TypeRef::Primitive(Primitive::Bytes)))
        .unwrap();
    universe
        .declare(TypeDeclaration::record(key("Ledger"), vec![
            FieldDecl::positional(TypeRef::map(
                named("Key"),
                TypeRef::Primitive(Primitive::Integer),
            )),
            FieldDecl::positional(TypeRef::pair(
                TypeRef::Primitive(Primitive::Bool),
                TypeRef::Primitive(Primitive::String),
            )),
            FieldDecl::positional(TypeRef::Primitive(Primitive::Unit)),
        ]))
        .unwrap();

    let definitions = derive(&universe, &[key("Ledger")]).unwrap();

    assert_eq!(
        json_of(&definitions, "Ledger"),
        json!({
            "dataType": "constructor",
            "fields": [
                {
                    "dataType": "map",
                    "keys": { "$ref": "#/definitions/Key" },
                    "values": { "dataType": "integer" }
                },
                {
                    "dataType": "#pair",
                    "left": { "dataType": "#boolean" },
                    "right": { "dataType": "#string" }
                },
                { "dataType": "#unit" }
            ],
            "index": 0
        })
    );
}

#[test]
fn bounded_shapes_emit_validation_keywords() {
    let mut universe = TypeUniverse::new();
    universe
        .declare(TypeDeclaration::new(
            key("Percent"),
            TypeShape::BoundedInteger(IntegerBounds {
                minimum: Some(0),
                maximum: Some(100),
                ..IntegerBounds::default()
            }),
        ))
        .unwrap();
    universe
        .declare(TypeDeclaration::new(
            key("Hash28"),
            TypeShape::BoundedBytes(BytesBounds {
                min_length: Some(28),
                max_length: Some(28),
            }),
        ))
        .unwrap();
    universe
        .declare(TypeDeclaration::new(key("Signers"), TypeShape::BoundedList {
            items: named("Hash28"),
            bounds: ListBounds {
                min_items: Some(1),
                max_items: None,
                unique_items: Some(true),
            },
        }))
        .unwrap();

    let definitions = derive(&universe, &[key("Percent"), key("Signers")]).unwrap();

    assert_eq!(
        json_of(&definitions, "Percent"),
        json!({ "dataType": "integer", "minimum": 0, "maximum": 100 })
    );
    assert_eq!(
        json_of(&definitions, "Hash28"),
        json!({ "dataType": "bytes", "minLength": 28, "maxLength": 28 })
    );
    assert_eq!(
        json_of(&definitions, "Signers"),
        json!({
            "dataType": "list",
            "items": { "$ref": "#/definitions/Hash28" },
            "minItems": 1,
            "uniqueItems": true
        })
    );
}

#[test]
fn ids_with_pointer_characters_are_escaped() {
    let mut universe = TypeUniverse::new();
    universe
        .declare(
            TypeDeclaration::alias(key("Script"), TypeRef::Primitive(Primitive::Bytes))
                .with_id("cardano/script~hash"),
        )
        .unwrap();
    universe
        .declare(TypeDeclaration::record(key("Holder"), vec![FieldDecl::positional(named(
            "Script",
        ))]))
        .unwrap();

    let definitions = derive(&universe, &[key("Holder")]).unwrap();

    assert_eq!(
        json_of(&definitions, "Holder")["fields"][0],
        json!({ "$ref": "#/definitions/cardano~1script~0hash" })
    );
    assert!(definitions.contains(&DefinitionId::new("cardano/script~hash")));
}

#[test]
fn applied_types_get_argument_suffixed_ids() {
    let mut universe = TypeUniverse::new();
    universe.declare_type::<Vec<Option<i64>>>().unwrap();
    let list_key = match <Vec<Option<i64>>>::type_ref() {
        TypeRef::Named(key) => key,
        other => panic!("expected named type, got {other:?}"),
    };

    let definitions = derive(&universe, &[list_key]).unwrap();

    let ids: Vec<&str> = definitions.ids().map(DefinitionId::as_str).collect();
    assert_eq!(ids, vec!["Integer", "List_Option_Integer", "Option_Integer"]);
    assert_eq!(
        json_of(&definitions, "List_Option_Integer"),
        json!({ "dataType": "list", "items": { "$ref": "#/definitions/Option_Integer" } })
    );
}

#[test]
fn ambiguous_applied_ids_collide_until_overridden() {
    let map_of = |left: &str, right: &str| key("Map").with_args(vec![key(left), key(right)]);
    let declare_all = |override_right: bool| {
        let mut universe = TypeUniverse::new();
        for name in ["A", "A_B", "B_C", "C"] {
            universe
                .declare(TypeDeclaration::alias(key(name), TypeRef::Primitive(Primitive::Integer)))
                .unwrap();
        }
        universe
            .declare(TypeDeclaration::alias(
                map_of("A_B", "C"),
                TypeRef::map(named("A_B"), named("C")),
            ))
            .unwrap();
        let right =
            TypeDeclaration::alias(map_of("A", "B_C"), TypeRef::map(named("A"), named("B_C")));
        let right = if override_right { right.with_id("Map_A__B_C") } else { right };
        universe.declare(right).unwrap();
        universe
    };
    let roots = [map_of("A_B", "C"), map_of("A", "B_C")];

    let err = derive(&declare_all(false), &roots).unwrap_err();
    let BlueprintError::DuplicateDefinitionId {
        id, ..
    } = err
    else {
        panic!("expected duplicate definition id, got {err:?}");
    };
    assert_eq!(id.as_str(), "Map_A_B_C");

    let definitions = derive(&declare_all(true), &roots).unwrap();
    assert!(definitions.get(&DefinitionId::new("Map_A_B_C")).is_some());
    assert!(definitions.get(&DefinitionId::new("Map_A__B_C")).is_some());
}

#[test]
fn conflicting_redeclaration_is_rejected() {
    let mut universe = TypeUniverse::new();
    universe
        .declare(TypeDeclaration::alias(key("Amount"), TypeRef::Primitive(Primitive::Integer)))
        .unwrap();
    universe
        .declare(TypeDeclaration::alias(key("Amount"), TypeRef::Primitive(Primitive::Integer)))
        .unwrap();

    let err = universe
        .declare(TypeDeclaration::alias(key("Amount"), TypeRef::Primitive(Primitive::Bytes)))
        .unwrap_err();

    assert_eq!(err, BlueprintError::ConflictingDeclaration(key("Amount")));
}

#[test]
fn reference_to_undeclared_field_type_is_rejected() {
    let mut universe = TypeUniverse::new();
    universe
        .declare(TypeDeclaration::record(key("Holder"), vec![FieldDecl::positional(named(
            "Missing",
        ))]))
        .unwrap();

    let err = derive(&universe, &[key("Holder")]).unwrap_err();

    assert_eq!(err, BlueprintError::UndeclaredType(key("Missing")));
}
