// crates/contract-blueprint-core/tests/hashing.rs
// ============================================================================
// Module: Canonical Hashing Tests
// Description: Verifies canonical blueprint rendering and hashing.
// ============================================================================
//! ## Overview
//! Ensures canonical hashes are stable across construction order and that
//! script hashes bind the ledger language version.

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

use contract_blueprint_core::ArgumentDecl;
use contract_blueprint_core::BlueprintAssembler;
use contract_blueprint_core::CompiledValidator;
use contract_blueprint_core::ContractBlueprint;
use contract_blueprint_core::HashAlgorithm;
use contract_blueprint_core::PlutusVersion;
use contract_blueprint_core::Preamble;
use contract_blueprint_core::Primitive;
use contract_blueprint_core::Purpose;
use contract_blueprint_core::TypeDeclaration;
use contract_blueprint_core::TypeKey;
use contract_blueprint_core::TypeRef;
use contract_blueprint_core::TypeUniverse;
use contract_blueprint_core::ValidatorDecl;
use contract_blueprint_core::hashing::hash_bytes;
use contract_blueprint_core::hashing::hash_canonical_json;
use contract_blueprint_core::hashing::hash_script;
use contract_blueprint_core::render_canonical;
use serde_json::json;

fn key(name: &str) -> TypeKey {
    TypeKey::new("Demo", name)
}

fn blueprint(declare_reversed: bool, validators_reversed: bool) -> ContractBlueprint {
    let mut declarations = vec![
        TypeDeclaration::alias(key("Amount"), TypeRef::Primitive(Primitive::Integer)),
        TypeDeclaration::alias(key("Owner"), TypeRef::Primitive(Primitive::Bytes)),
    ];
    if declare_reversed {
        declarations.reverse();
    }
    let mut universe = TypeUniverse::new();
    for declaration in declarations {
        universe.declare(declaration).unwrap();
    }
    let mut validators = vec![
        ValidatorDecl::new(
            "a",
            ArgumentDecl::single(Purpose::Spend, TypeRef::named(key("Amount"))),
        ),
        ValidatorDecl::new("b", ArgumentDecl::single(Purpose::Mint, TypeRef::named(key("Owner")))),
    ];
    if validators_reversed {
        validators.reverse();
    }
    let preamble = Preamble::new("hash", "1.0.0", PlutusVersion::V3);
    let mut assembler =
        BlueprintAssembler::new(preamble, &universe).with_roots([key("Amount"), key("Owner")]);
    for validator in validators {
        assembler = assembler.with_validator(validator);
    }
    assembler.assemble().unwrap()
}

#[test]
fn canonical_hash_ignores_construction_order() {
    let hash_a = blueprint(false, false).canonical_hash().unwrap();
    let hash_b = blueprint(true, true).canonical_hash().unwrap();

    assert_eq!(hash_a, hash_b);
    assert_eq!(hash_a.algorithm, HashAlgorithm::Sha256);
    assert_eq!(hash_a.as_hex().len(), 64);
}

#[test]
fn canonical_hash_covers_canonical_render_bytes() {
    let blueprint = blueprint(false, false);
    let bytes = render_canonical(&blueprint).unwrap();

    assert_eq!(blueprint.canonical_hash().unwrap(), hash_bytes(HashAlgorithm::Sha256, &bytes));
    assert!(bytes.starts_with(br#"{"$schema":"#));
}

#[test]
fn canonical_hash_is_order_independent_for_maps() {
    let hash_a = hash_canonical_json(HashAlgorithm::Sha256, &json!({ "b": 2, "a": 1 })).unwrap();
    let hash_b = hash_canonical_json(HashAlgorithm::Sha256, &json!({ "a": 1, "b": 2 })).unwrap();

    assert_eq!(hash_a, hash_b);
}

#[test]
fn sha256_of_empty_input_matches_known_vector() {
    assert_eq!(
        hash_bytes(HashAlgorithm::Sha256, b"").as_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn script_hash_binds_language_version() {
    let code = vec![0x49, 0x48, 0x01, 0x00];
    let v2 = CompiledValidator::new(PlutusVersion::V2, code.clone());
    let v3 = CompiledValidator::new(PlutusVersion::V3, code.clone());

    assert_ne!(v2.hash, v3.hash);
    assert_eq!(v3.hash, hash_script(HashAlgorithm::Sha256, 3, &code));

    let mut prefixed = vec![3_u8];
    prefixed.extend_from_slice(&code);
    assert_eq!(v3.hash, hash_bytes(HashAlgorithm::Sha256, &prefixed));
}
