// crates/contract-blueprint-core/src/runtime/assembler/tests.rs
// ============================================================================
// Module: Blueprint Assembler Unit Tests
// Description: Unit coverage for assembly validation steps.
// Purpose: Ensure purpose, uniqueness, closure, and ordering checks hold.
// Dependencies: crate::runtime::assembler
// ============================================================================

//! ## Overview
//! Builds small blueprints through [`super::BlueprintAssembler`] and checks
//! each validation step in isolation.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only panic-based assertions are permitted."
)]

use super::ArgumentDecl;
use super::AssemblerOptions;
use super::BlueprintAssembler;
use super::ValidatorDecl;
use super::ValidatorUniqueness;
use crate::core::blueprint::PlutusVersion;
use crate::core::blueprint::Preamble;
use crate::core::blueprint::Purpose;
use crate::core::blueprint::PurposeSet;
use crate::core::error::BlueprintError;
use crate::core::identifiers::DefinitionId;
use crate::core::schema::SchemaNode;
use crate::core::types::Primitive;
use crate::core::types::TypeDeclaration;
use crate::core::types::TypeKey;
use crate::core::types::TypeRef;
use crate::core::types::TypeUniverse;

fn key(name: &str) -> TypeKey {
    TypeKey::new("Test", name)
}

fn preamble() -> Preamble {
    Preamble::new("test", "1.0.0", PlutusVersion::V3)
}

fn universe() -> TypeUniverse {
    let mut universe = TypeUniverse::new();
    universe
        .declare(TypeDeclaration::alias(key("Amount"), TypeRef::Primitive(Primitive::Integer)))
        .unwrap();
    universe
        .declare(TypeDeclaration::alias(key("Stray"), TypeRef::Primitive(Primitive::Bytes)))
        .unwrap();
    universe
}

fn amount_redeemer(purpose: Purpose) -> ArgumentDecl {
    ArgumentDecl::single(purpose, TypeRef::named(key("Amount")))
}

#[test]
fn validators_are_sorted_by_title_then_purposes() {
    let universe = universe();
    let blueprint = BlueprintAssembler::new(preamble(), &universe)
        .with_root(key("Amount"))
        .with_validator(ValidatorDecl::new("zeta", amount_redeemer(Purpose::Spend)))
        .with_validator(ValidatorDecl::new("alpha", amount_redeemer(Purpose::Mint)))
        .with_validator(ValidatorDecl::new("alpha", amount_redeemer(Purpose::Spend)))
        .assemble()
        .unwrap();

    let order: Vec<(&str, Vec<Purpose>)> = blueprint
        .validators
        .iter()
        .map(|validator| (validator.title.as_str(), validator.redeemer.purposes.iter().collect()))
        .collect();
    assert_eq!(order, vec![
        ("alpha", vec![Purpose::Spend]),
        ("alpha", vec![Purpose::Mint]),
        ("zeta", vec![Purpose::Spend]),
    ]);
    assert_eq!(
        blueprint.validators[0].redeemer.schema,
        SchemaNode::reference(DefinitionId::new("Amount"))
    );
}

#[test]
fn duplicate_validator_is_rejected_by_default() {
    let universe = universe();
    let err = BlueprintAssembler::new(preamble(), &universe)
        .with_root(key("Amount"))
        .with_validator(ValidatorDecl::new("vault", amount_redeemer(Purpose::Spend)))
        .with_validator(ValidatorDecl::new("vault", amount_redeemer(Purpose::Spend)))
        .assemble()
        .unwrap_err();

    assert_eq!(err, BlueprintError::DuplicateValidator(String::from("vault (spend)")));
}

#[test]
fn duplicate_validator_is_kept_when_allowed() {
    let universe = universe();
    let options = AssemblerOptions {
        validator_uniqueness: ValidatorUniqueness::Allow,
        ..AssemblerOptions::default()
    };
    let blueprint = BlueprintAssembler::new(preamble(), &universe)
        .with_options(options)
        .with_root(key("Amount"))
        .with_validator(ValidatorDecl::new("vault", amount_redeemer(Purpose::Spend)))
        .with_validator(ValidatorDecl::new("vault", amount_redeemer(Purpose::Spend)))
        .assemble()
        .unwrap();

    assert_eq!(blueprint.validators.len(), 2);
}

#[test]
fn empty_purpose_set_is_rejected() {
    let universe = universe();
    let parameter = ArgumentDecl::new(PurposeSet::default(), TypeRef::named(key("Amount")));
    let err = BlueprintAssembler::new(preamble(), &universe)
        .with_root(key("Amount"))
        .with_validator(
            ValidatorDecl::new("vault", amount_redeemer(Purpose::Spend)).with_parameter(parameter),
        )
        .assemble()
        .unwrap_err();

    assert_eq!(err, BlueprintError::EmptyPurposeSet(String::from("vault.parameters[0]")));
}

#[test]
fn argument_outside_roots_is_unreferenced() {
    let universe = universe();
    let err = BlueprintAssembler::new(preamble(), &universe)
        .with_root(key("Amount"))
        .with_validator(
            ValidatorDecl::new("vault", amount_redeemer(Purpose::Spend))
                .with_datum(ArgumentDecl::single(Purpose::Spend, TypeRef::named(key("Stray")))),
        )
        .assemble()
        .unwrap_err();

    assert_eq!(err, BlueprintError::UnreferencedType(key("Stray")));
}

#[test]
fn unrooted_types_stay_out_of_definitions() {
    let universe = universe();
    let blueprint = BlueprintAssembler::new(preamble(), &universe)
        .with_root(key("Amount"))
        .with_validator(ValidatorDecl::new("vault", amount_redeemer(Purpose::Spend)))
        .assemble()
        .unwrap();

    let ids: Vec<&str> = blueprint.definitions.ids().map(DefinitionId::as_str).collect();
    assert_eq!(ids, vec!["Amount"]);
}
