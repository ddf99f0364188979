//! Config conversion tests for contract-blueprint-config.
// crates/contract-blueprint-config/tests/conversion.rs
// =============================================================================
// Module: Config Conversion Tests
// Description: Validate translation of config sections into core options.
// Purpose: Ensure defaults and overrides reach the derivation engine intact.
// =============================================================================

use contract_blueprint_config::BlueprintConfig;
use contract_blueprint_config::config_toml_example;
use contract_blueprint_core::DEFAULT_MAX_DEFINITIONS;
use contract_blueprint_core::DEFAULT_MAX_DEPTH;
use contract_blueprint_core::DerivationOptions;
use contract_blueprint_core::HashAlgorithm;
use contract_blueprint_core::PlutusVersion;
use contract_blueprint_core::ValidatorUniqueness;

type TestResult = Result<(), String>;

fn ensure(condition: bool, message: &str) -> TestResult {
    if condition { Ok(()) } else { Err(message.to_string()) }
}

#[test]
fn omitted_sections_use_core_defaults() -> TestResult {
    let config = BlueprintConfig::from_toml_str(
        "[preamble]\ntitle = \"demo\"\nversion = \"0.1.0\"\nplutus_version = \"v3\"\n",
    )
    .map_err(|err| err.to_string())?;

    ensure(config.derivation_options() == DerivationOptions::default(), "derivation defaults")?;
    let assembler = config.assembler_options();
    ensure(
        assembler.validator_uniqueness == ValidatorUniqueness::Reject,
        "uniqueness defaults to reject",
    )?;
    ensure(assembler.derivation.max_definitions == DEFAULT_MAX_DEFINITIONS, "max definitions")?;
    ensure(assembler.derivation.max_depth == DEFAULT_MAX_DEPTH, "max depth")?;
    ensure(config.hash_algorithm() == HashAlgorithm::Sha256, "hash algorithm")?;
    ensure(config.blueprint_id().is_none(), "no blueprint id")?;
    Ok(())
}

#[test]
fn overrides_flow_into_core_options() -> TestResult {
    let config = BlueprintConfig::from_toml_str(
        r#"[preamble]
id = "acme/vault"
title = "vault"
version = "2.0.0"
plutus_version = "v2"

[derivation]
constructor_titles = false
field_titles = true
max_depth = 32

[assembler]
validator_uniqueness = "allow"
"#,
    )
    .map_err(|err| err.to_string())?;

    let options = config.assembler_options();
    ensure(!options.derivation.constructor_titles, "constructor titles off")?;
    ensure(options.derivation.field_titles, "field titles on")?;
    ensure(options.derivation.max_depth == 32, "max depth override")?;
    ensure(options.derivation.max_definitions == DEFAULT_MAX_DEFINITIONS, "max definitions")?;
    ensure(options.validator_uniqueness == ValidatorUniqueness::Allow, "uniqueness allow")?;
    ensure(config.blueprint_id() == Some("acme/vault"), "blueprint id")?;
    Ok(())
}

#[test]
fn example_preamble_converts_with_compiler_metadata() -> TestResult {
    let config =
        BlueprintConfig::from_toml_str(&config_toml_example()).map_err(|err| err.to_string())?;

    let preamble = config.preamble();
    ensure(preamble.title == "acme/escrow", "title")?;
    ensure(preamble.plutus_version == PlutusVersion::V3, "plutus version")?;
    ensure(preamble.license.as_deref() == Some("Apache-2.0"), "license")?;
    let compiler = preamble.compiler.ok_or_else(|| "compiler missing".to_string())?;
    ensure(compiler.name == "plutus-tx", "compiler name")?;
    ensure(compiler.version.as_deref() == Some("1.40.0"), "compiler version")?;
    Ok(())
}
