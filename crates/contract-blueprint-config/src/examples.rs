// crates/contract-blueprint-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for blueprint configuration. The example is kept valid
//! by the crate's load tests.

/// Returns a canonical example `blueprint.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[preamble]
title = "acme/escrow"
description = "Escrow validators for the acme marketplace"
version = "1.0.0"
plutus_version = "v3"
license = "Apache-2.0"
# id = "acme/escrow"

[preamble.compiler]
name = "plutus-tx"
version = "1.40.0"

[derivation]
constructor_titles = true
field_titles = false
max_definitions = 4096
max_depth = 256

[assembler]
validator_uniqueness = "reject"

[hashing]
algorithm = "sha256"
"#,
    )
}
