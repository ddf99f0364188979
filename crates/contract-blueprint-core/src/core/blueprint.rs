// crates/contract-blueprint-core/src/core/blueprint.rs
// ============================================================================
// Module: Contract Blueprint Model
// Description: Preamble, validator, argument, and top-level blueprint shapes.
// Purpose: Provide the immutable document produced by blueprint assembly.
// Dependencies: crate::core::{hashing, identifiers, schema}, serde
// ============================================================================

//! ## Overview
//! A [`ContractBlueprint`] bundles preamble metadata, validator descriptions,
//! and the finalized [`Definitions`]. Validators reference definitions by id
//! only; the definitions map is the single source of schema content.
//!
//! Serialization follows the CIP-0057 document shape.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;
use serde::ser::SerializeStruct;

use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashAlgorithm;
use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::hashing::hash_canonical_json;
use crate::core::hashing::hash_script;
use crate::core::identifiers::DefinitionId;
use crate::core::schema::SchemaNode;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `$schema` URI emitted on every blueprint.
pub const BLUEPRINT_SCHEMA_URI: &str =
    "https://cips.cardano.org/cips/cip57/schemas/plutus-blueprint.json";

/// `$vocabulary` entries emitted on every blueprint.
pub const BLUEPRINT_VOCABULARY: &[&str] = &[
    "https://json-schema.org/draft/2020-12/vocab/core",
    "https://json-schema.org/draft/2020-12/vocab/applicator",
    "https://json-schema.org/draft/2020-12/vocab/validation",
    "https://cips.cardano.org/cips/cip57",
];

// ============================================================================
// SECTION: Purposes
// ============================================================================

/// On-chain action an argument applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    /// Spending an output.
    Spend,
    /// Minting or burning assets.
    Mint,
    /// Withdrawing rewards.
    Withdraw,
    /// Publishing a certificate.
    Publish,
    /// Casting a governance vote.
    Vote,
    /// Submitting a governance proposal.
    Propose,
}

impl Purpose {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spend => "spend",
            Self::Mint => "mint",
            Self::Withdraw => "withdraw",
            Self::Publish => "publish",
            Self::Vote => "vote",
            Self::Propose => "propose",
        }
    }
}

/// Ordered set of purposes.
///
/// Serializes as a bare string when it holds one purpose and as
/// `{"oneOf": [...]}` otherwise. Assembly rejects empty sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PurposeSet(BTreeSet<Purpose>);

impl PurposeSet {
    /// Set containing a single purpose.
    #[must_use]
    pub fn single(purpose: Purpose) -> Self {
        Self(BTreeSet::from([purpose]))
    }

    /// Returns `true` when no purpose is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates purposes in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Purpose> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Purpose> for PurposeSet {
    fn from_iter<I: IntoIterator<Item = Purpose>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for PurposeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut purposes = self.0.iter();
        match (purposes.next(), purposes.next()) {
            (Some(only), None) => only.serialize(serializer),
            _ => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("oneOf", &self.0)?;
                map.end()
            }
        }
    }
}

// ============================================================================
// SECTION: Arguments
// ============================================================================

/// Redeemer or datum description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentBlueprint {
    /// Optional title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Purposes the argument applies to.
    #[serde(rename = "purpose")]
    pub purposes: PurposeSet,
    /// Argument schema, normally a `$ref` into the definitions.
    pub schema: SchemaNode,
}

/// Validator parameter description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterBlueprint {
    /// Optional title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Purposes the parameter applies to.
    #[serde(rename = "purpose")]
    pub purposes: PurposeSet,
    /// Parameter schema, normally a `$ref` into the definitions.
    pub schema: SchemaNode,
}

// ============================================================================
// SECTION: Compiled Code
// ============================================================================

/// Ledger language version of a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlutusVersion {
    /// First ledger language.
    V1,
    /// Second ledger language.
    V2,
    /// Third ledger language.
    V3,
}

impl PlutusVersion {
    /// Language tag byte prefixed to scripts before hashing.
    #[must_use]
    pub const fn language_tag(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
        }
    }
}

/// Serialized validator code with its hash.
///
/// # Invariants
/// - When built with [`CompiledValidator::new`], `hash` covers the language
///   tag followed by `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledValidator {
    /// Ledger language the code targets.
    pub version: PlutusVersion,
    /// Serialized script bytes.
    pub code: Vec<u8>,
    /// Script hash.
    pub hash: HashDigest,
}

impl CompiledValidator {
    /// Wraps `code`, hashing it with the default algorithm.
    #[must_use]
    pub fn new(version: PlutusVersion, code: Vec<u8>) -> Self {
        Self::new_with(DEFAULT_HASH_ALGORITHM, version, code)
    }

    /// Wraps `code`, hashing it with `algorithm`.
    #[must_use]
    pub fn new_with(algorithm: HashAlgorithm, version: PlutusVersion, code: Vec<u8>) -> Self {
        let hash = hash_script(algorithm, version.language_tag(), &code);
        Self {
            version,
            code,
            hash,
        }
    }

    /// Wraps `code` with a hash computed elsewhere.
    #[must_use]
    pub const fn with_hash(version: PlutusVersion, code: Vec<u8>, hash: HashDigest) -> Self {
        Self {
            version,
            code,
            hash,
        }
    }
}

impl Serialize for CompiledValidator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CompiledValidator", 2)?;
        state.serialize_field("compiledCode", &hex::encode(&self.code))?;
        state.serialize_field("hash", self.hash.as_hex())?;
        state.end()
    }
}

// ============================================================================
// SECTION: Validators
// ============================================================================

/// Description of one validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatorBlueprint {
    /// Validator title.
    pub title: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Redeemer argument.
    pub redeemer: ArgumentBlueprint,
    /// Datum argument, for spending validators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datum: Option<ArgumentBlueprint>,
    /// Parameters applied before deployment, in application order.
    pub parameters: Vec<ParameterBlueprint>,
    /// Compiled code and hash.
    #[serde(flatten)]
    pub compiled: Option<CompiledValidator>,
}

impl ValidatorBlueprint {
    /// Visits every argument and parameter schema with a label.
    pub fn for_each_schema(&self, mut visit: impl FnMut(String, &SchemaNode)) {
        visit(format!("{}.redeemer", self.title), &self.redeemer.schema);
        if let Some(datum) = &self.datum {
            visit(format!("{}.datum", self.title), &datum.schema);
        }
        for (position, parameter) in self.parameters.iter().enumerate() {
            visit(format!("{}.parameters[{position}]", self.title), &parameter.schema);
        }
    }
}

// ============================================================================
// SECTION: Preamble
// ============================================================================

/// Compiler that produced the validators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerInfo {
    /// Compiler name.
    pub name: String,
    /// Compiler version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Blueprint metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preamble {
    /// Contract title.
    pub title: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Contract version.
    pub version: String,
    /// Target ledger language.
    pub plutus_version: PlutusVersion,
    /// Optional compiler metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler: Option<CompilerInfo>,
    /// Optional SPDX license identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

impl Preamble {
    /// Preamble with the required fields only.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        version: impl Into<String>,
        plutus_version: PlutusVersion,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            version: version.into(),
            plutus_version,
            compiler: None,
            license: None,
        }
    }
}

// ============================================================================
// SECTION: Definitions
// ============================================================================

/// Finalized definition map, ordered by identifier.
///
/// # Invariants
/// - When produced by registry finalization, every `$ref` inside resolves to
///   a key of this map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Definitions(BTreeMap<DefinitionId, SchemaNode>);

impl Definitions {
    /// Wraps an already validated map.
    pub(crate) const fn from_map(map: BTreeMap<DefinitionId, SchemaNode>) -> Self {
        Self(map)
    }

    /// Returns the schema for `id`.
    #[must_use]
    pub fn get(&self, id: &DefinitionId) -> Option<&SchemaNode> {
        self.0.get(id)
    }

    /// Returns `true` when `id` is defined.
    #[must_use]
    pub fn contains(&self, id: &DefinitionId) -> bool {
        self.0.contains_key(id)
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there are no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates definitions in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&DefinitionId, &SchemaNode)> {
        self.0.iter()
    }

    /// Iterates identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = &DefinitionId> {
        self.0.keys()
    }
}

// ============================================================================
// SECTION: Contract Blueprint
// ============================================================================

/// Complete, immutable contract blueprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractBlueprint {
    /// Optional `$id`.
    pub id: Option<String>,
    /// Contract metadata.
    pub preamble: Preamble,
    /// Validators ordered by title, then redeemer purposes.
    pub validators: Vec<ValidatorBlueprint>,
    /// Finalized schema definitions.
    pub definitions: Definitions,
}

impl ContractBlueprint {
    /// Computes the canonical hash of the blueprint document.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::Canonicalization`] when serialization fails.
    pub fn canonical_hash(&self) -> Result<HashDigest, HashError> {
        hash_canonical_json(DEFAULT_HASH_ALGORITHM, self)
    }
}

impl Serialize for ContractBlueprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(id) = &self.id {
            map.serialize_entry("$id", id)?;
        }
        map.serialize_entry("$schema", BLUEPRINT_SCHEMA_URI)?;
        let vocabulary: BTreeMap<&str, bool> =
            BLUEPRINT_VOCABULARY.iter().map(|uri| (*uri, true)).collect();
        map.serialize_entry("$vocabulary", &vocabulary)?;
        map.serialize_entry("preamble", &self.preamble)?;
        map.serialize_entry("validators", &self.validators)?;
        map.serialize_entry("definitions", &self.definitions)?;
        map.end()
    }
}
