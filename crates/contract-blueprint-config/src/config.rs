// crates/contract-blueprint-config/src/config.rs
// ============================================================================
// Module: Contract Blueprint Configuration
// Description: Configuration loading and validation for blueprint derivation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: contract-blueprint-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Unknown keys are rejected, and every numeric limit is bounded by a hard
//! ceiling so a config file cannot lift derivation past safe sizes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use contract_blueprint_core::AssemblerOptions;
use contract_blueprint_core::CompilerInfo;
use contract_blueprint_core::DEFAULT_HASH_ALGORITHM;
use contract_blueprint_core::DEFAULT_MAX_DEFINITIONS;
use contract_blueprint_core::DEFAULT_MAX_DEPTH;
use contract_blueprint_core::DerivationOptions;
use contract_blueprint_core::HashAlgorithm;
use contract_blueprint_core::PlutusVersion;
use contract_blueprint_core::Preamble;
use contract_blueprint_core::ValidatorUniqueness;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "blueprint.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "CONTRACT_BLUEPRINT_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of the preamble title.
pub(crate) const MAX_TITLE_LENGTH: usize = 256;
/// Maximum length of the preamble description.
pub(crate) const MAX_DESCRIPTION_LENGTH: usize = 4096;
/// Maximum length of short preamble fields (version, license, compiler).
pub(crate) const MAX_SHORT_FIELD_LENGTH: usize = 128;
/// Hard ceiling for `derivation.max_definitions`.
pub(crate) const HARD_MAX_DEFINITIONS: usize = 65_536;
/// Hard ceiling for `derivation.max_depth`.
pub(crate) const HARD_MAX_DEPTH: usize = 4096;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Top-level blueprint configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlueprintConfig {
    /// Blueprint preamble metadata.
    pub preamble: PreambleConfig,
    /// Derivation options.
    #[serde(default)]
    pub derivation: DerivationConfig,
    /// Assembly policy.
    #[serde(default)]
    pub assembler: AssemblerConfig,
    /// Hashing settings.
    #[serde(default)]
    pub hashing: HashingConfig,
}

impl BlueprintConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        if content.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.preamble.validate()?;
        self.derivation.validate()?;
        Ok(())
    }

    /// Returns the blueprint preamble.
    #[must_use]
    pub fn preamble(&self) -> Preamble {
        self.preamble.to_preamble()
    }

    /// Returns the optional blueprint `$id`.
    #[must_use]
    pub fn blueprint_id(&self) -> Option<&str> {
        self.preamble.id.as_deref()
    }

    /// Returns the derivation options.
    #[must_use]
    pub const fn derivation_options(&self) -> DerivationOptions {
        self.derivation.to_options()
    }

    /// Returns the assembly options, derivation options included.
    #[must_use]
    pub const fn assembler_options(&self) -> AssemblerOptions {
        AssemblerOptions {
            validator_uniqueness: self.assembler.validator_uniqueness,
            derivation: self.derivation.to_options(),
        }
    }

    /// Returns the hash algorithm for script and blueprint hashes.
    #[must_use]
    pub const fn hash_algorithm(&self) -> HashAlgorithm {
        self.hashing.algorithm
    }
}

/// Preamble section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreambleConfig {
    /// Optional blueprint `$id`.
    #[serde(default)]
    pub id: Option<String>,
    /// Contract title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Contract version.
    pub version: String,
    /// Target ledger language.
    pub plutus_version: PlutusVersion,
    /// Optional SPDX license identifier.
    #[serde(default)]
    pub license: Option<String>,
    /// Optional compiler metadata.
    #[serde(default)]
    pub compiler: Option<CompilerConfig>,
}

impl PreambleConfig {
    /// Validates preamble fields.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_text("preamble.title", &self.title, MAX_TITLE_LENGTH)?;
        validate_text("preamble.version", &self.version, MAX_SHORT_FIELD_LENGTH)?;
        if let Some(id) = &self.id {
            validate_text("preamble.id", id, MAX_TITLE_LENGTH)?;
        }
        if let Some(description) = &self.description {
            validate_text("preamble.description", description, MAX_DESCRIPTION_LENGTH)?;
        }
        if let Some(license) = &self.license {
            validate_text("preamble.license", license, MAX_SHORT_FIELD_LENGTH)?;
        }
        if let Some(compiler) = &self.compiler {
            validate_text("preamble.compiler.name", &compiler.name, MAX_SHORT_FIELD_LENGTH)?;
            if let Some(version) = &compiler.version {
                validate_text("preamble.compiler.version", version, MAX_SHORT_FIELD_LENGTH)?;
            }
        }
        Ok(())
    }

    /// Converts the section into core preamble metadata.
    fn to_preamble(&self) -> Preamble {
        Preamble {
            title: self.title.clone(),
            description: self.description.clone(),
            version: self.version.clone(),
            plutus_version: self.plutus_version,
            compiler: self.compiler.as_ref().map(|compiler| CompilerInfo {
                name: compiler.name.clone(),
                version: compiler.version.clone(),
            }),
            license: self.license.clone(),
        }
    }
}

/// Compiler metadata section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Compiler name.
    pub name: String,
    /// Compiler version.
    #[serde(default)]
    pub version: Option<String>,
}

/// Derivation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DerivationConfig {
    /// Title sum constructors with their names.
    #[serde(default = "default_constructor_titles")]
    pub constructor_titles: bool,
    /// Title constructor fields with their names.
    #[serde(default)]
    pub field_titles: bool,
    /// Maximum definitions per blueprint.
    #[serde(default = "default_max_definitions")]
    pub max_definitions: usize,
    /// Maximum nesting depth of named types.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            constructor_titles: default_constructor_titles(),
            field_titles: false,
            max_definitions: default_max_definitions(),
            max_depth: default_max_depth(),
        }
    }
}

impl DerivationConfig {
    /// Validates derivation limits against hard ceilings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_definitions == 0 || self.max_definitions > HARD_MAX_DEFINITIONS {
            return Err(ConfigError::Invalid(format!(
                "derivation.max_definitions must be between 1 and {HARD_MAX_DEFINITIONS}"
            )));
        }
        if self.max_depth == 0 || self.max_depth > HARD_MAX_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "derivation.max_depth must be between 1 and {HARD_MAX_DEPTH}"
            )));
        }
        Ok(())
    }

    /// Converts the section into core derivation options.
    const fn to_options(self) -> DerivationOptions {
        DerivationOptions {
            constructor_titles: self.constructor_titles,
            field_titles: self.field_titles,
            max_definitions: self.max_definitions,
            max_depth: self.max_depth,
        }
    }
}

/// Assembler section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssemblerConfig {
    /// Duplicate validator policy.
    #[serde(default)]
    pub validator_uniqueness: ValidatorUniqueness,
}

/// Hashing section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashingConfig {
    /// Hash algorithm.
    #[serde(default = "default_hash_algorithm")]
    pub algorithm: HashAlgorithm,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            algorithm: default_hash_algorithm(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default for `derivation.constructor_titles`.
const fn default_constructor_titles() -> bool {
    true
}

/// Default for `derivation.max_definitions`.
const fn default_max_definitions() -> usize {
    DEFAULT_MAX_DEFINITIONS
}

/// Default for `derivation.max_depth`.
const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Default for `hashing.algorithm`.
const fn default_hash_algorithm() -> HashAlgorithm {
    DEFAULT_HASH_ALGORITHM
}

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a required text field: non-blank and within `max` bytes.
fn validate_text(field: &str, value: &str, max: usize) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > max {
        return Err(ConfigError::Invalid(format!("{field} exceeds {max} bytes")));
    }
    Ok(())
}
