// crates/contract-blueprint-core/src/core/hashing.rs
// ============================================================================
// Module: Blueprint Canonical Hashing
// Description: RFC 8785 JSON canonicalization and content hashing utilities.
// Purpose: Provide deterministic digests for compiled code and blueprints.
// Dependencies: hex, serde, serde_jcs, sha2
// ============================================================================

//! ## Overview
//! Blueprints are hashed over RFC 8785 (JCS) canonical JSON so the digest is
//! independent of formatting. Compiled validator payloads are hashed directly
//! over raw bytes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

// ============================================================================
// SECTION: Hash Algorithm
// ============================================================================

/// Supported hash algorithms for blueprint artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256 hashing.
    Sha256,
}

impl HashAlgorithm {
    /// Returns a stable label for the algorithm.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

/// Default hash algorithm for blueprint artifacts.
pub const DEFAULT_HASH_ALGORITHM: HashAlgorithm = HashAlgorithm::Sha256;

// ============================================================================
// SECTION: Hash Digest
// ============================================================================

/// Deterministic content hash representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashDigest {
    /// Hash algorithm identifier.
    pub algorithm: HashAlgorithm,
    /// Lowercase hex-encoded digest bytes.
    pub value: String,
}

impl HashDigest {
    /// Creates a new digest from raw digest bytes.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm, bytes: &[u8]) -> Self {
        Self {
            algorithm,
            value: hex::encode(bytes),
        }
    }

    /// Wraps an already hex-encoded digest, lowercasing it.
    #[must_use]
    pub fn from_hex(algorithm: HashAlgorithm, hex: &str) -> Self {
        Self {
            algorithm,
            value: hex.to_ascii_lowercase(),
        }
    }

    /// Returns the lowercase hex digest.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.value
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when computing canonical hashes.
#[derive(Debug, Error)]
pub enum HashError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Hashing Helpers
// ============================================================================

/// Returns canonical JSON bytes for a serializable value using RFC 8785.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn canonical_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, HashError> {
    serde_jcs::to_vec(value).map_err(|err| HashError::Canonicalization(err.to_string()))
}

/// Hashes canonical JSON using the provided algorithm.
///
/// # Errors
///
/// Returns [`HashError::Canonicalization`] when serialization fails.
pub fn hash_canonical_json<T: Serialize + ?Sized>(
    algorithm: HashAlgorithm,
    value: &T,
) -> Result<HashDigest, HashError> {
    let bytes = canonical_json_bytes(value)?;
    Ok(hash_bytes(algorithm, &bytes))
}

/// Hashes raw bytes using the provided algorithm.
#[must_use]
pub fn hash_bytes(algorithm: HashAlgorithm, bytes: &[u8]) -> HashDigest {
    hash_parts(algorithm, &[bytes])
}

/// Hashes a compiled script payload prefixed by its language tag byte.
///
/// The tag binds the digest to the ledger language version, so identical
/// code compiled for two versions never shares a hash.
#[must_use]
pub fn hash_script(algorithm: HashAlgorithm, language_tag: u8, code: &[u8]) -> HashDigest {
    hash_parts(algorithm, &[&[language_tag], code])
}

/// Feeds each part into a single digest in order.
fn hash_parts(algorithm: HashAlgorithm, parts: &[&[u8]]) -> HashDigest {
    match algorithm {
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            for part in parts {
                hasher.update(part);
            }
            HashDigest::new(HashAlgorithm::Sha256, &hasher.finalize())
        }
    }
}
