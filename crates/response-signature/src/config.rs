use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::error::SignatureError;

/// Options recognized when wrapping a handler.
///
/// Only `digest` is understood; any other key in a deserialized source is
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignatureOptions {
    /// Digest name, e.g. `"sha256"` or `"SHA-512"`. Absent or empty selects
    /// [`DigestAlgorithm::default`].
    #[serde(default)]
    pub digest: Option<String>,
}

impl SignatureOptions {
    pub fn with_digest(digest: impl Into<String>) -> Self {
        Self { digest: Some(digest.into()) }
    }

    /// Resolves the configured digest, falling back to SHA-256.
    pub fn digest_algorithm(&self) -> Result<DigestAlgorithm, SignatureError> {
        match self.digest.as_deref().map(str::trim) {
            None | Some("") => Ok(DigestAlgorithm::default()),
            Some(name) => name.parse(),
        }
    }
}

/// Message digest applied inside the signature scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    Sha1,
    Sha224,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Hashes `data` with this algorithm.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha1 => Sha1::digest(data).to_vec(),
            Self::Sha224 => Sha224::digest(data).to_vec(),
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha384 => Sha384::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = SignatureError;

    /// Accepts OpenSSL-style names regardless of case, with or without the
    /// dash (`sha256`, `SHA256`, `SHA-256`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "");
        match normalized.as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha224" => Ok(Self::Sha224),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(SignatureError::UnsupportedDigest(s.to_string())),
        }
    }
}
