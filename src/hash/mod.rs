//! Digest primitives for chunk identity.
//!
//! BLAKE3 is always available. SHA-256 requires the `hash-sha256` feature.

mod blake3;
#[cfg(feature = "hash-sha256")]
mod sha256;

use std::fmt;
use std::str::FromStr;

use crate::chunk::ChunkDigest;
use crate::error::ScanError;

/// The cryptographic digest used to fingerprint chunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// BLAKE3 (256-bit output).
    #[default]
    Blake3,
    /// SHA-256.
    #[cfg(feature = "hash-sha256")]
    Sha256,
}

impl DigestAlgorithm {
    /// Hashes one chunk.
    pub fn digest(self, data: &[u8]) -> ChunkDigest {
        match self {
            DigestAlgorithm::Blake3 => blake3::digest(data),
            #[cfg(feature = "hash-sha256")]
            DigestAlgorithm::Sha256 => sha256::digest(data),
        }
    }

    /// Returns the lowercase algorithm name.
    pub fn name(self) -> &'static str {
        match self {
            DigestAlgorithm::Blake3 => "blake3",
            #[cfg(feature = "hash-sha256")]
            DigestAlgorithm::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blake3" => Ok(DigestAlgorithm::Blake3),
            #[cfg(feature = "hash-sha256")]
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            _ => Err(ScanError::InvalidConfig {
                message: "unknown or disabled digest algorithm",
            }),
        }
    }
}
