//! SHA-256 chunk digests.

use sha2::{Digest, Sha256};

use crate::chunk::ChunkDigest;

/// Hashes one chunk with SHA-256.
pub(crate) fn digest(data: &[u8]) -> ChunkDigest {
    ChunkDigest::new(Sha256::digest(data).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        assert_eq!(
            digest(b"abc").to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_differs_from_blake3() {
        assert_ne!(digest(b"abc"), crate::hash::blake3::digest(b"abc"));
    }
}
