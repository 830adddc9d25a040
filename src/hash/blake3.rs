//! BLAKE3 chunk digests.

use crate::chunk::ChunkDigest;

/// Hashes one chunk with BLAKE3.
pub(crate) fn digest(data: &[u8]) -> ChunkDigest {
    ChunkDigest::new(blake3::hash(data).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest() {
        let hash = digest(b"hello world");

        // Deterministic
        assert_eq!(hash, digest(b"hello world"));

        // Different data gives a different digest
        assert_ne!(hash, digest(b"hello world!"));
    }

    #[test]
    fn test_known_vector() {
        assert_eq!(
            digest(b"").to_hex(),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }
}
