//! Chunk digest type.

use std::fmt;

/// A 256-bit fingerprint of a chunk's bytes.
///
/// Equality is exact byte-wise comparison. The value is only ever used as a
/// map key and for display.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkDigest([u8; 32]);

impl ChunkDigest {
    /// The size of the digest in bytes.
    pub const SIZE: usize = 32;

    /// Creates a digest from a byte array.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// Parses a digest from a hex string.
    ///
    /// Returns `None` if the string is not valid hex or not exactly 64 characters.
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        if hex_str.len() != Self::SIZE * 2 || !hex_str.is_ascii() {
            return None;
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex_str[i * 2..i * 2 + 2], 16).ok()?;
        }
        Some(Self(bytes))
    }
}

impl fmt::Display for ChunkDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkDigest({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_matches_display() {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF]);
        let digest = ChunkDigest::new(bytes);

        let hex = digest.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("0123456789abcdef"));
        assert_eq!(hex, digest.to_string());
        assert_eq!(ChunkDigest::from_hex(&hex), Some(digest));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(ChunkDigest::from_hex("abc").is_none());
        assert!(ChunkDigest::from_hex(&"zz".repeat(32)).is_none());
    }

    #[test]
    fn test_single_byte_difference_is_unequal() {
        let a = ChunkDigest::new([0u8; 32]);
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        assert_ne!(a, ChunkDigest::new(bytes));
    }
}
