//! Content digests using blake3.
//!
//! A digest is a pure function of the input bytes: identical bytes always
//! yield an identical digest, regardless of when or where it is computed.
//! That determinism is what makes digests usable as cache-busting
//! identifiers.

use std::fmt;

/// A 256-bit content digest (blake3 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Length of the full hex rendering.
    pub const HEX_LEN: usize = 64;

    /// Compute the digest of a byte sequence.
    ///
    /// Empty input is legal; blake3 of empty input is well defined.
    #[inline]
    pub fn of(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    /// Create a ContentDigest from raw bytes.
    #[inline]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full lowercase hex rendering (64 chars).
    pub fn to_hex(self) -> String {
        hex::encode(self.0)
    }

    /// Create from hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        if bytes.len() != 32 {
            return None;
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Some(Self(arr))
    }

    /// Short 8-char fingerprint for query-string versioning
    /// (e.g. `style.css?v=a1b2c3d4`).
    pub fn short(self) -> String {
        self.to_hex()[..8].to_string()
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display first 16 chars of hex for brevity
        write!(f, "{}", &self.to_hex()[..16])
    }
}
