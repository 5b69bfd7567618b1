//! Strong type definitions for the Attest Registry.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A record identifier, assigned from a monotonic counter.
///
/// Identifiers start at 1 and are never reused, even after the record
/// they named has been terminated.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    /// Create a record ID from its raw value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The identifier that follows this one, or `None` if the id space is exhausted.
    pub fn checked_next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A 32-byte principal identity.
///
/// The registry only ever compares principals for equality. The host is
/// responsible for authenticating the sender before handing it over in a
/// [`TxContext`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Principal(pub [u8; 32]);

impl Principal {
    /// Derive a stable principal from a human-readable name.
    ///
    /// Blake3 over a domain-separated name, so `derive("alice")` is the
    /// same identity on every platform.
    pub fn derive(name: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"attest-principal-v0:");
        hasher.update(name.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Principal {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Principal {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// Principals travel as hex strings so config files stay readable.
impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Principal::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Height of the host chain, used as the registry's clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    /// Number of blocks elapsed since `earlier`.
    ///
    /// Saturates at zero if the host hands over a height below `earlier`.
    pub fn blocks_since(&self, earlier: BlockHeight) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(height: u64) -> Self {
        Self(height)
    }
}

/// Per-operation context supplied by the host: who is calling, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxContext {
    /// The authenticated sender of the operation.
    pub sender: Principal,
    /// The block height the operation executes at.
    pub block_height: BlockHeight,
}

impl TxContext {
    /// Create a new context.
    pub fn new(sender: Principal, block_height: impl Into<BlockHeight>) -> Self {
        Self {
            sender,
            block_height: block_height.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_hex_roundtrip() {
        let p = Principal::derive("alice");
        let recovered = Principal::from_hex(&p.to_hex()).unwrap();
        assert_eq!(p, recovered);
    }

    #[test]
    fn test_principal_derive_is_stable_and_distinct() {
        assert_eq!(Principal::derive("alice"), Principal::derive("alice"));
        assert_ne!(Principal::derive("alice"), Principal::derive("bob"));
    }

    #[test]
    fn test_principal_serde_as_hex() {
        let p = Principal::from_bytes([0xab; 32]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let back: Principal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_principal_rejects_short_hex() {
        assert!(Principal::from_hex("abcd").is_err());
    }

    #[test]
    fn test_record_id_checked_next() {
        assert_eq!(RecordId::new(1).checked_next(), Some(RecordId::new(2)));
        assert_eq!(RecordId::new(u64::MAX).checked_next(), None);
    }

    #[test]
    fn test_blocks_since_saturates() {
        assert_eq!(BlockHeight(10).blocks_since(BlockHeight(4)), 6);
        assert_eq!(BlockHeight(4).blocks_since(BlockHeight(10)), 0);
    }
}
