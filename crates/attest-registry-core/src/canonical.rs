//! Canonical CBOR encoding and state digests.
//!
//! Records and grants are encoded with RFC 8949 Core Deterministic Encoding
//! so two registries holding the same state produce the same digest:
//! - Map keys are small integers written in ascending order
//! - Integers use smallest valid encoding
//! - Definite lengths only

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::Record;
use crate::types::{Principal, RecordId};

/// Record field keys. Keys 0-23 encode as single bytes.
mod keys {
    pub const RECORD_ID: u64 = 0;
    pub const CONTROLLER: u64 = 1;
    pub const CREATED_AT: u64 = 2;
    pub const LABEL: u64 = 3;
    pub const WEIGHT: u64 = 4;
    pub const SUMMARY: u64 = 5;
    pub const TAGS: u64 = 6;
}

/// Domain tags fed to the hasher ahead of each entry kind.
const RECORD_DOMAIN: &[u8] = b"attest-record-v0:";
const GRANT_DOMAIN: &[u8] = b"attest-grant-v0:";

/// Encode a record to canonical CBOR bytes.
pub fn canonical_record_bytes(record: &Record) -> Vec<u8> {
    let mut buf = Vec::with_capacity(128);

    encode_uint(&mut buf, 5, 7);

    encode_uint(&mut buf, 0, keys::RECORD_ID);
    encode_uint(&mut buf, 0, record.record_id().get());

    encode_uint(&mut buf, 0, keys::CONTROLLER);
    encode_bytes(&mut buf, record.controller.as_bytes());

    encode_uint(&mut buf, 0, keys::CREATED_AT);
    encode_uint(&mut buf, 0, record.created_at().0);

    encode_uint(&mut buf, 0, keys::LABEL);
    encode_text(&mut buf, record.label());

    encode_uint(&mut buf, 0, keys::WEIGHT);
    encode_uint(&mut buf, 0, record.weight());

    encode_uint(&mut buf, 0, keys::SUMMARY);
    encode_text(&mut buf, record.summary());

    encode_uint(&mut buf, 0, keys::TAGS);
    encode_uint(&mut buf, 4, record.tags().len() as u64);
    for tag in record.tags() {
        encode_text(&mut buf, tag);
    }

    buf
}

/// Encode a grant entry as a two-element CBOR array `[record_id, viewer]`.
pub fn canonical_grant_bytes(record_id: RecordId, viewer: &Principal) -> Vec<u8> {
    let mut buf = Vec::with_capacity(40);
    encode_uint(&mut buf, 4, 2);
    encode_uint(&mut buf, 0, record_id.get());
    encode_bytes(&mut buf, viewer.as_bytes());
    buf
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// A 32-byte Blake3 digest of registry state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateDigest(pub [u8; 32]);

impl StateDigest {
    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for StateDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateDigest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for StateDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Incremental digest over records and grants.
///
/// Callers must feed entries in a deterministic order (records by id, then
/// grants by `(record_id, viewer)`); the hasher does not sort.
pub struct StateHasher {
    hasher: blake3::Hasher,
}

impl StateHasher {
    /// Start a digest bound to the last issued record id.
    pub fn new(last_record_id: RecordId) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"attest-state-v0:");
        hasher.update(&last_record_id.get().to_be_bytes());
        Self { hasher }
    }

    /// Feed a record.
    pub fn record(&mut self, record: &Record) -> &mut Self {
        self.hasher.update(RECORD_DOMAIN);
        self.hasher.update(&canonical_record_bytes(record));
        self
    }

    /// Feed a grant entry.
    pub fn grant(&mut self, record_id: RecordId, viewer: &Principal) -> &mut Self {
        self.hasher.update(GRANT_DOMAIN);
        self.hasher.update(&canonical_grant_bytes(record_id, viewer));
        self
    }

    /// Finish the digest.
    pub fn finish(&self) -> StateDigest {
        StateDigest(*self.hasher.finalize().as_bytes())
    }
}
