use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Unique identifier for a single event (UUID v7 for time-ordering).
///
/// Event ids are minted by the writer at dispatch time, not derived from
/// content: two events with identical payloads are still distinct facts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(uuid::Uuid);

impl EventId {
    /// Generate a new time-ordered event id.
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Parse from a string representation.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidUuid(e.to_string()))
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventId({})", self.short_id())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content-addressed identifier for a commit.
///
/// A `CommitId` is the BLAKE3 hash of the commit's parents, event ids,
/// author, timestamp, and message. Identical commit content always produces
/// the same id, making commits deduplicatable and verifiable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommitId([u8; 32]);

impl CommitId {
    /// Compute a `CommitId` from raw bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Create a `CommitId` from a pre-computed hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The null commit id (all zeros). Represents "no commit".
    pub const fn null() -> Self {
        Self([0u8; 32])
    }

    /// Returns `true` if this is the null commit id.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitId({})", self.short_hex())
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for CommitId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_ids_are_unique() {
        let a = EventId::new();
        let b = EventId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn event_ids_are_time_ordered() {
        let a = EventId::new();
        let b = EventId::new();
        // UUID v7 embeds a millisecond timestamp in the high bits.
        assert!(a <= b);
    }

    #[test]
    fn event_id_parse_roundtrip() {
        let id = EventId::new();
        let parsed = EventId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn event_id_parse_rejects_garbage() {
        assert!(EventId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn commit_id_from_bytes_is_deterministic() {
        let id1 = CommitId::from_bytes(b"same content");
        let id2 = CommitId::from_bytes(b"same content");
        assert_eq!(id1, id2);
    }

    #[test]
    fn commit_id_differs_for_different_content() {
        assert_ne!(CommitId::from_bytes(b"a"), CommitId::from_bytes(b"b"));
    }

    #[test]
    fn null_commit_id() {
        let null = CommitId::null();
        assert!(null.is_null());
        assert!(!CommitId::from_bytes(b"x").is_null());
    }

    #[test]
    fn commit_id_hex_roundtrip() {
        let id = CommitId::from_bytes(b"roundtrip");
        let parsed = CommitId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn commit_id_from_hex_rejects_wrong_length() {
        assert!(CommitId::from_hex("abcd").is_err());
        assert!(CommitId::from_hex("zz").is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let eid = EventId::new();
        let json = serde_json::to_string(&eid).unwrap();
        assert_eq!(eid, serde_json::from_str(&json).unwrap());

        let cid = CommitId::from_bytes(b"serde");
        let json = serde_json::to_string(&cid).unwrap();
        assert_eq!(cid, serde_json::from_str::<CommitId>(&json).unwrap());
    }
}
