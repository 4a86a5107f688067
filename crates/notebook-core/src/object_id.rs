//! Object identifiers for notebooks and notes.
//!
//! An [`ObjectId`] is 12 bytes laid out the way document stores lay out
//! their primary keys:
//!
//! | bytes | content                                        |
//! |-------|------------------------------------------------|
//! | 0..4  | seconds since the Unix epoch, big-endian       |
//! | 4..9  | random value chosen once per process           |
//! | 9..12 | counter, big-endian, seeded randomly           |
//!
//! The canonical text form is 24 lowercase hex characters, which is also
//! the JSON representation. Any other string is rejected by [`FromStr`],
//! so a parsed id is always well formed before it reaches the store.
//!
//! # Example
//!
//! ```
//! use notebook_core::ObjectId;
//!
//! let id = ObjectId::new();
//! let hex = id.to_string();
//! assert_eq!(hex.len(), 24);
//!
//! let parsed: ObjectId = hex.parse().unwrap();
//! assert_eq!(id, parsed);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Length of an object id in bytes.
pub const OBJECT_ID_LEN: usize = 12;

const COUNTER_MASK: u32 = 0x00ff_ffff;

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

/// 12-byte identifier assigned to notebooks and notes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Generates a fresh id stamped with the current time.
    #[must_use]
    pub fn new() -> Self {
        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let process = PROCESS_UNIQUE.get_or_init(rand::random);
        let counter = COUNTER
            .get_or_init(|| AtomicU32::new(rand::random::<u32>() & COUNTER_MASK))
            .fetch_add(1, Ordering::Relaxed)
            & COUNTER_MASK;

        let mut bytes = [0u8; OBJECT_ID_LEN];
        bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; OBJECT_ID_LEN] {
        &self.0
    }

    /// Creation time encoded in the first four bytes (second precision).
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        let seconds = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        DateTime::from_timestamp(i64::from(seconds), 0).unwrap_or_default()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ObjectId {
    type Err = ObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != OBJECT_ID_LEN * 2 {
            return Err(ObjectIdError::InvalidLength(s.len()));
        }

        let mut bytes = [0u8; OBJECT_ID_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| ObjectIdError::InvalidHex)?;
        Ok(Self(bytes))
    }
}

/// Error returned when a string is not a well-formed object id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObjectIdError {
    /// Expected exactly 24 hex characters.
    #[error("invalid object id length: expected 24 hex chars, got {0}")]
    InvalidLength(usize),

    /// The string contained a non-hex character.
    #[error("invalid hex character in object id")]
    InvalidHex,
}

impl Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_display_is_lowercase_hex() {
        let id = ObjectId::new();
        let hex = id.to_string();

        assert_eq!(hex.len(), 24);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_ids_are_unique_within_process() {
        let ids: HashSet<ObjectId> = (0..1_000).map(|_| ObjectId::new()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn test_same_process_shares_middle_bytes() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_eq!(a.as_bytes()[4..9], b.as_bytes()[4..9]);
    }

    #[test]
    fn test_timestamp_is_recent() {
        let before = Utc::now().timestamp();
        let id = ObjectId::new();
        let after = Utc::now().timestamp();

        let stamped = id.timestamp().timestamp();
        assert!(stamped >= before && stamped <= after);
    }

    #[test]
    fn test_max_timestamp_decodes() {
        let id: ObjectId = "ffffffff0000000000000000".parse().unwrap();
        assert_eq!(id.timestamp().timestamp(), i64::from(u32::MAX));
    }

    #[test]
    fn test_parse_accepts_known_value() {
        let id: ObjectId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
        assert_eq!(id.as_bytes()[0], 0x65);
        assert_eq!(id.as_bytes()[11], 0xf6);
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        let id: ObjectId = "65A1F0C2E4B0A1B2C3D4E5F6".parse().unwrap();
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            "abc".parse::<ObjectId>(),
            Err(ObjectIdError::InvalidLength(3))
        );
        assert_eq!(
            "a".repeat(26).parse::<ObjectId>(),
            Err(ObjectIdError::InvalidLength(26))
        );
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        assert_eq!(
            "zz".repeat(12).parse::<ObjectId>(),
            Err(ObjectIdError::InvalidHex)
        );
    }

    #[test]
    fn test_json_form_is_string() {
        let id: ObjectId = "000000000000000000000001".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""000000000000000000000001""#);

        let err = serde_json::from_str::<ObjectId>(r#""nope""#);
        assert!(err.is_err());
    }
}
