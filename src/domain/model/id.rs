//! Document ids.
//!
//! An id is 12 bytes: a big-endian 4-byte unix timestamp followed by 8 random
//! bytes. It is rendered as 24 lowercase hex characters.

use chrono::Utc;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const DOCUMENT_ID_LEN: usize = 12;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId([u8; DOCUMENT_ID_LEN]);

impl DocumentId {
    pub fn new() -> Self {
        let mut bytes = [0u8; DOCUMENT_ID_LEN];
        let secs = Utc::now().timestamp() as u32;
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        rand::thread_rng().fill_bytes(&mut bytes[4..]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DOCUMENT_ID_LEN] {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid document id '{0}'")]
pub struct InvalidDocumentId(pub String);

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DOCUMENT_ID_LEN * 2 {
            return Err(InvalidDocumentId(s.to_string()));
        }
        let mut bytes = [0u8; DOCUMENT_ID_LEN];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| InvalidDocumentId(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", self)
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_agree() {
        let id = DocumentId::new();
        let rendered = id.to_string();
        assert_eq!(rendered.len(), 24);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(rendered.parse::<DocumentId>().unwrap(), id);
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        let id: DocumentId = "65A1F0C2E4B0A1B2C3D4E5F6".parse().unwrap();
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for bad in ["", "abc", "zz a1f0c2e4b0a1b2c3d4e5f6", "65a1f0c2e4b0a1b2c3d4e5f6aa", "not-an-id-at-all-really!"] {
            assert!(bad.parse::<DocumentId>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn ids_are_unique_and_time_prefixed() {
        let a = DocumentId::new();
        let b = DocumentId::new();
        assert_ne!(a, b);
        let now = Utc::now().timestamp() as u32;
        let secs = u32::from_be_bytes(a.as_bytes()[..4].try_into().unwrap());
        assert!(now.abs_diff(secs) <= 1);
    }
}
