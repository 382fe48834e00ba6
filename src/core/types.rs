//! Common types used across hashchain-lab modules.

use serde::{Deserialize, Serialize};

/// Previous-link value recorded by the block at position 0.
pub const GENESIS_LINK: &str = "0000";

/// Display prefix of every block hash label.
pub const HASH_PREFIX: &str = "HASH-";

/// Number of hex characters kept from the full digest.
pub const HASH_HEX_LEN: usize = 10;

/// A printable hash label such as `HASH-3435040DB5`, or the genesis sentinel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashLabel(String);

impl HashLabel {
    /// The sentinel linked from position 0.
    pub fn genesis() -> Self {
        Self(GENESIS_LINK.to_string())
    }

    /// Build a label from a raw digest: prefix plus the first
    /// `HASH_HEX_LEN` hex characters, uppercased.
    pub fn from_digest(digest: &[u8]) -> Self {
        let mut hex = hex::encode_upper(digest);
        hex.truncate(HASH_HEX_LEN);
        Self(format!("{}{}", HASH_PREFIX, hex))
    }

    /// Whether this is the genesis sentinel.
    pub fn is_genesis(&self) -> bool {
        self.0 == GENESIS_LINK
    }

    /// Get the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HashLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HashLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl PartialEq<&str> for HashLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Timestamp wrapper for consistent serialization.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Get current UTC timestamp.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}
