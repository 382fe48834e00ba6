//! Block digest computation.
//!
//! The chain only consumes a `bytes -> 32-byte digest` primitive from its
//! environment. The primitive is async so that hosts backed by an async
//! crypto provider can plug in; the default runs SHA-256 inline.

use crate::core::HashLabel;
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Size of a digest produced by a [`DigestPrimitive`].
pub const DIGEST_LEN: usize = 32;

/// Cryptographic digest used to hash blocks.
#[async_trait]
pub trait DigestPrimitive: Send + Sync {
    /// Digest the given bytes.
    async fn digest(&self, bytes: &[u8]) -> [u8; DIGEST_LEN];

    /// Name of the algorithm, for logs.
    fn algorithm(&self) -> &'static str;
}

/// SHA-256 digest primitive.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Digest;

#[async_trait]
impl DigestPrimitive for Sha256Digest {
    async fn digest(&self, bytes: &[u8]) -> [u8; DIGEST_LEN] {
        sha256(bytes)
    }

    fn algorithm(&self) -> &'static str {
        "sha256"
    }
}

/// Compute SHA-256 synchronously.
pub fn sha256(bytes: &[u8]) -> [u8; DIGEST_LEN] {
    Sha256::digest(bytes).into()
}

/// Text hashed for a block: `"{position+1}|{previous_link}|{data}"`.
pub fn digest_input(position: usize, previous_link: &HashLabel, data: &str) -> String {
    format!("{}|{}|{}", position + 1, previous_link, data)
}

/// Hash label for a block at `position`.
///
/// Pure in its inputs: the same triple always yields the same label.
pub async fn block_digest(
    primitive: &dyn DigestPrimitive,
    position: usize,
    previous_link: &HashLabel,
    data: &str,
) -> HashLabel {
    let input = digest_input(position, previous_link, data);
    let digest = primitive.digest(input.as_bytes()).await;
    HashLabel::from_digest(&digest)
}
