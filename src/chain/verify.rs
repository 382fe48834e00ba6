//! Chain integrity verification.
//!
//! Re-derives every link and hash from scratch and compares against what
//! the store holds.

use crate::chain::block::Block;
use crate::chain::digest::{block_digest, DigestPrimitive};
use crate::core::HashLabel;
use serde::{Deserialize, Serialize};

/// Result of chain verification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainVerification {
    /// Whether every link and hash matches a fresh recomputation
    pub valid: bool,
    /// Number of blocks checked before the first failure
    pub blocks_verified: usize,
    /// Position of the first stale block (if any)
    pub first_invalid_position: Option<usize>,
    /// Frozen blocks whose saved hash no longer equals their current hash
    pub drifted: Vec<usize>,
}

/// Verify a block sequence against the digest primitive.
pub(crate) async fn verify_blocks(
    primitive: &dyn DigestPrimitive,
    blocks: &[Block],
) -> ChainVerification {
    let mut verification = ChainVerification {
        valid: true,
        ..Default::default()
    };

    for (position, block) in blocks.iter().enumerate() {
        if let Some(saved) = block.saved_hash() {
            if saved != block.current_hash() {
                verification.drifted.push(position);
            }
        }

        if !verification.valid {
            continue;
        }

        let expected_link = if position == 0 {
            HashLabel::genesis()
        } else {
            blocks[position - 1].link_value().clone()
        };
        let expected_hash =
            block_digest(primitive, position, &expected_link, block.data()).await;

        if block.previous_link() != &expected_link || block.current_hash() != &expected_hash {
            verification.valid = false;
            verification.first_invalid_position = Some(position);
            continue;
        }

        verification.blocks_verified += 1;
    }

    verification
}
