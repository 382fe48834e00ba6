//! Block structure and its read model.

use crate::core::HashLabel;
use serde::{Deserialize, Serialize};

/// One entry in the chain.
///
/// Fields are only mutated by [`ChainStore`](crate::chain::ChainStore);
/// callers read them through the accessors or a [`BlockView`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Block {
    pub(crate) data: String,
    pub(crate) previous_link: HashLabel,
    pub(crate) current_hash: HashLabel,
    pub(crate) saved_hash: Option<HashLabel>,
}

impl Block {
    /// Create an open block. Link and hash are filled in by the next recompute.
    pub(crate) fn open(data: String) -> Self {
        Self {
            data,
            previous_link: HashLabel::genesis(),
            current_hash: HashLabel::genesis(),
            saved_hash: None,
        }
    }

    /// Block data.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Link to the previous block (genesis sentinel at position 0).
    pub fn previous_link(&self) -> &HashLabel {
        &self.previous_link
    }

    /// Hash over the block's current position, link and data.
    pub fn current_hash(&self) -> &HashLabel {
        &self.current_hash
    }

    /// Hash recorded when the block was saved.
    pub fn saved_hash(&self) -> Option<&HashLabel> {
        self.saved_hash.as_ref()
    }

    /// Whether the block has been saved.
    pub fn is_frozen(&self) -> bool {
        self.saved_hash.is_some()
    }

    /// Value the next block links to: the saved hash once frozen,
    /// the current hash otherwise.
    pub fn link_value(&self) -> &HashLabel {
        self.saved_hash.as_ref().unwrap_or(&self.current_hash)
    }

    /// Record the current hash as the saved hash.
    pub(crate) fn freeze(&mut self) {
        self.saved_hash = Some(self.current_hash.clone());
    }

    /// Project into a snapshot row.
    pub(crate) fn view(&self, position: usize, editable: bool) -> BlockView {
        BlockView {
            position,
            number: position + 1,
            data: self.data.clone(),
            previous_link: self.previous_link.clone(),
            current_hash: self.current_hash.clone(),
            saved_hash: self.saved_hash.clone(),
            frozen: self.is_frozen(),
            editable,
        }
    }
}

/// Read-only row for rendering a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockView {
    /// Zero-based position
    pub position: usize,
    /// One-based display number
    pub number: usize,
    /// Block data
    pub data: String,
    /// Link to the previous block
    pub previous_link: HashLabel,
    /// Current hash
    pub current_hash: HashLabel,
    /// Saved hash, if frozen
    pub saved_hash: Option<HashLabel>,
    /// Whether the block is saved
    pub frozen: bool,
    /// Whether the block is the open tail
    pub editable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_block_is_not_frozen() {
        let block = Block::open("draft".into());
        assert!(!block.is_frozen());
        assert_eq!(block.data(), "draft");
        assert!(block.saved_hash().is_none());
    }

    #[test]
    fn test_link_value_prefers_saved_hash() {
        let mut block = Block::open(String::new());
        block.current_hash = HashLabel::from("HASH-1111111111");
        assert_eq!(block.link_value(), &"HASH-1111111111");

        block.freeze();
        block.current_hash = HashLabel::from("HASH-2222222222");
        assert!(block.is_frozen());
        assert_eq!(block.link_value(), &"HASH-1111111111");
    }

    #[test]
    fn test_block_serializes_for_export() {
        let mut block = Block::open("x".into());
        block.current_hash = HashLabel::from("HASH-3435040DB5");
        block.freeze();

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["data"], "x");
        assert_eq!(json["saved_hash"], "HASH-3435040DB5");
    }

    #[test]
    fn test_view_numbering() {
        let block = Block::open("row".into());
        let view = block.view(2, true);
        assert_eq!(view.position, 2);
        assert_eq!(view.number, 3);
        assert!(view.editable);
        assert!(!view.frozen);
    }
}
