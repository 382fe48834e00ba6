//! The chain store.
//!
//! Owns the ordered block list, keeps every link and hash current, and
//! enforces that only the open tail can change.

use crate::chain::block::{Block, BlockView};
use crate::chain::digest::{block_digest, DigestPrimitive, Sha256Digest};
use crate::chain::events::{ChainEventKind, EventPublisher, EventStream};
use crate::chain::verify::{verify_blocks, ChainVerification};
use crate::core::{now, ChainConfig, Error, HashLabel, Result, Timestamp};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Read-only copy of the chain for rendering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainSnapshot {
    /// Store version the snapshot was taken at
    pub version: u64,
    /// When the snapshot was taken
    pub taken_at: Timestamp,
    /// Blocks in chain order
    pub blocks: Vec<BlockView>,
}

impl ChainSnapshot {
    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the snapshot holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Export snapshot to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Ordered, versioned block sequence.
pub struct ChainStore {
    /// Blocks in chain order
    blocks: Vec<Block>,
    /// Bumped on every completed mutation
    version: u64,
    /// Configuration
    config: ChainConfig,
    /// Digest used for every block hash
    digest: Arc<dyn DigestPrimitive>,
    /// Change notifications
    events: EventPublisher,
}

impl ChainStore {
    /// Create an empty store using SHA-256.
    pub fn new(config: ChainConfig) -> Result<Self> {
        Self::with_digest(config, Arc::new(Sha256Digest))
    }

    /// Create an empty store with a custom digest primitive.
    pub fn with_digest(config: ChainConfig, digest: Arc<dyn DigestPrimitive>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, digest))
    }

    fn build(config: ChainConfig, digest: Arc<dyn DigestPrimitive>) -> Self {
        debug!(algorithm = digest.algorithm(), "creating chain store");
        Self {
            blocks: Vec::new(),
            version: 0,
            events: EventPublisher::new(config.event_capacity),
            config,
            digest,
        }
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the chain has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Mutation counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Store configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Get block by position.
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Get all blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Whether `index` is the open tail, the only block that may change.
    pub fn is_editable(&self, index: usize) -> bool {
        self.blocks.len().checked_sub(1) == Some(index) && !self.blocks[index].is_frozen()
    }

    /// Position of the open tail, if there is one.
    pub fn open_position(&self) -> Option<usize> {
        let last = self.blocks.len().checked_sub(1)?;
        self.is_editable(last).then_some(last)
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> EventStream {
        self.events.subscribe()
    }

    /// Number of live event subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }

    /// Take a read-only snapshot.
    pub fn snapshot(&self) -> ChainSnapshot {
        ChainSnapshot {
            version: self.version,
            taken_at: now(),
            blocks: self
                .blocks
                .iter()
                .enumerate()
                .map(|(i, b)| b.view(i, self.is_editable(i)))
                .collect(),
        }
    }

    /// Append a new open block and return its position.
    ///
    /// A still-open tail is sealed first so the chain never holds two open
    /// blocks. With `seal_open_tail_on_append` disabled the call leaves the
    /// chain alone and returns the existing tail.
    pub async fn append(&mut self, initial_data: impl Into<String>) -> usize {
        let initial_data = initial_data.into();

        let sealed = match self.open_position() {
            Some(tail) if self.config.seal_open_tail_on_append => {
                self.seal(tail).await;
                Some(tail)
            }
            Some(tail) => {
                warn!(position = tail, "append ignored: tail is still open");
                return tail;
            }
            None => None,
        };

        let position = self.push_open(initial_data).await;
        info!(position, ?sealed, "block appended");
        self.publish(ChainEventKind::Appended { position, sealed });
        position
    }

    /// Replace the data of the open tail.
    ///
    /// Returns `Ok(false)` without touching anything when `index` is a
    /// frozen or non-tail block.
    pub async fn edit(&mut self, index: usize, new_data: impl Into<String>) -> Result<bool> {
        self.check_index(index)?;

        if !self.is_editable(index) {
            warn!(position = index, "edit ignored: block is not the open tail");
            return Ok(false);
        }

        self.blocks[index].data = new_data.into();
        self.recompute_range(index).await;
        debug!(position = index, hash = %self.blocks[index].current_hash, "block edited");
        self.publish(ChainEventKind::Edited { position: index });
        Ok(true)
    }

    /// Freeze the open tail and open a new empty one.
    ///
    /// Returns the new tail's position, or `None` when `index` is already
    /// frozen.
    pub async fn save(&mut self, index: usize) -> Result<Option<usize>> {
        self.check_index(index)?;

        if !self.is_editable(index) {
            debug!(position = index, "save ignored: block is already frozen");
            return Ok(None);
        }

        self.seal(index).await;
        let opened = self.push_open(String::new()).await;
        info!(position = index, hash = %self.blocks[index].current_hash, "block saved");
        self.publish(ChainEventKind::Saved {
            position: index,
            opened,
        });
        Ok(Some(opened))
    }

    /// Remove a block and rehash every remaining block from position 0.
    ///
    /// Saved hashes of the remaining blocks are kept as they were, so a
    /// frozen block may end up with a current hash that differs from its
    /// saved one; [`ChainStore::verify`] reports those as drift.
    pub async fn delete(&mut self, index: usize) -> Result<Block> {
        self.check_index(index)?;

        let removed = self.blocks.remove(index);
        if !self.blocks.is_empty() {
            self.recompute_range(0).await;
        }

        info!(position = index, remaining = self.blocks.len(), "block deleted");
        self.publish(ChainEventKind::Deleted { position: index });
        Ok(removed)
    }

    /// Recompute links and hashes from `start_index` to the end.
    ///
    /// A start past the end does nothing.
    pub async fn recompute_from(&mut self, start_index: usize) {
        if start_index >= self.blocks.len() {
            return;
        }
        self.recompute_range(start_index).await;
        self.publish(ChainEventKind::Recomputed { from: start_index });
    }

    /// Re-derive every link and hash and compare with the stored ones.
    pub async fn verify(&self) -> ChainVerification {
        verify_blocks(self.digest.as_ref(), &self.blocks).await
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.blocks.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.blocks.len(),
            });
        }
        Ok(())
    }

    /// Link value for the block at `position`.
    fn link_for(&self, position: usize) -> HashLabel {
        match position {
            0 => HashLabel::genesis(),
            _ => self.blocks[position - 1].link_value().clone(),
        }
    }

    /// Each position depends on the finished hash of the one before,
    /// so positions are awaited one at a time in increasing order.
    async fn recompute_range(&mut self, start: usize) {
        for position in start..self.blocks.len() {
            self.recompute_position(position).await;
        }
        debug!(from = start, to = self.blocks.len(), "recomputed hashes");
    }

    async fn recompute_position(&mut self, position: usize) {
        let previous_link = self.link_for(position);
        let hash = block_digest(
            self.digest.as_ref(),
            position,
            &previous_link,
            &self.blocks[position].data,
        )
        .await;

        let block = &mut self.blocks[position];
        block.previous_link = previous_link;
        block.current_hash = hash;
    }

    async fn seal(&mut self, position: usize) {
        self.recompute_position(position).await;
        self.blocks[position].freeze();
    }

    async fn push_open(&mut self, data: String) -> usize {
        self.blocks.push(Block::open(data));
        let position = self.blocks.len() - 1;
        self.recompute_position(position).await;
        position
    }

    fn publish(&mut self, kind: ChainEventKind) {
        self.version += 1;
        self.events.publish(kind, self.version, self.blocks.len());
    }
}

impl Default for ChainStore {
    fn default() -> Self {
        Self::build(ChainConfig::default(), Arc::new(Sha256Digest))
    }
}

impl std::fmt::Debug for ChainStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainStore")
            .field("blocks", &self.blocks)
            .field("version", &self.version)
            .field("config", &self.config)
            .field("digest", &self.digest.algorithm())
            .finish()
    }
}
