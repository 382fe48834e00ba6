//! Change notifications.
//!
//! Every completed mutation publishes one [`ChainEvent`] on a broadcast
//! channel so a presentation layer knows to re-fetch the snapshot.

use crate::core::{now, Timestamp};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// A broadcast channel receiver for chain events.
pub type EventStream = broadcast::Receiver<ChainEvent>;

/// What changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChainEventKind {
    /// A block was appended, possibly after sealing the previous tail
    Appended {
        position: usize,
        sealed: Option<usize>,
    },
    /// The open tail's data changed
    Edited { position: usize },
    /// A block was saved and a new tail opened
    Saved { position: usize, opened: usize },
    /// A block was removed and the chain rehashed
    Deleted { position: usize },
    /// A maintenance recompute ran
    Recomputed { from: usize },
}

/// Notification published after an operation completes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChainEvent {
    /// What changed
    pub kind: ChainEventKind,
    /// Chain version after the change
    pub version: u64,
    /// Chain length after the change
    pub length: usize,
    /// When the change completed
    pub at: Timestamp,
}

/// Sending half owned by the store.
#[derive(Debug)]
pub(crate) struct EventPublisher {
    sender: broadcast::Sender<ChainEvent>,
}

impl EventPublisher {
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub(crate) fn subscribe(&self) -> EventStream {
        self.sender.subscribe()
    }

    pub(crate) fn publish(&self, kind: ChainEventKind, version: u64, length: usize) {
        let event = ChainEvent {
            kind,
            version,
            length,
            at: now(),
        };
        // No subscribers is fine.
        let _ = self.sender.send(event);
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
