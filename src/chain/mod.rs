//! The hash chain.
//!
//! - Position-dependent block hashes over `(position, previous link, data)`
//! - Open tail editing, save locking
//! - Cascading recomputation after edits and deletions
//! - Change notifications and integrity verification

pub mod block;
pub mod digest;
pub mod events;
pub mod shared;
pub mod store;
pub mod verify;

pub use block::{Block, BlockView};
pub use digest::{block_digest, DigestPrimitive, Sha256Digest};
pub use events::{ChainEvent, ChainEventKind, EventStream};
pub use shared::SharedChain;
pub use store::{ChainSnapshot, ChainStore};
pub use verify::ChainVerification;
