//! # hashchain-lab - an educational hash chain
//!
//! A small chain of blocks where:
//! - every block's hash covers its position, its link to the previous block and its data
//! - only the last, unsaved block may be edited
//! - saving a block freezes it and opens a fresh tail
//! - deleting a block renumbers and rehashes everything that remains
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hashchain_lab::chain::ChainStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut store = ChainStore::default();
//!     store.append("").await;
//!     store.edit(0, "hello").await.unwrap();
//!     store.save(0).await.unwrap();
//!
//!     for block in store.snapshot().blocks {
//!         println!("#{} {} -> {}", block.number, block.previous_link, block.current_hash);
//!     }
//! }
//! ```

pub mod chain;
pub mod core;
pub mod monitoring;

#[cfg(feature = "python")]
pub mod python;

pub use crate::core::error::{Error, Result};
