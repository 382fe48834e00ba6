//! Shared, serialised access to one chain.
//!
//! Callers that may issue operations concurrently (UI callbacks, bindings)
//! go through [`SharedChain`]. Operations queue on a fair async mutex, so
//! a later edit or delete starts only after the previous cascade finished.

use crate::chain::block::Block;
use crate::chain::events::EventStream;
use crate::chain::store::{ChainSnapshot, ChainStore};
use crate::chain::verify::ChainVerification;
use crate::core::{ChainConfig, Result};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Cloneable handle to a chain store.
#[derive(Clone, Debug)]
pub struct SharedChain {
    inner: Arc<Mutex<ChainStore>>,
}

impl SharedChain {
    /// Wrap an existing store.
    pub fn new(store: ChainStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Create a handle around a fresh SHA-256 store.
    pub fn with_config(config: ChainConfig) -> Result<Self> {
        Ok(Self::new(ChainStore::new(config)?))
    }

    /// Lock the underlying store (for direct access if needed).
    pub async fn store(&self) -> MutexGuard<'_, ChainStore> {
        self.inner.lock().await
    }

    /// See [`ChainStore::append`].
    pub async fn append(&self, initial_data: impl Into<String>) -> usize {
        let initial_data = initial_data.into();
        self.inner.lock().await.append(initial_data).await
    }

    /// See [`ChainStore::edit`].
    pub async fn edit(&self, index: usize, new_data: impl Into<String>) -> Result<bool> {
        let new_data = new_data.into();
        self.inner.lock().await.edit(index, new_data).await
    }

    /// See [`ChainStore::save`].
    pub async fn save(&self, index: usize) -> Result<Option<usize>> {
        self.inner.lock().await.save(index).await
    }

    /// See [`ChainStore::delete`].
    pub async fn delete(&self, index: usize) -> Result<Block> {
        self.inner.lock().await.delete(index).await
    }

    /// See [`ChainStore::recompute_from`].
    pub async fn recompute_from(&self, start_index: usize) {
        self.inner.lock().await.recompute_from(start_index).await
    }

    /// See [`ChainStore::snapshot`].
    pub async fn snapshot(&self) -> ChainSnapshot {
        self.inner.lock().await.snapshot()
    }

    /// See [`ChainStore::verify`].
    pub async fn verify(&self) -> ChainVerification {
        self.inner.lock().await.verify().await
    }

    /// See [`ChainStore::subscribe`].
    pub async fn subscribe(&self) -> EventStream {
        self.inner.lock().await.subscribe()
    }
}

impl Default for SharedChain {
    fn default() -> Self {
        Self::new(ChainStore::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::events::ChainEventKind;

    #[tokio::test]
    async fn test_concurrent_edits_are_serialised() {
        let chain = SharedChain::default();
        chain.append("").await;

        let edits = (0..8).map(|i| {
            let chain = chain.clone();
            async move { chain.edit(0, format!("draft {}", i)).await }
        });
        let results = futures::future::join_all(edits).await;
        assert!(results.iter().all(|r| matches!(r, Ok(true))));

        let snapshot = chain.snapshot().await;
        assert_eq!(snapshot.blocks[0].data, "draft 7");
        assert_eq!(snapshot.version, 9);
        assert!(chain.verify().await.valid);
    }

    #[tokio::test]
    async fn test_spawned_operations_keep_chain_consistent() {
        let chain = SharedChain::default();
        let mut handles = Vec::new();

        for i in 0..5 {
            let chain = chain.clone();
            handles.push(tokio::spawn(async move {
                let tail = chain.append("").await;
                // A racing append may seal the tail first, which yields Ok(false).
                let edited = chain.edit(tail, format!("block {}", i)).await;
                assert!(edited.is_ok());
            }));
        }
        for handle in futures::future::join_all(handles).await {
            handle.unwrap();
        }

        let snapshot = chain.snapshot().await;
        assert_eq!(snapshot.len(), 5);
        assert_eq!(snapshot.blocks.iter().filter(|b| b.editable).count(), 1);
        assert!(chain.verify().await.valid);
    }

    #[tokio::test]
    async fn test_delete_waits_for_pending_save() {
        let chain = SharedChain::default();
        chain.append("x").await;
        let mut events = chain.subscribe().await;

        let (saved, deleted) = tokio::join!(chain.save(0), chain.delete(0));
        assert_eq!(saved.unwrap(), Some(1));
        let removed = deleted.unwrap();
        assert!(removed.is_frozen());

        let first = events.recv().await.unwrap();
        assert!(matches!(first.kind, ChainEventKind::Saved { .. }));
        let second = events.recv().await.unwrap();
        assert_eq!(second.kind, ChainEventKind::Deleted { position: 0 });

        let store = chain.store().await;
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().previous_link(), &"0000");
    }
}
