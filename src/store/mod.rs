//! Shared byte-blob storage backing every token cache variant.
//!
//! This module provides the storage trait the cache layer writes through
//! and a handle type that bundles a store with the per-partition locks
//! serializing access to it.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub mod memory;

pub use memory::InMemoryStore;

use crate::error::StoreError;
use crate::guard::{LockSet, PartitionLock};
use crate::key::CacheKey;

/// Trait for the shared store holding serialized token cache blobs.
///
/// This trait allows users to substitute custom storage strategies, such as
/// Redis, a database, or a distributed cache. Implementations must be safe
/// under arbitrary concurrent callers and honor read-after-write
/// consistency for a single key once `set` returns; a distributed backend
/// that can only offer eventual consistency must document the weaker
/// guarantee.
pub trait TokenStore: Send + Sync {
    /// Returns the blob stored under `key`.
    ///
    /// Yields `Ok(None)` when the key is absent or its entry has outlived
    /// its time-to-live.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores `blob` under `key`, replacing any existing entry whole and
    /// restarting the expiry window.
    fn set(&self, key: &str, blob: Vec<u8>, ttl: Duration) -> Result<(), StoreError>;

    /// Removes the entry stored under `key`, if any.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Cheaply clonable handle bundling a [`TokenStore`] with the partition
/// locks that serialize accessor operations against it.
///
/// All accessors constructed from clones of one handle share both the store
/// and the lock set, so loads on a partition proceed concurrently while
/// persists and clears are exclusive on that partition. Cross-request
/// sharing happens by cloning the handle, not through hidden process-wide
/// state; a session-bound deployment constructs one handle per session
/// instead.
#[derive(Clone)]
pub struct SharedStore {
    store: Arc<dyn TokenStore>,
    locks: Arc<LockSet>,
}

impl SharedStore {
    /// Wraps an existing store implementation.
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            locks: Arc::new(LockSet::new()),
        }
    }

    /// Creates a handle backed by a fresh process-local [`InMemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    pub(crate) fn raw(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    /// Resolves the lock guarding `key`'s partition. Bypass keys have no
    /// partition and take no lock.
    pub(crate) fn lock_for(&self, key: &CacheKey) -> Option<Arc<PartitionLock>> {
        key.partition()
            .map(|partition| self.locks.for_partition(partition))
    }
}

impl fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedStore").finish_non_exhaustive()
    }
}
