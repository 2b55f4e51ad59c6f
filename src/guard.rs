//! Per-partition reader/writer locks serializing access to the shared store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Reader/writer lock for one cache partition.
///
/// Loads take the shared side, so concurrent loads on a partition proceed
/// together; persist and clear take the exclusive side and exclude
/// everything else on that partition.
pub(crate) struct PartitionLock {
    inner: RwLock<()>,
}

impl PartitionLock {
    fn new() -> Self {
        Self {
            inner: RwLock::new(()),
        }
    }

    /// Blocks until shared (load) access to the partition is granted.
    pub(crate) fn shared(&self) -> RwLockReadGuard<'_, ()> {
        // No data lives behind the lock, so a poisoned lock is safe to
        // re-enter.
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Blocks until exclusive (persist/clear) access to the partition is
    /// granted.
    pub(crate) fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Lazily grown set of partition locks.
///
/// Every accessor bound to the same store handle resolves its lock here, so
/// two accessors for the same partition always contend on the same lock.
#[derive(Default)]
pub(crate) struct LockSet {
    partitions: Mutex<HashMap<String, Arc<PartitionLock>>>,
}

impl LockSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for `partition`, creating it on first use.
    pub(crate) fn for_partition(&self, partition: &str) -> Arc<PartitionLock> {
        let mut partitions = self.partitions.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(
            partitions
                .entry(partition.to_string())
                .or_insert_with(|| Arc::new(PartitionLock::new())),
        )
    }
}
