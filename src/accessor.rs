//! Cache accessor: synchronizes one acquisition-library token cache with
//! its partition of the shared store.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{debug, warn};

use crate::client::ClientTokenCache;
use crate::config::DEFAULT_ENTRY_TTL;
use crate::guard::PartitionLock;
use crate::key::{CacheKey, CacheScope};
use crate::store::SharedStore;

/// Synchronizes one bound token cache object with the shared store.
///
/// One accessor exists per (application, scope) pair, keyed additionally by
/// the signed-in subject for the user scope, and owns the binding between a
/// store partition and the opaque cache object handed to the acquisition
/// library.
/// App-scope and user-scope accessors active for the same request are fully
/// independent: each binds its own cache object and its own partition, and
/// no operation on one touches the other's key.
///
/// Store failures never propagate out of an accessor. A failed read is a
/// cache miss, forcing the acquisition library to fetch fresh tokens; a
/// failed write is logged and swallowed, costing one re-fetch later. The
/// cache is a performance layer, not the source of truth.
pub struct CacheAccessor<C> {
    key: CacheKey,
    lock: Option<Arc<PartitionLock>>,
    store: SharedStore,
    bound: Arc<Mutex<C>>,
    ttl: Duration,
}

impl<C: ClientTokenCache> CacheAccessor<C> {
    /// Binds `client` to the partition derived from `app_id`, `scope`, and
    /// (for the user scope) `subject_id`, then performs an initial load.
    ///
    /// A user-scope accessor constructed without a subject identifier gets
    /// a bypass key: it stays usable, but every load misses and nothing is
    /// ever persisted, so the surrounding acquisition call runs uncached.
    pub fn new(
        app_id: &str,
        scope: CacheScope,
        subject_id: Option<&str>,
        store: SharedStore,
        client: C,
    ) -> Self {
        let key = CacheKey::derive(app_id, scope, subject_id);
        let lock = store.lock_for(&key);
        let accessor = Self {
            key,
            lock,
            store,
            bound: Arc::new(Mutex::new(client)),
            ttl: DEFAULT_ENTRY_TTL,
        };
        accessor.load();
        accessor
    }

    /// Overrides the entry time-to-live used by subsequent persists.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// The partition key this accessor reads and writes.
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    /// Handle to the bound cache object, for handing to the acquisition
    /// library.
    pub fn bound_object(&self) -> Arc<Mutex<C>> {
        Arc::clone(&self.bound)
    }

    /// Loads the partition's current blob into the bound cache object,
    /// fully replacing any previously loaded state.
    ///
    /// An absent or expired entry resets the bound object to empty; stale
    /// in-memory state is never merged with store content. A store read
    /// failure is treated as a miss.
    pub fn load(&self) {
        let _shared = self.lock.as_ref().map(|lock| lock.shared());
        self.load_into_bound();
    }

    /// Writes the bound object's state to the shared store if the
    /// acquisition library changed it since the last load.
    ///
    /// An unchanged object performs no store operation. A changed object
    /// that emptied out removes the entry instead of storing an empty blob.
    pub fn persist(&self) {
        let _exclusive = self.lock.as_ref().map(|lock| lock.exclusive());
        let mut bound = self.lock_bound();
        if !bound.has_state_changed() {
            return;
        }

        // The changed flag is cleared inside the same critical section as
        // the store write. A mutation racing past the flag clear re-dirties
        // the object and is captured by a later persist.
        bound.mark_synced();

        let Some(partition) = self.key.partition() else {
            return;
        };

        if bound.is_empty() {
            debug!(key = partition, "token cache emptied, removing entry");
            if let Err(err) = self.store.raw().remove(partition) {
                warn!(key = partition, error = %err, "token cache removal failed");
            }
        } else {
            let blob = bound.serialize();
            if let Err(err) = self.store.raw().set(partition, blob, self.ttl) {
                warn!(
                    key = partition,
                    error = %err,
                    "token cache write failed, token will be re-fetched"
                );
            }
        }
    }

    /// Unconditionally removes the partition's entry and reloads, resetting
    /// the bound object to empty.
    ///
    /// Invoked when a cached token's privileges turn out to be stale (a
    /// permission-denied response from the downstream API) and on sign-out.
    /// A persist racing with a clear serializes behind the exclusive lock;
    /// once the clear runs, the racing persist observes a clean, empty
    /// object and leaves the partition cleared.
    pub fn clear(&self) {
        let _exclusive = self.lock.as_ref().map(|lock| lock.exclusive());
        self.lock_bound().mark_synced();

        if let Some(partition) = self.key.partition() {
            debug!(key = partition, "clearing token cache entry");
            if let Err(err) = self.store.raw().remove(partition) {
                warn!(key = partition, error = %err, "token cache clear failed");
            }
        }

        // Reload inside the same exclusive section so the bound object
        // resets to empty before any other operation runs on the partition.
        self.load_into_bound();
    }

    /// Opens a scoped acquisition around a call into the acquisition
    /// library: the bound object is loaded now and conditionally persisted
    /// when the returned scope drops, on every exit path.
    pub fn scoped(&self) -> AccessScope<'_, C> {
        self.load();
        AccessScope { accessor: self }
    }

    /// Reads the store and replaces the bound object's state. Callers hold
    /// whichever partition lock side their operation requires.
    fn load_into_bound(&self) {
        let blob = match self.key.partition() {
            Some(partition) => match self.store.raw().get(partition) {
                Ok(blob) => blob,
                Err(err) => {
                    warn!(
                        key = partition,
                        error = %err,
                        "token cache read failed, treating as miss"
                    );
                    None
                }
            },
            None => None,
        };

        let mut bound = self.lock_bound();
        match blob {
            Some(blob) => bound.deserialize(&blob),
            None => bound.reset(),
        }
    }

    fn lock_bound(&self) -> MutexGuard<'_, C> {
        self.bound.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Scoped acquisition around a call into the token-acquisition library.
///
/// Created by [`CacheAccessor::scoped`]. The load has already happened when
/// the scope exists, and the conditional persist runs when it drops, on
/// every exit path including panics, so a fetched token is never lost to a
/// missed save hook. The scope itself holds no locks, so the acquisition
/// call is free to suspend or fail while it is open.
pub struct AccessScope<'a, C: ClientTokenCache> {
    accessor: &'a CacheAccessor<C>,
}

impl<C: ClientTokenCache> AccessScope<'_, C> {
    /// Handle to the bound cache object for the duration of the scope.
    pub fn bound_object(&self) -> Arc<Mutex<C>> {
        self.accessor.bound_object()
    }
}

impl<C: ClientTokenCache> Drop for AccessScope<'_, C> {
    fn drop(&mut self) {
        self.accessor.persist();
    }
}
