//! Test doubles shared by the unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use crate::client::ClientTokenCache;
use crate::error::StoreError;
use crate::store::{InMemoryStore, TokenStore};

/// Stand-in for the acquisition library's in-memory token cache.
///
/// `store_token` and `drop_all_tokens` play the acquisition library's part
/// and raise the changed flag; the trait methods behave as the real object
/// does during synchronization and leave the flag alone.
pub(crate) struct FakeClientCache {
    tokens: Vec<u8>,
    dirty: bool,
}

impl FakeClientCache {
    pub(crate) fn new() -> Self {
        Self {
            tokens: Vec::new(),
            dirty: false,
        }
    }

    /// Simulates the acquisition library writing a freshly fetched token.
    pub(crate) fn store_token(&mut self, blob: &[u8]) {
        self.tokens = blob.to_vec();
        self.dirty = true;
    }

    /// Simulates the acquisition library discarding every token.
    pub(crate) fn drop_all_tokens(&mut self) {
        self.tokens.clear();
        self.dirty = true;
    }

    pub(crate) fn tokens(&self) -> &[u8] {
        &self.tokens
    }
}

impl ClientTokenCache for FakeClientCache {
    fn serialize(&self) -> Vec<u8> {
        self.tokens.clone()
    }

    fn deserialize(&mut self, blob: &[u8]) {
        self.tokens = blob.to_vec();
    }

    fn reset(&mut self) {
        self.tokens.clear();
    }

    fn has_state_changed(&self) -> bool {
        self.dirty
    }

    fn mark_synced(&mut self) {
        self.dirty = false;
    }

    fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// [`TokenStore`] wrapper that counts calls and can be told to fail, for
/// asserting the no-spurious-writes and degradation properties.
#[derive(Default)]
pub(crate) struct RecordingStore {
    inner: InMemoryStore,
    pub(crate) gets: AtomicUsize,
    pub(crate) sets: AtomicUsize,
    pub(crate) removes: AtomicUsize,
    pub(crate) fail_reads: AtomicBool,
    pub(crate) fail_writes: AtomicBool,
}

impl TokenStore for RecordingStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("injected read failure"));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, blob: Vec<u8>, ttl: Duration) -> Result<(), StoreError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("injected write failure"));
        }
        self.inner.set(key, blob, ttl)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("injected write failure"));
        }
        self.inner.remove(key)
    }
}
