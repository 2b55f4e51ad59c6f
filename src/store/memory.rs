//! In-memory store implementation using standard library types.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use super::TokenStore;
use crate::error::StoreError;

/// Default in-memory implementation of [`TokenStore`].
///
/// This implementation provides a simple, thread-safe store that drops
/// expired entries on access. It's suitable for single-instance deployments
/// where cache persistence across restarts is not required.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    storage: RwLock<HashMap<String, CacheEntry>>,
}

/// Internal cache entry with expiration tracking.
#[derive(Debug, Clone)]
struct CacheEntry {
    blob: Vec<u8>,
    expires_at: Instant,
}

impl InMemoryStore {
    /// Creates a new in-memory store instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes expired entries from the store.
    ///
    /// This is called during get operations to maintain store hygiene
    /// without requiring a separate cleanup thread.
    fn evict_expired(&self) {
        if let Ok(mut storage) = self.storage.write() {
            let now = Instant::now();
            storage.retain(|_, entry| entry.expires_at > now);
        }
    }

    fn poisoned() -> StoreError {
        StoreError::unavailable("in-memory store lock poisoned")
    }
}

impl TokenStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.evict_expired();

        let storage = self.storage.read().map_err(|_| Self::poisoned())?;
        Ok(storage
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.blob.clone()))
    }

    fn set(&self, key: &str, blob: Vec<u8>, ttl: Duration) -> Result<(), StoreError> {
        let mut storage = self.storage.write().map_err(|_| Self::poisoned())?;
        let entry = CacheEntry {
            blob,
            expires_at: Instant::now() + ttl,
        };
        storage.insert(key.to_string(), entry);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut storage = self.storage.write().map_err(|_| Self::poisoned())?;
        storage.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    const LONG_TTL: Duration = Duration::from_secs(60);

    #[test]
    fn set_then_get_returns_the_blob() {
        let store = InMemoryStore::new();
        store.set("k", vec![1, 2, 3], LONG_TTL).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn get_of_unknown_key_is_absent() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn set_replaces_the_entry_whole() {
        let store = InMemoryStore::new();
        store.set("k", vec![1], LONG_TTL).unwrap();
        store.set("k", vec![2, 3], LONG_TTL).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(vec![2, 3]));
    }

    #[test]
    fn remove_deletes_the_entry() {
        let store = InMemoryStore::new();
        store.set("k", vec![1], LONG_TTL).unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn remove_of_unknown_key_is_a_no_op() {
        let store = InMemoryStore::new();
        store.remove("missing").unwrap();
    }

    #[test]
    fn entry_is_present_before_expiry_and_absent_after() {
        let store = InMemoryStore::new();
        store.set("k", vec![7], Duration::from_millis(60)).unwrap();

        assert_eq!(store.get("k").unwrap(), Some(vec![7]));

        thread::sleep(Duration::from_millis(90));
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn rewriting_an_entry_restarts_its_expiry() {
        let store = InMemoryStore::new();
        store.set("k", vec![1], Duration::from_millis(120)).unwrap();

        thread::sleep(Duration::from_millis(80));
        store.set("k", vec![2], Duration::from_millis(120)).unwrap();

        // Past the first deadline but inside the second.
        thread::sleep(Duration::from_millis(60));
        assert_eq!(store.get("k").unwrap(), Some(vec![2]));
    }

    #[test]
    fn concurrent_writers_leave_exactly_one_blob() {
        let store = Arc::new(InMemoryStore::new());

        let writers: Vec<_> = [vec![1_u8; 64], vec![2_u8; 64]]
            .into_iter()
            .map(|blob| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..200 {
                        store.set("k", blob.clone(), LONG_TTL).unwrap();
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }

        let survivor = store.get("k").unwrap().unwrap();
        assert!(survivor == vec![1_u8; 64] || survivor == vec![2_u8; 64]);
    }

    #[test]
    fn concurrent_readers_and_writers_do_not_interfere() {
        let store = Arc::new(InMemoryStore::new());
        store.set("k", vec![9], LONG_TTL).unwrap();

        let mut handles = Vec::new();
        for _ in 0..4 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..200 {
                    if let Some(blob) = store.get("k").unwrap() {
                        assert_eq!(blob, vec![9]);
                    }
                }
            }));
        }
        for _ in 0..2 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for _ in 0..200 {
                    store.set("k", vec![9], LONG_TTL).unwrap();
                    store.remove("k").unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
