//! Token cache synchronization for multi-tenant confidential clients.
//!
//! Identity-provider acquisition libraries keep their token cache as an
//! opaque in-memory object and expect the host application to load and
//! persist it around every access. This crate supplies that layer: a
//! shared, TTL-bounded byte store, stable per-(application, scope, subject)
//! cache keys, per-partition reader/writer locking, and a [`CacheAccessor`]
//! that synchronizes one bound cache object with its store partition.
//!
//! The cache never validates or inspects token contents, and no failure in
//! it reaches the acquisition caller: reads degrade to a miss and writes
//! are logged and dropped, so the application keeps working at the cost of
//! an extra token fetch.
//!
//! A request that needs tokens builds its accessors over a shared store
//! handle and opens a scope around the acquisition call:
//!
//! ```ignore
//! let store = SharedStore::in_memory();
//! let caches = RequestCaches::new(client_id, &principal, store, app_cache, user_cache);
//!
//! let scope = caches.app().scoped();
//! let result = daemon_client.acquire_token(scope.bound_object());
//! drop(scope); // persists if the acquisition mutated the cache
//!
//! if result.is_permission_denied() {
//!     caches.clear();
//! }
//! ```

pub mod accessor;
pub mod binding;
pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod key;
pub mod store;

pub(crate) mod guard;

#[cfg(test)]
pub(crate) mod testing;

pub use accessor::{AccessScope, CacheAccessor};
pub use binding::RequestCaches;
pub use client::ClientTokenCache;
pub use config::DEFAULT_ENTRY_TTL;
pub use error::StoreError;
pub use identity::SubjectSource;
pub use key::{CacheKey, CacheScope};
pub use store::{InMemoryStore, SharedStore, TokenStore};
