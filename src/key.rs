//! Cache key derivation for app-scope and user-scope token caches.
//!
//! Every (application, scope, subject) combination maps to its own store
//! partition; writes to one partition are never observable through another.

/// Which token population a cache accessor manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheScope {
    /// Tokens the application acquired for itself (client-credential flow).
    App,
    /// Tokens acquired on behalf of a specific signed-in user.
    User,
}

const APP_CACHE_SUFFIX: &str = "_AppTokenCache";
const USER_CACHE_MARKER: &str = "_UserTokenCache_";

/// Partition key for one token cache in the shared store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// An addressable store partition.
    Partition(String),
    /// A key that is guaranteed to miss on every lookup.
    ///
    /// Derived when a user-scope cache is requested without a signed-in
    /// subject identifier: loads miss, persists are skipped, and the
    /// surrounding acquisition call simply runs uncached.
    Bypass,
}

impl CacheKey {
    /// Derives the app-scope key for a client application.
    #[must_use]
    pub fn for_app(app_id: &str) -> Self {
        Self::Partition(format!("{app_id}{APP_CACHE_SUFFIX}"))
    }

    /// Derives the user-scope key for a client application and signed-in
    /// subject.
    ///
    /// An absent or empty subject identifier yields [`CacheKey::Bypass`].
    /// The subject is always part of a user-scope partition; two users of
    /// the same application never share an entry.
    #[must_use]
    pub fn for_user(app_id: &str, subject_id: Option<&str>) -> Self {
        match subject_id {
            Some(subject) if !subject.is_empty() => {
                Self::Partition(format!("{app_id}{USER_CACHE_MARKER}{subject}"))
            }
            _ => Self::Bypass,
        }
    }

    /// Derives the key for `scope`. The subject identifier is only
    /// consulted for [`CacheScope::User`].
    #[must_use]
    pub fn derive(app_id: &str, scope: CacheScope, subject_id: Option<&str>) -> Self {
        match scope {
            CacheScope::App => Self::for_app(app_id),
            CacheScope::User => Self::for_user(app_id, subject_id),
        }
    }

    /// Returns the storable partition string, or `None` for
    /// [`CacheKey::Bypass`].
    #[must_use]
    pub fn partition(&self) -> Option<&str> {
        match self {
            Self::Partition(partition) => Some(partition),
            Self::Bypass => None,
        }
    }
}
