//! Error types for the token cache layer.

/// Errors reported by a [`TokenStore`](crate::store::TokenStore)
/// implementation.
///
/// These never reach token-acquisition callers: the accessor degrades a
/// failed read to a cache miss and logs-and-swallows a failed write, so the
/// surrounding acquisition call falls back to fetching fresh tokens. A
/// missing signed-in subject is likewise not an error at this boundary; key
/// derivation degrades it to a key that never matches a stored entry.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("token store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Convenience constructor for backends reporting loss of access to
    /// their storage.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}
