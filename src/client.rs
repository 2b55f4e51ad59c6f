//! Boundary to the token-acquisition library's in-memory cache object.

/// Adapter over the opaque in-memory token cache owned by the acquisition
/// library.
///
/// The cache layer never inspects blob contents; [`serialize`] and
/// [`deserialize`] move opaque bytes whose format belongs entirely to the
/// acquisition library. Synchronization calls (`deserialize`, `reset`,
/// `mark_synced`) must not raise the changed flag; only mutations made by
/// the acquisition library itself do.
///
/// [`serialize`]: ClientTokenCache::serialize
/// [`deserialize`]: ClientTokenCache::deserialize
pub trait ClientTokenCache: Send {
    /// Serializes the full in-memory cache state to an opaque blob.
    fn serialize(&self) -> Vec<u8>;

    /// Replaces the full in-memory state with `blob`.
    ///
    /// Existing state is discarded, never merged.
    fn deserialize(&mut self, blob: &[u8]);

    /// Drops all in-memory state, returning the cache to empty.
    fn reset(&mut self);

    /// Reports whether the acquisition library mutated the cache since the
    /// last load or sync.
    fn has_state_changed(&self) -> bool;

    /// Clears the changed flag once the state has been written to, or
    /// removed from, the shared store.
    fn mark_synced(&mut self);

    /// Reports whether the cache currently holds no tokens.
    fn is_empty(&self) -> bool;
}
