//! Configuration constants for the token cache layer.

use std::time::Duration;

/// Default time-to-live for persisted token cache entries (12 hours).
///
/// Entries older than this are treated as absent on read regardless of when
/// the store physically deletes them.
pub const DEFAULT_ENTRY_TTL: Duration = Duration::from_secs(12 * 60 * 60);
