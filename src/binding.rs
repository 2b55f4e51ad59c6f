//! Wires app-scope and user-scope accessors into one acquisition call.

use crate::accessor::CacheAccessor;
use crate::client::ClientTokenCache;
use crate::identity::SubjectSource;
use crate::key::CacheScope;
use crate::store::SharedStore;

/// The pair of cache accessors backing one request's token acquisition.
///
/// A confidential-client request may acquire tokens for the application
/// itself (client-credential flow) and on behalf of the signed-in user in
/// the same request. Each side binds its own cache object and its own
/// partition; an operation on one never touches the other's key.
pub struct RequestCaches<C> {
    app: CacheAccessor<C>,
    user: CacheAccessor<C>,
}

impl<C: ClientTokenCache> RequestCaches<C> {
    /// Builds both accessors for `app_id`, resolving the user-scope
    /// partition from the currently signed-in subject.
    ///
    /// With no signed-in subject the user-scope side gets a bypass key and
    /// runs uncached; the app-scope side is unaffected.
    pub fn new(
        app_id: &str,
        subject: &dyn SubjectSource,
        store: SharedStore,
        app_client: C,
        user_client: C,
    ) -> Self {
        let subject_id = subject.current_subject_id();
        Self {
            app: CacheAccessor::new(app_id, CacheScope::App, None, store.clone(), app_client),
            user: CacheAccessor::new(
                app_id,
                CacheScope::User,
                subject_id.as_deref(),
                store,
                user_client,
            ),
        }
    }

    /// Accessor for tokens the application acquired for itself.
    pub fn app(&self) -> &CacheAccessor<C> {
        &self.app
    }

    /// Accessor for tokens acquired on behalf of the signed-in user.
    pub fn user(&self) -> &CacheAccessor<C> {
        &self.user
    }

    /// Clears both partitions and resets both bound objects.
    ///
    /// Invoked on sign-out, and after a downstream permission-denied
    /// response shows that cached tokens carry stale privileges; the next
    /// acquisition then fetches tokens with the current permission set.
    pub fn clear(&self) {
        self.app.clear();
        self.user.clear();
    }
}
