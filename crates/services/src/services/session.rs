//! Holder for the bearer token shared by every outgoing request.

use std::{
    fmt,
    sync::{Arc, RwLock},
};

use tracing::{debug, warn};
use utils::local_storage::LocalStorage;

/// Key the token is persisted under
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Cloneable handle on the current auth token. Clones share the same token,
/// so a login through one handle is visible to every client holding another.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Default)]
struct SessionInner {
    token: RwLock<Option<String>>,
    storage: Option<LocalStorage>,
}

impl Session {
    /// Session that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::default();
        session.store_in_memory(Some(token.into()));
        session
    }

    /// Session backed by local storage; picks up a token saved by an earlier run
    pub fn persistent(storage: LocalStorage) -> Self {
        let token = match storage.get_item(TOKEN_STORAGE_KEY) {
            Ok(token) => token,
            Err(e) => {
                warn!(
                    path = %storage.path().display(),
                    error = %e,
                    "Could not read persisted token, starting signed out"
                );
                None
            }
        };

        Self {
            inner: Arc::new(SessionInner {
                token: RwLock::new(token),
                storage: Some(storage),
            }),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Replace the token, or clear it with `None`, and mirror the change to storage.
    /// Storage failures are logged; the in-memory token is still updated.
    pub fn set_token(&self, token: Option<String>) {
        self.store_in_memory(token.clone());

        let Some(storage) = &self.inner.storage else {
            return;
        };
        let result = match &token {
            Some(token) => storage.set_item(TOKEN_STORAGE_KEY, token),
            None => storage.remove_item(TOKEN_STORAGE_KEY),
        };
        match result {
            Ok(()) => debug!(signed_in = token.is_some(), "Session token persisted"),
            Err(e) => warn!(
                path = %storage.path().display(),
                error = %e,
                "Failed to persist session token"
            ),
        }
    }

    pub fn clear(&self) {
        self.set_token(None);
    }

    fn store_in_memory(&self, token: Option<String>) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("has_token", &self.has_token())
            .field("persistent", &self.inner.storage.is_some())
            .finish()
    }
}
