//! Auth session store
//!
//! Holds the current user and bearer token and mirrors both into persistent
//! storage. Two states:
//! - `Anonymous`: no user, no token
//! - `Authenticated`: user and token present
//!
//! The store is built once at app start and handed to whoever needs it. It is
//! the only place that reads or writes the persisted `token`/`user` entries,
//! and every transition updates memory and storage together.

use std::sync::{Arc, PoisonError, RwLock};

use crate::core::models::{Article, User};
use crate::core::storage::{KeyValueStore, StorageError, TOKEN_KEY, USER_KEY};

/// Session state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated { user: User, token: String },
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated { user, .. } => Some(user),
            SessionState::Anonymous => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated { token, .. } => Some(token),
            SessionState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}

type Listener = Box<dyn Fn(&SessionState) + Send + Sync>;

struct Inner {
    storage: Arc<dyn KeyValueStore>,
    state: RwLock<SessionState>,
    listeners: RwLock<Vec<Listener>>,
}

/// Shared handle to the session
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create an anonymous store over `storage` without reading it
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                storage,
                state: RwLock::new(SessionState::Anonymous),
                listeners: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Create a store and restore any persisted session
    pub fn hydrated(storage: Arc<dyn KeyValueStore>) -> Self {
        let store = Self::new(storage);
        store.restore();
        store
    }

    /// Restore the session from storage
    ///
    /// Authenticated only if both a token and a parseable user are stored.
    /// A half-written pair is cleared. The token is not validated against the
    /// server; the first 401 takes care of stale tokens.
    pub fn restore(&self) -> SessionState {
        let storage = &self.inner.storage;
        let token = storage.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user = storage
            .get(USER_KEY)
            .and_then(|json| serde_json::from_str::<User>(&json).ok());

        let next = match (user, token) {
            (Some(user), Some(token)) => {
                tracing::debug!(user_id = user.id, "Restored persisted session");
                SessionState::Authenticated { user, token }
            }
            (None, None) => SessionState::Anonymous,
            _ => {
                tracing::warn!("Discarding incomplete persisted session");
                self.clear_storage();
                SessionState::Anonymous
            }
        };

        self.replace(next.clone());
        next
    }

    /// Anonymous -> Authenticated
    ///
    /// Token and user are persisted as a unit: if the second write fails the
    /// previous entries are put back and the in-memory state is left
    /// untouched, so memory and storage still agree.
    pub fn sign_in(&self, user: User, token: String) -> Result<(), StorageError> {
        let user_json =
            serde_json::to_string(&user).map_err(|_| StorageError::Write(USER_KEY.to_string()))?;

        let storage = &self.inner.storage;
        let previous_token = storage.get(TOKEN_KEY);
        storage.set(TOKEN_KEY, &token)?;
        if let Err(e) = storage.set(USER_KEY, &user_json) {
            tracing::warn!(error = %e, "Session write failed, restoring previous credentials");
            let _ = match previous_token {
                Some(previous) => storage.set(TOKEN_KEY, &previous),
                None => storage.remove(TOKEN_KEY),
            };
            return Err(e);
        }

        tracing::info!(user_id = user.id, "Session started");
        self.replace(SessionState::Authenticated { user, token });
        Ok(())
    }

    /// Authenticated -> Anonymous on explicit logout
    ///
    /// Works from any state and never touches the network.
    pub fn sign_out(&self) {
        tracing::info!("Session ended by logout");
        self.clear();
    }

    /// Authenticated -> Anonymous after the API rejected the credential
    pub fn expire(&self) {
        tracing::warn!("Session expired, clearing credentials");
        self.clear();
    }

    pub fn state(&self) -> SessionState {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state().user().cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.state().token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated()
    }

    /// Token to attach to outgoing requests
    ///
    /// Read from the persisted copy so a logout in another tab stops this
    /// one from sending a dead credential.
    pub fn bearer_token(&self) -> Option<String> {
        self.inner
            .storage
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    /// Whether the signed-in user wrote `article`
    ///
    /// Compares display names exactly (case-sensitive). Always false when
    /// anonymous.
    pub fn is_author(&self, article: &Article) -> bool {
        crate::core::articles::is_author(self.state().user(), article)
    }

    /// Register a callback invoked after every transition
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + Send + Sync + 'static) {
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(listener));
    }

    fn clear(&self) {
        self.clear_storage();
        self.replace(SessionState::Anonymous);
    }

    fn clear_storage(&self) {
        let storage = &self.inner.storage;
        // Attempt both removals even if the first one fails
        let token = storage.remove(TOKEN_KEY);
        let user = storage.remove(USER_KEY);
        if let Err(e) = token.and(user) {
            tracing::error!(error = %e, "Failed to clear persisted session");
        }
    }

    fn replace(&self, next: SessionState) {
        {
            let mut state = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *state = next.clone();
        }
        let listeners = self
            .inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        for listener in listeners.iter() {
            listener(&next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Author;
    use crate::core::storage::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn user(name: &str) -> User {
        User {
            id: 1,
            name: name.to_string(),
            email: "a@b.com".to_string(),
        }
    }

    /// Storage whose writes to one key always fail
    struct FailingStore {
        inner: MemoryStore,
        failing_key: &'static str,
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if key == self.failing_key {
                return Err(StorageError::Write(key.to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    #[test]
    fn test_new_store_is_anonymous() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(store.user().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_sign_in_persists_user_and_token() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());

        store.sign_in(user("A"), "t1".to_string()).unwrap();

        assert!(store.is_authenticated());
        assert_eq!(store.token(), Some("t1".to_string()));
        assert_eq!(storage.get(TOKEN_KEY), Some("t1".to_string()));
        let persisted: User = serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(persisted, user("A"));
    }

    #[test]
    fn test_sign_out_clears_memory_and_storage() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());
        store.sign_in(user("A"), "t1".to_string()).unwrap();

        store.sign_out();

        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_sign_out_when_anonymous() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());

        store.sign_out();

        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_expire_clears_session() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());
        store.sign_in(user("A"), "t1".to_string()).unwrap();

        store.expire();

        assert!(!store.is_authenticated());
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[test]
    fn test_failed_user_write_rolls_back_token() {
        let storage = Arc::new(FailingStore {
            inner: MemoryStore::new(),
            failing_key: USER_KEY,
        });
        let store = SessionStore::new(storage.clone());

        let result = store.sign_in(user("A"), "t1".to_string());

        assert!(result.is_err());
        assert!(!store.is_authenticated());
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_failed_relogin_keeps_previous_session_persisted() {
        let storage = Arc::new(FailingStore {
            inner: MemoryStore::with_entries([
                (TOKEN_KEY, "t0"),
                (USER_KEY, r#"{"id":1,"name":"A","email":"a@b.com"}"#),
            ]),
            failing_key: USER_KEY,
        });
        let store = SessionStore::hydrated(storage.clone());
        assert!(store.is_authenticated());

        let result = store.sign_in(user("B"), "t1".to_string());

        assert!(result.is_err());
        assert_eq!(store.user(), Some(user("A")));
        assert_eq!(store.token(), Some("t0".to_string()));
        assert_eq!(store.token(), store.bearer_token());
        assert_eq!(storage.get(TOKEN_KEY), Some("t0".to_string()));
    }

    // ========================================================================
    // Restore
    // ========================================================================

    #[test]
    fn test_restore_with_user_and_token() {
        let storage = Arc::new(MemoryStore::with_entries([
            (TOKEN_KEY, "t1"),
            (USER_KEY, r#"{"id":1,"name":"A","email":"a@b.com"}"#),
        ]));

        let store = SessionStore::hydrated(storage);

        assert_eq!(
            store.state(),
            SessionState::Authenticated {
                user: user("A"),
                token: "t1".to_string()
            }
        );
    }

    #[test]
    fn test_restore_with_token_only_clears_storage() {
        let storage = Arc::new(MemoryStore::with_entries([(TOKEN_KEY, "t1")]));

        let store = SessionStore::hydrated(storage.clone());

        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_restore_with_corrupt_user() {
        let storage = Arc::new(MemoryStore::with_entries([
            (TOKEN_KEY, "t1"),
            (USER_KEY, "not json"),
        ]));

        let store = SessionStore::hydrated(storage.clone());

        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_restore_empty_storage() {
        let store = SessionStore::hydrated(Arc::new(MemoryStore::new()));
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    // ========================================================================
    // Bearer token & authorship
    // ========================================================================

    #[test]
    fn test_bearer_token_follows_storage() {
        let storage = Arc::new(MemoryStore::new());
        let store = SessionStore::new(storage.clone());
        assert!(store.bearer_token().is_none());

        store.sign_in(user("A"), "t1".to_string()).unwrap();
        assert_eq!(store.bearer_token(), Some("t1".to_string()));

        // Another tab logged out
        storage.remove(TOKEN_KEY).unwrap();
        assert!(store.bearer_token().is_none());
    }

    #[test]
    fn test_is_author() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        let article = Article {
            id: 1,
            title: "t".to_string(),
            content: "c".to_string(),
            image: None,
            author: Author::named("A"),
            created_at: String::new(),
            updated_at: String::new(),
        };

        assert!(!store.is_author(&article));

        store.sign_in(user("A"), "t1".to_string()).unwrap();
        assert!(store.is_author(&article));

        store.sign_in(user("a"), "t1".to_string()).unwrap();
        assert!(!store.is_author(&article));
    }

    // ========================================================================
    // Listeners
    // ========================================================================

    #[test]
    fn test_listeners_see_every_transition() {
        let store = SessionStore::new(Arc::new(MemoryStore::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let authenticated = Arc::new(AtomicUsize::new(0));

        {
            let calls = calls.clone();
            let authenticated = authenticated.clone();
            store.subscribe(move |state| {
                calls.fetch_add(1, Ordering::SeqCst);
                if state.is_authenticated() {
                    authenticated.fetch_add(1, Ordering::SeqCst);
                }
            });
        }

        store.sign_in(user("A"), "t1".to_string()).unwrap();
        store.sign_out();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(authenticated.load(Ordering::SeqCst), 1);
    }
}
