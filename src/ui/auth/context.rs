//! Auth context for the component tree
//!
//! Wraps the [`BlogClient`] built at app start and mirrors its session into
//! signals:
//! - `state` follows every session transition (login, logout, 401 teardown)
//! - `loading` and `error` describe the last auth operation
//!
//! The persisted session is restored after hydration so server and client
//! render the same initial markup.

use std::sync::Arc;

use leptos::prelude::*;

use crate::core::error::ApiError;
use crate::core::http::HttpClient;
use crate::core::models::{AuthPayload, User};
use crate::core::service::BlogService;
use crate::core::session::{SessionState, SessionStore};
use crate::core::{BlogClient, Config};

/// Authentication state as seen by the UI
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// Persisted session not read yet
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(User),
}

impl From<&SessionState> for AuthState {
    fn from(state: &SessionState) -> Self {
        match state {
            SessionState::Authenticated { user, .. } => AuthState::Authenticated(user.clone()),
            SessionState::Anonymous => AuthState::Unauthenticated,
        }
    }
}

/// Auth context providing session state and the blog client
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Current authentication state
    pub state: RwSignal<AuthState>,
    /// An auth operation is in flight
    pub loading: RwSignal<bool>,
    /// Error message from the last auth operation
    pub error: RwSignal<Option<String>>,
    client: StoredValue<BlogClient>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state.get(), AuthState::Authenticated(_))
    }

    /// Whether the persisted session has been read
    pub fn is_resolved(&self) -> bool {
        !matches!(self.state.get(), AuthState::Loading)
    }

    pub fn user(&self) -> Option<User> {
        match self.state.get() {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Blog client shared by every page
    pub fn client(&self) -> BlogClient {
        self.client.get_value()
    }

    pub fn session(&self) -> SessionStore {
        self.client.with_value(|c| c.session().clone())
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Log in; the session listener moves `state` to Authenticated
    pub async fn login(self, email: String, password: String) -> Result<AuthPayload, ApiError> {
        self.begin();
        let result = self.client().login(&email, &password).await;
        self.finish(&result);
        result
    }

    /// Create an account; signs in too when the API returns a token
    pub async fn register(
        self,
        name: String,
        email: String,
        password: String,
    ) -> Result<User, ApiError> {
        self.begin();
        let result = self.client().register(&name, &email, &password).await;
        self.finish(&result);
        result
    }

    /// Drop the session locally
    pub fn logout(&self) {
        self.client.with_value(|c| c.logout());
        self.error.set(None);
    }

    fn begin(&self) {
        self.loading.set(true);
        self.error.set(None);
    }

    fn finish<T>(&self, result: &Result<T, ApiError>) {
        let _ = self.loading.try_set(false);
        if let Err(e) = result {
            let _ = self.error.try_set(Some(e.to_string()));
        }
    }
}

/// Build the client, provide the auth context and wire session updates
pub fn provide_auth_context() -> AuthContext {
    // Start Loading on both server and client to avoid a hydration mismatch
    let state = RwSignal::new(AuthState::Loading);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let client = build_client();
    client.session().subscribe(move |session| {
        let _ = state.try_set(AuthState::from(session));
    });

    let ctx = AuthContext {
        state,
        loading,
        error,
        client: StoredValue::new(client),
    };

    // Restore the persisted session after hydration (client-side only)
    #[cfg(not(feature = "ssr"))]
    {
        // restore() notifies the listener above, which settles `state`
        Effect::new(move |_| {
            ctx.session().restore();
        });
    }

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}

#[cfg(not(feature = "ssr"))]
fn build_client() -> BlogClient {
    use crate::core::http::BrowserNavigator;
    use crate::core::storage::BrowserStorage;
    use crate::core::transport::FetchTransport;

    let config = Config::for_browser();
    let session = SessionStore::new(Arc::new(BrowserStorage));
    let http = HttpClient::new(
        &config,
        FetchTransport::new(),
        session,
        Arc::new(BrowserNavigator),
    );
    BlogService::new(http)
}

#[cfg(feature = "ssr")]
fn build_client() -> BlogClient {
    use crate::core::http::NoopNavigator;
    use crate::core::storage::MemoryStore;
    use crate::core::transport::ReqwestTransport;

    let config = Config::from_env();
    let transport = ReqwestTransport::new(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Falling back to an unconfigured HTTP client");
        ReqwestTransport::from_client(reqwest::Client::new())
    });
    let session = SessionStore::new(Arc::new(MemoryStore::new()));
    let http = HttpClient::new(&config, transport, session, Arc::new(NoopNavigator));
    BlogService::new(http)
}
