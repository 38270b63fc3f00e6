//! HTTP client wrapper: the single point of egress to the blog API
//!
//! - Joins request paths onto the configured base URL
//! - Attaches `Authorization: Bearer <token>` when a token is persisted
//! - On 401 clears the session and sends the user to the login page
//!
//! The wire work is done by a [`Transport`]; navigation by a [`Navigator`].
//! Both are traits so the wrapper behaves the same in the browser, on the
//! server and in tests.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::config::Config;
use crate::core::models::ImageUpload;
use crate::core::session::SessionStore;

/// Route the user is sent to when the session expires
pub const LOGIN_ROUTE: &str = "/login";

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Method {
    #[display("GET")]
    Get,
    #[display("POST")]
    Post,
    #[display("PUT")]
    Put,
    #[display("DELETE")]
    Delete,
}

/// Multipart form: text fields plus at most one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub file: Option<(String, ImageUpload)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, name: &str, upload: ImageUpload) -> Self {
        self.file = Some((name.to_string(), upload));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Request body
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

/// Outgoing request, already resolved against the base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value));
    }
}

/// Response as seen by the wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Transport-level failure: no response was received
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to build request: {0}")]
    Build(String),

    #[error("Request failed: {0}")]
    Unreachable(String),
}

/// Failure surfaced by the wrapper
///
/// Non-success responses are passed through unmodified; mapping them to
/// user-facing errors is the service layer's job.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    /// 401: the session has already been cleared
    #[error("Unauthorized")]
    Unauthorized { body: String },

    #[error("Request failed with status {status}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),
}

/// Sends a request over the wire
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Performs the forced navigation after a 401
pub trait Navigator: Send + Sync {
    fn to_login(&self);
}

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient<T> {
    base_url: String,
    transport: T,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(
        config: &Config,
        transport: T,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            transport,
            session,
            navigator,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Resolve an API path against the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn request(&self, method: Method, path: &str) -> ApiRequest {
        ApiRequest::new(method, self.url(path))
    }

    /// Build a JSON request
    pub fn json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiRequest, TransportError> {
        let value = serde_json::to_value(body).map_err(|e| TransportError::Build(e.to_string()))?;
        let mut request = self.request(method, path);
        request.set_header("Content-Type", "application/json".to_string());
        request.body = RequestBody::Json(value);
        Ok(request)
    }

    /// Send a request through the wrapper
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, HttpError> {
        match self.session.bearer_token() {
            Some(token) => request.set_header("Authorization", format!("Bearer {token}")),
            None => request
                .headers
                .retain(|(k, _)| !k.eq_ignore_ascii_case("Authorization")),
        }

        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "Sending API request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(%method, %url, error = %e, "API request failed");
            HttpError::Network(e.to_string())
        })?;

        if response.status == 401 {
            tracing::warn!(%method, %url, "API rejected credentials");
            self.session.expire();
            self.navigator.to_login();
            return Err(HttpError::Unauthorized {
                body: response.body,
            });
        }

        if !response.is_success() {
            tracing::debug!(%method, %url, status = response.status, "API returned an error");
            return Err(HttpError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response)
    }
}

/// Navigator used outside the browser: there is nothing to navigate
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn to_login(&self) {
        tracing::debug!("Login redirect requested outside the browser");
    }
}

/// Full-page navigation to the login route
#[cfg(not(feature = "ssr"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

#[cfg(not(feature = "ssr"))]
impl Navigator for BrowserNavigator {
    fn to_login(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        // Already there: reloading would wipe the error the page is showing
        if location.pathname().ok().as_deref() == Some(LOGIN_ROUTE) {
            return;
        }
        if location.set_href(LOGIN_ROUTE).is_err() {
            leptos::logging::error!("Failed to navigate to {}", LOGIN_ROUTE);
        }
    }
}
