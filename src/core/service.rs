//! Blog service: the operations the pages call
//!
//! Each operation is a single round trip through [`HttpClient`]; nothing is
//! cached or retried. Auth operations also drive the [`SessionStore`].
//! Errors are normalized into [`ApiError`] with a message fit for display.

use serde::de::DeserializeOwned;

use crate::core::error::{ApiError, NETWORK_ERROR_MESSAGE, SERVER_ERROR_MESSAGE};
use crate::core::http::{ApiResponse, HttpClient, HttpError, Method, MultipartForm, RequestBody, Transport};
use crate::core::models::{
    Article, ArticleDraft, AuthPayload, ForgotPasswordRequest, LoginRequest, MessageBody,
    RegisterRequest, RegisterResponse, ResetPasswordRequest, User,
};
use crate::core::session::SessionStore;
use crate::core::validation;

const REGISTER_FAILED: &str = "Could not create account. Please try again.";
const INVALID_CREDENTIALS: &str = "Invalid email or password";
const FORGOT_PASSWORD_FAILED: &str = "Could not send the reset email. Please try again.";
const LIST_FAILED: &str = "Could not load articles. Please try again.";
const ARTICLE_NOT_FOUND: &str = "Article not found";
const CREATE_FAILED: &str = "Could not publish the article. Please try again.";
const UPDATE_FAILED: &str = "Could not update the article. Please try again.";
const DELETE_FAILED: &str = "Could not delete the article. Please try again.";
const DELETE_FORBIDDEN: &str = "You can only delete your own articles";
const MISSING_TOKEN: &str = "Authentication token not found. Please log in again.";
const MISSING_RESET_TOKEN: &str = "Reset link is invalid. Request a new one.";

const RESET_INVALID_DATA: &str = "Invalid data provided";
const RESET_TOKEN_NOT_FOUND: &str = "Reset token not found or expired";
const RESET_TOKEN_INVALID: &str = "Invalid or expired token";
const RESET_UNKNOWN: &str = "Unknown error while resetting password";

/// Blog API operations over a transport
#[derive(Clone)]
pub struct BlogService<T> {
    http: HttpClient<T>,
}

impl<T: Transport> BlogService<T> {
    pub fn new(http: HttpClient<T>) -> Self {
        Self { http }
    }

    pub fn session(&self) -> &SessionStore {
        self.http.session()
    }

    // ========================================================================
    // Auth
    // ========================================================================

    /// Create an account
    ///
    /// When the API answers with a token the new user is signed in right
    /// away; otherwise the session is left untouched and the caller sends the
    /// user to the login page.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User, ApiError> {
        validation::validate_registration(name, email, password, password).into_result()?;

        let body = RegisterRequest {
            name: name.trim(),
            email: email.trim(),
            password,
        };
        let response = self
            .send_json(Method::Post, "/auth/register", &body)
            .await
            .map_err(|e| ApiError::from_http(e, REGISTER_FAILED))?;

        let created: RegisterResponse = decode(&response)?;
        match created.token.filter(|t| !t.is_empty()) {
            Some(token) => {
                self.session().sign_in(created.user.clone(), token)?;
                tracing::info!(user_id = created.user.id, "Registered and signed in");
            }
            None => tracing::info!(user_id = created.user.id, "Registered"),
        }
        Ok(created.user)
    }

    /// Authenticate and start a session
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        validation::validate_login(email, password).into_result()?;

        let body = LoginRequest {
            email: email.trim(),
            password,
        };
        let response = self
            .send_json(Method::Post, "/auth/login", &body)
            .await
            .map_err(|e| match e {
                HttpError::Unauthorized { body } | HttpError::Status { status: 400, body } => {
                    ApiError::InvalidCredentials(
                        MessageBody::extract(&body).unwrap_or_else(|| INVALID_CREDENTIALS.to_string()),
                    )
                }
                other => ApiError::from_http(other, INVALID_CREDENTIALS),
            })?;

        let payload: AuthPayload = decode(&response)?;
        self.session()
            .sign_in(payload.user.clone(), payload.token.clone())?;
        Ok(payload)
    }

    /// End the session locally; the API is not contacted
    pub fn logout(&self) {
        self.session().sign_out();
    }

    /// Ask the API to email a reset link
    ///
    /// Success does not reveal whether the account exists.
    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        validation::validate_forgot_password(email).into_result()?;

        self.send_json(
            Method::Post,
            "/auth/forgot-password",
            &ForgotPasswordRequest {
                email: email.trim(),
            },
        )
        .await
        .map_err(|e| ApiError::from_http(e, FORGOT_PASSWORD_FAILED))?;

        tracing::info!("Password reset requested");
        Ok(())
    }

    /// Set a new password using the token from the reset link
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        if token.trim().is_empty() {
            return Err(ApiError::Validation(MISSING_RESET_TOKEN.to_string()));
        }
        validation::validate_new_password(new_password)
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        let body = ResetPasswordRequest {
            token: token.trim(),
            new_password,
        };
        self.send_json(Method::Post, "/auth/reset-password", &body)
            .await
            .map_err(reset_error)?;

        tracing::info!("Password reset completed");
        Ok(())
    }

    // ========================================================================
    // Articles
    // ========================================================================

    /// All articles, in the order the API returns them
    pub async fn list_articles(&self) -> Result<Vec<Article>, ApiError> {
        let request = self.http.request(Method::Get, "/articles");
        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| ApiError::from_http(e, LIST_FAILED))?;
        let articles: Vec<Article> = decode(&response)?;
        tracing::debug!(count = articles.len(), "Loaded articles");
        Ok(articles)
    }

    pub async fn get_article(&self, id: i64) -> Result<Article, ApiError> {
        let request = self.http.request(Method::Get, &format!("/articles/{id}"));
        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| ApiError::from_http(e, ARTICLE_NOT_FOUND))?;
        decode(&response)
    }

    /// Publish a new article
    ///
    /// Fails without touching the network when the draft is incomplete or no
    /// session token is stored.
    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<Article, ApiError> {
        let request = self.article_request(Method::Post, "/articles", draft)?;
        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| ApiError::from_http(e, CREATE_FAILED))?;
        let article: Article = decode(&response)?;
        tracing::info!(article_id = article.id, "Article published");
        Ok(article)
    }

    /// Replace the title, content and optionally the image of an article
    pub async fn update_article(&self, id: i64, draft: &ArticleDraft) -> Result<Article, ApiError> {
        let request = self.article_request(Method::Put, &format!("/articles/{id}"), draft)?;
        let response = self
            .http
            .send(request)
            .await
            .map_err(|e| ApiError::from_http(e, UPDATE_FAILED))?;
        let article: Article = decode(&response)?;
        tracing::info!(article_id = article.id, "Article updated");
        Ok(article)
    }

    pub async fn delete_article(&self, id: i64) -> Result<(), ApiError> {
        let request = self.http.request(Method::Delete, &format!("/articles/{id}"));
        self.http.send(request).await.map_err(|e| match e {
            HttpError::Status { status: 403, body } => ApiError::Authorization(
                MessageBody::extract(&body).unwrap_or_else(|| DELETE_FORBIDDEN.to_string()),
            ),
            other => ApiError::from_http(other, DELETE_FAILED),
        })?;
        tracing::info!(article_id = id, "Article deleted");
        Ok(())
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn send_json<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, HttpError> {
        let request = self
            .http
            .json_request(method, path, body)
            .map_err(|e| HttpError::Network(e.to_string()))?;
        self.http.send(request).await
    }

    fn article_request(
        &self,
        method: Method,
        path: &str,
        draft: &ArticleDraft,
    ) -> Result<crate::core::http::ApiRequest, ApiError> {
        validation::validate_article(&draft.title, &draft.content).into_result()?;
        if self.session().bearer_token().is_none() {
            tracing::warn!(%method, path, "Article write attempted without a session token");
            return Err(ApiError::Authentication(MISSING_TOKEN.to_string()));
        }

        let mut form = MultipartForm::new()
            .text("title", draft.title.trim())
            .text("content", draft.content.trim());
        if let Some(image) = &draft.image {
            form = form.file("image", image.clone());
        }

        let mut request = self.http.request(method, path);
        request.body = RequestBody::Multipart(form);
        Ok(request)
    }
}

fn decode<D: DeserializeOwned>(response: &ApiResponse) -> Result<D, ApiError> {
    response.json().map_err(|e| {
        tracing::warn!(error = %e, "Failed to decode API response");
        ApiError::Decode(e.to_string())
    })
}

/// Status mapping of the reset-password endpoint
fn reset_error(err: HttpError) -> ApiError {
    match err {
        HttpError::Network(_) => ApiError::Network(NETWORK_ERROR_MESSAGE.to_string()),
        HttpError::Unauthorized { .. } => ApiError::Rejected {
            status: 401,
            message: RESET_UNKNOWN.to_string(),
        },
        HttpError::Status { status, body } => {
            let message = MessageBody::extract(&body);
            match status {
                400 => ApiError::BadRequest(message.unwrap_or_else(|| RESET_INVALID_DATA.to_string())),
                404 => ApiError::NotFound(RESET_TOKEN_NOT_FOUND.to_string()),
                422 => ApiError::InvalidToken(message.unwrap_or_else(|| RESET_TOKEN_INVALID.to_string())),
                500 => ApiError::Server {
                    status,
                    message: SERVER_ERROR_MESSAGE.to_string(),
                },
                _ => ApiError::Rejected {
                    status,
                    message: RESET_UNKNOWN.to_string(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, body: &str) -> HttpError {
        HttpError::Status {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_reset_error_400() {
        assert_eq!(
            reset_error(status(400, "")),
            ApiError::BadRequest(RESET_INVALID_DATA.to_string())
        );
        assert_eq!(
            reset_error(status(400, r#"{"message":"Password too weak"}"#)),
            ApiError::BadRequest("Password too weak".to_string())
        );
    }

    #[test]
    fn test_reset_error_404_ignores_body() {
        assert_eq!(
            reset_error(status(404, r#"{"message":"nope"}"#)).to_string(),
            "Reset token not found or expired"
        );
    }

    #[test]
    fn test_reset_error_422() {
        assert_eq!(
            reset_error(status(422, "")).to_string(),
            "Invalid or expired token"
        );
        assert_eq!(
            reset_error(status(422, r#"{"message":"Token used"}"#)).to_string(),
            "Token used"
        );
    }

    #[test]
    fn test_reset_error_500_and_other() {
        assert_eq!(
            reset_error(status(500, r#"{"message":"stack trace"}"#)).to_string(),
            "Internal server error. Please try again."
        );
        assert_eq!(
            reset_error(status(409, "")).to_string(),
            "Unknown error while resetting password"
        );
        assert_eq!(
            reset_error(status(503, "")).to_string(),
            "Unknown error while resetting password"
        );
    }

    #[test]
    fn test_reset_error_network() {
        let err = reset_error(HttpError::Network("refused".to_string()));
        assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
    }
}
