//! Error taxonomy for calls made against the blog API
//!
//! Every service operation returns [`ApiError`]. Messages are meant to be
//! shown to the user as-is: they come from the `{message}` body the API sent
//! when there is one, otherwise from a per-operation fallback.

use crate::core::http::HttpError;
use crate::core::models::MessageBody;
use crate::core::storage::StorageError;
use crate::core::validation::ValidationResult;

/// Generic message for requests that never got a response
pub const NETWORK_ERROR_MESSAGE: &str =
    "Connection error. Check your internet connection and try again.";

/// Generic message for 5xx responses
pub const SERVER_ERROR_MESSAGE: &str = "Internal server error. Please try again.";

/// Message used when a 401 tears the session down
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";

/// Blog API error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Client-side form validation failed; nothing was sent
    #[error("{0}")]
    Validation(String),

    /// Login rejected the email/password pair
    #[error("{0}")]
    InvalidCredentials(String),

    /// 401: the session was torn down and the user sent to the login page
    #[error("{0}")]
    Authentication(String),

    /// 403
    #[error("{0}")]
    Authorization(String),

    /// 404
    #[error("{0}")]
    NotFound(String),

    /// 400
    #[error("{0}")]
    BadRequest(String),

    /// 422, returned by the password reset flow for unusable tokens
    #[error("{0}")]
    InvalidToken(String),

    /// 5xx
    #[error("{message}")]
    Server { status: u16, message: String },

    /// No response was received
    #[error("{0}")]
    Network(String),

    /// Any other non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A success response whose body could not be decoded
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// The session could not be persisted after a successful login
    #[error("Could not save your session: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Map a non-success status to the taxonomy
    ///
    /// `fallback` is used when the body carries no message, except for 5xx
    /// which fall back to the generic server message.
    pub fn from_status(status: u16, body: &str, fallback: &str) -> Self {
        let extracted = MessageBody::extract(body);
        if (500..=599).contains(&status) {
            return ApiError::Server {
                status,
                message: extracted.unwrap_or_else(|| SERVER_ERROR_MESSAGE.to_string()),
            };
        }
        let message = extracted.unwrap_or_else(|| fallback.to_string());
        match status {
            400 => ApiError::BadRequest(message),
            401 => ApiError::Authentication(message),
            403 => ApiError::Authorization(message),
            404 => ApiError::NotFound(message),
            422 => ApiError::InvalidToken(message),
            _ => ApiError::Rejected { status, message },
        }
    }

    /// Convert a wrapper error using the default mapping
    pub fn from_http(err: HttpError, fallback: &str) -> Self {
        match err {
            HttpError::Unauthorized { .. } => {
                ApiError::Authentication(SESSION_EXPIRED_MESSAGE.to_string())
            }
            HttpError::Status { status, body } => ApiError::from_status(status, &body, fallback),
            HttpError::Network(_) => ApiError::Network(NETWORK_ERROR_MESSAGE.to_string()),
        }
    }

    /// HTTP status carried by this error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authentication(_) => Some(401),
            ApiError::Authorization(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::BadRequest(_) => Some(400),
            ApiError::InvalidToken(_) => Some(422),
            ApiError::Server { status, .. } | ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the session was torn down because of this error
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::Authentication(_))
    }
}

impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        ApiError::Validation(
            result
                .first_message()
                .unwrap_or_else(|| "Invalid input".to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_body_message() {
        let err = ApiError::from_status(404, r#"{"message":"not found"}"#, "fallback");
        assert_eq!(err, ApiError::NotFound("not found".to_string()));
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn test_from_status_uses_fallback() {
        let err = ApiError::from_status(403, "", "Not allowed");
        assert_eq!(err, ApiError::Authorization("Not allowed".to_string()));
    }

    #[test]
    fn test_from_status_taxonomy() {
        assert!(matches!(
            ApiError::from_status(400, "", "x"),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from_status(422, "", "x"),
            ApiError::InvalidToken(_)
        ));
        assert!(matches!(
            ApiError::from_status(503, "", "x"),
            ApiError::Server { status: 503, .. }
        ));
        assert!(matches!(
            ApiError::from_status(409, "", "x"),
            ApiError::Rejected { status: 409, .. }
        ));
    }

    #[test]
    fn test_server_error_ignores_operation_fallback() {
        let err = ApiError::from_status(500, "", "Article not found");
        assert_eq!(err.to_string(), SERVER_ERROR_MESSAGE);

        let err = ApiError::from_status(500, r#"{"message":"db down"}"#, "x");
        assert_eq!(err.to_string(), "db down");
    }

    #[test]
    fn test_storage_error_converts() {
        let err: ApiError = StorageError::Unavailable.into();
        assert_eq!(err.to_string(), "Could not save your session: Storage is not available");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_from_http_network() {
        let err = ApiError::from_http(HttpError::Network("refused".to_string()), "x");
        assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_from_http_unauthorized() {
        let err = ApiError::from_http(
            HttpError::Unauthorized {
                body: String::new(),
            },
            "x",
        );
        assert!(err.is_session_expired());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_status_of_server_error() {
        let err = ApiError::Server {
            status: 502,
            message: SERVER_ERROR_MESSAGE.to_string(),
        };
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.to_string(), SERVER_ERROR_MESSAGE);
    }
}
