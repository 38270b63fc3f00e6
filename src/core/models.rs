//! Wire models shared by the session store, the service layer and the pages
//!
//! Shapes follow the remote blog API. Requests serialize to the field names
//! the API expects (`newPassword` for the reset flow); responses tolerate the
//! two author representations the API has shipped.

use serde::{Deserialize, Deserializer, Serialize};

/// Authenticated user as returned by the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Article author
///
/// Older API builds send the author as a bare display name, newer ones as an
/// object. Both deserialize into this shape; serialization always emits the
/// object form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

impl Author {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AuthorRepr {
    Name(String),
    Object {
        #[serde(default)]
        id: Option<i64>,
        name: String,
    },
}

impl<'de> Deserialize<'de> for Author {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match AuthorRepr::deserialize(deserializer)? {
            AuthorRepr::Name(name) => Author { id: None, name },
            AuthorRepr::Object { id, name } => Author { id, name },
        })
    }
}

/// Blog article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    pub author: Author,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Article {
    /// Whether the article was modified after it was published
    pub fn was_edited(&self) -> bool {
        !self.updated_at.is_empty() && self.updated_at != self.created_at
    }
}

/// Response of a successful login
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// Response of a successful registration
///
/// Some API builds sign the new user in right away, others only create the
/// account, so the token is optional here.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RegisterResponse {
    pub user: User,
    #[serde(default)]
    pub token: Option<String>,
}

/// Error body returned by the API
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageBody {
    /// Extract a non-empty `message` field from a raw response body
    pub fn extract(body: &str) -> Option<String> {
        serde_json::from_str::<MessageBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    #[serde(rename = "newPassword")]
    pub new_password: &'a str,
}

/// Image attached to an article draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Article fields submitted by the create and edit forms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub image: Option<ImageUpload>,
}

impl ArticleDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    /// Prefill a draft from an existing article (image stays server-side)
    pub fn from_article(article: &Article) -> Self {
        Self::new(article.title.clone(), article.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Author compatibility
    // ========================================================================

    #[test]
    fn test_author_from_plain_string() {
        let author: Author = serde_json::from_str(r#""Ana""#).unwrap();
        assert_eq!(author, Author::named("Ana"));
    }

    #[test]
    fn test_author_from_object() {
        let author: Author = serde_json::from_str(r#"{"id": 3, "name": "Ana"}"#).unwrap();
        assert_eq!(author.id, Some(3));
        assert_eq!(author.name, "Ana");
    }

    #[test]
    fn test_author_object_without_id() {
        let author: Author = serde_json::from_str(r#"{"name": "Ana"}"#).unwrap();
        assert_eq!(author, Author::named("Ana"));
    }

    #[test]
    fn test_author_serializes_as_object() {
        let json = serde_json::to_value(Author::named("Ana")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Ana" }));
    }

    // ========================================================================
    // Article
    // ========================================================================

    #[test]
    fn test_article_deserialization_with_string_author() {
        let json = r#"{
            "id": 42,
            "title": "Hello",
            "content": "World",
            "image": null,
            "author": "A",
            "created_at": "2024-05-01T10:00:00.000Z",
            "updated_at": "2024-05-01T10:00:00.000Z"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, 42);
        assert_eq!(article.author.name, "A");
        assert!(article.image.is_none());
        assert!(!article.was_edited());
    }

    #[test]
    fn test_article_without_updated_at() {
        let json = r#"{
            "id": 1,
            "title": "t",
            "content": "c",
            "author": {"id": 9, "name": "B"},
            "created_at": "2024-05-01T10:00:00Z"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.author.id, Some(9));
        assert!(!article.was_edited());
    }

    #[test]
    fn test_article_was_edited() {
        let json = r#"{
            "id": 1,
            "title": "t",
            "content": "c",
            "author": "B",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T08:00:00Z"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.was_edited());
    }

    // ========================================================================
    // Auth payloads
    // ========================================================================

    #[test]
    fn test_user_without_email() {
        let user: User = serde_json::from_str(r#"{"id": 1, "name": "A"}"#).unwrap();
        assert_eq!(user.email, "");
    }

    #[test]
    fn test_register_response_without_token() {
        let resp: RegisterResponse =
            serde_json::from_str(r#"{"user": {"id": 2, "name": "B", "email": "b@c.com"}}"#)
                .unwrap();
        assert!(resp.token.is_none());
        assert_eq!(resp.user.name, "B");
    }

    #[test]
    fn test_reset_request_uses_camel_case_password() {
        let json = serde_json::to_value(ResetPasswordRequest {
            token: "abc",
            new_password: "secret1",
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "token": "abc", "newPassword": "secret1" })
        );
    }

    #[test]
    fn test_message_body_extract() {
        assert_eq!(
            MessageBody::extract(r#"{"message": "not found"}"#),
            Some("not found".to_string())
        );
        assert_eq!(MessageBody::extract(r#"{"message": "  "}"#), None);
        assert_eq!(MessageBody::extract("<html>"), None);
        assert_eq!(MessageBody::extract(""), None);
    }
}
