//! Core client logic: session, HTTP plumbing and the blog API operations
//!
//! Nothing in here depends on Leptos; the UI layer wires these types into
//! signals and context.

pub mod articles;
pub mod config;
pub mod error;
pub mod http;
pub mod lifetime;
pub mod models;
pub mod service;
pub mod session;
pub mod storage;
pub mod transport;
pub mod validation;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::ApiError;
pub use http::HttpClient;
pub use lifetime::Lifetime;
pub use models::{Article, ArticleDraft, Author, AuthPayload, ImageUpload, User};
pub use service::BlogService;
pub use session::{SessionState, SessionStore};
pub use transport::DefaultTransport;

/// Service type used by the application
pub type BlogClient = BlogService<DefaultTransport>;
