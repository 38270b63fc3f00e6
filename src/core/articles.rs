//! View logic shared by the article pages
//!
//! Pure functions only; the pages wire them to signals.

use chrono::{DateTime, NaiveDateTime};

use crate::core::models::{Article, User};

/// Maximum number of characters shown in a list excerpt
pub const EXCERPT_LENGTH: usize = 150;

/// How long a transient banner stays on screen
pub const BANNER_TIMEOUT_MS: u32 = 4000;

/// Whether `user` wrote `article`
///
/// Authorship is decided by display name, compared exactly. Anonymous
/// visitors are never authors.
pub fn is_author(user: Option<&User>, article: &Article) -> bool {
    user.is_some_and(|u| u.name == article.author.name)
}

/// Parse the `:id` route segment
///
/// Anything other than a positive integer is treated as a missing article.
pub fn parse_article_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// State of the article list on the home page
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListState {
    #[default]
    Loading,
    Empty,
    Loaded(Vec<Article>),
    Failed(String),
}

impl ListState {
    /// Settle the list from a fetch result, keeping server order
    pub fn from_result<E: std::fmt::Display>(result: Result<Vec<Article>, E>) -> Self {
        match result {
            Ok(articles) if articles.is_empty() => ListState::Empty,
            Ok(articles) => ListState::Loaded(articles),
            Err(e) => ListState::Failed(e.to_string()),
        }
    }
}

/// Render an API timestamp as `dd/mm/yyyy hh:mm`
///
/// Accepts RFC 3339 and the plain `YYYY-MM-DD HH:MM:SS` form. Anything else
/// is shown verbatim.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%d/%m/%Y %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DISPLAY).to_string();
        }
    }
    raw.to_string()
}

/// Shorten article content for a list card, cutting on a char boundary
pub fn excerpt(content: &str, max_chars: usize) -> String {
    let trimmed = content.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

/// Banner flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient message shown above a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == BannerKind::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Author;

    fn article(author: &str) -> Article {
        Article {
            id: 1,
            title: "t".to_string(),
            content: "c".to_string(),
            image: None,
            author: Author::named(author),
            created_at: "2024-05-01T10:00:00Z".to_string(),
            updated_at: String::new(),
        }
    }

    fn user(name: &str) -> User {
        User {
            id: 7,
            name: name.to_string(),
            email: String::new(),
        }
    }

    #[test]
    fn test_is_author_exact_match() {
        assert!(is_author(Some(&user("A")), &article("A")));
        assert!(!is_author(Some(&user("a")), &article("A")));
        assert!(!is_author(Some(&user("B")), &article("A")));
    }

    #[test]
    fn test_is_author_anonymous() {
        assert!(!is_author(None, &article("A")));
    }

    #[test]
    fn test_parse_article_id() {
        assert_eq!(parse_article_id("42"), Some(42));
        assert_eq!(parse_article_id(" 7 "), Some(7));
        assert_eq!(parse_article_id("abc"), None);
        assert_eq!(parse_article_id("0"), None);
        assert_eq!(parse_article_id("-3"), None);
        assert_eq!(parse_article_id(""), None);
    }

    #[test]
    fn test_list_state_from_result() {
        let empty: Result<Vec<Article>, String> = Ok(vec![]);
        assert_eq!(ListState::from_result(empty), ListState::Empty);

        let loaded: Result<Vec<Article>, String> = Ok(vec![article("B"), article("A")]);
        match ListState::from_result(loaded) {
            ListState::Loaded(list) => {
                assert_eq!(list[0].author.name, "B");
                assert_eq!(list[1].author.name, "A");
            }
            other => panic!("unexpected state: {other:?}"),
        }

        let failed: Result<Vec<Article>, String> = Err("boom".to_string());
        assert_eq!(
            ListState::from_result(failed),
            ListState::Failed("boom".to_string())
        );
        assert_eq!(ListState::default(), ListState::Loading);
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-05-01T10:30:00Z"), "01/05/2024 10:30");
        assert_eq!(
            format_timestamp("2024-05-01T10:30:00.000+02:00"),
            "01/05/2024 10:30"
        );
        assert_eq!(format_timestamp("2024-12-24 18:05:09"), "24/12/2024 18:05");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("  short  ", 10), "short");
        assert_eq!(excerpt("hello world", 5), "hello...");
        assert_eq!(excerpt("héllo wörld", 7), "héllo w...");
    }

    #[test]
    fn test_banner() {
        assert!(Banner::error("x").is_error());
        assert!(!Banner::success("x").is_error());
    }
}
