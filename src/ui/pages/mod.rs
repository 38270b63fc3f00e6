//! Application pages, one per route

mod article_detail;
mod article_form;
mod create_article;
mod edit_article;
mod forgot_password;
mod home;
mod login;
mod not_found;
mod register;
mod reset_password;

pub use article_detail::ArticleDetailPage;
pub use article_form::{ArticleForm, ArticleFormMode};
pub use create_article::CreateArticlePage;
pub use edit_article::EditArticlePage;
pub use forgot_password::ForgotPasswordPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;
pub use reset_password::ResetPasswordPage;
