//! Common reusable UI components shared by the pages

pub mod form;
pub mod message;
pub mod modal;
pub mod spinner;

pub use form::{FormField, TextAreaField};
pub use message::{BannerMessage, ErrorMessage, SuccessMessage, show_banner};
pub use modal::{BaseModal, ConfirmDialog};
pub use spinner::{InlineSpinner, LoadingSpinner, Spinner, SpinnerSize};
