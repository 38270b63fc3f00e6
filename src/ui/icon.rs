use leptos::prelude::*;

/// SVG icon served from `/icons/<name>.svg`
#[component]
pub fn Icon(
    /// Icon name without the .svg extension
    name: &'static str,
    /// CSS classes
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=name
            draggable=false
        />
    }
}

/// Icon names used across the app
pub mod icons {
    pub const ALERT_CIRCLE: &str = "alert-circle";
    pub const ARROW_LEFT: &str = "arrow-left";
    pub const CALENDAR: &str = "calendar";
    pub const CHECK: &str = "check";
    pub const DOCUMENT_TEXT: &str = "document-text";
    pub const EDIT: &str = "edit";
    pub const EYE: &str = "eye";
    pub const EYE_CLOSED: &str = "eye-closed";
    pub const IMAGE: &str = "image";
    pub const LOADER: &str = "loader";
    pub const LOGOUT: &str = "logout";
    pub const MAIL: &str = "mail";
    pub const PLUS: &str = "plus";
    pub const TRASH: &str = "trash";
    pub const X: &str = "x";
}
