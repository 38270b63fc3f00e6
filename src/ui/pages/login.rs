//! Login page
//!
//! Shows the notice left by the register and reset flows, and leaves for the
//! home page once the session is authenticated.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::ui::auth::{LoginForm, use_auth_context};
use crate::ui::common::SuccessMessage;

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();
    let query = use_query_map();
    let navigate = use_navigate();

    // Also covers a successful login, which flips the session state
    Effect::new(move |_| {
        if auth.is_authenticated() {
            navigate("/", Default::default());
        }
    });

    let notice = Signal::derive(move || {
        let query = query.read();
        if query.get("registered").is_some() {
            Some("Account created. You can log in now.".to_string())
        } else if query.get("reset").is_some() {
            Some("Password updated. Log in with your new password.".to_string())
        } else {
            None
        }
    });

    view! {
        <div class="flex justify-center py-12">
            <div class="w-full max-w-md card p-8 space-y-4">
                <SuccessMessage message=notice />
                <LoginForm />
            </div>
        </div>
    }
}
