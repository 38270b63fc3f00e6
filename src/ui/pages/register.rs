//! Register page component

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::ui::auth::{RegisterForm, use_auth_context};

/// Register page component
///
/// Navigates once registration succeeds: home when the API signed the user
/// in, otherwise the login page with a notice.
#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();
    let registered = RwSignal::new(false);

    Effect::new(move |_| {
        if registered.get() || auth.is_authenticated() {
            let target = if auth.is_authenticated() {
                "/"
            } else {
                "/login?registered=1"
            };
            navigate(target, Default::default());
        }
    });

    view! {
        <div class="flex justify-center py-12">
            <div class="w-full max-w-md card p-8">
                <RegisterForm on_success=Callback::new(move |_| registered.set(true)) />
            </div>
        </div>
    }
}
