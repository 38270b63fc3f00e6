use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::article_form::{ArticleForm, ArticleFormMode};
use crate::ui::auth::use_auth_context;
use crate::ui::common::LoadingSpinner;

/// New article page; anonymous visitors are sent to the login page
#[component]
pub fn CreateArticlePage() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if auth.is_resolved() && !auth.is_authenticated() {
            navigate("/login", Default::default());
        }
    });

    view! {
        <section class="max-w-3xl mx-auto space-y-6">
            <div>
                <h1 class="text-3xl font-bold text-theme-primary">"New article"</h1>
                <p class="mt-1 text-theme-secondary">"Share something with your readers"</p>
            </div>
            <Show
                when=move || auth.is_authenticated()
                fallback=|| view! { <LoadingSpinner message="Checking your session...".to_string() /> }
            >
                <div class="card p-6">
                    <ArticleForm mode=ArticleFormMode::Create />
                </div>
            </Show>
        </section>
    }
}
