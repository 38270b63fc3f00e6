//! Reset password page, reached from the emailed link

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::core::validation::{self, Field};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{ErrorMessage, FormField, InlineSpinner};
use crate::ui::use_lifetime;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let auth = use_auth_context();
    let lifetime = use_lifetime();
    let params = use_params_map();
    let navigate = use_navigate();

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let password_error = RwSignal::new(None::<String>);
    let confirm_error = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let done = RwSignal::new(false);

    Effect::new(move |_| {
        if done.get() {
            navigate("/login?reset=1", Default::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let new_password = password.get_untracked();
        let result = validation::validate_password_reset(&new_password, &confirm.get_untracked());
        password_error.set(result.message_for(Field::Password));
        confirm_error.set(result.message_for(Field::ConfirmPassword));
        if !result.is_valid() {
            return;
        }

        let token = params.read_untracked().get("token").unwrap_or_default();
        busy.set(true);
        let client = auth.client();
        let lifetime = lifetime.clone();
        spawn_local(async move {
            let Some(result) = lifetime
                .run(client.reset_password(&token, &new_password))
                .await
            else {
                return;
            };
            busy.set(false);
            match result {
                Ok(()) => done.set(true),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="flex justify-center py-12">
            <form on:submit=on_submit class="w-full max-w-md card p-8 space-y-5" novalidate=true>
                <div class="text-center">
                    <h2 class="text-2xl font-bold text-theme-primary">"Choose a new password"</h2>
                    <p class="mt-2 text-sm text-theme-secondary">
                        {format!("At least {} characters", validation::MIN_PASSWORD_LENGTH)}
                    </p>
                </div>

                <ErrorMessage error=error />

                <FormField
                    id="password"
                    label="New password"
                    input_type="password"
                    autocomplete="new-password"
                    value=password
                    disabled=busy
                    error=password_error
                />
                <FormField
                    id="confirm-password"
                    label="Confirm password"
                    input_type="password"
                    autocomplete="new-password"
                    value=confirm
                    disabled=busy
                    error=confirm_error
                />

                <button type="submit" class="btn-primary w-full flex items-center justify-center gap-2" disabled=move || busy.get()>
                    <Show when=move || busy.get()>
                        <InlineSpinner />
                    </Show>
                    {move || if busy.get() { "Saving..." } else { "Update password" }}
                </button>

                <div class="text-center text-sm">
                    <A href="/forgot-password" attr:class="text-accent-primary hover:text-accent-primary-hover">
                        "Request a new link"
                    </A>
                </div>
            </form>
        </div>
    }
}
