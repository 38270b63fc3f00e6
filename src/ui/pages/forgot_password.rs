use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::validation::{self, Field};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{ErrorMessage, FormField, InlineSpinner, SuccessMessage};
use crate::ui::icon::{Icon, icons};
use crate::ui::use_lifetime;

const SENT_NOTICE: &str = "If an account exists for that email, a reset link is on its way.";

/// Request a password reset link
#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let auth = use_auth_context();
    let lifetime = use_lifetime();

    let email = RwSignal::new(String::new());
    let email_error = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let sent = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        error.set(None);
        sent.set(None);

        let value = email.get_untracked();
        let result = validation::validate_forgot_password(&value);
        email_error.set(result.message_for(Field::Email));
        if !result.is_valid() {
            return;
        }

        busy.set(true);
        let client = auth.client();
        let lifetime = lifetime.clone();
        spawn_local(async move {
            let Some(result) = lifetime.run(client.forgot_password(&value)).await else {
                return;
            };
            busy.set(false);
            match result {
                Ok(()) => {
                    email.set(String::new());
                    sent.set(Some(SENT_NOTICE.to_string()));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="flex justify-center py-12">
            <form on:submit=on_submit class="w-full max-w-md card p-8 space-y-5" novalidate=true>
                <div class="text-center">
                    <div class="w-12 h-12 mx-auto mb-3 bg-theme-secondary rounded-full flex items-center justify-center">
                        <Icon name=icons::MAIL class="w-6 h-6" />
                    </div>
                    <h2 class="text-2xl font-bold text-theme-primary">"Forgot your password?"</h2>
                    <p class="mt-2 text-sm text-theme-secondary">"We will email you a link to choose a new one"</p>
                </div>

                <ErrorMessage error=error />
                <SuccessMessage message=sent />

                <FormField
                    id="email"
                    label="Email"
                    input_type="email"
                    autocomplete="email"
                    placeholder="you@example.com"
                    value=email
                    disabled=busy
                    error=email_error
                />

                <button type="submit" class="btn-primary w-full flex items-center justify-center gap-2" disabled=move || busy.get()>
                    <Show when=move || busy.get()>
                        <InlineSpinner />
                    </Show>
                    {move || if busy.get() { "Sending..." } else { "Send reset link" }}
                </button>

                <div class="text-center text-sm">
                    <A href="/login" attr:class="text-accent-primary hover:text-accent-primary-hover">
                        "Back to log in"
                    </A>
                </div>
            </form>
        </div>
    }
}
