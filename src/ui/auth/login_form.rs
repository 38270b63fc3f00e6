//! Login form component
//!
//! Email and password with field-level validation. Server errors come back
//! through the auth context and are shown above the fields.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::validation::{self, Field};
use crate::ui::icon::{Icon, icons};

/// Login form component
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();
    // Errors from the other auth form must not carry over
    auth.clear_error();

    // Form state
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);

    // Field errors
    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);

    let validate = move || {
        let result = validation::validate_login(&email.get(), &password.get());
        email_error.set(result.message_for(Field::Email));
        password_error.set(result.message_for(Field::Password));
        result.is_valid()
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();

        if !validate() {
            return;
        }

        let email_val = email.get();
        let password_val = password.get();

        spawn_local(async move {
            // Failures land in auth.error
            if auth.login(email_val, password_val).await.is_ok() {
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-6" novalidate=true>
            <div class="text-center">
                <h2 class="text-2xl font-bold text-theme-primary">"Welcome back"</h2>
                <p class="mt-2 text-sm text-theme-secondary">"Log in to write and manage your articles"</p>
            </div>

            {move || {
                auth.error.get().map(|error| {
                    view! {
                        <div class="p-3 bg-red-100 border border-red-300 rounded-lg">
                            <p class="text-sm text-red-700">{error}</p>
                        </div>
                    }
                })
            }}

            <div>
                <label for="email" class="block text-sm font-medium text-theme-primary mb-1">"Email"</label>
                <input
                    type="email"
                    id="email"
                    name="email"
                    autocomplete="email"
                    placeholder="you@example.com"
                    class="input-base"
                    class:border-red-500=move || email_error.get().is_some()
                    prop:value=move || email.get()
                    on:input=move |ev| {
                        email.set(event_target_value(&ev));
                        email_error.set(None);
                    }
                />
                {move || email_error.get().map(|error| view! { <p class="mt-1 text-sm text-red-500">{error}</p> })}
            </div>

            <div>
                <label for="password" class="block text-sm font-medium text-theme-primary mb-1">"Password"</label>
                <div class="relative">
                    <input
                        type=move || if show_password.get() { "text" } else { "password" }
                        id="password"
                        name="password"
                        autocomplete="current-password"
                        placeholder="Your password"
                        class="input-base pr-10"
                        class:border-red-500=move || password_error.get().is_some()
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            password.set(event_target_value(&ev));
                            password_error.set(None);
                        }
                    />
                    <button
                        type="button"
                        class="absolute inset-y-0 right-0 pr-3 flex items-center text-theme-tertiary"
                        on:click=move |_| show_password.update(|v| *v = !*v)
                    >
                        {move || {
                            let name = if show_password.get() { icons::EYE_CLOSED } else { icons::EYE };
                            view! { <Icon name=name class="h-5 w-5" /> }
                        }}
                    </button>
                </div>
                {move || password_error.get().map(|error| view! { <p class="mt-1 text-sm text-red-500">{error}</p> })}
            </div>

            <div class="text-right text-sm">
                <A href="/forgot-password" attr:class="text-accent-primary hover:text-accent-primary-hover">
                    "Forgot your password?"
                </A>
            </div>

            <button type="submit" class="btn-primary w-full" disabled=move || auth.loading.get()>
                {move || {
                    if auth.loading.get() {
                        view! {
                            <span class="flex items-center justify-center">
                                <Icon name=icons::LOADER class="animate-spin -ml-1 mr-2 h-4 w-4" />
                                "Logging in..."
                            </span>
                        }.into_any()
                    } else {
                        view! { <span class="block">"Log in"</span> }.into_any()
                    }
                }}
            </button>

            <div class="text-center text-sm text-theme-secondary">
                "No account yet? "
                <A href="/register" attr:class="text-accent-primary hover:text-accent-primary-hover font-medium">
                    "Sign up"
                </A>
            </div>
        </form>
    }
}
