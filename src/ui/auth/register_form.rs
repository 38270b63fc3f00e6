//! Register form component

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::models::User;
use crate::core::validation::{self, Field};
use crate::ui::icon::{Icon, icons};

/// Register form component
#[component]
pub fn RegisterForm(
    /// Callback with the created user once the account exists
    #[prop(optional, into)]
    on_success: Option<Callback<User>>,
) -> impl IntoView {
    let auth = use_auth_context();
    // Errors from the other auth form must not carry over
    auth.clear_error();

    // Form state
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());

    // Field errors
    let name_error = RwSignal::new(None::<String>);
    let email_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);
    let confirm_error = RwSignal::new(None::<String>);

    let validate = move || {
        let result = validation::validate_registration(
            &name.get(),
            &email.get(),
            &password.get(),
            &confirm_password.get(),
        );
        name_error.set(result.message_for(Field::Name));
        email_error.set(result.message_for(Field::Email));
        password_error.set(result.message_for(Field::Password));
        confirm_error.set(result.message_for(Field::ConfirmPassword));
        result.is_valid()
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();

        if !validate() {
            return;
        }

        let name_val = name.get();
        let email_val = email.get();
        let password_val = password.get();

        spawn_local(async move {
            if let Ok(user) = auth.register(name_val, email_val, password_val).await {
                if let Some(callback) = on_success {
                    callback.run(user);
                }
            }
        });
    };

    // One input row; errors clear as soon as the user types
    let field = move |id: &'static str,
                      label: &'static str,
                      input_type: &'static str,
                      autocomplete: &'static str,
                      value: RwSignal<String>,
                      error: RwSignal<Option<String>>| {
        view! {
            <div>
                <label for=id class="block text-sm font-medium text-theme-primary mb-1">{label}</label>
                <input
                    type=input_type
                    id=id
                    name=id
                    autocomplete=autocomplete
                    class="input-base"
                    class:border-red-500=move || error.get().is_some()
                    prop:value=move || value.get()
                    on:input=move |ev| {
                        value.set(event_target_value(&ev));
                        error.set(None);
                    }
                />
                {move || error.get().map(|e| view! { <p class="mt-1 text-sm text-red-500">{e}</p> })}
            </div>
        }
    };

    view! {
        <form on:submit=on_submit class="space-y-5" novalidate=true>
            <div class="text-center">
                <h2 class="text-2xl font-bold text-theme-primary">"Create an account"</h2>
                <p class="mt-2 text-sm text-theme-secondary">"Start publishing in a minute"</p>
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

            {field("name", "Name", "text", "name", name, name_error)}
            {field("email", "Email", "email", "email", email, email_error)}
            {field("password", "Password", "password", "new-password", password, password_error)}
            {field(
                "confirm-password",
                "Confirm password",
                "password",
                "new-password",
                confirm_password,
                confirm_error,
            )}

            <button type="submit" class="btn-primary w-full" disabled=move || auth.loading.get()>
                {move || {
                    if auth.loading.get() {
                        view! {
                            <span class="flex items-center justify-center">
                                <Icon name=icons::LOADER class="animate-spin -ml-1 mr-2 h-4 w-4" />
                                "Creating account..."
                            </span>
                        }.into_any()
                    } else {
                        view! { <span class="block">"Sign up"</span> }.into_any()
                    }
                }}
            </button>

            <div class="text-center text-sm text-theme-secondary">
                "Already registered? "
                <A href="/login" attr:class="text-accent-primary hover:text-accent-primary-hover font-medium">
                    "Log in"
                </A>
            </div>
        </form>
    }
}
