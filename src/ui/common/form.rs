use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

/// Labelled input with an optional field error
#[component]
pub fn FormField(
    /// Element id, also used for the label
    id: &'static str,
    label: &'static str,
    /// Whether field is required (shows red asterisk)
    #[prop(default = false)]
    required: bool,
    /// Input type (text, password, email, etc.)
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(default = "")]
    placeholder: &'static str,
    #[prop(default = "off")]
    autocomplete: &'static str,
    value: RwSignal<String>,
    /// Disables the input while true
    #[prop(optional, into)]
    disabled: Signal<bool>,
    /// Field error; cleared on input
    #[prop(optional)]
    error: Option<RwSignal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="space-y-1.5">
            <label for=id class="label">
                {label}
                {required.then(|| view! { <span class="text-red-500 ml-0.5">"*"</span> })}
            </label>
            <input
                id=id
                name=id
                type=input_type
                class="input-base"
                class:border-red-500=move || error.is_some_and(|e| e.get().is_some())
                placeholder=placeholder
                autocomplete=autocomplete
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    if let Some(e) = error {
                        e.set(None);
                    }
                }
                disabled=move || disabled.get()
            />
            <FieldError error=error />
        </div>
    }
}

/// Labelled text area with an optional field error
#[component]
pub fn TextAreaField(
    id: &'static str,
    label: &'static str,
    #[prop(default = false)]
    required: bool,
    #[prop(default = "")]
    placeholder: &'static str,
    value: RwSignal<String>,
    #[prop(default = 10)]
    rows: u32,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    #[prop(optional)]
    error: Option<RwSignal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="space-y-1.5">
            <label for=id class="label">
                {label}
                {required.then(|| view! { <span class="text-red-500 ml-0.5">"*"</span> })}
            </label>
            <textarea
                id=id
                name=id
                class="input-base resize-y"
                class:border-red-500=move || error.is_some_and(|e| e.get().is_some())
                placeholder=placeholder
                rows=rows
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    if let Some(e) = error {
                        e.set(None);
                    }
                }
                disabled=move || disabled.get()
            />
            <FieldError error=error />
        </div>
    }
}

#[component]
fn FieldError(error: Option<RwSignal<Option<String>>>) -> impl IntoView {
    move || {
        error.and_then(|e| e.get()).map(|err| view! {
            <div class="flex items-center text-sm text-theme-error">
                <Icon name=icons::ALERT_CIRCLE class="icon-text"/>
                <span>{err}</span>
            </div>
        })
    }
}
