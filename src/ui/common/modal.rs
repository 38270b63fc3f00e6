use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

#[cfg(not(feature = "ssr"))]
use leptos::wasm_bindgen::JsCast;

/// Modal shell: backdrop, header with close button, content
#[component]
pub fn BaseModal(
    title: String,
    is_open: Signal<bool>,
    on_close: Callback<()>,
    children: Children,
    /// Maximum width class
    #[prop(default = "max-w-md")]
    max_width: &'static str,
) -> impl IntoView {
    // Close on Escape key
    #[cfg(not(feature = "ssr"))]
    {
        use leptos::ev::keydown;

        let handle_keydown = window_event_listener(keydown, move |ev| {
            if ev.key() == "Escape" && is_open.with_untracked(|v| *v) {
                on_close.run(());
            }
        });

        on_cleanup(move || drop(handle_keydown));
    }

    view! {
        <div
            class="fixed inset-0 z-50 flex items-center justify-center backdrop-theme transition-all duration-300"
            class=("opacity-0", move || !is_open.get())
            class=("pointer-events-none", move || !is_open.get())
            role="dialog"
            aria-modal="true"
            on:click=move |e| {
                // Only clicks on the backdrop itself close the modal
                #[cfg(not(feature = "ssr"))]
                {
                    let on_backdrop = e
                        .target()
                        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                        .is_some_and(|el| el.class_list().contains("backdrop-theme"));
                    if on_backdrop {
                        on_close.run(());
                    }
                }
                #[cfg(feature = "ssr")]
                {
                    let _ = e;
                }
            }
        >
            <div class=format!("w-full {} card", max_width)>
                <div class="card-header">
                    <h3 class="title-lg">{title}</h3>
                    <button
                        class="btn-icon"
                        on:click=move |_| on_close.run(())
                        title="Close"
                        aria-label="Close modal"
                    >
                        <Icon name=icons::X class="icon-standalone"/>
                    </button>
                </div>
                <div class="p-6">
                    {children()}
                </div>
            </div>
        </div>
    }
}

/// Confirmation dialog
///
/// Confirming does not close the dialog; the owner closes it once the
/// confirmed action settles.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    is_open: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(default = "Confirm".to_string())]
    confirm_text: String,
    #[prop(default = "Cancel".to_string())]
    cancel_text: String,
    /// Uses the danger button style
    #[prop(default = false)]
    is_destructive: bool,
    /// Disables both buttons while the action runs
    #[prop(optional, into)]
    busy: Signal<bool>,
) -> impl IntoView {
    view! {
        <BaseModal
            title=title
            is_open=is_open
            on_close=Callback::new(move |_| {
                if !busy.get_untracked() {
                    on_cancel.run(());
                }
            })
        >
            <div class="space-y-4">
                <p class="text-theme-secondary">{message}</p>

                <div class="flex items-center justify-end gap-2 divider-top pt-4">
                    <button
                        class="btn-secondary"
                        disabled=move || busy.get()
                        on:click=move |_| on_cancel.run(())
                    >
                        {cancel_text}
                    </button>
                    <button
                        class=if is_destructive { "btn-danger" } else { "btn-primary" }
                        disabled=move || busy.get()
                        on:click=move |_| on_confirm.run(())
                    >
                        {move || if busy.get() { "Working...".to_string() } else { confirm_text.clone() }}
                    </button>
                </div>
            </div>
        </BaseModal>
    }
}
