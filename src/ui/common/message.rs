//! Inline message and banner components

use leptos::prelude::*;

use crate::core::articles::{Banner, BannerKind};
use crate::ui::icon::{Icon, icons};

/// Error message component
/// Shows the message while the signal holds Some
#[component]
pub fn ErrorMessage(
    #[prop(into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div class="error-message" role="alert">
                <Icon name=icons::ALERT_CIRCLE class="icon-text"/>
                <span>{move || error.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// Success message component
#[component]
pub fn SuccessMessage(
    #[prop(into)]
    message: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || message.get().is_some()>
            <div class="success-message" role="status">
                <Icon name=icons::CHECK class="icon-text"/>
                <span>{move || message.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// Transient banner above a form
///
/// The owner decides when to clear the signal; this only renders it.
#[component]
pub fn BannerMessage(
    #[prop(into)]
    banner: Signal<Option<Banner>>,
    /// Called when the user dismisses the banner
    on_dismiss: Callback<()>,
) -> impl IntoView {
    move || {
        banner.get().map(|b| {
            let (class, icon) = match b.kind {
                BannerKind::Success => ("success-message banner", icons::CHECK),
                BannerKind::Error => ("error-message banner", icons::ALERT_CIRCLE),
            };
            view! {
                <div class=class role="status">
                    <Icon name=icon class="icon-text"/>
                    <span class="flex-1">{b.text}</span>
                    <button
                        type="button"
                        class="btn-icon"
                        aria-label="Dismiss"
                        on:click=move |_| on_dismiss.run(())
                    >
                        <Icon name=icons::X class="h-4 w-4"/>
                    </button>
                </div>
            }
        })
    }
}

/// Show `banner` and clear it after a few seconds
///
/// A newer banner is left alone. The timer runs inside `lifetime`, so
/// nothing fires after the page is gone.
pub fn show_banner(
    signal: RwSignal<Option<Banner>>,
    lifetime: &crate::core::lifetime::Lifetime,
    banner: Banner,
) {
    signal.set(Some(banner.clone()));

    #[cfg(not(feature = "ssr"))]
    {
        use crate::core::articles::BANNER_TIMEOUT_MS;

        let lifetime = lifetime.clone();
        leptos::task::spawn_local(async move {
            let elapsed = lifetime
                .run(gloo_timers::future::TimeoutFuture::new(BANNER_TIMEOUT_MS))
                .await;
            if elapsed.is_some() {
                signal.update(|current| {
                    if current.as_ref() == Some(&banner) {
                        *current = None;
                    }
                });
            }
        });
    }
    #[cfg(feature = "ssr")]
    {
        let _ = lifetime;
    }
}
