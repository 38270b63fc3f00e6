//! Fallback page for unknown routes

use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::icon::{Icon, icons};

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-24 text-center">
            <div class="w-20 h-20 mb-6 bg-theme-secondary rounded-full flex items-center justify-center">
                <Icon name=icons::DOCUMENT_TEXT class="w-10 h-10 text-theme-tertiary" />
            </div>
            <h1 class="text-5xl font-bold text-theme-primary mb-3">"404"</h1>
            <p class="text-theme-secondary mb-8 max-w-md">
                "This page does not exist. The article may have been removed."
            </p>
            <A
                href="/"
                attr:class="px-6 py-3 bg-accent-primary hover:bg-accent-primary-hover text-white font-medium rounded-lg transition-colors"
            >
                "Back to articles"
            </A>
        </div>
    }
}
