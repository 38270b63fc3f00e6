use leptos::prelude::*;
use leptos_router::components::A;

use crate::ui::auth::UserMenu;
use crate::ui::icon::{Icon, icons};

/// Top navigation bar
#[component]
pub fn NavBar() -> impl IntoView {
    view! {
        <header class="border-b border-theme bg-theme-primary">
            <nav class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex items-center justify-between h-16">
                    <div class="flex items-center gap-6">
                        <A href="/" attr:class="flex items-center gap-2 hover:opacity-80 transition-opacity">
                            <div class="w-8 h-8 bg-accent-primary rounded-lg flex items-center justify-center">
                                <Icon name=icons::DOCUMENT_TEXT class="w-5 h-5" />
                            </div>
                            <span class="text-xl font-bold text-theme-primary">"Inkpost"</span>
                        </A>
                        <A href="/" attr:class="text-sm font-medium text-theme-secondary hover:text-theme-primary">
                            "Home"
                        </A>
                    </div>
                    <UserMenu />
                </div>
            </nav>
        </header>
    }
}
