//! User menu component
//!
//! Right-hand side of the navigation bar. Shows log in / sign up links when
//! anonymous, and the writer's actions when authenticated.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use super::context::{AuthState, use_auth_context};
use crate::ui::icon::{Icon, icons};

/// User menu component for the header
#[component]
pub fn UserMenu() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();

    let handle_logout = move |_| {
        auth.logout();
        navigate("/", Default::default());
    };

    view! {
        <div class="flex items-center gap-2">
            {move || {
                match auth.state.get() {
                    AuthState::Loading => {
                        view! {
                            <div class="w-8 h-8 rounded-full bg-theme-secondary animate-pulse"></div>
                        }.into_any()
                    }
                    AuthState::Unauthenticated => {
                        view! {
                            <A
                                href="/login"
                                attr:class="px-3 py-1.5 text-sm font-medium text-theme-secondary hover:text-theme-primary transition-colors"
                            >
                                "Log in"
                            </A>
                            <A
                                href="/register"
                                attr:class="px-3 py-1.5 text-sm font-medium text-white bg-accent-primary hover:bg-accent-primary-hover rounded-lg transition-colors"
                            >
                                "Sign up"
                            </A>
                        }.into_any()
                    }
                    AuthState::Authenticated(user) => {
                        let handle_logout = handle_logout.clone();
                        view! {
                            <A
                                href="/create-article"
                                attr:class="px-3 py-1.5 text-sm font-medium text-white bg-accent-primary hover:bg-accent-primary-hover rounded-lg transition-colors flex items-center gap-1"
                            >
                                <Icon name=icons::PLUS class="h-4 w-4" />
                                "New article"
                            </A>
                            <Avatar name=user.name.clone() size=32 />
                            <span class="hidden sm:block text-sm font-medium text-theme-primary max-w-[120px] truncate">
                                {user.name.clone()}
                            </span>
                            <button
                                class="px-3 py-1.5 text-sm text-red-500 hover:bg-red-50 rounded-lg transition-colors flex items-center gap-1"
                                on:click=handle_logout
                            >
                                <Icon name=icons::LOGOUT class="h-4 w-4" />
                                "Log out"
                            </button>
                        }.into_any()
                    }
                }
            }}
        </div>
    }
}

/// Circle with the first letter of a display name
#[component]
pub fn Avatar(
    name: String,
    /// Avatar size in pixels
    #[prop(default = 32)]
    size: u32,
) -> impl IntoView {
    let initial = name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());

    let size_style = format!(
        "width: {}px; height: {}px; min-width: {}px; min-height: {}px;",
        size, size, size, size
    );
    let font_size = if size >= 40 { "text-lg" } else { "text-sm" };

    // Same name, same colour
    let hash = name
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_add(b as u32));
    let colors = [
        "bg-blue-500",
        "bg-green-500",
        "bg-yellow-500",
        "bg-red-500",
        "bg-purple-500",
        "bg-pink-500",
        "bg-indigo-500",
        "bg-teal-500",
    ];
    let color = colors[(hash as usize) % colors.len()];

    view! {
        <div
            class=format!("{} rounded-full flex items-center justify-center text-white font-medium {}", color, font_size)
            style=size_style
            title=name
        >
            {initial}
        </div>
    }
}
