//! Leptos UI: auth context, navigation, shared components and pages

pub mod auth;
pub mod common;
pub mod icon;
mod nav_bar;
pub mod pages;

pub use icon::{Icon, icons};
pub use nav_bar::NavBar;

use leptos::prelude::on_cleanup;

use crate::core::lifetime::Lifetime;

/// Lifetime tied to the current component
///
/// Requests run through it are dropped when the component is cleaned up.
pub fn use_lifetime() -> Lifetime {
    let lifetime = Lifetime::new();
    on_cleanup({
        let lifetime = lifetime.clone();
        move || lifetime.end()
    });
    lifetime
}
