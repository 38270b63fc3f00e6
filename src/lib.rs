//! Inkpost - blog client
//!
//! Leptos front end for a remote blog API: accounts, password recovery and
//! article publishing. `core` holds the session store, the HTTP client and
//! the blog service; `ui` holds the components and pages.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
