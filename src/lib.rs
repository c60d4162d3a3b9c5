//! # flashcards-client
//!
//! Leptos + WASM single-page client for the flashcards application.
//!
//! The crate is organised around the session core: `state::session` owns who
//! is logged in, `net::gateway` is the only path to the remote API, and
//! `state::persistence` mirrors the session into browser storage. Pages and
//! components sit on top and only talk to the core through the context
//! provided by [`app::App`].

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs logging and mounts the root component.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
