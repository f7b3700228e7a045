#![allow(non_snake_case)]

pub mod api;
pub mod app;
pub mod auth;
pub mod components;
pub mod pages;
#[cfg(feature = "hydrate")]
pub mod storage;

pub use app::{shell, App};

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
