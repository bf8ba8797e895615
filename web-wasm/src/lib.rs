//! Potato Leaf Web App (Leptos + WASM)

mod api;
mod app;
mod components;
pub mod config;
pub mod preview;

use wasm_bindgen::prelude::*;
use leptos::prelude::*;
use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let form_config = config::form_config_from_document();
    gloo::console::log!(format!("predict endpoint: {}", form_config.predict_url()));

    leptos::mount::mount_to_body(move || view! { <App config=form_config /> });
}
