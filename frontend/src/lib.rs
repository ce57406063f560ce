//! WebAssembly entry point for the dashboard frontend.
//!
//! Hydrates the server-rendered HTML so the grid, dialogs, and loading
//! indicator become interactive, and installs client-side logging.

#[wasm_bindgen::prelude::wasm_bindgen]
/// Hydrates the application on the client side.
pub fn hydrate() {
    // Route panics and log records to the browser console.
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    leptos::mount::hydrate_body(app::component);
}
