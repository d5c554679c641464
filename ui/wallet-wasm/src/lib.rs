//! WalletLink browser front-end.
//!
//! Detects the injected wallet, mounts a `WalletShell` over it, and keeps the
//! page in step with the session. Each concern lives in its own module.

pub mod dom;
pub mod events;
pub mod provider;
pub mod render;
pub mod state;

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wl_wallet_core::WalletShell;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    let provider = provider::InjectedProvider::detect().map(Rc::new);
    if provider.is_none() {
        gloo_console::warn!("window.ethereum not found");
    }

    let shell = Rc::new(WalletShell::mount(provider).await);
    let render_subscription = events::subscribe_render(&els, &shell);
    state::install(Rc::clone(&shell), render_subscription);

    events::bind_events(&els)?;
    render::render(&els, &shell.view());

    Ok(())
}
