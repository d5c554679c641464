//! Event binding.
//!
//! Wires page controls to the wallet shell and re-renders after each action.
//! Async handlers are spawned via `wasm_bindgen_futures::spawn_local`.

use crate::dom::{self, Elements};
use crate::render;
use crate::state::{self, Shell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wl_provider::{ProviderEvent, ProviderEventKind, Subscription, WalletProvider};

/// Helper: attach an async click handler that runs an action on the shell
/// and re-renders when it settles.
macro_rules! on_click_async {
    ($el:expr, $els:expr, |$shell:ident| $action:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Some($shell) = state::shell() {
                    $action.await;
                    render::render(&els, &$shell.view());
                }
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all page event listeners. Call once after the shell is installed.
pub fn bind_events(els: &Elements) -> Result<(), JsValue> {
    on_click_async!(els.connect_btn, els, |shell| shell.connect());
    on_click_async!(els.mainnet_btn, els, |shell| shell.switch_network("mainnet"));
    on_click_async!(els.sepolia_btn, els, |shell| shell.switch_network("sepolia"));
    on_click_async!(els.balance_btn, els, |shell| shell.fetch_balance());

    {
        let els2 = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            if let Some(shell) = state::shell() {
                shell.disconnect();
                render::render(&els2, &shell.view());
            }
        }) as Box<dyn FnMut(_)>);
        els.disconnect_btn
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    {
        let input = els.address_input.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if let Some(shell) = state::shell() {
                shell.set_address_input(&dom::get_input_value(&input));
            }
        }) as Box<dyn FnMut(_)>);
        els.address_input
            .add_event_listener_with_callback("input", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    Ok(())
}

/// Re-render whenever the wallet reports an account or chain change.
///
/// Registered after the shell mounted, so the synchronizer has already
/// applied the change when the render listener runs.
pub fn subscribe_render(els: &Elements, shell: &Shell) -> Option<Subscription> {
    let provider: Rc<dyn WalletProvider> = shell.sync().provider()?;
    let mut subscription = Subscription::new(provider);

    let els = els.clone();
    let listener: wl_provider::Listener = Rc::new(move |_: &ProviderEvent| {
        if let Some(shell) = state::shell() {
            render::render(&els, &shell.view());
        }
    });
    subscription.listen(ProviderEventKind::AccountsChanged, listener.clone());
    subscription.listen(ProviderEventKind::ChainChanged, listener);
    Some(subscription)
}
