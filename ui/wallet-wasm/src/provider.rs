//! Injected wallet provider.
//!
//! Wraps the EIP-1193 object a browser wallet places at `window.ethereum`.
//! One JS callback per event name is attached while at least one Rust
//! listener wants that event, and detached again when the last one leaves.

use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wl_provider::{
    Listener, ListenerId, ListenerSet, ProviderEvent, ProviderEventKind, ProviderRpcError,
    RpcRequest, WalletProvider,
};

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    pub type Ethereum;

    #[wasm_bindgen(method, catch, js_name = request)]
    fn send(this: &Ethereum, args: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &Ethereum, event: &str, handler: &Function);

    #[wasm_bindgen(method, js_name = removeListener)]
    fn remove_listener(this: &Ethereum, event: &str, handler: &Function);
}

pub struct InjectedProvider {
    ethereum: Ethereum,
    listeners: Rc<ListenerSet>,
    bridges: RefCell<HashMap<ProviderEventKind, Closure<dyn FnMut(JsValue)>>>,
}

impl InjectedProvider {
    /// Probes `window.ethereum`. `None` when no wallet is installed.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let value = Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }

        Some(Self {
            ethereum: value.unchecked_into(),
            listeners: Rc::new(ListenerSet::new()),
            bridges: RefCell::new(HashMap::new()),
        })
    }

    fn attach_bridge(&self, kind: ProviderEventKind) {
        if self.bridges.borrow().contains_key(&kind) {
            return;
        }

        let listeners = Rc::clone(&self.listeners);
        let closure = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
            match decode_event(kind, payload) {
                Some(event) => listeners.emit(&event),
                None => gloo_console::warn!(format!(
                    "ignoring malformed {} payload",
                    kind.event_name()
                )),
            }
        });
        self.ethereum
            .on(kind.event_name(), closure.as_ref().unchecked_ref());
        self.bridges.borrow_mut().insert(kind, closure);
    }

    fn detach_bridge(&self, kind: ProviderEventKind) {
        if self.listeners.count(kind) > 0 {
            return;
        }
        if let Some(closure) = self.bridges.borrow_mut().remove(&kind) {
            self.ethereum
                .remove_listener(kind.event_name(), closure.as_ref().unchecked_ref());
        }
    }
}

impl Drop for InjectedProvider {
    fn drop(&mut self) {
        for (kind, closure) in self.bridges.get_mut().drain() {
            self.ethereum
                .remove_listener(kind.event_name(), closure.as_ref().unchecked_ref());
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedProvider {
    async fn request(&self, req: RpcRequest) -> Result<Value, ProviderRpcError> {
        let args = req
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| ProviderRpcError::internal(format!("encode {}: {err}", req.method)))?;

        let promise = self.ethereum.send(&args).map_err(decode_error)?;
        let result = JsFuture::from(promise).await.map_err(decode_error)?;
        if result.is_undefined() {
            return Ok(Value::Null);
        }

        serde_wasm_bindgen::from_value(result)
            .map_err(|err| ProviderRpcError::internal(format!("decode {}: {err}", req.method)))
    }

    fn add_listener(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId {
        let id = self.listeners.add(kind, listener);
        self.attach_bridge(kind);
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let Some(kind) = self.listeners.kind_of(id) else {
            return false;
        };
        self.listeners.remove(id);
        self.detach_bridge(kind);
        true
    }
}

fn decode_event(kind: ProviderEventKind, payload: JsValue) -> Option<ProviderEvent> {
    match kind {
        ProviderEventKind::AccountsChanged => serde_wasm_bindgen::from_value::<Vec<String>>(payload)
            .ok()
            .map(ProviderEvent::AccountsChanged),
        ProviderEventKind::ChainChanged => payload.as_string().map(ProviderEvent::ChainChanged),
    }
}

/// Reads `{ code, message }` off a rejected request.
fn decode_error(err: JsValue) -> ProviderRpcError {
    let field = |name: &str| Reflect::get(&err, &JsValue::from_str(name)).ok();
    let code = field("code").and_then(|v| v.as_f64()).map(|c| c as i64);
    let message = field("message")
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{err:?}"));

    match code {
        Some(code) => ProviderRpcError::new(code, message),
        None => ProviderRpcError::internal(message),
    }
}
