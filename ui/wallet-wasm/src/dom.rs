//! DOM element bindings.
//!
//! All fields are resolved once at startup.
//! To add new UI elements, add a field here and bind it in `Elements::bind()`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

// ── Helpers ──

fn doc() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc()?.get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value().trim().to_string()
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

// ── Elements struct ──

/// All DOM element references used by the wallet page.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Connection
    pub connect_panel: Element,
    pub connect_btn: HtmlElement,
    pub account_panel: Element,
    pub account_text: Element,
    pub network_text: Element,
    pub disconnect_btn: HtmlElement,
    pub mainnet_btn: HtmlElement,
    pub sepolia_btn: HtmlElement,

    // Balance
    pub address_input: HtmlInputElement,
    pub balance_btn: HtmlElement,
    pub balance_text: Element,

    pub error_text: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_input {
    ($id:expr) => {
        by_id_typed::<HtmlInputElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing input #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

impl Elements {
    pub fn bind() -> Result<Self, JsValue> {
        Ok(Self {
            connect_panel: get_el!("connectPanel"),
            connect_btn: get_html!("connectBtn"),
            account_panel: get_el!("accountPanel"),
            account_text: get_el!("accountText"),
            network_text: get_el!("networkText"),
            disconnect_btn: get_html!("disconnectBtn"),
            mainnet_btn: get_html!("mainnetBtn"),
            sepolia_btn: get_html!("sepoliaBtn"),

            address_input: get_input!("addressInput"),
            balance_btn: get_html!("balanceBtn"),
            balance_text: get_el!("balanceText"),

            error_text: get_el!("errorText"),
        })
    }
}
