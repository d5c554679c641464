//! Renders a `ShellView` into the page.

use crate::dom::{self, Elements};
use wl_wallet_core::ShellView;

pub fn render(els: &Elements, view: &ShellView) {
    dom::toggle_class(&els.connect_panel, "hidden", view.connected);
    dom::toggle_class(&els.account_panel, "hidden", !view.connected);

    dom::set_text(&els.account_text, view.account.as_deref().unwrap_or(""));
    let chain = view.chain_id.as_deref().unwrap_or("-");
    dom::set_text(
        &els.network_text,
        &format!("{} (Chain ID: {chain})", view.network_label),
    );

    match view.balance_line.as_deref() {
        Some(line) => {
            dom::set_text(&els.balance_text, line);
            dom::remove_class(&els.balance_text, "hidden");
        }
        None => dom::add_class(&els.balance_text, "hidden"),
    }

    match view.error.as_deref() {
        Some(message) => {
            dom::set_text(&els.error_text, message);
            dom::remove_class(&els.error_text, "hidden");
        }
        None => {
            dom::set_text(&els.error_text, "");
            dom::add_class(&els.error_text, "hidden");
        }
    }
}
