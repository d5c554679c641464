//! Page-level state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Holds the mounted shell and the render subscription so both live as long
//! as the page.

use crate::provider::InjectedProvider;
use std::cell::RefCell;
use std::rc::Rc;
use wl_provider::Subscription;
use wl_wallet_core::WalletShell;

pub type Shell = WalletShell<InjectedProvider>;

#[derive(Default)]
struct PageState {
    shell: Option<Rc<Shell>>,
    render_subscription: Option<Subscription>,
}

thread_local! {
    static STATE: RefCell<PageState> = RefCell::new(PageState::default());
}

pub fn install(shell: Rc<Shell>, render_subscription: Option<Subscription>) {
    STATE.with(|s| {
        let mut state = s.borrow_mut();
        state.shell = Some(shell);
        state.render_subscription = render_subscription;
    });
}

pub fn shell() -> Option<Rc<Shell>> {
    STATE.with(|s| s.borrow().shell.clone())
}
