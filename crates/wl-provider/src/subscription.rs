use crate::{Listener, ListenerId, ProviderEventKind, WalletProvider};
use std::rc::Rc;
use tracing::debug;

/// Listeners registered for one session.
///
/// Dropping the subscription removes every listener it added, so each
/// registration is paired with exactly one removal.
pub struct Subscription {
    provider: Rc<dyn WalletProvider>,
    ids: Vec<ListenerId>,
}

impl Subscription {
    pub fn new(provider: Rc<dyn WalletProvider>) -> Self {
        Self {
            provider,
            ids: Vec::new(),
        }
    }

    pub fn listen(&mut self, kind: ProviderEventKind, listener: Listener) -> ListenerId {
        let id = self.provider.add_listener(kind, listener);
        self.ids.push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            if !self.provider.remove_listener(id) {
                debug!(?id, "listener already removed");
            }
        }
    }
}
