use crate::{ProviderEvent, ProviderEventKind};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type Listener = Rc<dyn Fn(&ProviderEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener registry for provider implementations.
#[derive(Default)]
pub struct ListenerSet {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, ProviderEventKind, Listener)>>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, kind, listener));
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _, _)| *entry_id != id);
        entries.len() != before
    }

    /// Kind a listener was registered for, if it is still registered.
    pub fn kind_of(&self, id: ListenerId) -> Option<ProviderEventKind> {
        self.entries
            .borrow()
            .iter()
            .find(|(entry_id, _, _)| *entry_id == id)
            .map(|(_, kind, _)| *kind)
    }

    pub fn count(&self, kind: ProviderEventKind) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(_, entry_kind, _)| *entry_kind == kind)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Delivers `event` to every listener of its kind.
    ///
    /// The registry is not borrowed while listeners run, so a listener may
    /// add or remove listeners without panicking.
    pub fn emit(&self, event: &ProviderEvent) {
        let kind = event.kind();
        let targets: Vec<Listener> = self
            .entries
            .borrow()
            .iter()
            .filter(|(_, entry_kind, _)| *entry_kind == kind)
            .map(|(_, _, listener)| Rc::clone(listener))
            .collect();

        for listener in targets {
            listener(event);
        }
    }
}
