//! Scriptable in-memory provider for tests.

use crate::{
    ETH_ACCOUNTS, ETH_CHAIN_ID, ETH_REQUEST_ACCOUNTS, Listener, ListenerId, ListenerSet,
    ProviderEvent, ProviderEventKind, ProviderRpcError, RpcRequest, WalletProvider,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

type Reply = Result<Value, ProviderRpcError>;

/// Provider double with per-method replies and a request journal.
///
/// One-shot replies are consumed first, then the method's standing reply.
/// Methods with neither are rejected with code 4200.
#[derive(Default)]
pub struct MockProvider {
    once: RefCell<HashMap<String, VecDeque<Reply>>>,
    standing: RefCell<HashMap<String, Reply>>,
    journal: RefCell<Vec<RpcRequest>>,
    listeners: ListenerSet,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that already authorizes `accounts` and sits on `chain_id`.
    pub fn authorized(accounts: &[&str], chain_id: &str) -> Self {
        let provider = Self::new();
        provider.respond(ETH_ACCOUNTS, json!(accounts));
        provider.respond(ETH_REQUEST_ACCOUNTS, json!(accounts));
        provider.respond(ETH_CHAIN_ID, json!(chain_id));
        provider
    }

    pub fn respond(&self, method: &str, value: Value) {
        self.standing
            .borrow_mut()
            .insert(method.to_owned(), Ok(value));
    }

    pub fn fail(&self, method: &str, error: ProviderRpcError) {
        self.standing
            .borrow_mut()
            .insert(method.to_owned(), Err(error));
    }

    pub fn respond_once(&self, method: &str, value: Value) {
        self.push_once(method, Ok(value));
    }

    pub fn fail_once(&self, method: &str, error: ProviderRpcError) {
        self.push_once(method, Err(error));
    }

    fn push_once(&self, method: &str, reply: Reply) {
        self.once
            .borrow_mut()
            .entry(method.to_owned())
            .or_default()
            .push_back(reply);
    }

    pub fn requests(&self) -> Vec<RpcRequest> {
        self.journal.borrow().clone()
    }

    pub fn calls(&self, method: &str) -> Vec<RpcRequest> {
        self.journal
            .borrow()
            .iter()
            .filter(|req| req.method == method)
            .cloned()
            .collect()
    }

    pub fn clear_requests(&self) {
        self.journal.borrow_mut().clear();
    }

    pub fn listener_count(&self, kind: ProviderEventKind) -> usize {
        self.listeners.count(kind)
    }

    pub fn emit(&self, event: ProviderEvent) {
        self.listeners.emit(&event);
    }

    pub fn emit_accounts(&self, accounts: &[&str]) {
        self.emit(ProviderEvent::AccountsChanged(
            accounts.iter().map(|a| (*a).to_owned()).collect(),
        ));
    }

    pub fn emit_chain(&self, chain_id: &str) {
        self.emit(ProviderEvent::ChainChanged(chain_id.to_owned()));
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockProvider {
    async fn request(&self, req: RpcRequest) -> Result<Value, ProviderRpcError> {
        self.journal.borrow_mut().push(req.clone());

        let queued = self
            .once
            .borrow_mut()
            .get_mut(&req.method)
            .and_then(VecDeque::pop_front);
        if let Some(reply) = queued {
            return reply;
        }

        self.standing
            .borrow()
            .get(&req.method)
            .cloned()
            .unwrap_or_else(|| Err(ProviderRpcError::unsupported_method(&req.method)))
    }

    fn add_listener(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId {
        self.listeners.add(kind, listener)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}
