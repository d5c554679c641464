//! The wallet provider capability.
//!
//! A provider is whatever object fronts the user's wallet: the injected
//! browser object, a JSON-RPC node, or a test double. It answers EIP-1193
//! style `{ method, params }` requests and fans out change notifications to
//! registered listeners.

mod listeners;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod subscription;

pub use listeners::{Listener, ListenerId, ListenerSet};
pub use subscription::Subscription;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

pub const ETH_ACCOUNTS: &str = "eth_accounts";
pub const ETH_CHAIN_ID: &str = "eth_chainId";
pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
pub const ETH_GET_BALANCE: &str = "eth_getBalance";
pub const WALLET_SWITCH_CHAIN: &str = "wallet_switchEthereumChain";
pub const WALLET_ADD_CHAIN: &str = "wallet_addEthereumChain";

/// EIP-1193 / EIP-1474 error codes the wallet layer cares about.
pub mod codes {
    pub const USER_REJECTED: i64 = 4001;
    pub const UNAUTHORIZED: i64 = 4100;
    pub const UNSUPPORTED_METHOD: i64 = 4200;
    pub const DISCONNECTED: i64 = 4900;
    pub const CHAIN_DISCONNECTED: i64 = 4901;
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;
    pub const INTERNAL_ERROR: i64 = -32603;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Value>,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    pub fn accounts() -> Self {
        Self::new(ETH_ACCOUNTS, Vec::new())
    }

    pub fn chain_id() -> Self {
        Self::new(ETH_CHAIN_ID, Vec::new())
    }

    pub fn request_accounts() -> Self {
        Self::new(ETH_REQUEST_ACCOUNTS, Vec::new())
    }

    pub fn get_balance(address: &str) -> Self {
        Self::new(ETH_GET_BALANCE, vec![json!(address), json!("latest")])
    }

    pub fn switch_chain(chain_id_hex: &str) -> Self {
        Self::new(WALLET_SWITCH_CHAIN, vec![json!({ "chainId": chain_id_hex })])
    }

    pub fn add_chain(descriptor: Value) -> Self {
        Self::new(WALLET_ADD_CHAIN, vec![descriptor])
    }
}

/// Error object a provider rejects a request with.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("provider error {code}: {message}")]
pub struct ProviderRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ProviderRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn user_rejected() -> Self {
        Self::new(codes::USER_REJECTED, "User rejected the request.")
    }

    pub fn unrecognized_chain(chain_id_hex: &str) -> Self {
        Self::new(
            codes::UNRECOGNIZED_CHAIN,
            format!("Unrecognized chain ID \"{chain_id_hex}\"."),
        )
    }

    pub fn unsupported_method(method: &str) -> Self {
        Self::new(
            codes::UNSUPPORTED_METHOD,
            format!("The provider does not support `{method}`."),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL_ERROR, message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderEventKind {
    AccountsChanged,
    ChainChanged,
}

impl ProviderEventKind {
    /// Event name on the injected provider object.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::AccountsChanged => "accountsChanged",
            Self::ChainChanged => "chainChanged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<String>),
    ChainChanged(String),
}

impl ProviderEvent {
    pub fn kind(&self) -> ProviderEventKind {
        match self {
            Self::AccountsChanged(_) => ProviderEventKind::AccountsChanged,
            Self::ChainChanged(_) => ProviderEventKind::ChainChanged,
        }
    }
}

/// Request/response calls plus change notifications.
///
/// Providers live on a single-threaded event loop, so neither the trait nor
/// its futures are `Send`. Listeners are invoked synchronously, in
/// registration order, in the order the provider emits events.
#[async_trait(?Send)]
pub trait WalletProvider {
    async fn request(&self, req: RpcRequest) -> Result<Value, ProviderRpcError>;

    fn add_listener(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId;

    /// Returns `false` when the id was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;
}
