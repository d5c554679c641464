use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::Cell;
use tracing::{debug, warn};
use wl_provider::{
    ETH_ACCOUNTS, ETH_REQUEST_ACCOUNTS, Listener, ListenerId, ListenerSet, ProviderEventKind,
    ProviderRpcError, RpcRequest, WalletProvider,
};

pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Read-only provider backed by a JSON-RPC node.
///
/// Reads `WALLET_RPC_URL` from environment at construction time
/// (default: `http://localhost:8545`).
///
/// A node has no wallet UI, so `eth_requestAccounts` is answered with the
/// node's own `eth_accounts` (dev nodes expose unlocked accounts there) and
/// `wallet_*` methods are rejected with code 4200. Nodes never push account
/// or chain changes; listeners are accepted but never fired.
pub struct RpcProvider {
    endpoint: String,
    http: reqwest::Client,
    next_id: Cell<u64>,
    listeners: ListenerSet,
}

impl Default for RpcProvider {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RpcProvider {
    pub fn new(endpoint: Option<String>) -> Self {
        let endpoint = endpoint
            .or_else(|| std::env::var("WALLET_RPC_URL").ok())
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            next_id: Cell::new(1),
            listeners: ListenerSet::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn envelope(&self, req: RpcRequest) -> JsonRpcRequest {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let method = if req.method == ETH_REQUEST_ACCOUNTS {
            ETH_ACCOUNTS.to_owned()
        } else {
            req.method
        };

        JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params: req.params,
        }
    }

    async fn post(&self, body: &JsonRpcRequest) -> Result<JsonRpcResponse> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(body)
            .send()
            .await
            .with_context(|| format!("rpc {} transport", body.method))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("rpc {} HTTP {status}: {text}", body.method);
        }

        response
            .json()
            .await
            .with_context(|| format!("rpc {} parse", body.method))
    }
}

// ── JSON-RPC 2.0 wire types ──────────────────────────────────────────

#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: String,
    params: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<ProviderRpcError>,
}

impl JsonRpcResponse {
    fn into_result(self) -> Result<Value, ProviderRpcError> {
        match (self.error, self.result) {
            (Some(error), _) => Err(error),
            (None, Some(result)) => Ok(result),
            // `"result": null` deserializes as `None`; it is still a success.
            (None, None) => Ok(Value::Null),
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for RpcProvider {
    async fn request(&self, req: RpcRequest) -> Result<Value, ProviderRpcError> {
        if req.method.starts_with("wallet_") {
            return Err(ProviderRpcError::unsupported_method(&req.method));
        }

        let body = self.envelope(req);
        debug!(method = %body.method, id = body.id, "rpc request");

        match self.post(&body).await {
            Ok(response) => response.into_result(),
            Err(err) => {
                warn!("rpc {} failed: {err:#}", body.method);
                Err(ProviderRpcError::internal(format!("{err:#}")))
            }
        }
    }

    fn add_listener(&self, kind: ProviderEventKind, listener: Listener) -> ListenerId {
        self.listeners.add(kind, listener)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}
