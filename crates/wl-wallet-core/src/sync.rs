use alloy_primitives::hex;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};
use wl_provider::{ProviderEvent, ProviderEventKind, RpcRequest, Subscription, WalletProvider};
use wl_types::{
    Address, ChainId, ConnectionState, ConnectionStatus, format_ether, parse_address,
    parse_quantity,
};

use crate::WalletError;

#[derive(Debug, Default)]
struct Session {
    connection: ConnectionState,
    connecting: bool,
}

impl Session {
    fn handle_event(&mut self, event: &ProviderEvent) {
        match event {
            ProviderEvent::AccountsChanged(accounts) => self.apply_accounts(accounts),
            ProviderEvent::ChainChanged(raw) => self.apply_raw_chain(raw),
        }
    }

    fn apply_accounts(&mut self, accounts: &[String]) {
        if self.connection.disconnected {
            debug!("ignoring account notification while disconnected");
            return;
        }

        match first_valid(accounts) {
            Some(account) => {
                if self.connection.account != Some(account) {
                    debug!(%account, "account changed");
                    self.connection.account = Some(account);
                }
            }
            None => {
                // Revocation from the wallet side counts as a disconnect.
                if self.connection.account.take().is_some() {
                    self.connection.chain_id = None;
                    self.connection.disconnected = true;
                    info!("wallet no longer shares any account");
                }
            }
        }
    }

    fn apply_raw_chain(&mut self, raw: &str) {
        match raw.parse::<ChainId>() {
            Ok(chain_id) => self.apply_chain(chain_id),
            Err(err) => warn!(chain = raw, "ignoring chain notification: {err}"),
        }
    }

    fn apply_chain(&mut self, chain_id: ChainId) {
        if self.connection.disconnected {
            debug!(%chain_id, "ignoring chain change while disconnected");
            return;
        }
        if self.connection.chain_id != Some(chain_id) {
            debug!(%chain_id, "chain changed");
            self.connection.chain_id = Some(chain_id);
        }
    }
}

/// Keeps a [`ConnectionState`] in step with a wallet provider.
///
/// The provider is injected, and its change notifications are subscribed to
/// once when the synchronizer is created. Dropping the synchronizer ends the
/// session and removes those listeners.
pub struct WalletSync<P: WalletProvider + 'static> {
    provider: Option<Rc<P>>,
    session: Rc<RefCell<Session>>,
    _subscription: Option<Subscription>,
}

impl<P: WalletProvider + 'static> WalletSync<P> {
    /// Starts a session without querying the provider.
    pub fn new(provider: Option<Rc<P>>) -> Self {
        let session = Rc::new(RefCell::new(Session::default()));

        let subscription = provider.as_ref().map(|provider| {
            let shared: Rc<dyn WalletProvider> = provider.clone();
            let mut subscription = Subscription::new(shared);

            let weak = Rc::downgrade(&session);
            let handler: wl_provider::Listener = Rc::new(move |event: &ProviderEvent| {
                if let Some(session) = weak.upgrade() {
                    session.borrow_mut().handle_event(event);
                }
            });
            subscription.listen(ProviderEventKind::AccountsChanged, handler.clone());
            subscription.listen(ProviderEventKind::ChainChanged, handler);
            subscription
        });

        if provider.is_none() {
            debug!("no wallet provider available");
        }

        Self {
            provider,
            session,
            _subscription: subscription,
        }
    }

    /// Starts a session and seeds it from the provider's current accounts
    /// and chain.
    pub async fn mount(provider: Option<Rc<P>>) -> Self {
        let sync = Self::new(provider);
        sync.refresh().await;
        sync
    }

    /// Re-reads `eth_accounts` and `eth_chainId`. Failures are logged only.
    pub async fn refresh(&self) {
        let Some(provider) = self.provider.as_deref() else {
            return;
        };

        match provider.request(RpcRequest::accounts()).await {
            Ok(value) => match decode_accounts(value) {
                Ok(accounts) => self.session.borrow_mut().apply_accounts(&accounts),
                Err(err) => warn!("eth_accounts: {err}"),
            },
            Err(err) => warn!("eth_accounts failed: {err}"),
        }

        self.refresh_chain(provider).await;
    }

    async fn refresh_chain(&self, provider: &P) {
        match provider.request(RpcRequest::chain_id()).await {
            Ok(Value::String(raw)) => self.session.borrow_mut().apply_raw_chain(&raw),
            Ok(other) => warn!("eth_chainId returned a non-string: {other}"),
            Err(err) => warn!("eth_chainId failed: {err}"),
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider(&self) -> Option<Rc<P>> {
        self.provider.clone()
    }

    pub fn state(&self) -> ConnectionState {
        self.session.borrow().connection.clone()
    }

    pub fn account(&self) -> Option<Address> {
        self.session.borrow().connection.account
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        self.session.borrow().connection.chain_id
    }

    pub fn is_connected(&self) -> bool {
        self.session.borrow().connection.is_connected()
    }

    pub fn status(&self) -> ConnectionStatus {
        let session = self.session.borrow();
        if session.connecting {
            ConnectionStatus::Connecting
        } else if session.connection.is_connected() {
            ConnectionStatus::Connected
        } else if session.connection.disconnected {
            ConnectionStatus::Disconnected
        } else {
            ConnectionStatus::Unconnected
        }
    }

    fn require_provider(&self) -> Result<&P, WalletError> {
        self.provider.as_deref().ok_or(WalletError::ProviderAbsent)
    }

    /// Asks the wallet for account access.
    ///
    /// On failure the connection state is left as it was.
    pub async fn connect(&self) -> Result<Address, WalletError> {
        let provider = self.require_provider()?;

        self.session.borrow_mut().connecting = true;
        let result = request_account(provider).await;
        self.session.borrow_mut().connecting = false;

        let account = result.inspect_err(|err| warn!("connect failed: {err}"))?;
        {
            let mut session = self.session.borrow_mut();
            session.connection.account = Some(account);
            session.connection.disconnected = false;
        }
        info!(%account, "wallet connected");

        self.refresh_chain(provider).await;
        Ok(account)
    }

    /// Forgets the account and chain locally.
    ///
    /// Wallets offer no way to revoke a site's permission, so the provider is
    /// not contacted.
    pub fn disconnect(&self) {
        let mut session = self.session.borrow_mut();
        session.connection = ConnectionState {
            account: None,
            chain_id: None,
            disconnected: true,
        };
        info!("wallet disconnected");
    }

    /// Balance of `address` at the latest block, in ether.
    ///
    /// A malformed address is rejected before any request is made. Provider
    /// failures are logged and yield `Ok(None)`.
    pub async fn get_balance(&self, address: &str) -> Result<Option<String>, WalletError> {
        let parsed = parse_address(address).map_err(|err| {
            debug!(address, "rejecting address: {err}");
            WalletError::InvalidAddress(address.to_owned())
        })?;
        let provider = self.require_provider()?;

        let value = match provider
            .request(RpcRequest::get_balance(&hex::encode_prefixed(parsed)))
            .await
        {
            Ok(value) => value,
            Err(err) => {
                warn!(address = %parsed, "eth_getBalance failed: {err}");
                return Ok(None);
            }
        };

        let Some(raw) = value.as_str() else {
            warn!(address = %parsed, "eth_getBalance returned a non-string: {value}");
            return Ok(None);
        };

        match parse_quantity(raw) {
            Ok(wei) => Ok(Some(format_ether(wei))),
            Err(err) => {
                warn!(address = %parsed, "eth_getBalance returned `{raw}`: {err}");
                Ok(None)
            }
        }
    }

    /// Switches the wallet to a preset network, adding it first when the
    /// wallet reports the chain as unknown.
    pub async fn switch_network(&self, alias: &str) -> Result<ChainId, WalletError> {
        let network = wl_networks::by_alias(alias)
            .ok_or_else(|| WalletError::UnknownNetwork(alias.to_owned()))?;
        let provider = self.require_provider()?;

        let switched = provider
            .request(RpcRequest::switch_chain(&network.chain_id.to_hex()))
            .await
            .map_err(WalletError::from);

        match switched {
            Ok(_) => {}
            Err(WalletError::UnknownChain(reason)) => {
                info!(network = %network.alias, "{reason}; asking wallet to add it");
                provider
                    .request(RpcRequest::add_chain(json!(network)))
                    .await
                    .map_err(WalletError::from)
                    .inspect_err(|err| warn!(network = %network.alias, "add chain failed: {err}"))?;
            }
            Err(err) => {
                warn!(network = %network.alias, "switch failed: {err}");
                return Err(err);
            }
        }

        self.session.borrow_mut().apply_chain(network.chain_id);
        info!(network = %network.alias, chain_id = %network.chain_id, "network switched");
        Ok(network.chain_id)
    }
}

async fn request_account<P: WalletProvider + ?Sized>(provider: &P) -> Result<Address, WalletError> {
    let value = provider.request(RpcRequest::request_accounts()).await?;
    let accounts = decode_accounts(value)?;
    first_valid(&accounts).ok_or(WalletError::NoAccounts)
}

fn decode_accounts(value: Value) -> Result<Vec<String>, WalletError> {
    serde_json::from_value(value)
        .map_err(|err| WalletError::MalformedResponse(format!("accounts: {err}")))
}

fn first_valid(accounts: &[String]) -> Option<Address> {
    accounts.iter().find_map(|raw| match parse_address(raw) {
        Ok(address) => Some(address),
        Err(err) => {
            warn!(account = %raw, "skipping malformed account: {err}");
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wl_networks::SEPOLIA;
    use wl_provider::mock::MockProvider;
    use wl_provider::{
        ETH_ACCOUNTS, ETH_GET_BALANCE, ETH_REQUEST_ACCOUNTS, ProviderRpcError, WALLET_ADD_CHAIN,
        WALLET_SWITCH_CHAIN,
    };

    const ALICE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const BOB: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";
    const DEAD: &str = "0x000000000000000000000000000000000000dead";

    fn addr(raw: &str) -> Address {
        parse_address(raw).unwrap()
    }

    async fn connected_session() -> (Rc<MockProvider>, WalletSync<MockProvider>) {
        let provider = Rc::new(MockProvider::authorized(&[ALICE], "0x1"));
        let sync = WalletSync::mount(Some(provider.clone())).await;
        (provider, sync)
    }

    #[tokio::test]
    async fn mount_seeds_state_and_subscribes_once() {
        let (provider, sync) = connected_session().await;

        assert_eq!(sync.account(), Some(addr(ALICE)));
        assert_eq!(sync.chain_id(), Some(ChainId::new(1)));
        assert_eq!(sync.status(), ConnectionStatus::Connected);
        assert_eq!(provider.listener_count(ProviderEventKind::AccountsChanged), 1);
        assert_eq!(provider.listener_count(ProviderEventKind::ChainChanged), 1);
        assert!(provider.calls(ETH_REQUEST_ACCOUNTS).is_empty());
    }

    #[tokio::test]
    async fn mount_tolerates_seed_failures() {
        let provider = Rc::new(MockProvider::new());
        provider.fail(ETH_ACCOUNTS, ProviderRpcError::internal("boom"));

        let sync = WalletSync::mount(Some(provider)).await;
        assert_eq!(sync.state(), ConnectionState::default());
        assert_eq!(sync.status(), ConnectionStatus::Unconnected);
    }

    #[tokio::test]
    async fn every_action_reports_missing_provider() {
        let sync = WalletSync::<MockProvider>::mount(None).await;

        assert!(!sync.has_provider());
        assert_eq!(sync.connect().await, Err(WalletError::ProviderAbsent));
        assert_eq!(sync.get_balance(DEAD).await, Err(WalletError::ProviderAbsent));
        assert_eq!(
            sync.switch_network("mainnet").await,
            Err(WalletError::ProviderAbsent)
        );

        // Input validation runs before the provider check.
        assert_eq!(
            sync.get_balance("0xdead").await,
            Err(WalletError::InvalidAddress("0xdead".to_owned()))
        );
        assert_eq!(
            sync.switch_network("goerli").await,
            Err(WalletError::UnknownNetwork("goerli".to_owned()))
        );
        assert_eq!(sync.status(), ConnectionStatus::Unconnected);
    }

    #[tokio::test]
    async fn connect_takes_first_account_and_reads_chain() -> anyhow::Result<()> {
        let provider = Rc::new(MockProvider::new());
        provider.respond(ETH_ACCOUNTS, json!([]));
        provider.respond(ETH_REQUEST_ACCOUNTS, json!([BOB, ALICE]));
        provider.respond(wl_provider::ETH_CHAIN_ID, json!("0xAA36A7"));

        let sync = WalletSync::mount(Some(provider.clone())).await;
        assert_eq!(sync.status(), ConnectionStatus::Unconnected);

        let account = sync.connect().await?;
        assert_eq!(account, addr(BOB));
        assert_eq!(sync.status(), ConnectionStatus::Connected);
        assert_eq!(sync.chain_id(), Some(SEPOLIA.chain_id));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_connect_leaves_state_unchanged() {
        let provider = Rc::new(MockProvider::new());
        provider.respond(ETH_ACCOUNTS, json!([]));
        provider.respond(wl_provider::ETH_CHAIN_ID, json!("0x1"));
        provider.fail(ETH_REQUEST_ACCOUNTS, ProviderRpcError::user_rejected());

        let sync = WalletSync::mount(Some(provider)).await;
        let before = sync.state();

        assert_eq!(sync.connect().await, Err(WalletError::UserRejected));
        assert_eq!(sync.state(), before);
        assert_eq!(sync.status(), ConnectionStatus::Unconnected);
    }

    #[tokio::test]
    async fn connect_with_no_accounts_fails() {
        let provider = Rc::new(MockProvider::new());
        provider.respond(ETH_REQUEST_ACCOUNTS, json!([]));

        let sync = WalletSync::new(Some(provider));
        assert_eq!(sync.connect().await, Err(WalletError::NoAccounts));
        assert_eq!(sync.status(), ConnectionStatus::Unconnected);
    }

    #[tokio::test]
    async fn malformed_accounts_payload_is_reported() {
        let provider = Rc::new(MockProvider::new());
        provider.respond(ETH_REQUEST_ACCOUNTS, json!({ "accounts": [ALICE] }));

        let sync = WalletSync::new(Some(provider));
        assert!(matches!(
            sync.connect().await,
            Err(WalletError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn disconnect_then_connect_restores_session() -> anyhow::Result<()> {
        let (_provider, sync) = connected_session().await;

        sync.disconnect();
        assert_eq!(sync.status(), ConnectionStatus::Disconnected);
        assert_eq!(sync.account(), None);
        assert_eq!(sync.chain_id(), None);

        sync.connect().await?;
        assert_eq!(sync.status(), ConnectionStatus::Connected);
        assert_eq!(sync.account(), Some(addr(ALICE)));
        assert_eq!(sync.chain_id(), Some(ChainId::new(1)));
        Ok(())
    }

    #[tokio::test]
    async fn empty_accounts_notification_clears_account() {
        let (provider, sync) = connected_session().await;
        provider.emit_accounts(&[]);
        assert_eq!(sync.account(), None);
        assert_eq!(sync.status(), ConnectionStatus::Disconnected);

        let provider = Rc::new(MockProvider::new());
        let fresh = WalletSync::new(Some(provider.clone()));
        provider.emit_accounts(&[]);
        assert_eq!(fresh.account(), None);
        assert_eq!(fresh.status(), ConnectionStatus::Unconnected);
    }

    #[tokio::test]
    async fn repeated_account_notifications_are_idempotent() {
        let (provider, sync) = connected_session().await;

        provider.emit_accounts(&[BOB]);
        let once = sync.state();
        for _ in 0..5 {
            provider.emit_accounts(&[BOB]);
        }
        assert_eq!(sync.state(), once);
        assert_eq!(sync.account(), Some(addr(BOB)));
    }

    #[tokio::test]
    async fn chain_notification_updates_chain_only() {
        let (provider, sync) = connected_session().await;

        provider.emit_chain("0xAA36A7");
        assert_eq!(sync.chain_id(), Some(SEPOLIA.chain_id));
        assert_eq!(sync.account(), Some(addr(ALICE)));
        assert_eq!(sync.status(), ConnectionStatus::Connected);

        provider.emit_chain("not-a-chain");
        assert_eq!(sync.chain_id(), Some(SEPOLIA.chain_id));
    }

    #[tokio::test]
    async fn notifications_are_ignored_after_disconnect() {
        let (provider, sync) = connected_session().await;
        sync.disconnect();

        provider.emit_accounts(&[BOB]);
        provider.emit_chain("0xaa36a7");
        assert_eq!(sync.account(), None);
        assert_eq!(sync.chain_id(), None);
        assert_eq!(sync.status(), ConnectionStatus::Disconnected);
    }

    #[tokio::test]
    async fn invalid_address_never_reaches_provider() {
        let (provider, sync) = connected_session().await;
        provider.clear_requests();

        for input in [
            "",
            "dead",
            "0x0000000000000000000000000000000000dead",
            "0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "0xgggggggggggggggggggggggggggggggggggggggg",
        ] {
            assert_eq!(
                sync.get_balance(input).await,
                Err(WalletError::InvalidAddress(input.to_owned()))
            );
        }
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn balance_is_converted_to_ether() -> anyhow::Result<()> {
        let (provider, sync) = connected_session().await;
        provider.respond(ETH_GET_BALANCE, json!("0xde0b6b3a7640000"));

        assert_eq!(sync.get_balance(DEAD).await?, Some("1".to_owned()));

        let calls = provider.calls(ETH_GET_BALANCE);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].params, vec![json!(DEAD), json!("latest")]);
        Ok(())
    }

    #[tokio::test]
    async fn unprefixed_address_is_queried_prefixed() -> anyhow::Result<()> {
        let (provider, sync) = connected_session().await;
        provider.respond(ETH_GET_BALANCE, json!("0x0"));

        assert_eq!(sync.get_balance(&ALICE[2..]).await?, Some("0".to_owned()));

        let calls = provider.calls(ETH_GET_BALANCE);
        assert_eq!(
            calls[0].params,
            vec![json!(ALICE.to_lowercase()), json!("latest")]
        );
        Ok(())
    }

    #[tokio::test]
    async fn balance_beyond_u128_is_formatted_exactly() -> anyhow::Result<()> {
        let (provider, sync) = connected_session().await;
        provider.respond(ETH_GET_BALANCE, json!("0x100000000000000000000000000000000"));

        assert_eq!(
            sync.get_balance(DEAD).await?,
            Some("340282366920938463463.374607431768211456".to_owned())
        );
        Ok(())
    }

    #[tokio::test]
    async fn balance_failure_yields_none() -> anyhow::Result<()> {
        let (provider, sync) = connected_session().await;

        provider.fail_once(ETH_GET_BALANCE, ProviderRpcError::internal("node down"));
        assert_eq!(sync.get_balance(DEAD).await?, None);

        provider.respond(ETH_GET_BALANCE, json!(12));
        assert_eq!(sync.get_balance(DEAD).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn switch_falls_back_to_add_chain_on_4902() -> anyhow::Result<()> {
        let (provider, sync) = connected_session().await;
        provider.fail(WALLET_SWITCH_CHAIN, ProviderRpcError::unrecognized_chain("0xaa36a7"));
        provider.respond(WALLET_ADD_CHAIN, Value::Null);

        let chain_id = sync.switch_network("sepolia").await?;
        assert_eq!(chain_id, SEPOLIA.chain_id);
        assert_eq!(sync.chain_id(), Some(SEPOLIA.chain_id));

        let adds = provider.calls(WALLET_ADD_CHAIN);
        assert_eq!(adds.len(), 1);
        assert_eq!(
            adds[0].params,
            vec![json!({
                "chainId": "0xaa36a7",
                "chainName": "Sepolia Testnet",
                "nativeCurrency": { "name": "Sepolia Ether", "symbol": "SEP", "decimals": 18 },
                "rpcUrls": SEPOLIA.rpc_urls,
                "blockExplorerUrls": ["https://sepolia.etherscan.io"],
            })]
        );
        Ok(())
    }

    #[tokio::test]
    async fn switch_success_does_not_add() -> anyhow::Result<()> {
        let (provider, sync) = connected_session().await;
        provider.respond(WALLET_SWITCH_CHAIN, Value::Null);

        sync.switch_network("sepolia").await?;
        let switches = provider.calls(WALLET_SWITCH_CHAIN);
        assert_eq!(switches.len(), 1);
        assert_eq!(switches[0].params, vec![json!({ "chainId": "0xaa36a7" })]);
        assert!(provider.calls(WALLET_ADD_CHAIN).is_empty());

        // The wallet's own notification agrees with the optimistic update.
        provider.emit_chain("0xaa36a7");
        assert_eq!(sync.chain_id(), Some(SEPOLIA.chain_id));
        Ok(())
    }

    #[tokio::test]
    async fn switch_errors_other_than_unknown_chain_surface() {
        let (provider, sync) = connected_session().await;
        provider.fail(WALLET_SWITCH_CHAIN, ProviderRpcError::user_rejected());

        assert_eq!(
            sync.switch_network("sepolia").await,
            Err(WalletError::UserRejected)
        );
        assert!(provider.calls(WALLET_ADD_CHAIN).is_empty());
        assert_eq!(sync.chain_id(), Some(ChainId::new(1)));
    }

    #[tokio::test]
    async fn failed_add_chain_surfaces() {
        let (provider, sync) = connected_session().await;
        provider.fail(WALLET_SWITCH_CHAIN, ProviderRpcError::unrecognized_chain("0xaa36a7"));
        provider.fail(WALLET_ADD_CHAIN, ProviderRpcError::new(-32602, "bad rpc url"));

        assert_eq!(
            sync.switch_network("sepolia").await,
            Err(WalletError::ProviderRequestFailed {
                code: -32602,
                message: "bad rpc url".to_owned(),
            })
        );
        assert_eq!(sync.chain_id(), Some(ChainId::new(1)));
    }

    #[tokio::test]
    async fn unknown_alias_issues_no_request() {
        let (provider, sync) = connected_session().await;
        provider.clear_requests();

        assert_eq!(
            sync.switch_network("goerli").await,
            Err(WalletError::UnknownNetwork("goerli".to_owned()))
        );
        assert!(provider.requests().is_empty());
    }

    /// Holds `eth_requestAccounts` open until the gate is released.
    struct GatedProvider {
        inner: MockProvider,
        gate: RefCell<Option<tokio::sync::oneshot::Receiver<()>>>,
    }

    #[async_trait::async_trait(?Send)]
    impl WalletProvider for GatedProvider {
        async fn request(&self, req: RpcRequest) -> Result<Value, ProviderRpcError> {
            if req.method == ETH_REQUEST_ACCOUNTS {
                let gate = self.gate.borrow_mut().take();
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
            }
            self.inner.request(req).await
        }

        fn add_listener(
            &self,
            kind: ProviderEventKind,
            listener: wl_provider::Listener,
        ) -> wl_provider::ListenerId {
            self.inner.add_listener(kind, listener)
        }

        fn remove_listener(&self, id: wl_provider::ListenerId) -> bool {
            self.inner.remove_listener(id)
        }
    }

    #[tokio::test]
    async fn status_is_connecting_while_request_is_pending() -> anyhow::Result<()> {
        let (release, gate) = tokio::sync::oneshot::channel();
        let provider = Rc::new(GatedProvider {
            inner: MockProvider::authorized(&[ALICE], "0x1"),
            gate: RefCell::new(Some(gate)),
        });
        let sync = WalletSync::new(Some(provider));

        let connect = sync.connect();
        tokio::pin!(connect);
        tokio::select! {
            biased;
            _ = &mut connect => panic!("connect finished before the gate opened"),
            () = std::future::ready(()) => {}
        }
        assert_eq!(sync.status(), ConnectionStatus::Connecting);

        let _ = release.send(());
        assert_eq!(connect.await?, addr(ALICE));
        assert_eq!(sync.status(), ConnectionStatus::Connected);
        Ok(())
    }

    #[tokio::test]
    async fn drop_releases_listeners_and_remount_resubscribes() {
        let (provider, sync) = connected_session().await;
        drop(sync);
        assert_eq!(provider.listener_count(ProviderEventKind::AccountsChanged), 0);
        assert_eq!(provider.listener_count(ProviderEventKind::ChainChanged), 0);

        let again = WalletSync::mount(Some(provider.clone())).await;
        assert_eq!(provider.listener_count(ProviderEventKind::AccountsChanged), 1);
        assert_eq!(provider.listener_count(ProviderEventKind::ChainChanged), 1);
        assert!(again.is_connected());
    }
}
