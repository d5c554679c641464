use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::warn;
use wl_provider::WalletProvider;
use wl_types::ConnectionStatus;

use crate::{WalletError, WalletSync};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Balance {
    Ether(String),
    Failed,
}

#[derive(Debug, Default)]
struct Form {
    address_input: String,
    last_error: Option<String>,
    last_balance: Option<Balance>,
}

/// Everything the page shows, derived from the session and form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellView {
    pub status: ConnectionStatus,
    pub connected: bool,
    pub account: Option<String>,
    pub chain_id: Option<String>,
    pub network_label: String,
    pub address_input: String,
    pub balance_line: Option<String>,
    pub error: Option<String>,
}

/// UI-facing wrapper: dispatches user actions to the synchronizer and keeps
/// the form fields (address input, last error, last balance).
///
/// Actions never fail; errors become the `error` line of the view.
pub struct WalletShell<P: WalletProvider + 'static> {
    sync: WalletSync<P>,
    form: RefCell<Form>,
}

impl<P: WalletProvider + 'static> WalletShell<P> {
    pub fn new(sync: WalletSync<P>) -> Self {
        Self {
            sync,
            form: RefCell::new(Form::default()),
        }
    }

    pub async fn mount(provider: Option<Rc<P>>) -> Self {
        let shell = Self::new(WalletSync::mount(provider).await);
        if !shell.sync.has_provider() {
            shell.report(&WalletError::ProviderAbsent);
        }
        shell
    }

    pub fn sync(&self) -> &WalletSync<P> {
        &self.sync
    }

    fn report(&self, err: &WalletError) {
        self.form.borrow_mut().last_error = Some(err.user_message());
    }

    fn clear_error(&self) {
        self.form.borrow_mut().last_error = None;
    }

    fn settle<T>(&self, result: Result<T, WalletError>) {
        match result {
            Ok(_) => self.clear_error(),
            Err(err) => self.report(&err),
        }
    }

    pub async fn connect(&self) {
        let result = self.sync.connect().await;
        self.settle(result);
    }

    pub fn disconnect(&self) {
        self.sync.disconnect();
        self.clear_error();
    }

    pub async fn switch_network(&self, alias: &str) {
        let result = self.sync.switch_network(alias).await;
        self.settle(result);
    }

    pub fn set_address_input(&self, text: &str) {
        self.form.borrow_mut().address_input = text.to_owned();
    }

    /// Looks up the balance of the address currently typed in the form.
    pub async fn fetch_balance(&self) {
        let input = self.form.borrow().address_input.clone();
        match self.sync.get_balance(&input).await {
            Ok(Some(ether)) => {
                let mut form = self.form.borrow_mut();
                form.last_balance = Some(Balance::Ether(ether));
                form.last_error = None;
            }
            Ok(None) => {
                let mut form = self.form.borrow_mut();
                form.last_balance = Some(Balance::Failed);
                form.last_error = None;
            }
            Err(err) => {
                warn!("balance lookup rejected: {err}");
                self.report(&err);
            }
        }
    }

    pub fn view(&self) -> ShellView {
        let state = self.sync.state();
        let form = self.form.borrow();
        ShellView {
            status: self.sync.status(),
            connected: state.is_connected(),
            account: state.account.map(|account| account.to_string()),
            chain_id: state.chain_id.map(|chain_id| chain_id.to_hex()),
            network_label: wl_networks::network_name(state.chain_id).to_owned(),
            address_input: form.address_input.clone(),
            balance_line: form.last_balance.as_ref().map(|balance| match balance {
                Balance::Ether(ether) => format!("{ether} ETH"),
                Balance::Failed => "Error".to_owned(),
            }),
            error: form.last_error.clone(),
        }
    }
}
