mod config;

use config::ProbeConfig;
use std::rc::Rc;
use tracing::{info, warn};
use wl_provider_rpc::RpcProvider;
use wl_wallet_core::WalletSync;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ProbeConfig::from_env()?;
    info!("wallet-probe using node at {}", config.rpc_url);

    let provider = Rc::new(RpcProvider::new(Some(config.rpc_url.clone())));
    let sync = WalletSync::mount(Some(provider)).await;

    if !sync.is_connected() {
        match sync.connect().await {
            Ok(account) => info!(%account, "node shared an account"),
            Err(err) => warn!("{}", err.user_message()),
        }
    }

    if let Some(alias) = config.network.as_deref() {
        if let Err(err) = sync.switch_network(alias).await {
            warn!(alias, "{}", err.user_message());
        }
    }

    let state = sync.state();
    info!(
        status = ?sync.status(),
        network = wl_networks::network_name(state.chain_id),
        "session state"
    );
    println!("{}", serde_json::to_string_pretty(&state)?);

    if let Some(address) = config.address.as_deref() {
        match sync.get_balance(address).await {
            Ok(Some(ether)) => println!("balance of {address}: {ether} ETH"),
            Ok(None) => println!("balance of {address}: Error"),
            Err(err) => warn!("{}", err.user_message()),
        }
    }

    Ok(())
}
