use anyhow::{Result, anyhow};
use wl_provider_rpc::DEFAULT_RPC_URL;
use wl_types::parse_address;

/// Probe settings, read from the environment.
///
/// - `WALLET_RPC_URL`: node endpoint (default `http://localhost:8545`)
/// - `WALLET_PROBE_ADDRESS`: optional address whose balance is printed
/// - `WALLET_PROBE_NETWORK`: optional network alias to switch to
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProbeConfig {
    pub rpc_url: String,
    pub address: Option<String>,
    pub network: Option<String>,
}

impl ProbeConfig {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let address = non_empty("WALLET_PROBE_ADDRESS");
        if let Some(raw) = address.as_deref() {
            parse_address(raw)
                .map_err(|err| anyhow!("WALLET_PROBE_ADDRESS `{raw}`: {err}"))?;
        }

        let network = non_empty("WALLET_PROBE_NETWORK");
        if let Some(alias) = network.as_deref() {
            if wl_networks::by_alias(alias).is_none() {
                return Err(anyhow!("WALLET_PROBE_NETWORK `{alias}` is not a known network"));
            }
        }

        Ok(Self {
            rpc_url: non_empty("WALLET_RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_owned()),
            address,
            network,
        })
    }
}
