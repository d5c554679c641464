//! Preset networks the wallet can switch between.

use wl_types::{ChainId, NativeCurrency, NetworkAlias, NetworkDescriptor};

pub const UNKNOWN_NETWORK: &str = "Unknown Network";

pub const MAINNET: NetworkDescriptor = NetworkDescriptor {
    alias: NetworkAlias("mainnet"),
    chain_id: ChainId::new(1),
    chain_name: "Ethereum Mainnet",
    native_currency: NativeCurrency {
        name: "Ether",
        symbol: "ETH",
        decimals: 18,
    },
    rpc_urls: &["https://cloudflare-eth.com"],
    block_explorer_urls: &["https://etherscan.io"],
};

pub const SEPOLIA: NetworkDescriptor = NetworkDescriptor {
    alias: NetworkAlias("sepolia"),
    chain_id: ChainId::new(11_155_111),
    chain_name: "Sepolia Testnet",
    native_currency: NativeCurrency {
        name: "Sepolia Ether",
        symbol: "SEP",
        decimals: 18,
    },
    rpc_urls: &["https://rpc.sepolia.org"],
    block_explorer_urls: &["https://sepolia.etherscan.io"],
};

static NETWORKS: [NetworkDescriptor; 2] = [MAINNET, SEPOLIA];

pub fn all() -> &'static [NetworkDescriptor] {
    &NETWORKS
}

/// Looks up a preset by alias. Aliases are matched case-insensitively.
pub fn by_alias(alias: &str) -> Option<&'static NetworkDescriptor> {
    let alias = alias.trim();
    NETWORKS
        .iter()
        .find(|network| network.alias.0.eq_ignore_ascii_case(alias))
}

pub fn by_chain_id(chain_id: ChainId) -> Option<&'static NetworkDescriptor> {
    NETWORKS.iter().find(|network| network.chain_id == chain_id)
}

/// Display label for a chain id, `"Unknown Network"` when it is not a preset.
pub fn network_name(chain_id: Option<ChainId>) -> &'static str {
    chain_id
        .and_then(by_chain_id)
        .map(|network| network.chain_name)
        .unwrap_or(UNKNOWN_NETWORK)
}
