use crate::ChainId;
use serde::Serialize;
use std::fmt;

/// Short key for a preset network, e.g. `mainnet` or `sepolia`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkAlias(pub &'static str);

impl fmt::Display for NetworkAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Static description of a network.
///
/// Serializes to the EIP-3085 `wallet_addEthereumChain` parameter object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    #[serde(skip)]
    pub alias: NetworkAlias,
    pub chain_id: ChainId,
    pub chain_name: &'static str,
    pub native_currency: NativeCurrency,
    pub rpc_urls: &'static [&'static str],
    pub block_explorer_urls: &'static [&'static str],
}
