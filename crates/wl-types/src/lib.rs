//! Value types shared by every WalletLink crate.

mod address;
mod chain;
mod connection;
mod network;
mod units;

pub use address::{Address, AddressError, parse_address};
pub use alloy_primitives::U256;
pub use chain::{ChainId, ChainIdError};
pub use connection::{ConnectionState, ConnectionStatus};
pub use network::{NativeCurrency, NetworkAlias, NetworkDescriptor};
pub use units::{QuantityError, format_ether, parse_quantity};
