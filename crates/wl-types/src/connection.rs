use crate::{Address, ChainId};
use serde::Serialize;

/// In-memory view of the wallet session.
///
/// `disconnected` records an explicit (or externally forced) disconnect; it is
/// cleared only by a successful connect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionState {
    pub account: Option<Address>,
    pub chain_id: Option<ChainId>,
    pub disconnected: bool,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        self.account.is_some() && !self.disconnected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Unconnected,
    Connecting,
    Connected,
    Disconnected,
}
