use thiserror::Error;
use wl_provider::{ProviderRpcError, codes};

/// Failure of a wallet action.
///
/// Provider error codes are interpreted here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("no wallet provider detected")]
    ProviderAbsent,
    #[error("request rejected by the user")]
    UserRejected,
    #[error("chain is not known to the wallet: {0}")]
    UnknownChain(String),
    #[error("invalid address `{0}`")]
    InvalidAddress(String),
    #[error("unknown network alias `{0}`")]
    UnknownNetwork(String),
    #[error("wallet returned no accounts")]
    NoAccounts,
    #[error("provider request failed ({code}): {message}")]
    ProviderRequestFailed { code: i64, message: String },
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl WalletError {
    /// Text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::ProviderAbsent => {
                "No Ethereum wallet found. Install a browser wallet to continue.".to_owned()
            }
            Self::UserRejected => "The request was rejected in the wallet.".to_owned(),
            Self::UnknownChain(_) => "The wallet does not know this network.".to_owned(),
            Self::InvalidAddress(_) => "Please enter a valid Ethereum address".to_owned(),
            Self::UnknownNetwork(alias) => format!("Unknown network \"{alias}\"."),
            Self::NoAccounts => "The wallet did not share any account.".to_owned(),
            Self::ProviderRequestFailed { message, .. } => format!("Wallet error: {message}"),
            Self::MalformedResponse(_) => "The wallet sent an unexpected response.".to_owned(),
        }
    }
}

impl From<ProviderRpcError> for WalletError {
    fn from(err: ProviderRpcError) -> Self {
        match err.code {
            codes::USER_REJECTED => Self::UserRejected,
            codes::UNRECOGNIZED_CHAIN => Self::UnknownChain(err.message),
            code => Self::ProviderRequestFailed {
                code,
                message: err.message,
            },
        }
    }
}
