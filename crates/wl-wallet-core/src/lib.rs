//! Wallet session synchronization and the headless presentation model.

mod error;
mod shell;
mod sync;

pub use error::WalletError;
pub use shell::{ShellView, WalletShell};
pub use sync::WalletSync;
