use std::str::FromStr;
use thiserror::Error;

pub use alloy_primitives::Address;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address is not 20 hex-encoded bytes: {0}")]
    Malformed(String),
    #[error("address has an invalid EIP-55 checksum")]
    BadChecksum,
}

/// Parses an account address the way wallets validate user input.
///
/// The `0x` prefix is optional. All-lowercase and all-uppercase hex are
/// accepted as is; mixed case must carry a valid EIP-55 checksum.
pub fn parse_address(input: &str) -> Result<Address, AddressError> {
    let input = input.trim();
    let address =
        Address::from_str(input).map_err(|err| AddressError::Malformed(err.to_string()))?;

    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper && &address.to_checksum(None)[2..] != digits {
        return Err(AddressError::BadChecksum);
    }

    Ok(address)
}
