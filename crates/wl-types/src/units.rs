use alloy_primitives::U256;
use alloy_primitives::utils::format_ether as format_ether_padded;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity must be a 0x-prefixed hex string")]
    MissingPrefix,
    #[error("quantity has no digits")]
    Empty,
    #[error("quantity is not a 256-bit hex integer: {0}")]
    Invalid(String),
}

/// Parses a JSON-RPC hex quantity such as `0xde0b6b3a7640000`.
pub fn parse_quantity(raw: &str) -> Result<U256, QuantityError> {
    let digits = raw
        .trim()
        .strip_prefix("0x")
        .ok_or(QuantityError::MissingPrefix)?;
    if digits.is_empty() {
        return Err(QuantityError::Empty);
    }
    U256::from_str_radix(digits, 16).map_err(|err| QuantityError::Invalid(err.to_string()))
}

/// Renders a wei amount as a decimal ether string with trailing fractional
/// zeros dropped, so one ether renders as `"1"` and half an ether as `"0.5"`.
pub fn format_ether(wei: U256) -> String {
    let padded = format_ether_padded(wei);
    if !padded.contains('.') {
        return padded;
    }
    padded
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}
