use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainIdError {
    #[error("chain id is empty")]
    Empty,
    #[error("chain id `{0}` is not a hex or decimal integer")]
    Invalid(String),
}

/// Numeric chain identifier.
///
/// Providers report chain ids as `0x`-prefixed hex strings with no fixed
/// casing. Parsing normalizes them, so `0xAA36A7` and `0xaa36a7` are equal.
/// Bare decimal strings are accepted for providers that still emit them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainId(u64);

impl ChainId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Canonical lowercase hex form, as sent in wallet requests.
    pub fn to_hex(self) -> String {
        format!("{:#x}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = ChainIdError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ChainIdError::Empty);
        }

        let parsed = match input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
            Some(digits) => u64::from_str_radix(digits, 16),
            None => input.parse::<u64>(),
        };

        parsed
            .map(Self)
            .map_err(|_| ChainIdError::Invalid(input.to_owned()))
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Debug for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainId({:#x})", self.0)
    }
}

impl Serialize for ChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
