//! Ethereum address.

use core::{fmt::Write, str::FromStr};

use codec::{Decode, Encode, MaxEncodedLen};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An Ethereum address (i.e. 20 bytes, used to represent an Ethereum account).
///
/// This gets serialized to the 0x-prefixed hex representation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, Default, MaxEncodedLen)]
pub struct EthereumAddress(pub [u8; 20]);

impl EthereumAddress {
    /// The zero address.
    ///
    /// Used as the counterparty of mints and never valid as a balance holder.
    pub const ZERO: Self = Self([0; 20]);

    /// Whether this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 20]
    }
}

impl From<[u8; 20]> for EthereumAddress {
    fn from(value: [u8; 20]) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for EthereumAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Display for EthereumAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("0x")?;
        for hex in rustc_hex::ToHexIter::new(self.0.iter()) {
            f.write_char(hex)?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for EthereumAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(self, f)
    }
}

/// An error that can occur while parsing an [`EthereumAddress`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAddressError {
    /// The hex part was not exactly 40 characters long.
    #[error("bad length of Ethereum address (should be 42 including '0x')")]
    BadLength,
    /// A non-hex character was found.
    #[error("invalid character '{0}' at position {1}, expected 0-9 or a-z or A-Z")]
    InvalidCharacter(char, usize),
}

impl FromStr for EthereumAddress {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() != 40 {
            return Err(ParseAddressError::BadLength);
        }

        let mut to_fill = [0u8; 20];
        for (slot, result) in to_fill.iter_mut().zip(rustc_hex::FromHexIter::new(s)) {
            *slot = result.map_err(|err| match err {
                rustc_hex::FromHexError::InvalidHexCharacter(ch, idx) => {
                    ParseAddressError::InvalidCharacter(ch, idx)
                }
                // We check the length above.
                rustc_hex::FromHexError::InvalidHexLength => ParseAddressError::BadLength,
            })?;
        }
        Ok(EthereumAddress(to_fill))
    }
}

impl Serialize for EthereumAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EthereumAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let base_string = String::deserialize(deserializer)?;
        base_string.parse().map_err(serde::de::Error::custom)
    }
}
