use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use data_encoding::HEXLOWER_PERMISSIVE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of raw bytes in a voter identity.
pub const IDENTITY_LENGTH: usize = 20;

const PREFIX: &str = "0x";

/// An address-like voter identity: 20 bytes, written as `0x` followed by 40 hex digits.
///
/// Parsing accepts either case; the canonical (displayed and serialized) form is lower-case,
/// so two spellings of the same address always compare equal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct VoterId([u8; IDENTITY_LENGTH]);

/// Reasons a string cannot be read as a [`VoterId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Identity must start with `0x`: {0}")]
    MissingPrefix(String),
    #[error("Identity must have {expected} hex digits, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("Identity contains non-hex characters: {0}")]
    NotHex(String),
}

impl VoterId {
    pub const fn from_bytes(bytes: [u8; IDENTITY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; IDENTITY_LENGTH] {
        &self.0
    }
}

impl FromStr for VoterId {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(PREFIX)
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| IdentityError::MissingPrefix(s.to_string()))?;
        if digits.len() != IDENTITY_LENGTH * 2 {
            return Err(IdentityError::WrongLength {
                expected: IDENTITY_LENGTH * 2,
                actual: digits.len(),
            });
        }

        let mut bytes = [0_u8; IDENTITY_LENGTH];
        HEXLOWER_PERMISSIVE
            .decode_mut(digits.as_bytes(), &mut bytes)
            .map_err(|_| IdentityError::NotHex(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for VoterId {
    type Error = IdentityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<VoterId> for String {
    fn from(id: VoterId) -> Self {
        id.to_string()
    }
}

impl Display for VoterId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{PREFIX}{}", HEXLOWER_PERMISSIVE.encode(&self.0))
    }
}

impl Debug for VoterId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "VoterId({self})")
    }
}

/// Example identities for tests.
#[cfg(any(test, feature = "examples"))]
mod examples {
    use super::*;

    impl VoterId {
        /// A deterministic identity whose last byte is `n`.
        pub fn example(n: u8) -> Self {
            let mut bytes = [0_u8; IDENTITY_LENGTH];
            bytes[0] = 0xab;
            bytes[IDENTITY_LENGTH - 1] = n;
            Self(bytes)
        }
    }
}
