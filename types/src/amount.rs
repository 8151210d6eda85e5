//! Token amounts.
//!
//! Amounts are unsigned 256-bit integers. They serialize as decimal strings so
//! that clients in languages without native big integers never lose precision.

use primitive_types::{U256, U512};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// A non-negative token amount.
///
/// All arithmetic is checked: overflow and underflow surface as `None`
/// instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(U256);

impl Amount {
    pub const ZERO: Self = Self(U256::zero());

    /// Width of the big-endian encoding used by storage backends.
    pub const BYTES: usize = 32;

    pub fn new(value: U256) -> Self {
        Self(value)
    }

    pub fn from_u128(value: u128) -> Self {
        Self(U256::from(value))
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// `self * numerator / denominator`, rounded down.
    ///
    /// The product is computed in 512 bits so it cannot overflow; `None` is
    /// returned only for a zero denominator or a quotient wider than 256 bits.
    pub fn mul_div_floor(self, numerator: u64, denominator: u64) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let product: U512 = self.0.full_mul(U256::from(numerator));
        let quotient = product / U512::from(denominator);
        U256::try_from(quotient).ok().map(Self)
    }

    pub fn to_be_bytes(&self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        self.0.to_big_endian(&mut out);
        out
    }

    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        if bytes.len() != Self::BYTES {
            return Err(TypesError::InvalidAmount(format!(
                "expected {} bytes, got {}",
                Self::BYTES,
                bytes.len()
            )));
        }
        Ok(Self(U256::from_big_endian(bytes)))
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl FromStr for Amount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypesError::InvalidAmount(s.to_string()));
        }
        U256::from_dec_str(s)
            .map(Self)
            .map_err(|_| TypesError::InvalidAmount(s.to_string()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
