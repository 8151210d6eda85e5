//! Opaque account identifiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// An account identifier issued by the hosting application.
///
/// The bank never interprets the bytes. The textual form is lowercase hex.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(Vec<u8>);

impl AccountId {
    /// Longest identifier accepted; the length must fit the one-byte prefix
    /// used in composite storage keys.
    pub const MAX_LEN: usize = 255;

    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, TypesError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(TypesError::InvalidAccount("empty".into()));
        }
        if bytes.len() > Self::MAX_LEN {
            return Err(TypesError::InvalidAccount(format!(
                "length {} exceeds {}",
                bytes.len(),
                Self::MAX_LEN
            )));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl FromStr for AccountId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TypesError::InvalidAccount("empty".into()));
        }
        let bytes = hex::decode(s).map_err(|e| TypesError::InvalidAccount(format!("{s}: {e}")))?;
        Self::new(bytes)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_hex())
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let id = AccountId::new(vec![0xAB, 0x01, 0xFF]).unwrap();
        assert_eq!(id.to_string(), "ab01ff");
        assert_eq!("ab01ff".parse::<AccountId>().unwrap(), id);
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert!(AccountId::new(Vec::new()).is_err());
        assert!(AccountId::new(vec![1u8; 256]).is_err());
        assert!(AccountId::new(vec![1u8; 255]).is_ok());
        assert!("".parse::<AccountId>().is_err());
        assert!("not-hex".parse::<AccountId>().is_err());
    }
}
