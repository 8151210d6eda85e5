//! Denomination identifiers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

pub const MIN_DENOM_LEN: usize = 3;
pub const MAX_DENOM_LEN: usize = 128;

/// Prefix of denoms created through the token factory.
pub const FACTORY_PREFIX: &str = "factory";

/// A validated, case-sensitive denomination.
///
/// Syntax: an ASCII letter followed by 2..=127 characters from ASCII
/// alphanumerics and `/ : . _ -`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Denom(String);

impl Denom {
    pub fn new(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        validate_denom(&s)?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Rebuild a denom from a storage key or pagination cursor.
    pub fn from_key_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        let s = std::str::from_utf8(bytes)
            .map_err(|_| TypesError::InvalidDenom("key is not valid UTF-8".into()))?;
        Self::new(s)
    }
}

/// Check a denom string against the denomination syntax.
pub fn validate_denom(s: &str) -> Result<(), TypesError> {
    if s.len() < MIN_DENOM_LEN || s.len() > MAX_DENOM_LEN {
        return Err(TypesError::InvalidDenom(format!(
            "{s:?}: length must be between {MIN_DENOM_LEN} and {MAX_DENOM_LEN}"
        )));
    }
    let mut chars = s.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
        return Err(TypesError::InvalidDenom(format!("{s:?}: must start with a letter")));
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || "/:._-".contains(*c))) {
        return Err(TypesError::InvalidDenom(format!("{s:?}: invalid character {bad:?}")));
    }
    Ok(())
}

impl FromStr for Denom {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Borrow<str> for Denom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Denom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Denom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Denom {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

/// A token-factory denom of the form `factory/<creator>/<subdenom>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryDenom {
    pub creator: String,
    pub subdenom: String,
}

impl FactoryDenom {
    /// Split a denom into its creator and subdenom parts.
    ///
    /// The subdenom may itself contain `/`.
    pub fn parse(denom: &str) -> Result<Self, TypesError> {
        validate_denom(denom)?;
        let mut parts = denom.splitn(3, '/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(FACTORY_PREFIX), Some(creator), Some(subdenom))
                if !creator.is_empty() && !subdenom.is_empty() =>
            {
                Ok(Self {
                    creator: creator.to_string(),
                    subdenom: subdenom.to_string(),
                })
            }
            _ => Err(TypesError::InvalidDenom(format!(
                "{denom:?}: not a {FACTORY_PREFIX}/<creator>/<subdenom> denom"
            ))),
        }
    }

    pub fn to_denom_string(&self) -> String {
        format!("{FACTORY_PREFIX}/{}/{}", self.creator, self.subdenom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_denoms() {
        for d in ["atom", "uatom", "wei", "ibc/27394FB0", "factory/abc/NEWCOIN", "a.b:c_d-e"] {
            assert!(Denom::new(d).is_ok(), "{d} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_denoms() {
        for d in ["", "ab", "1atom", "-atom", "at om", "atom!", &"a".repeat(129)] {
            assert!(Denom::new(d).is_err(), "{d:?} should be invalid");
        }
    }

    #[test]
    fn denoms_are_case_sensitive() {
        assert_ne!(Denom::new("ATOM").unwrap(), Denom::new("atom").unwrap());
    }

    #[test]
    fn factory_denom_parsing() {
        let fd = FactoryDenom::parse("factory/sei1gxskuzvhr4s8/NEWCOIN").unwrap();
        assert_eq!(fd.creator, "sei1gxskuzvhr4s8");
        assert_eq!(fd.subdenom, "NEWCOIN");
        assert_eq!(fd.to_denom_string(), "factory/sei1gxskuzvhr4s8/NEWCOIN");

        let nested = FactoryDenom::parse("factory/abc/pool/lp").unwrap();
        assert_eq!(nested.subdenom, "pool/lp");

        assert!(FactoryDenom::parse("uatom").is_err());
        assert!(FactoryDenom::parse("factory/abc").is_err());
        assert!(FactoryDenom::parse("factory//coin").is_err());
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<Denom>("\"uatom\"").is_ok());
        assert!(serde_json::from_str::<Denom>("\"9x\"").is_err());
    }
}
