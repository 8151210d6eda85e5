//! Coins and coin sets.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Amount, Denom, TypesError};

/// A single (denom, amount) pair. May carry a zero amount.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: Denom,
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: Denom, amount: impl Into<Amount>) -> Self {
        Self {
            denom,
            amount: amount.into(),
        }
    }

    /// A coin with zero amount.
    pub fn zero(denom: Denom) -> Self {
        Self {
            denom,
            amount: Amount::ZERO,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = TypesError;

    /// Parse `<amount><denom>`, e.g. `50foo`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| TypesError::InvalidCoin(s.to_string()))?;
        let (amount, denom) = s.split_at(split);
        if amount.is_empty() {
            return Err(TypesError::InvalidCoin(s.to_string()));
        }
        Ok(Self {
            denom: denom.parse()?,
            amount: amount.parse()?,
        })
    }
}

/// A coin set: sorted by denom, unique denoms, no zero amounts.
///
/// Every constructor upholds the invariant, so any `Coins` observed by a
/// caller is already in canonical form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build a coin set from arbitrary input: zero amounts are dropped and the
    /// rest sorted. Two entries with the same denom are an error.
    pub fn new(coins: impl IntoIterator<Item = Coin>) -> Result<Self, TypesError> {
        let mut coins: Vec<Coin> = coins.into_iter().filter(|c| !c.is_zero()).collect();
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        if let Some(w) = coins.windows(2).find(|w| w[0].denom == w[1].denom) {
            return Err(TypesError::DuplicateDenom(w[0].denom.to_string()));
        }
        Ok(Self(coins))
    }

    /// Build a coin set from entries already in canonical order, such as a
    /// storage scan. Zero amounts are still dropped.
    pub(crate) fn from_sorted(coins: Vec<Coin>) -> Self {
        Self(coins.into_iter().filter(|c| !c.is_zero()).collect())
    }

    /// Build a coin set from a store scan.
    ///
    /// Returns an error instead of silently reordering if the scan was not
    /// strictly ascending.
    pub fn from_ordered_scan(coins: Vec<Coin>) -> Result<Self, TypesError> {
        if let Some(w) = coins.windows(2).find(|w| w[0].denom >= w[1].denom) {
            return Err(TypesError::InvalidCoin(format!(
                "scan out of order at {} -> {}",
                w[0].denom, w[1].denom
            )));
        }
        Ok(Self::from_sorted(coins))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the set holds nothing. Equivalent to [`Coins::is_empty`].
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Coin] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Coin> {
        self.0
    }

    pub fn denoms(&self) -> impl Iterator<Item = &Denom> {
        self.0.iter().map(|c| &c.denom)
    }

    /// Amount held for `denom`, zero if absent.
    pub fn amount_of(&self, denom: &str) -> Amount {
        self.0
            .binary_search_by(|c| c.denom.as_str().cmp(denom))
            .map(|i| self.0[i].amount)
            .unwrap_or(Amount::ZERO)
    }

    /// Denom-wise sum.
    pub fn checked_add(&self, other: &Coins) -> Result<Coins, TypesError> {
        let mut out = Vec::with_capacity(self.len() + other.len());
        let (mut a, mut b) = (self.0.iter().peekable(), other.0.iter().peekable());
        loop {
            let next = match (a.peek(), b.peek()) {
                (Some(x), Some(y)) => match x.denom.cmp(&y.denom) {
                    std::cmp::Ordering::Less => a.next().cloned(),
                    std::cmp::Ordering::Greater => b.next().cloned(),
                    std::cmp::Ordering::Equal => {
                        let amount = x
                            .amount
                            .checked_add(y.amount)
                            .ok_or_else(|| TypesError::Overflow(x.denom.to_string()))?;
                        let denom = x.denom.clone();
                        a.next();
                        b.next();
                        Some(Coin { denom, amount })
                    }
                },
                (Some(_), None) => a.next().cloned(),
                (None, Some(_)) => b.next().cloned(),
                (None, None) => break,
            };
            out.extend(next);
        }
        Ok(Coins(out))
    }

    /// Denom-wise difference. `None` if any denom would go negative.
    pub fn checked_sub(&self, other: &Coins) -> Option<Coins> {
        let mut out = self.0.clone();
        for coin in &other.0 {
            let i = out.binary_search_by(|c| c.denom.cmp(&coin.denom)).ok()?;
            out[i].amount = out[i].amount.checked_sub(coin.amount)?;
        }
        Some(Self::from_sorted(out))
    }

    /// Denom-wise difference clamped at zero; denoms that drop to zero vanish.
    pub fn saturating_sub(&self, other: &Coins) -> Coins {
        Self::from_sorted(
            self.0
                .iter()
                .map(|c| Coin {
                    denom: c.denom.clone(),
                    amount: c.amount.saturating_sub(other.amount_of(c.denom.as_str())),
                })
                .collect(),
        )
    }

    /// Whether every denom in `other` is covered by this set.
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other.iter().all(|c| self.amount_of(c.denom.as_str()) >= c.amount)
    }
}

impl IntoIterator for Coins {
    type Item = Coin;
    type IntoIter = std::vec::IntoIter<Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = TypesError;

    fn try_from(coins: Vec<Coin>) -> Result<Self, Self::Error> {
        Self::new(coins)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
        }
        Ok(())
    }
}

impl FromStr for Coins {
    type Err = TypesError;

    /// Parse a comma-separated list such as `10atom,5foo`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::empty());
        }
        let coins = s
            .split(',')
            .map(str::parse)
            .collect::<Result<Vec<Coin>, _>>()?;
        Self::new(coins)
    }
}

impl<'de> Deserialize<'de> for Coins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let coins = Vec::<Coin>::deserialize(deserializer)?;
        Self::new(coins).map_err(serde::de::Error::custom)
    }
}
