//! Consistency audit between balances and tracked supply.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use bank_store::BankStore;
use bank_types::{Amount, Denom};

use crate::authority::MintAuthority;
use crate::{Ledger, LedgerError};

/// A denom whose balances do not add up to its tracked supply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyMismatch {
    pub denom: Denom,
    pub supply: Amount,
    pub balances: Amount,
}

impl<S, A> Ledger<S, A>
where
    S: BankStore + ?Sized,
    A: MintAuthority,
{
    /// Compare the sum of all balances against the supply of every denom.
    ///
    /// Holds the writer lock for the duration so no mutation lands mid-scan.
    /// An empty result means the store is consistent.
    pub fn check_total_supply(&self) -> Result<Vec<SupplyMismatch>, LedgerError> {
        let _writer = self.lock_writer();
        let store = self.store();

        let mut sums: BTreeMap<Denom, Amount> = BTreeMap::new();
        for (_, coin) in store.iter_balances()? {
            let sum = sums.entry(coin.denom).or_insert(Amount::ZERO);
            *sum = sum
                .checked_add(coin.amount)
                .ok_or_else(|| LedgerError::AmountOverflow("balance sum".into()))?;
        }

        let mut mismatches = Vec::new();
        for coin in store.get_total_supply()? {
            let balances = sums.remove(&coin.denom).unwrap_or(Amount::ZERO);
            if balances != coin.amount {
                mismatches.push(SupplyMismatch {
                    denom: coin.denom,
                    supply: coin.amount,
                    balances,
                });
            }
        }
        // balances held in a denom with no supply record at all
        mismatches.extend(sums.into_iter().map(|(denom, balances)| SupplyMismatch {
            denom,
            supply: Amount::ZERO,
            balances,
        }));

        if mismatches.is_empty() {
            tracing::debug!("supply audit passed");
        } else {
            for m in &mismatches {
                tracing::error!(
                    denom = %m.denom,
                    supply = %m.supply,
                    balances = %m.balances,
                    "supply does not match balances"
                );
            }
        }
        Ok(mismatches)
    }
}
