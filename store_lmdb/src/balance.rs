//! LMDB implementation of BalanceStore.

use std::ops::Bound;

use bank_store::{BalanceStore, StoreError};
use bank_types::{AccountId, Amount, Coin, Denom};

use crate::keys::{account_prefix, balance_key, decode_amount, decode_coin, increment_prefix, split_balance_key};
use crate::{LmdbEnvironment, LmdbError};

impl BalanceStore for LmdbEnvironment {
    fn get_balance(&self, account: &AccountId, denom: &Denom) -> Result<Amount, StoreError> {
        let rtxn = self.env().read_txn().map_err(LmdbError::from)?;
        let key = balance_key(account, denom);
        match self.balances_db.get(&rtxn, key.as_slice()).map_err(LmdbError::from)? {
            Some(val) => Ok(decode_amount(val)?),
            None => Ok(Amount::ZERO),
        }
    }

    fn balances_from(
        &self,
        account: &AccountId,
        start: Option<&Denom>,
        limit: usize,
    ) -> Result<Vec<Coin>, StoreError> {
        let prefix = account_prefix(account);
        let lower = match start {
            Some(denom) => balance_key(account, denom),
            None => prefix.clone(),
        };
        let mut upper = prefix.clone();
        let upper_bound = if increment_prefix(&mut upper) {
            Bound::Excluded(upper.as_slice())
        } else {
            Bound::Unbounded
        };

        let rtxn = self.env().read_txn().map_err(LmdbError::from)?;
        let bounds = (Bound::Included(lower.as_slice()), upper_bound);
        let iter = self
            .balances_db
            .range(&rtxn, &bounds)
            .map_err(LmdbError::from)?;

        let mut coins = Vec::new();
        for result in iter.take(limit) {
            let (key, val) = result.map_err(LmdbError::from)?;
            coins.push(decode_coin(&key[prefix.len()..], val)?);
        }
        Ok(coins)
    }

    fn balance_count(&self, account: &AccountId) -> Result<u64, StoreError> {
        let prefix = account_prefix(account);
        let mut upper = prefix.clone();
        let upper_bound = if increment_prefix(&mut upper) {
            Bound::Excluded(upper.as_slice())
        } else {
            Bound::Unbounded
        };

        let rtxn = self.env().read_txn().map_err(LmdbError::from)?;
        let bounds = (Bound::Included(prefix.as_slice()), upper_bound);
        let mut count = 0u64;
        for result in self
            .balances_db
            .range(&rtxn, &bounds)
            .map_err(LmdbError::from)?
        {
            result.map_err(LmdbError::from)?;
            count += 1;
        }
        Ok(count)
    }

    fn iter_balances(&self) -> Result<Vec<(AccountId, Coin)>, StoreError> {
        let rtxn = self.env().read_txn().map_err(LmdbError::from)?;
        let mut out = Vec::new();
        for result in self.balances_db.iter(&rtxn).map_err(LmdbError::from)? {
            let (key, val) = result.map_err(LmdbError::from)?;
            let (account, denom) = split_balance_key(key)?;
            out.push((account, Coin::new(denom, decode_amount(val)?)));
        }
        Ok(out)
    }

    fn set_balance(
        &self,
        account: &AccountId,
        denom: &Denom,
        amount: Amount,
    ) -> Result<(), StoreError> {
        let mut wtxn = self.env().write_txn().map_err(LmdbError::from)?;
        crate::write_batch::put_balance(self, &mut wtxn, account, denom, amount)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
