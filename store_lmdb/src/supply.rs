//! LMDB implementation of SupplyStore.

use std::ops::Bound;

use bank_store::{StoreError, SupplyStore};
use bank_types::{Amount, Coin, Denom};

use crate::keys::{decode_amount, decode_coin};
use crate::{LmdbEnvironment, LmdbError};

impl SupplyStore for LmdbEnvironment {
    fn get_supply(&self, denom: &Denom) -> Result<Amount, StoreError> {
        let rtxn = self.env().read_txn().map_err(LmdbError::from)?;
        match self
            .supply_db
            .get(&rtxn, denom.as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(val) => Ok(decode_amount(val)?),
            None => Ok(Amount::ZERO),
        }
    }

    fn supply_from(&self, start: Option<&Denom>, limit: usize) -> Result<Vec<Coin>, StoreError> {
        let lower = match start {
            Some(denom) => Bound::Included(denom.as_bytes()),
            None => Bound::Unbounded,
        };
        let rtxn = self.env().read_txn().map_err(LmdbError::from)?;
        let bounds: (Bound<&[u8]>, Bound<&[u8]>) = (lower, Bound::Unbounded);
        let mut coins = Vec::new();
        for result in self
            .supply_db
            .range(&rtxn, &bounds)
            .map_err(LmdbError::from)?
            .take(limit)
        {
            let (key, val) = result.map_err(LmdbError::from)?;
            coins.push(decode_coin(key, val)?);
        }
        Ok(coins)
    }

    fn supply_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env().read_txn().map_err(LmdbError::from)?;
        let count = self.supply_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count)
    }

    fn set_supply(&self, denom: &Denom, amount: Amount) -> Result<(), StoreError> {
        let mut wtxn = self.env().write_txn().map_err(LmdbError::from)?;
        crate::write_batch::put_supply(self, &mut wtxn, denom, amount)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
