//! Staged ledger mutations.
//!
//! A [`Changeset`] reads through to the store and buffers every write, so a
//! multi-step operation sees its own earlier steps (a transfer from an
//! account to itself, a multi-send touching one account twice). Nothing
//! reaches the store until the ledger commits [`Changeset::into_batch`]; an
//! operation that fails part-way simply drops its changeset.

use std::collections::BTreeMap;

use bank_store::{BalanceStore, BankStore, SupplyStore, WriteBatch};
use bank_types::{AccountId, Amount, Coin, Denom};

use crate::LedgerError;

pub(crate) struct Changeset<'a, S: ?Sized> {
    store: &'a S,
    balances: BTreeMap<(AccountId, Denom), Amount>,
    supply: BTreeMap<Denom, Amount>,
}

impl<'a, S: BankStore + ?Sized> Changeset<'a, S> {
    pub(crate) fn new(store: &'a S) -> Self {
        Self {
            store,
            balances: BTreeMap::new(),
            supply: BTreeMap::new(),
        }
    }

    fn balance(&mut self, account: &AccountId, denom: &Denom) -> Result<Amount, LedgerError> {
        let key = (account.clone(), denom.clone());
        if let Some(amount) = self.balances.get(&key) {
            return Ok(*amount);
        }
        let amount = self.store.get_balance(account, denom)?;
        self.balances.insert(key, amount);
        Ok(amount)
    }

    fn supply(&mut self, denom: &Denom) -> Result<Amount, LedgerError> {
        if let Some(amount) = self.supply.get(denom) {
            return Ok(*amount);
        }
        let amount = self.store.get_supply(denom)?;
        self.supply.insert(denom.clone(), amount);
        Ok(amount)
    }

    /// Remove `coin` from `account`, failing if the balance is short.
    pub(crate) fn debit(&mut self, account: &AccountId, coin: &Coin) -> Result<(), LedgerError> {
        let available = self.balance(account, &coin.denom)?;
        let remaining =
            available
                .checked_sub(coin.amount)
                .ok_or_else(|| LedgerError::InsufficientFunds {
                    account: account.to_string(),
                    denom: coin.denom.to_string(),
                    needed: coin.amount,
                    available,
                })?;
        self.balances
            .insert((account.clone(), coin.denom.clone()), remaining);
        Ok(())
    }

    pub(crate) fn credit(&mut self, account: &AccountId, coin: &Coin) -> Result<(), LedgerError> {
        let current = self.balance(account, &coin.denom)?;
        let updated = current
            .checked_add(coin.amount)
            .ok_or_else(|| LedgerError::AmountOverflow(coin.denom.to_string()))?;
        self.balances
            .insert((account.clone(), coin.denom.clone()), updated);
        Ok(())
    }

    pub(crate) fn mint(&mut self, coin: &Coin) -> Result<(), LedgerError> {
        let current = self.supply(&coin.denom)?;
        let updated = current
            .checked_add(coin.amount)
            .ok_or_else(|| LedgerError::AmountOverflow(coin.denom.to_string()))?;
        self.supply.insert(coin.denom.clone(), updated);
        Ok(())
    }

    pub(crate) fn burn(&mut self, coin: &Coin) -> Result<(), LedgerError> {
        let available = self.supply(&coin.denom)?;
        let remaining =
            available
                .checked_sub(coin.amount)
                .ok_or_else(|| LedgerError::InsufficientSupply {
                    denom: coin.denom.to_string(),
                    needed: coin.amount,
                    available,
                })?;
        self.supply.insert(coin.denom.clone(), remaining);
        Ok(())
    }

    /// Every staged write, balances first. Values that were only read are
    /// written back unchanged.
    pub(crate) fn into_batch(self) -> WriteBatch {
        let mut batch = WriteBatch::new();
        for ((account, denom), amount) in self.balances {
            batch.set_balance(account, denom, amount);
        }
        for (denom, amount) in self.supply {
            batch.set_supply(denom, amount);
        }
        batch
    }
}
