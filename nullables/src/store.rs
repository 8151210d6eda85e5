//! Nullable store: a thread-safe in-memory bank backend.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use bank_store::{
    BalanceStore, BankStore, MetaStore, MetadataStore, ParamsStore, StoreError, SupplyStore,
    WriteBatch, WriteOp,
};
use bank_types::{AccountId, Amount, Coin, Denom, DenomMetadata, Params};

#[derive(Default)]
struct State {
    balances: BTreeMap<AccountId, BTreeMap<Denom, Amount>>,
    supply: BTreeMap<Denom, Amount>,
    metadata: BTreeMap<String, DenomMetadata>,
    params: Option<Params>,
    meta: BTreeMap<String, Vec<u8>>,
}

impl State {
    fn set_balance(&mut self, account: &AccountId, denom: &Denom, amount: Amount) {
        if amount.is_zero() {
            if let Some(inner) = self.balances.get_mut(account) {
                inner.remove(denom);
                if inner.is_empty() {
                    self.balances.remove(account);
                }
            }
        } else {
            self.balances
                .entry(account.clone())
                .or_default()
                .insert(denom.clone(), amount);
        }
    }

    fn set_supply(&mut self, denom: &Denom, amount: Amount) {
        if amount.is_zero() {
            self.supply.remove(denom);
        } else {
            self.supply.insert(denom.clone(), amount);
        }
    }

    fn apply(&mut self, op: WriteOp) {
        match op {
            WriteOp::Balance {
                account,
                denom,
                amount,
            } => self.set_balance(&account, &denom, amount),
            WriteOp::Supply { denom, amount } => self.set_supply(&denom, amount),
            WriteOp::Metadata(md) => {
                self.metadata.insert(md.base.clone(), md);
            }
            WriteOp::Params(params) => self.params = Some(params),
        }
    }
}

/// An in-memory bank store backed by ordered maps.
///
/// A single `RwLock` guards the whole state, so a committed batch is visible
/// to readers all at once.
#[derive(Default)]
pub struct NullStore {
    state: RwLock<State>,
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Backend("null store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Backend("null store lock poisoned".into()))
    }
}

fn lower_bound<T: ?Sized>(start: Option<&T>) -> (Bound<&T>, Bound<&T>) {
    match start {
        Some(s) => (Bound::Included(s), Bound::Unbounded),
        None => (Bound::Unbounded, Bound::Unbounded),
    }
}

impl BalanceStore for NullStore {
    fn get_balance(&self, account: &AccountId, denom: &Denom) -> Result<Amount, StoreError> {
        Ok(self
            .read()?
            .balances
            .get(account)
            .and_then(|inner| inner.get(denom))
            .copied()
            .unwrap_or(Amount::ZERO))
    }

    fn balances_from(
        &self,
        account: &AccountId,
        start: Option<&Denom>,
        limit: usize,
    ) -> Result<Vec<Coin>, StoreError> {
        let state = self.read()?;
        let Some(inner) = state.balances.get(account) else {
            return Ok(Vec::new());
        };
        Ok(inner
            .range::<Denom, _>(lower_bound(start))
            .take(limit)
            .map(|(denom, amount)| Coin::new(denom.clone(), *amount))
            .collect())
    }

    fn balance_count(&self, account: &AccountId) -> Result<u64, StoreError> {
        Ok(self
            .read()?
            .balances
            .get(account)
            .map_or(0, |inner| inner.len() as u64))
    }

    fn iter_balances(&self) -> Result<Vec<(AccountId, Coin)>, StoreError> {
        let state = self.read()?;
        Ok(state
            .balances
            .iter()
            .flat_map(|(account, inner)| {
                inner
                    .iter()
                    .map(move |(denom, amount)| (account.clone(), Coin::new(denom.clone(), *amount)))
            })
            .collect())
    }

    fn set_balance(
        &self,
        account: &AccountId,
        denom: &Denom,
        amount: Amount,
    ) -> Result<(), StoreError> {
        self.write()?.set_balance(account, denom, amount);
        Ok(())
    }
}

impl SupplyStore for NullStore {
    fn get_supply(&self, denom: &Denom) -> Result<Amount, StoreError> {
        Ok(self
            .read()?
            .supply
            .get(denom)
            .copied()
            .unwrap_or(Amount::ZERO))
    }

    fn supply_from(&self, start: Option<&Denom>, limit: usize) -> Result<Vec<Coin>, StoreError> {
        Ok(self
            .read()?
            .supply
            .range::<Denom, _>(lower_bound(start))
            .take(limit)
            .map(|(denom, amount)| Coin::new(denom.clone(), *amount))
            .collect())
    }

    fn supply_count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.supply.len() as u64)
    }

    fn set_supply(&self, denom: &Denom, amount: Amount) -> Result<(), StoreError> {
        self.write()?.set_supply(denom, amount);
        Ok(())
    }
}

impl MetadataStore for NullStore {
    fn get_metadata(&self, base: &str) -> Result<Option<DenomMetadata>, StoreError> {
        Ok(self.read()?.metadata.get(base).cloned())
    }

    fn metadata_from(
        &self,
        start: Option<&str>,
        limit: usize,
    ) -> Result<Vec<DenomMetadata>, StoreError> {
        Ok(self
            .read()?
            .metadata
            .range::<str, _>(lower_bound(start))
            .take(limit)
            .map(|(_, md)| md.clone())
            .collect())
    }

    fn metadata_count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.metadata.len() as u64)
    }

    fn put_metadata(&self, metadata: &DenomMetadata) -> Result<(), StoreError> {
        self.write()?
            .metadata
            .insert(metadata.base.clone(), metadata.clone());
        Ok(())
    }
}

impl ParamsStore for NullStore {
    fn get_params(&self) -> Result<Option<Params>, StoreError> {
        Ok(self.read()?.params.clone())
    }

    fn put_params(&self, params: &Params) -> Result<(), StoreError> {
        self.write()?.params = Some(params.clone());
        Ok(())
    }
}

impl MetaStore for NullStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.write()?.meta.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.read()?.meta.get(key).cloned())
    }
}

impl BankStore for NullStore {
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut state = self.write()?;
        for op in batch.into_ops() {
            state.apply(op);
        }
        Ok(())
    }
}
