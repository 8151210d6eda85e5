//! Atomic batch commits.
//!
//! A [`WriteBatch`] is applied inside one LMDB write transaction. If any
//! operation fails the transaction is dropped without committing, which
//! aborts it, so nothing from the batch becomes visible.

use heed::RwTxn;

use bank_store::{BankStore, StoreError, WriteBatch, WriteOp};
use bank_types::{AccountId, Amount, Denom, DenomMetadata, Params};

use crate::keys::balance_key;
use crate::meta::PARAMS_KEY;
use crate::{LmdbEnvironment, LmdbError};

pub(crate) fn put_balance(
    env: &LmdbEnvironment,
    txn: &mut RwTxn<'_>,
    account: &AccountId,
    denom: &Denom,
    amount: Amount,
) -> Result<(), LmdbError> {
    let key = balance_key(account, denom);
    if amount.is_zero() {
        env.balances_db.delete(txn, key.as_slice())?;
    } else {
        env.balances_db
            .put(txn, key.as_slice(), amount.to_be_bytes().as_slice())?;
    }
    Ok(())
}

pub(crate) fn put_supply(
    env: &LmdbEnvironment,
    txn: &mut RwTxn<'_>,
    denom: &Denom,
    amount: Amount,
) -> Result<(), LmdbError> {
    if amount.is_zero() {
        env.supply_db.delete(txn, denom.as_bytes())?;
    } else {
        env.supply_db
            .put(txn, denom.as_bytes(), amount.to_be_bytes().as_slice())?;
    }
    Ok(())
}

pub(crate) fn put_metadata(
    env: &LmdbEnvironment,
    txn: &mut RwTxn<'_>,
    metadata: &DenomMetadata,
) -> Result<(), LmdbError> {
    let bytes = bincode::serialize(metadata)?;
    env.metadata_db
        .put(txn, metadata.base.as_bytes(), bytes.as_slice())?;
    Ok(())
}

fn put_params(env: &LmdbEnvironment, txn: &mut RwTxn<'_>, params: &Params) -> Result<(), LmdbError> {
    let bytes = bincode::serialize(params)?;
    env.meta_db
        .put(txn, PARAMS_KEY.as_bytes(), bytes.as_slice())?;
    Ok(())
}

impl BankStore for LmdbEnvironment {
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let ops = batch.len();
        let mut wtxn = self.env().write_txn().map_err(LmdbError::from)?;
        for op in batch.ops() {
            match op {
                WriteOp::Balance {
                    account,
                    denom,
                    amount,
                } => put_balance(self, &mut wtxn, account, denom, *amount)?,
                WriteOp::Supply { denom, amount } => put_supply(self, &mut wtxn, denom, *amount)?,
                WriteOp::Metadata(md) => put_metadata(self, &mut wtxn, md)?,
                WriteOp::Params(params) => put_params(self, &mut wtxn, params)?,
            }
        }
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::trace!(ops, "committed write batch");
        Ok(())
    }
}
