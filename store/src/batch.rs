//! Write batches, the unit of atomicity for ledger mutations.
//!
//! A batch is built in memory by the ledger and handed to
//! [`BankStore::commit`](crate::BankStore::commit), which applies every
//! operation in a single backend transaction. Readers observe either none or
//! all of a batch. Operations are applied in order, so a later write to the
//! same key wins.

use bank_types::{AccountId, Amount, Denom, DenomMetadata, Params};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOp {
    /// Set a balance; zero deletes the record.
    Balance {
        account: AccountId,
        denom: Denom,
        amount: Amount,
    },
    /// Set a supply; zero deletes the record.
    Supply { denom: Denom, amount: Amount },
    Metadata(DenomMetadata),
    Params(Params),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_balance(&mut self, account: AccountId, denom: Denom, amount: Amount) -> &mut Self {
        self.ops.push(WriteOp::Balance {
            account,
            denom,
            amount,
        });
        self
    }

    pub fn set_supply(&mut self, denom: Denom, amount: Amount) -> &mut Self {
        self.ops.push(WriteOp::Supply { denom, amount });
        self
    }

    pub fn put_metadata(&mut self, metadata: DenomMetadata) -> &mut Self {
        self.ops.push(WriteOp::Metadata(metadata));
        self
    }

    pub fn put_params(&mut self, params: Params) -> &mut Self {
        self.ops.push(WriteOp::Params(params));
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}
