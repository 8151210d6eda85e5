//! Abstract storage traits for the bank ledger.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.

pub mod balance;
pub mod batch;
pub mod error;
pub mod meta;
pub mod metadata;
pub mod supply;

pub use balance::BalanceStore;
pub use batch::{WriteBatch, WriteOp};
pub use error::StoreError;
pub use meta::{MetaStore, ParamsStore};
pub use metadata::MetadataStore;
pub use supply::SupplyStore;

/// A complete bank backend: every store plus atomic batch commits.
///
/// Implementations must apply a committed batch as one unit: a concurrent
/// reader sees the store either entirely before or entirely after it.
pub trait BankStore:
    BalanceStore + SupplyStore + MetadataStore + ParamsStore + Send + Sync
{
    fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;
}
