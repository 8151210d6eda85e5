//! Multi-asset bank ledger.
//!
//! Balances, total supply and denomination metadata live in a
//! [`BankStore`](bank_store::BankStore); the [`Ledger`] is the only writer and
//! keeps total supply equal to the sum of all balances for every denom.

mod changeset;

pub mod authority;
pub mod error;
pub mod genesis;
pub mod invariants;
pub mod ledger;

pub use authority::{AuthorityTable, MintAuthority, PermitAll};
pub use error::LedgerError;
pub use genesis::{GenesisBalance, GenesisState};
pub use invariants::SupplyMismatch;
pub use ledger::{Ledger, Transfer};
