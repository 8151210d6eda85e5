//! Balance storage trait.

use crate::StoreError;
use bank_types::{AccountId, Amount, Coin, Coins, Denom};

/// Per-account, per-denom balances.
///
/// Zero balances are never stored: writing zero deletes the record, and a
/// missing record reads as zero. Nothing here checks supply; that is the
/// ledger's job.
pub trait BalanceStore {
    /// Balance of `denom` held by `account`, zero when absent.
    fn get_balance(&self, account: &AccountId, denom: &Denom) -> Result<Amount, StoreError>;

    /// Up to `limit` balances of `account` in ascending denom order, starting
    /// at `start` (inclusive) or at the first denom.
    fn balances_from(
        &self,
        account: &AccountId,
        start: Option<&Denom>,
        limit: usize,
    ) -> Result<Vec<Coin>, StoreError>;

    /// Number of balance records held by `account`.
    fn balance_count(&self, account: &AccountId) -> Result<u64, StoreError>;

    /// Every balance record in the store, ordered by account then denom.
    fn iter_balances(&self) -> Result<Vec<(AccountId, Coin)>, StoreError>;

    /// Write a single balance. Zero removes the record.
    fn set_balance(
        &self,
        account: &AccountId,
        denom: &Denom,
        amount: Amount,
    ) -> Result<(), StoreError>;

    /// All non-zero balances of `account`.
    fn get_all_balances(&self, account: &AccountId) -> Result<Coins, StoreError> {
        let coins = self.balances_from(account, None, usize::MAX)?;
        Coins::from_ordered_scan(coins).map_err(|e| StoreError::Corruption(e.to_string()))
    }
}
