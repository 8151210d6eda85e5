//! Supply storage trait.

use crate::StoreError;
use bank_types::{Amount, Coin, Coins, Denom};

/// Total issued amount per denom. Zero supply is never stored.
pub trait SupplyStore {
    /// Supply of `denom`, zero when absent.
    fn get_supply(&self, denom: &Denom) -> Result<Amount, StoreError>;

    /// Up to `limit` supply records in ascending denom order, starting at
    /// `start` (inclusive).
    fn supply_from(&self, start: Option<&Denom>, limit: usize) -> Result<Vec<Coin>, StoreError>;

    /// Number of denoms with non-zero supply.
    fn supply_count(&self) -> Result<u64, StoreError>;

    /// Write a single supply record. Zero removes it.
    fn set_supply(&self, denom: &Denom, amount: Amount) -> Result<(), StoreError>;

    /// Supply of every denom.
    fn get_total_supply(&self) -> Result<Coins, StoreError> {
        let coins = self.supply_from(None, usize::MAX)?;
        Coins::from_ordered_scan(coins).map_err(|e| StoreError::Corruption(e.to_string()))
    }
}
