//! The vesting oracle interface.

use std::sync::Arc;

use bank_types::{AccountId, Coins, Timestamp};

/// Reports the coins of an account that are locked at a point in time.
///
/// Called read-only by spendable-balance queries. An account without a
/// schedule has nothing locked.
pub trait VestingOracle: Send + Sync {
    fn locked_coins(&self, account: &AccountId, at: Timestamp) -> Coins;
}

/// An oracle for ledgers without vesting: nothing is ever locked.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoVesting;

impl VestingOracle for NoVesting {
    fn locked_coins(&self, _account: &AccountId, _at: Timestamp) -> Coins {
        Coins::empty()
    }
}

impl<T: VestingOracle + ?Sized> VestingOracle for Arc<T> {
    fn locked_coins(&self, account: &AccountId, at: Timestamp) -> Coins {
        (**self).locked_coins(account, at)
    }
}
