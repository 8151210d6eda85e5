//! In-memory registry of vesting schedules.

use std::collections::HashMap;
use std::sync::RwLock;

use bank_types::{AccountId, Coins, Timestamp};

use crate::{VestingError, VestingOracle, VestingSchedule};

/// Vesting schedules keyed by account. Implements [`VestingOracle`].
#[derive(Default)]
pub struct VestingRegistry {
    schedules: RwLock<HashMap<AccountId, VestingSchedule>>,
}

impl VestingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a schedule to `account`, replacing any previous one.
    pub fn insert(&self, account: AccountId, schedule: VestingSchedule) -> Result<(), VestingError> {
        schedule.validate()?;
        tracing::debug!(
            account = %account,
            original = %schedule.original(),
            end = %schedule.end_time(),
            "registered vesting schedule"
        );
        self.schedules
            .write()
            .map_err(|_| VestingError::Poisoned)?
            .insert(account, schedule);
        Ok(())
    }

    pub fn remove(&self, account: &AccountId) -> Result<Option<VestingSchedule>, VestingError> {
        Ok(self
            .schedules
            .write()
            .map_err(|_| VestingError::Poisoned)?
            .remove(account))
    }

    pub fn get(&self, account: &AccountId) -> Option<VestingSchedule> {
        self.schedules.read().ok()?.get(account).cloned()
    }

    pub fn len(&self) -> usize {
        self.schedules.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VestingOracle for VestingRegistry {
    fn locked_coins(&self, account: &AccountId, at: Timestamp) -> Coins {
        self.get(account)
            .map(|schedule| schedule.locked_coins(at))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(b: u8) -> AccountId {
        AccountId::new(vec![b; 20]).unwrap()
    }

    #[test]
    fn unknown_account_has_nothing_locked() {
        let registry = VestingRegistry::new();
        assert!(registry.locked_coins(&account(1), Timestamp::new(0)).is_empty());
    }

    #[test]
    fn registered_schedule_is_consulted() {
        let registry = VestingRegistry::new();
        registry
            .insert(
                account(1),
                VestingSchedule::Delayed {
                    original: "10foo".parse().unwrap(),
                    end: Timestamp::new(100),
                },
            )
            .unwrap();
        assert_eq!(
            registry.locked_coins(&account(1), Timestamp::new(50)).to_string(),
            "10foo"
        );
        assert!(registry.locked_coins(&account(2), Timestamp::new(50)).is_empty());

        registry.remove(&account(1)).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn invalid_schedule_rejected() {
        let registry = VestingRegistry::new();
        let result = registry.insert(
            account(1),
            VestingSchedule::Continuous {
                original: "10foo".parse().unwrap(),
                start: Timestamp::new(5),
                end: Timestamp::new(1),
            },
        );
        assert!(result.is_err());
        assert!(registry.is_empty());
    }
}
