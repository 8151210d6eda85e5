//! Vesting locks for spendable-balance queries.
//!
//! The bank never owns vesting state. It asks a [`VestingOracle`] which coins
//! of an account are locked at a given time and subtracts them from the
//! account's balance. This crate defines that interface plus reference
//! schedules (continuous, delayed, periodic) and an in-memory registry that
//! implements the oracle.

pub mod error;
pub mod oracle;
pub mod registry;
pub mod schedule;

pub use error::VestingError;
pub use oracle::{NoVesting, VestingOracle};
pub use registry::VestingRegistry;
pub use schedule::{Period, VestingSchedule};
