//! Read-only bank queries.
//!
//! Point lookups of balances, supply and metadata plus key-cursor paginated
//! enumeration. Spendable balances subtract whatever a
//! [`VestingOracle`](bank_vesting::VestingOracle) reports as locked.

pub mod error;
pub mod pagination;
pub mod service;
pub mod types;

pub use error::QueryError;
pub use pagination::{PageLimits, PageRequest, PageResponse, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use service::QueryService;
pub use types::*;
