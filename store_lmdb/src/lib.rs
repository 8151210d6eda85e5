//! LMDB storage backend for the bank ledger.
//!
//! Implements every storage trait from `bank-store` using the `heed` LMDB
//! bindings. All logical stores live as named databases within a single
//! environment, so one write transaction can span balances and supply.

pub mod balance;
pub mod environment;
pub mod error;
mod keys;
pub mod meta;
pub mod metadata;
pub mod migration;
pub mod supply;
pub mod write_batch;

pub use environment::{LmdbEnvironment, DEFAULT_MAP_SIZE};
pub use error::LmdbError;
pub use migration::{Migrator, CURRENT_SCHEMA_VERSION};
