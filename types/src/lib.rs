//! Fundamental types for the bank ledger.
//!
//! This crate defines the value types shared across every other crate in the
//! workspace: account identifiers, denominations, amounts, coin sets,
//! denomination metadata, parameters and timestamps.

pub mod account;
pub mod amount;
pub mod coin;
pub mod denom;
pub mod error;
pub mod metadata;
pub mod params;
pub mod time;

pub use account::AccountId;
pub use amount::Amount;
pub use coin::{Coin, Coins};
pub use denom::{validate_denom, Denom, FactoryDenom};
pub use error::TypesError;
pub use metadata::{DenomMetadata, DenomUnit};
pub use params::{Params, SendEnabled};
pub use time::Timestamp;
