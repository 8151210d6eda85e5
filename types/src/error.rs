//! Parsing and validation errors for the bank's value types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid account identifier: {0}")]
    InvalidAccount(String),

    #[error("invalid denom: {0}")]
    InvalidDenom(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid coin: {0}")]
    InvalidCoin(String),

    #[error("duplicate denom in coin set: {0}")]
    DuplicateDenom(String),

    #[error("amount overflow for denom {0}")]
    Overflow(String),

    #[error("invalid denom metadata: {0}")]
    InvalidMetadata(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),
}
