use bank_types::Amount;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("insufficient funds: account {account} has {available}{denom}, needs {needed}{denom}")]
    InsufficientFunds {
        account: String,
        denom: String,
        needed: Amount,
        available: Amount,
    },

    #[error("insufficient supply of {denom}: tracked {available}, needs {needed}")]
    InsufficientSupply {
        denom: String,
        needed: Amount,
        available: Amount,
    },

    #[error("module {module} is not authorized to mint {denom}")]
    UnauthorizedDenom { module: String, denom: String },

    #[error("transfers of {0} are disabled")]
    SendDisabled(String),

    #[error("invalid denom metadata: {0}")]
    InvalidMetadata(String),

    #[error("amount overflow for {0}")]
    AmountOverflow(String),

    /// Supply and balances disagree. Signals a bug, never user error.
    #[error("ledger consistency fault: {0}")]
    ConsistencyFault(String),

    #[error("storage error: {0}")]
    Storage(#[from] bank_store::StoreError),
}

impl LedgerError {
    /// Whether the ledger should be considered corrupt after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LedgerError::ConsistencyFault(_))
    }
}
