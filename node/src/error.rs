use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("ledger error: {0}")]
    Ledger(#[from] bank_ledger::LedgerError),

    #[error("query error: {0}")]
    Query(#[from] bank_query::QueryError),

    #[error("store error: {0}")]
    Store(#[from] bank_store::StoreError),

    #[error("LMDB error: {0}")]
    Lmdb(#[from] bank_store_lmdb::LmdbError),

    #[error("vesting error: {0}")]
    Vesting(#[from] bank_vesting::VestingError),

    #[error("config error: {0}")]
    Config(String),

    #[error("genesis error: {0}")]
    Genesis(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
