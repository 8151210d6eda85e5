//! Bank node: configuration, logging, store selection and wiring of the
//! ledger, query service and vesting registry.

pub mod config;
pub mod error;
pub mod logging;
pub mod node;

pub use config::{BankConfig, MintAuthorityEntry, StoreBackend};
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use node::{genesis_to_json, load_genesis, BankNode};
