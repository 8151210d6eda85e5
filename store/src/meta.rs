//! Parameter and bookkeeping storage traits.

use crate::StoreError;
use bank_types::Params;

/// Storage for the bank parameters.
pub trait ParamsStore {
    /// `None` until parameters are first written.
    fn get_params(&self) -> Result<Option<Params>, StoreError>;

    fn put_params(&self, params: &Params) -> Result<(), StoreError>;
}

/// Trait for storing database metadata (schema version and similar).
///
/// A generic key-value store for internal bookkeeping that doesn't belong in
/// any domain-specific store.
pub trait MetaStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Current schema version; 0 for a fresh database.
    fn get_schema_version(&self) -> Result<u32, StoreError> {
        match self.get_meta(SCHEMA_VERSION_KEY)? {
            None => Ok(0),
            Some(bytes) => {
                let arr: [u8; 4] = bytes.as_slice().try_into().map_err(|_| {
                    StoreError::Corruption("schema version is not 4 bytes".into())
                })?;
                Ok(u32::from_be_bytes(arr))
            }
        }
    }

    fn set_schema_version(&self, version: u32) -> Result<(), StoreError> {
        self.put_meta(SCHEMA_VERSION_KEY, &version.to_be_bytes())
    }
}

pub const SCHEMA_VERSION_KEY: &str = "schema_version";
