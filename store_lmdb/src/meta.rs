//! LMDB implementation of ParamsStore and MetaStore.

use bank_store::{MetaStore, ParamsStore, StoreError};
use bank_types::Params;

use crate::{LmdbEnvironment, LmdbError};

pub(crate) const PARAMS_KEY: &str = "params";

impl ParamsStore for LmdbEnvironment {
    fn get_params(&self) -> Result<Option<Params>, StoreError> {
        match self.get_meta(PARAMS_KEY)? {
            Some(bytes) => {
                let params: Params = bincode::deserialize(&bytes).map_err(LmdbError::from)?;
                Ok(Some(params))
            }
            None => Ok(None),
        }
    }

    fn put_params(&self, params: &Params) -> Result<(), StoreError> {
        let bytes = bincode::serialize(params).map_err(LmdbError::from)?;
        self.put_meta(PARAMS_KEY, &bytes)
    }
}

impl MetaStore for LmdbEnvironment {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut wtxn = self.env().write_txn().map_err(LmdbError::from)?;
        self.meta_db
            .put(&mut wtxn, key.as_bytes(), value)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env().read_txn().map_err(LmdbError::from)?;
        let val = self
            .meta_db
            .get(&rtxn, key.as_bytes())
            .map_err(LmdbError::from)?
            .map(|v| v.to_vec());
        Ok(val)
    }
}
