//! LMDB implementation of MetadataStore.

use std::ops::Bound;

use bank_store::{MetadataStore, StoreError};
use bank_types::DenomMetadata;

use crate::{LmdbEnvironment, LmdbError};

impl MetadataStore for LmdbEnvironment {
    fn get_metadata(&self, base: &str) -> Result<Option<DenomMetadata>, StoreError> {
        let rtxn = self.env().read_txn().map_err(LmdbError::from)?;
        match self
            .metadata_db
            .get(&rtxn, base.as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(val) => {
                let md: DenomMetadata = bincode::deserialize(val).map_err(LmdbError::from)?;
                Ok(Some(md))
            }
            None => Ok(None),
        }
    }

    fn metadata_from(
        &self,
        start: Option<&str>,
        limit: usize,
    ) -> Result<Vec<DenomMetadata>, StoreError> {
        let lower = match start {
            Some(base) => Bound::Included(base.as_bytes()),
            None => Bound::Unbounded,
        };
        let rtxn = self.env().read_txn().map_err(LmdbError::from)?;
        let bounds: (Bound<&[u8]>, Bound<&[u8]>) = (lower, Bound::Unbounded);
        let mut out = Vec::new();
        for result in self
            .metadata_db
            .range(&rtxn, &bounds)
            .map_err(LmdbError::from)?
            .take(limit)
        {
            let (_key, val) = result.map_err(LmdbError::from)?;
            out.push(bincode::deserialize(val).map_err(LmdbError::from)?);
        }
        Ok(out)
    }

    fn metadata_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env().read_txn().map_err(LmdbError::from)?;
        let count = self.metadata_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count)
    }

    fn put_metadata(&self, metadata: &DenomMetadata) -> Result<(), StoreError> {
        let mut wtxn = self.env().write_txn().map_err(LmdbError::from)?;
        crate::write_batch::put_metadata(self, &mut wtxn, metadata)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
