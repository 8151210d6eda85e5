//! Denomination metadata storage trait.

use crate::StoreError;
use bank_types::DenomMetadata;

/// Denomination metadata keyed by base denom.
pub trait MetadataStore {
    fn get_metadata(&self, base: &str) -> Result<Option<DenomMetadata>, StoreError>;

    /// Up to `limit` records in ascending base-denom order, starting at
    /// `start` (inclusive).
    fn metadata_from(
        &self,
        start: Option<&str>,
        limit: usize,
    ) -> Result<Vec<DenomMetadata>, StoreError>;

    fn metadata_count(&self) -> Result<u64, StoreError>;

    /// Insert or replace the record for `metadata.base`.
    fn put_metadata(&self, metadata: &DenomMetadata) -> Result<(), StoreError>;
}
