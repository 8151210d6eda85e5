//! LMDB environment setup.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::migration::Migrator;
use crate::LmdbError;

/// Named databases created in every environment.
const DATABASES: u32 = 4;

/// Default map size: 1 GiB.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

/// Wraps the LMDB environment and all database handles.
///
/// One environment backs every bank store. A committed write transaction is
/// the unit of atomicity; readers run on MVCC snapshots and never block the
/// writer.
pub struct LmdbEnvironment {
    env: Env,
    /// `len(account) ++ account ++ denom` → 32-byte big-endian amount.
    pub(crate) balances_db: Database<Bytes, Bytes>,
    /// `denom` → 32-byte big-endian amount.
    pub(crate) supply_db: Database<Bytes, Bytes>,
    /// `base denom` → bincode `DenomMetadata`.
    pub(crate) metadata_db: Database<Bytes, Bytes>,
    /// Bookkeeping: schema version, params.
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path and bring its
    /// schema up to date.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;

        // SAFETY: the environment is opened once per path by this process and
        // the memory map is not modified outside of heed.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(DATABASES)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let balances_db = env.create_database(&mut wtxn, Some("balances"))?;
        let supply_db = env.create_database(&mut wtxn, Some("supply"))?;
        let metadata_db = env.create_database(&mut wtxn, Some("metadata"))?;
        let meta_db = env.create_database(&mut wtxn, Some("meta"))?;
        wtxn.commit()?;

        let environment = Self {
            env,
            balances_db,
            supply_db,
            metadata_db,
            meta_db,
        };
        Migrator::run(&environment)?;

        tracing::info!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(environment)
    }

    pub(crate) fn env(&self) -> &Env {
        &self.env
    }
}
