//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use bank_ledger::AuthorityTable;
use bank_query::PageLimits;
use bank_store_lmdb::DEFAULT_MAP_SIZE;
use bank_types::{AccountId, Denom, Params};

use crate::logging::LogFormat;
use crate::NodeError;

/// Which store implementation backs the node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Lmdb,
    /// In-memory store; nothing survives a restart.
    Memory,
}

/// Restricts minting of `denom` to one module account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintAuthorityEntry {
    pub denom: String,
    /// Hex-encoded module account.
    pub module: String,
}

/// Configuration for a bank node.
///
/// Can be loaded from a TOML file via [`BankConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BankConfig {
    /// Data directory for the LMDB environment.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub backend: StoreBackend,

    /// LMDB map size in bytes.
    #[serde(default = "default_map_size")]
    pub lmdb_map_size: usize,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Genesis document applied when the store is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis_file: Option<PathBuf>,

    #[serde(default)]
    pub pagination: PageLimits,

    /// Parameters written on first start if the store has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mint_authorities: Vec<MintAuthorityEntry>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./bank_data")
}

fn default_map_size() -> usize {
    DEFAULT_MAP_SIZE
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl BankConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        let config: Self = toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// An in-memory configuration, convenient for tests.
    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            ..Self::default()
        }
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_genesis_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.genesis_file = Some(path.into());
        self
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_mint_authority(mut self, denom: &str, module: &AccountId) -> Self {
        self.mint_authorities.push(MintAuthorityEntry {
            denom: denom.to_string(),
            module: module.to_hex(),
        });
        self
    }

    pub fn validate(&self) -> Result<(), NodeError> {
        if self.pagination.default_limit == 0 || self.pagination.max_limit == 0 {
            return Err(NodeError::Config("pagination limits must be positive".into()));
        }
        if self.pagination.default_limit > self.pagination.max_limit {
            return Err(NodeError::Config(format!(
                "pagination default_limit {} exceeds max_limit {}",
                self.pagination.default_limit, self.pagination.max_limit
            )));
        }
        if let Some(params) = &self.params {
            params
                .validate()
                .map_err(|e| NodeError::Config(format!("params: {e}")))?;
        }
        self.authority_table().map(|_| ())
    }

    /// Build the mint authority table from `[[mint_authorities]]`.
    pub fn authority_table(&self) -> Result<AuthorityTable, NodeError> {
        let mut table = AuthorityTable::new();
        for entry in &self.mint_authorities {
            let denom = Denom::new(entry.denom.as_str())
                .map_err(|e| NodeError::Config(format!("mint authority denom: {e}")))?;
            let module: AccountId = entry
                .module
                .parse()
                .map_err(|e| NodeError::Config(format!("mint authority module: {e}")))?;
            table.restrict(denom, module);
        }
        Ok(table)
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            backend: StoreBackend::default(),
            lmdb_map_size: default_map_size(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            genesis_file: None,
            pagination: PageLimits::default(),
            params: None,
            mint_authorities: Vec::new(),
        }
    }
}
