//! The bank node: wires the store, ledger, query service and vesting
//! registry together according to a [`BankConfig`].

use std::path::Path;
use std::sync::Arc;

use bank_ledger::{AuthorityTable, GenesisState, Ledger};
use bank_nullables::{Clock, NullStore, SystemClock};
use bank_query::{QueryService, SpendableBalancesRequest, SpendableBalancesResponse};
use bank_store::{BalanceStore, BankStore, MetadataStore, ParamsStore, SupplyStore};
use bank_store_lmdb::LmdbEnvironment;
use bank_vesting::VestingRegistry;

use crate::config::{BankConfig, StoreBackend};
use crate::NodeError;

/// A running bank node.
pub struct BankNode {
    config: BankConfig,
    store: Arc<dyn BankStore>,
    ledger: Ledger<dyn BankStore, AuthorityTable>,
    queries: QueryService<dyn BankStore, Arc<VestingRegistry>>,
    vesting: Arc<VestingRegistry>,
    clock: Arc<dyn Clock>,
}

impl BankNode {
    /// Open the configured store and bring it to a usable state: seed params
    /// if none are stored yet and apply the genesis file to an empty store.
    pub fn open(config: BankConfig) -> Result<Self, NodeError> {
        Self::open_with_clock(config, Arc::new(SystemClock))
    }

    pub fn open_with_clock(config: BankConfig, clock: Arc<dyn Clock>) -> Result<Self, NodeError> {
        config.validate()?;
        let store = open_store(&config)?;
        let vesting = Arc::new(VestingRegistry::new());

        let ledger = Ledger::new(store.clone(), config.authority_table()?);
        let queries =
            QueryService::new(store.clone(), vesting.clone()).with_limits(config.pagination);

        let node = Self {
            config,
            store,
            ledger,
            queries,
            vesting,
            clock,
        };
        node.apply_genesis_file()?;
        node.seed_params()?;

        tracing::info!(
            backend = ?node.config.backend,
            denoms = node.store.supply_count()?,
            "bank node ready"
        );
        Ok(node)
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn BankStore> {
        &self.store
    }

    pub fn ledger(&self) -> &Ledger<dyn BankStore, AuthorityTable> {
        &self.ledger
    }

    pub fn queries(&self) -> &QueryService<dyn BankStore, Arc<VestingRegistry>> {
        &self.queries
    }

    pub fn vesting(&self) -> &Arc<VestingRegistry> {
        &self.vesting
    }

    /// Spendable balances as of the node clock's current time.
    pub fn spendable_balances_now(
        &self,
        req: &SpendableBalancesRequest,
    ) -> Result<SpendableBalancesResponse, NodeError> {
        Ok(self.queries.spendable_balances(req, self.clock.now())?)
    }

    fn is_empty(&self) -> Result<bool, NodeError> {
        Ok(self.store.supply_count()? == 0
            && self.store.metadata_count()? == 0
            && self.store.iter_balances()?.is_empty())
    }

    fn apply_genesis_file(&self) -> Result<(), NodeError> {
        let Some(path) = &self.config.genesis_file else {
            return Ok(());
        };
        if !self.is_empty()? {
            tracing::debug!(path = %path.display(), "store already populated, genesis skipped");
            return Ok(());
        }
        let genesis = load_genesis(path)?;
        self.ledger.init_genesis(&genesis)?;
        Ok(())
    }

    fn seed_params(&self) -> Result<(), NodeError> {
        if let Some(params) = &self.config.params {
            if self.store.get_params()?.is_none() {
                self.ledger.set_params(params.clone())?;
                tracing::info!("seeded params from config");
            }
        }
        Ok(())
    }
}

fn open_store(config: &BankConfig) -> Result<Arc<dyn BankStore>, NodeError> {
    let store: Arc<dyn BankStore> = match config.backend {
        StoreBackend::Lmdb => Arc::new(LmdbEnvironment::open(
            &config.data_dir,
            config.lmdb_map_size,
        )?),
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store, state will not persist");
            Arc::new(NullStore::new())
        }
    };
    Ok(store)
}

/// Read a JSON genesis document.
pub fn load_genesis(path: &Path) -> Result<GenesisState, NodeError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| NodeError::Genesis(format!("{}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| NodeError::Genesis(format!("{}: {e}", path.display())))
}

/// Render a genesis document as pretty JSON.
pub fn genesis_to_json(genesis: &GenesisState) -> Result<String, NodeError> {
    serde_json::to_string_pretty(genesis).map_err(|e| NodeError::Genesis(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bank_nullables::NullClock;
    use bank_query::PageRequest;
    use bank_types::{AccountId, Coins, Params, SendEnabled, Timestamp};
    use bank_vesting::VestingSchedule;

    fn account(b: u8) -> AccountId {
        AccountId::new(vec![b; 20]).unwrap()
    }

    #[test]
    fn seeds_params_once() {
        let params = Params {
            send_enabled: vec![SendEnabled { denom: "stake".into(), enabled: false }],
            default_send_enabled: true,
        };
        let node = BankNode::open(BankConfig::in_memory().with_params(params.clone())).unwrap();
        assert_eq!(node.ledger().params().unwrap(), params);
    }

    #[test]
    fn configured_authorities_restrict_minting() {
        let owner = account(1);
        let config = BankConfig::in_memory().with_mint_authority("stake", &owner);
        let node = BankNode::open(config).unwrap();
        let coins: Coins = "5stake".parse().unwrap();
        assert!(node.ledger().mint_coins(&account(2), &coins).is_err());
        node.ledger().mint_coins(&owner, &coins).unwrap();
    }

    #[test]
    fn spendable_uses_node_clock() {
        let clock = Arc::new(NullClock::new(1_000));
        let node = BankNode::open_with_clock(BankConfig::in_memory(), clock.clone()).unwrap();
        let a = account(3);
        node.ledger().mint_coins(&a, &"100atom".parse().unwrap()).unwrap();
        node.vesting()
            .insert(
                a.clone(),
                VestingSchedule::Delayed {
                    original: "100atom".parse().unwrap(),
                    end: Timestamp::new(2_000),
                },
            )
            .unwrap();

        let req = SpendableBalancesRequest {
            address: a.to_string(),
            pagination: PageRequest::default(),
        };
        assert!(node.spendable_balances_now(&req).unwrap().balances.is_empty());
        clock.advance(1_000);
        assert_eq!(
            node.spendable_balances_now(&req).unwrap().balances.to_string(),
            "100atom"
        );
    }
}
