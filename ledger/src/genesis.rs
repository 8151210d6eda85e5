//! Genesis import and export.
//!
//! A genesis document is the complete bank state in one JSON-friendly value:
//! parameters, every non-zero balance, the total supply and the metadata
//! catalog. Importing it into an empty store and exporting again yields the
//! same document.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use bank_store::{BankStore, WriteBatch};
use bank_types::{AccountId, Coin, Coins, DenomMetadata, Params};

use crate::authority::MintAuthority;
use crate::{Ledger, LedgerError};

/// All balances of one account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisBalance {
    pub address: AccountId,
    pub coins: Coins,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub balances: Vec<GenesisBalance>,
    /// Total supply. Left empty, it is computed from `balances`.
    #[serde(default)]
    pub supply: Coins,
    #[serde(default)]
    pub denom_metadata: Vec<DenomMetadata>,
}

impl GenesisState {
    /// Check the document on its own and return the supply it implies.
    pub fn validate(&self) -> Result<Coins, LedgerError> {
        self.params
            .validate()
            .map_err(|e| LedgerError::InvalidArgument(format!("genesis params: {e}")))?;

        let mut addresses = HashSet::new();
        let mut total = Coins::empty();
        for balance in &self.balances {
            if !addresses.insert(&balance.address) {
                return Err(LedgerError::InvalidArgument(format!(
                    "duplicate genesis balance for {}",
                    balance.address
                )));
            }
            total = total
                .checked_add(&balance.coins)
                .map_err(|e| LedgerError::AmountOverflow(e.to_string()))?;
        }

        if !self.supply.is_empty() && self.supply != total {
            return Err(LedgerError::InvalidArgument(format!(
                "genesis supply {} does not match sum of balances {total}",
                self.supply
            )));
        }

        let mut bases = HashSet::new();
        for metadata in &self.denom_metadata {
            metadata
                .validate()
                .map_err(|e| LedgerError::InvalidMetadata(e.to_string()))?;
            if !bases.insert(metadata.base.as_str()) {
                return Err(LedgerError::InvalidMetadata(format!(
                    "duplicate metadata for {}",
                    metadata.base
                )));
            }
        }
        Ok(total)
    }
}

impl<S, A> Ledger<S, A>
where
    S: BankStore + ?Sized,
    A: MintAuthority,
{
    /// Load a genesis document into an empty store in one batch.
    pub fn init_genesis(&self, genesis: &GenesisState) -> Result<(), LedgerError> {
        let supply = genesis.validate()?;
        let _writer = self.lock_writer();

        let store = self.store();
        if store.supply_count()? != 0
            || store.metadata_count()? != 0
            || !store.iter_balances()?.is_empty()
        {
            return Err(LedgerError::InvalidArgument(
                "genesis requires an empty store".into(),
            ));
        }

        let mut batch = WriteBatch::new();
        batch.put_params(genesis.params.clone());
        for balance in &genesis.balances {
            for coin in &balance.coins {
                batch.set_balance(balance.address.clone(), coin.denom.clone(), coin.amount);
            }
        }
        for coin in &supply {
            batch.set_supply(coin.denom.clone(), coin.amount);
        }
        for metadata in &genesis.denom_metadata {
            batch.put_metadata(metadata.clone());
        }
        let ops = batch.len();
        store.commit(batch)?;

        tracing::info!(
            accounts = genesis.balances.len(),
            denoms = supply.len(),
            metadata = genesis.denom_metadata.len(),
            ops,
            "genesis imported"
        );
        Ok(())
    }

    /// Snapshot the full bank state as a genesis document.
    pub fn export_genesis(&self) -> Result<GenesisState, LedgerError> {
        let _writer = self.lock_writer();
        let store = self.store();

        let mut grouped: BTreeMap<AccountId, Vec<Coin>> = BTreeMap::new();
        for (account, coin) in store.iter_balances()? {
            grouped.entry(account).or_default().push(coin);
        }
        let balances = grouped
            .into_iter()
            .map(|(address, coins)| {
                let coins = Coins::from_ordered_scan(coins)
                    .map_err(|e| LedgerError::ConsistencyFault(e.to_string()))?;
                Ok(GenesisBalance { address, coins })
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;

        Ok(GenesisState {
            params: self.params()?,
            balances,
            supply: store.get_total_supply()?,
            denom_metadata: store.metadata_from(None, usize::MAX)?,
        })
    }
}
