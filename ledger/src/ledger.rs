//! The ledger core. Every balance and supply mutation goes through here.
//!
//! Each public mutation stages its reads and writes in a [`Changeset`],
//! validates as it goes, and commits one [`WriteBatch`](bank_store::WriteBatch)
//! only once every step has succeeded. Writers are serialized by an internal
//! lock so that the read-check-write sequence of one mutation never
//! interleaves with another.
//!
//! The supply ≥ balances invariant is kept by ordering: debits happen before
//! credits, mints before the matching credit, and debits before burns.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use bank_store::{BankStore, WriteBatch};
use bank_types::{AccountId, Coins, DenomMetadata, Params};

use crate::authority::MintAuthority;
use crate::changeset::Changeset;
use crate::LedgerError;

/// One side of a multi-send.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub address: AccountId,
    pub coins: Coins,
}

/// The bank ledger.
pub struct Ledger<S: ?Sized, A> {
    store: Arc<S>,
    authority: A,
    writer: Mutex<()>,
}

impl<S, A> Ledger<S, A>
where
    S: BankStore + ?Sized,
    A: MintAuthority,
{
    pub fn new(store: Arc<S>, authority: A) -> Self {
        Self {
            store,
            authority,
            writer: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    /// Serialize writers. The lock guards no data, so poisoning is ignored.
    pub(crate) fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current parameters, or the defaults if none were ever stored.
    pub fn params(&self) -> Result<Params, LedgerError> {
        Ok(self.store.get_params()?.unwrap_or_default())
    }

    /// Move `coins` from `from` to `to`. All coins move or none do.
    pub fn transfer(&self, from: &AccountId, to: &AccountId, coins: &Coins) -> Result<(), LedgerError> {
        require_coins(coins, "transfer")?;
        let _writer = self.lock_writer();
        self.check_send_enabled(coins)?;

        let mut changes = Changeset::new(&*self.store);
        for coin in coins {
            changes.debit(from, coin)?;
        }
        for coin in coins {
            changes.credit(to, coin)?;
        }
        self.store.commit(changes.into_batch())?;

        tracing::debug!(from = %from, to = %to, coins = %coins, "transfer");
        Ok(())
    }

    /// Move coins from several inputs to several outputs in one step.
    ///
    /// The inputs and outputs must carry the same total.
    pub fn multi_send(&self, inputs: &[Transfer], outputs: &[Transfer]) -> Result<(), LedgerError> {
        if inputs.is_empty() {
            return Err(LedgerError::InvalidArgument("multi-send has no inputs".into()));
        }
        if outputs.is_empty() {
            return Err(LedgerError::InvalidArgument("multi-send has no outputs".into()));
        }
        let total_in = sum_transfers(inputs)?;
        let total_out = sum_transfers(outputs)?;
        if total_in != total_out {
            return Err(LedgerError::InvalidArgument(format!(
                "multi-send inputs {total_in} do not match outputs {total_out}"
            )));
        }

        let _writer = self.lock_writer();
        self.check_send_enabled(&total_in)?;

        let mut changes = Changeset::new(&*self.store);
        for input in inputs {
            for coin in &input.coins {
                changes.debit(&input.address, coin)?;
            }
        }
        for output in outputs {
            for coin in &output.coins {
                changes.credit(&output.address, coin)?;
            }
        }
        self.store.commit(changes.into_batch())?;

        tracing::debug!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            coins = %total_in,
            "multi-send"
        );
        Ok(())
    }

    /// Create `coins` and credit them to `module`.
    pub fn mint_coins(&self, module: &AccountId, coins: &Coins) -> Result<(), LedgerError> {
        require_coins(coins, "mint")?;
        if let Some(coin) = coins
            .iter()
            .find(|c| !self.authority.is_authorized(module, &c.denom))
        {
            tracing::warn!(module = %module, denom = %coin.denom, "unauthorized mint rejected");
            return Err(LedgerError::UnauthorizedDenom {
                module: module.to_string(),
                denom: coin.denom.to_string(),
            });
        }

        let _writer = self.lock_writer();
        let mut changes = Changeset::new(&*self.store);
        for coin in coins {
            changes.mint(coin)?;
            changes.credit(module, coin)?;
        }
        self.store.commit(changes.into_batch())?;

        tracing::debug!(module = %module, coins = %coins, "minted");
        Ok(())
    }

    /// Destroy `coins` held by `module`.
    pub fn burn_coins(&self, module: &AccountId, coins: &Coins) -> Result<(), LedgerError> {
        require_coins(coins, "burn")?;
        let _writer = self.lock_writer();

        let mut changes = Changeset::new(&*self.store);
        for coin in coins {
            changes.debit(module, coin)?;
            changes.burn(coin).map_err(|e| match e {
                LedgerError::InsufficientSupply {
                    denom,
                    needed,
                    available,
                } => {
                    tracing::error!(
                        module = %module,
                        %denom,
                        %needed,
                        %available,
                        "balance exceeds tracked supply"
                    );
                    LedgerError::ConsistencyFault(format!(
                        "burning {needed}{denom} from {module} exceeds tracked supply {available}"
                    ))
                }
                other => other,
            })?;
        }
        self.store.commit(changes.into_batch())?;

        tracing::debug!(module = %module, coins = %coins, "burned");
        Ok(())
    }

    /// Validate and store denomination metadata, replacing any record with
    /// the same base denom.
    pub fn set_denom_metadata(&self, metadata: DenomMetadata) -> Result<(), LedgerError> {
        metadata
            .validate()
            .map_err(|e| LedgerError::InvalidMetadata(e.to_string()))?;
        let _writer = self.lock_writer();
        let base = metadata.base.clone();
        let mut batch = WriteBatch::new();
        batch.put_metadata(metadata);
        self.store.commit(batch)?;
        tracing::debug!(%base, "denom metadata set");
        Ok(())
    }

    pub fn set_params(&self, params: Params) -> Result<(), LedgerError> {
        params
            .validate()
            .map_err(|e| LedgerError::InvalidArgument(e.to_string()))?;
        let _writer = self.lock_writer();
        let mut batch = WriteBatch::new();
        batch.put_params(params);
        self.store.commit(batch)?;
        tracing::debug!("params updated");
        Ok(())
    }

    fn check_send_enabled(&self, coins: &Coins) -> Result<(), LedgerError> {
        let params = self.params()?;
        match coins.iter().find(|c| !params.is_send_enabled(c.denom.as_str())) {
            Some(coin) => Err(LedgerError::SendDisabled(coin.denom.to_string())),
            None => Ok(()),
        }
    }
}

fn require_coins(coins: &Coins, op: &str) -> Result<(), LedgerError> {
    if coins.is_empty() {
        return Err(LedgerError::InvalidArgument(format!("{op} requires at least one coin")));
    }
    Ok(())
}

fn sum_transfers(transfers: &[Transfer]) -> Result<Coins, LedgerError> {
    transfers.iter().try_fold(Coins::empty(), |total, t| {
        require_coins(&t.coins, "multi-send entry")?;
        total
            .checked_add(&t.coins)
            .map_err(|e| LedgerError::AmountOverflow(e.to_string()))
    })
}
