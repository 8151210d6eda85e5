//! The query service.
//!
//! Every call is a read: it takes the store's snapshot semantics as given and
//! never writes. Paginated calls fetch one item past the page to learn the
//! resume cursor.

use std::sync::Arc;

use bank_store::BankStore;
use bank_types::{AccountId, Coin, Coins, Denom, FactoryDenom, Timestamp};
use bank_vesting::VestingOracle;

use crate::pagination::{cursor_str, split_page, PageLimits, PageRequest, PageResponse};
use crate::types::*;
use crate::QueryError;

/// Read-only access to balances, supply, metadata and params.
pub struct QueryService<S: ?Sized, V> {
    store: Arc<S>,
    vesting: V,
    limits: PageLimits,
}

impl<S, V> QueryService<S, V>
where
    S: BankStore + ?Sized,
    V: VestingOracle,
{
    pub fn new(store: Arc<S>, vesting: V) -> Self {
        Self {
            store,
            vesting,
            limits: PageLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    pub fn balance(&self, req: &BalanceRequest) -> Result<BalanceResponse, QueryError> {
        let account = parse_address(&req.address)?;
        let denom = parse_denom(&req.denom)?;
        let amount = self.store.get_balance(&account, &denom)?;
        Ok(BalanceResponse {
            balance: Coin::new(denom, amount),
        })
    }

    pub fn all_balances(&self, req: &AllBalancesRequest) -> Result<AllBalancesResponse, QueryError> {
        let account = parse_address(&req.address)?;
        let (coins, pagination) = self.balance_page(&account, &req.pagination)?;
        Ok(AllBalancesResponse {
            balances: into_coins(coins)?,
            pagination,
        })
    }

    /// Balances minus vesting locks at `at`.
    ///
    /// The page window is taken over the raw balance keyspace and then
    /// filtered: denoms whose spendable amount is zero are dropped, so a page
    /// may hold fewer than `limit` entries while `next_key` is still set.
    /// `total` counts raw balance records.
    pub fn spendable_balances(
        &self,
        req: &SpendableBalancesRequest,
        at: Timestamp,
    ) -> Result<SpendableBalancesResponse, QueryError> {
        let account = parse_address(&req.address)?;
        let (coins, pagination) = self.balance_page(&account, &req.pagination)?;
        let locked = self.vesting.locked_coins(&account, at);

        let spendable: Vec<Coin> = coins
            .into_iter()
            .filter_map(|coin| {
                let amount = coin.amount.saturating_sub(locked.amount_of(coin.denom.as_str()));
                (!amount.is_zero()).then(|| Coin::new(coin.denom, amount))
            })
            .collect();
        Ok(SpendableBalancesResponse {
            balances: into_coins(spendable)?,
            pagination,
        })
    }

    pub fn total_supply(&self, req: &TotalSupplyRequest) -> Result<TotalSupplyResponse, QueryError> {
        let page = &req.pagination;
        let start = page.key.as_deref().map(parse_cursor_denom).transpose()?;
        let limit = self.limits.effective_limit(page);

        let fetched = self.store.supply_from(start.as_ref(), limit.saturating_add(1))?;
        let (coins, next_key) = split_page(fetched, limit, |c| c.denom.as_bytes().to_vec());
        let total = if page.count_total {
            Some(self.store.supply_count()?)
        } else {
            None
        };
        Ok(TotalSupplyResponse {
            supply: into_coins(coins)?,
            pagination: PageResponse { next_key, total },
        })
    }

    pub fn supply_of(&self, req: &SupplyOfRequest) -> Result<SupplyOfResponse, QueryError> {
        let denom = parse_denom(&req.denom)?;
        let amount = self.store.get_supply(&denom)?;
        Ok(SupplyOfResponse {
            amount: Coin::new(denom, amount),
        })
    }

    /// Metadata records in base-denom key order.
    pub fn denoms_metadata(
        &self,
        req: &DenomsMetadataRequest,
    ) -> Result<DenomsMetadataResponse, QueryError> {
        let page = &req.pagination;
        let start = page.key.as_deref().map(cursor_str).transpose()?;
        let limit = self.limits.effective_limit(page);

        let fetched = self.store.metadata_from(start, limit.saturating_add(1))?;
        let (metadatas, next_key) = split_page(fetched, limit, |m| m.base.as_bytes().to_vec());
        let total = if page.count_total {
            Some(self.store.metadata_count()?)
        } else {
            None
        };
        Ok(DenomsMetadataResponse {
            metadatas,
            pagination: PageResponse { next_key, total },
        })
    }

    pub fn denom_metadata(
        &self,
        req: &DenomMetadataRequest,
    ) -> Result<DenomMetadataResponse, QueryError> {
        if req.denom.is_empty() {
            return Err(QueryError::InvalidArgument("empty denom".into()));
        }
        self.lookup_metadata(&req.denom)
    }

    /// Metadata for a `factory/<creator>/<subdenom>` denom.
    pub fn token_factory_denom_metadata(
        &self,
        req: &DenomMetadataRequest,
    ) -> Result<DenomMetadataResponse, QueryError> {
        if req.denom.is_empty() {
            return Err(QueryError::InvalidArgument("empty denom".into()));
        }
        FactoryDenom::parse(&req.denom).map_err(|e| QueryError::InvalidArgument(e.to_string()))?;
        self.lookup_metadata(&req.denom)
    }

    pub fn params(&self) -> Result<ParamsResponse, QueryError> {
        Ok(ParamsResponse {
            params: self.store.get_params()?.unwrap_or_default(),
        })
    }

    fn lookup_metadata(&self, denom: &str) -> Result<DenomMetadataResponse, QueryError> {
        match self.store.get_metadata(denom)? {
            Some(metadata) => Ok(DenomMetadataResponse { metadata }),
            None => Err(QueryError::NotFound(format!("client metadata for denom {denom}"))),
        }
    }

    /// One raw window of an account's balances, shared by the all-balances
    /// and spendable-balances queries.
    fn balance_page(
        &self,
        account: &AccountId,
        page: &PageRequest,
    ) -> Result<(Vec<Coin>, PageResponse), QueryError> {
        let start = page.key.as_deref().map(parse_cursor_denom).transpose()?;
        let limit = self.limits.effective_limit(page);

        let fetched = self
            .store
            .balances_from(account, start.as_ref(), limit.saturating_add(1))?;
        let (coins, next_key) = split_page(fetched, limit, |c| c.denom.as_bytes().to_vec());
        let total = if page.count_total {
            Some(self.store.balance_count(account)?)
        } else {
            None
        };
        Ok((coins, PageResponse { next_key, total }))
    }
}

fn parse_address(address: &str) -> Result<AccountId, QueryError> {
    if address.is_empty() {
        return Err(QueryError::InvalidArgument("empty address".into()));
    }
    address
        .parse()
        .map_err(|e: bank_types::TypesError| QueryError::InvalidArgument(e.to_string()))
}

fn parse_denom(denom: &str) -> Result<Denom, QueryError> {
    if denom.is_empty() {
        return Err(QueryError::InvalidArgument("empty denom".into()));
    }
    Denom::new(denom).map_err(|e| QueryError::InvalidArgument(e.to_string()))
}

fn parse_cursor_denom(key: &[u8]) -> Result<Denom, QueryError> {
    let text = cursor_str(key)?;
    Denom::new(text)
        .map_err(|e| QueryError::InvalidArgument(format!("invalid pagination key: {e}")))
}

fn into_coins(coins: Vec<Coin>) -> Result<Coins, QueryError> {
    Coins::from_ordered_scan(coins).map_err(|e| {
        tracing::error!(error = %e, "store scan returned coins out of order");
        QueryError::Store(bank_store::StoreError::Corruption(e.to_string()))
    })
}
