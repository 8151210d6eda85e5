use std::sync::Arc;

use bank_ledger::{Ledger, PermitAll};
use bank_nullables::NullStore;
use bank_query::*;
use bank_types::{AccountId, Amount, Coins, DenomMetadata, DenomUnit, Params, SendEnabled, Timestamp};
use bank_vesting::{NoVesting, VestingRegistry, VestingSchedule};

struct Fixture {
    ledger: Ledger<NullStore, PermitAll>,
    vesting: Arc<VestingRegistry>,
    queries: QueryService<NullStore, Arc<VestingRegistry>>,
}

fn fixture() -> Fixture {
    let store = Arc::new(NullStore::new());
    let vesting = Arc::new(VestingRegistry::new());
    Fixture {
        ledger: Ledger::new(store.clone(), PermitAll),
        queries: QueryService::new(store, vesting.clone()),
        vesting,
    }
}

fn addr(b: u8) -> AccountId {
    AccountId::new(vec![b; 20]).unwrap()
}

fn coins(s: &str) -> Coins {
    s.parse().unwrap()
}

fn atom_metadata() -> DenomMetadata {
    DenomMetadata {
        description: "The native staking token of the Cosmos Hub.".into(),
        denom_units: vec![
            DenomUnit { denom: "uatom".into(), exponent: 0, aliases: vec!["microatom".into()] },
            DenomUnit { denom: "atom".into(), exponent: 6, aliases: vec!["ATOM".into()] },
        ],
        base: "uatom".into(),
        display: "atom".into(),
    }
}

fn eth_metadata() -> DenomMetadata {
    DenomMetadata {
        description: "Ethereum native token".into(),
        denom_units: vec![
            DenomUnit { denom: "wei".into(), exponent: 0, aliases: vec![] },
            DenomUnit { denom: "eth".into(), exponent: 18, aliases: vec!["ETH".into(), "ether".into()] },
        ],
        base: "wei".into(),
        display: "eth".into(),
    }
}

// ── Balance ──────────────────────────────────────────────────────────────

#[test]
fn balance_query() {
    let f = fixture();
    let a = addr(1);

    assert!(matches!(
        f.queries.balance(&BalanceRequest::default()),
        Err(QueryError::InvalidArgument(_))
    ));
    let no_denom = BalanceRequest { address: a.to_string(), denom: String::new() };
    assert!(matches!(f.queries.balance(&no_denom), Err(QueryError::InvalidArgument(_))));
    let bad_addr = BalanceRequest { address: "zz".into(), denom: "foo".into() };
    assert!(matches!(f.queries.balance(&bad_addr), Err(QueryError::InvalidArgument(_))));

    let req = BalanceRequest { address: a.to_string(), denom: "foo".into() };
    let res = f.queries.balance(&req).unwrap();
    assert!(res.balance.is_zero());
    assert_eq!(res.balance.denom.as_str(), "foo");

    f.ledger.mint_coins(&a, &coins("30bar,50foo")).unwrap();
    let res = f.queries.balance(&req).unwrap();
    assert_eq!(res.balance.to_string(), "50foo");
}

#[test]
fn all_balances_pages_with_next_key() {
    let f = fixture();
    let a = addr(1);

    assert!(f.queries.all_balances(&AllBalancesRequest::default()).is_err());

    let mut req = AllBalancesRequest {
        address: a.to_string(),
        pagination: PageRequest::with_limit(1),
    };
    let res = f.queries.all_balances(&req).unwrap();
    assert!(res.balances.is_empty());
    assert!(res.pagination.next_key.is_none());

    f.ledger.mint_coins(&a, &coins("30bar,50foo")).unwrap();

    let first = f.queries.all_balances(&req).unwrap();
    assert_eq!(first.balances, coins("30bar"));
    assert_eq!(first.pagination.next_key.as_deref(), Some(&b"foo"[..]));
    assert_eq!(first.pagination.total, None);

    req.pagination = PageRequest::with_limit(1)
        .resume(first.pagination.next_key)
        .counted();
    let second = f.queries.all_balances(&req).unwrap();
    assert_eq!(second.balances, coins("50foo"));
    assert!(second.pagination.next_key.is_none());
    assert_eq!(second.pagination.total, Some(2));
}

#[test]
fn all_balances_rejects_bad_cursor() {
    let f = fixture();
    let req = AllBalancesRequest {
        address: addr(1).to_string(),
        pagination: PageRequest::with_limit(1).resume(Some(vec![0xff, 0x00])),
    };
    assert!(matches!(f.queries.all_balances(&req), Err(QueryError::InvalidArgument(_))));

    let req = AllBalancesRequest {
        address: addr(1).to_string(),
        pagination: PageRequest::with_limit(1).resume(Some(b"1nope".to_vec())),
    };
    assert!(matches!(f.queries.all_balances(&req), Err(QueryError::InvalidArgument(_))));
}

#[test]
fn page_limit_clamped_to_service_maximum() {
    let f = fixture();
    let queries = QueryService::new(f.ledger.store().clone(), NoVesting)
        .with_limits(PageLimits { default_limit: 2, max_limit: 3 });
    let a = addr(1);
    f.ledger.mint_coins(&a, &coins("1aaa,1bbb,1ccc,1ddd,1eee")).unwrap();

    let req = AllBalancesRequest { address: a.to_string(), pagination: PageRequest::default() };
    assert_eq!(queries.all_balances(&req).unwrap().balances.len(), 2);

    let req = AllBalancesRequest { address: a.to_string(), pagination: PageRequest::with_limit(50) };
    let res = queries.all_balances(&req).unwrap();
    assert_eq!(res.balances.len(), 3);
    assert_eq!(res.pagination.next_key.as_deref(), Some(&b"ddd"[..]));
}

// ── Spendable balances ───────────────────────────────────────────────────

#[test]
fn spendable_balances_subtract_vesting_locks() {
    let f = fixture();
    let a = addr(1);
    let start = Timestamp::new(1_700_000_000);

    assert!(f
        .queries
        .spendable_balances(&SpendableBalancesRequest::default(), start)
        .is_err());

    let req = SpendableBalancesRequest {
        address: a.to_string(),
        pagination: PageRequest::with_limit(2),
    };
    let res = f.queries.spendable_balances(&req, start).unwrap();
    assert!(res.balances.is_empty());

    f.vesting
        .insert(
            a.clone(),
            VestingSchedule::Continuous {
                original: coins("50foo"),
                start,
                end: start.plus_secs(3_600),
            },
        )
        .unwrap();
    f.ledger.mint_coins(&a, &coins("30bar,50foo")).unwrap();

    let res = f.queries.spendable_balances(&req, start.plus_secs(30 * 60)).unwrap();
    assert_eq!(res.balances.len(), 2);
    assert!(res.pagination.next_key.is_none());
    assert_eq!(res.balances, coins("30bar,25foo"));

    let res = f.queries.spendable_balances(&req, start.plus_secs(3_600)).unwrap();
    assert_eq!(res.balances, coins("30bar,50foo"));
}

#[test]
fn spendable_balances_window_raw_keyspace() {
    let f = fixture();
    let a = addr(1);
    let now = Timestamp::new(100);
    f.ledger.mint_coins(&a, &coins("10aaa,10bbb,10ccc")).unwrap();
    f.vesting
        .insert(a.clone(), VestingSchedule::Delayed { original: coins("10aaa"), end: Timestamp::new(200) })
        .unwrap();

    let req = SpendableBalancesRequest {
        address: a.to_string(),
        pagination: PageRequest::with_limit(2).counted(),
    };
    let res = f.queries.spendable_balances(&req, now).unwrap();
    // "aaa" is fully locked: the page is short but more raw keys remain
    assert_eq!(res.balances, coins("10bbb"));
    assert_eq!(res.pagination.next_key.as_deref(), Some(&b"ccc"[..]));
    assert_eq!(res.pagination.total, Some(3));
}

#[test]
fn spendable_equals_balance_without_schedule() {
    let f = fixture();
    let a = addr(2);
    f.ledger.mint_coins(&a, &coins("50atom")).unwrap();
    let req = SpendableBalancesRequest { address: a.to_string(), pagination: PageRequest::default() };
    let res = f.queries.spendable_balances(&req, Timestamp::new(0)).unwrap();
    assert_eq!(res.balances, coins("50atom"));
}

// ── Supply ───────────────────────────────────────────────────────────────

#[test]
fn total_supply_query() {
    let f = fixture();
    let expected = coins("400000000test");
    f.ledger.mint_coins(&addr(9), &expected).unwrap();

    let res = f.queries.total_supply(&TotalSupplyRequest::default()).unwrap();
    assert_eq!(res.supply, expected);
    assert!(res.pagination.next_key.is_none());
}

#[test]
fn total_supply_paginates() {
    let f = fixture();
    f.ledger.mint_coins(&addr(9), &coins("1ccc,1aaa,1bbb")).unwrap();

    let req = TotalSupplyRequest { pagination: PageRequest::with_limit(2).counted() };
    let first = f.queries.total_supply(&req).unwrap();
    assert_eq!(first.supply, coins("1aaa,1bbb"));
    assert_eq!(first.pagination.total, Some(3));

    let req = TotalSupplyRequest {
        pagination: PageRequest::with_limit(2).resume(first.pagination.next_key),
    };
    let second = f.queries.total_supply(&req).unwrap();
    assert_eq!(second.supply, coins("1ccc"));
    assert!(second.pagination.next_key.is_none());
}

#[test]
fn supply_of_query() {
    let f = fixture();
    f.ledger
        .mint_coins(&addr(9), &coins("4000000test1,700000000test2"))
        .unwrap();

    assert!(matches!(
        f.queries.supply_of(&SupplyOfRequest::default()),
        Err(QueryError::InvalidArgument(_))
    ));
    let res = f
        .queries
        .supply_of(&SupplyOfRequest { denom: "test1".into() })
        .unwrap();
    assert_eq!(res.amount.to_string(), "4000000test1");

    let missing = f
        .queries
        .supply_of(&SupplyOfRequest { denom: "nothing".into() })
        .unwrap();
    assert_eq!(missing.amount.amount, Amount::ZERO);
}

// ── Params ───────────────────────────────────────────────────────────────

#[test]
fn params_query() {
    let f = fixture();
    assert_eq!(f.queries.params().unwrap().params, Params::default());

    let params = Params {
        send_enabled: vec![SendEnabled { denom: "stake".into(), enabled: false }],
        default_send_enabled: true,
    };
    f.ledger.set_params(params.clone()).unwrap();
    assert_eq!(f.queries.params().unwrap().params, params);
}

// ── Metadata ─────────────────────────────────────────────────────────────

#[test]
fn denoms_metadata_query() {
    let cases: Vec<(&str, Option<PageRequest>, bool)> = vec![
        ("empty pagination", None, false),
        ("no results", Some(PageRequest::with_limit(3).counted()), false),
        ("success", Some(PageRequest::with_limit(7).counted()), true),
    ];

    for (name, pagination, seed) in cases {
        let f = fixture();
        let mut expected = Vec::new();
        if seed {
            f.ledger.set_denom_metadata(atom_metadata()).unwrap();
            f.ledger.set_denom_metadata(eth_metadata()).unwrap();
            expected = vec![atom_metadata(), eth_metadata()];
        }
        let req = DenomsMetadataRequest { pagination: pagination.unwrap_or_default() };
        let res = f.queries.denoms_metadata(&req).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(res.metadatas, expected, "{name}");
        if req.pagination.count_total {
            assert_eq!(res.pagination.total, Some(expected.len() as u64), "{name}");
        }
    }
}

#[test]
fn denoms_metadata_resumes_from_cursor() {
    let f = fixture();
    f.ledger.set_denom_metadata(eth_metadata()).unwrap();
    f.ledger.set_denom_metadata(atom_metadata()).unwrap();

    let first = f
        .queries
        .denoms_metadata(&DenomsMetadataRequest { pagination: PageRequest::with_limit(1) })
        .unwrap();
    assert_eq!(first.metadatas, vec![atom_metadata()]);
    assert_eq!(first.pagination.next_key.as_deref(), Some(&b"wei"[..]));

    let second = f
        .queries
        .denoms_metadata(&DenomsMetadataRequest {
            pagination: PageRequest::with_limit(1).resume(first.pagination.next_key),
        })
        .unwrap();
    assert_eq!(second.metadatas, vec![eth_metadata()]);
    assert!(second.pagination.next_key.is_none());
}

#[test]
fn denom_metadata_query() {
    let f = fixture();
    assert!(matches!(
        f.queries.denom_metadata(&DenomMetadataRequest::default()),
        Err(QueryError::InvalidArgument(_))
    ));
    assert!(matches!(
        f.queries.denom_metadata(&DenomMetadataRequest { denom: "foo".into() }),
        Err(QueryError::NotFound(_))
    ));

    f.ledger.set_denom_metadata(atom_metadata()).unwrap();
    let res = f
        .queries
        .denom_metadata(&DenomMetadataRequest { denom: "uatom".into() })
        .unwrap();
    assert_eq!(res.metadata, atom_metadata());
}

#[test]
fn token_factory_denom_metadata_query() {
    let denom = "factory/sei1gxskuzvhr4s8sdm2rpruaf7yx2dnmjn0zfdu9q/NEWCOIN";
    let f = fixture();
    let req = DenomMetadataRequest { denom: denom.into() };

    assert!(matches!(
        f.queries.token_factory_denom_metadata(&DenomMetadataRequest::default()),
        Err(QueryError::InvalidArgument(_))
    ));
    assert!(matches!(
        f.queries.token_factory_denom_metadata(&req),
        Err(QueryError::NotFound(_))
    ));

    let metadata = DenomMetadata {
        description: "Token factory custom token".into(),
        denom_units: vec![DenomUnit { denom: denom.into(), exponent: 0, aliases: vec![denom.into()] }],
        base: denom.into(),
        display: denom.into(),
    };
    f.ledger.set_denom_metadata(metadata.clone()).unwrap();
    assert_eq!(f.queries.token_factory_denom_metadata(&req).unwrap().metadata, metadata);

    // plain denoms are not token-factory denoms, even when they have metadata
    f.ledger.set_denom_metadata(atom_metadata()).unwrap();
    assert!(matches!(
        f.queries
            .token_factory_denom_metadata(&DenomMetadataRequest { denom: "uatom".into() }),
        Err(QueryError::InvalidArgument(_))
    ));
}

#[test]
fn responses_serialize_amounts_as_strings() {
    let f = fixture();
    f.ledger.mint_coins(&addr(1), &coins("30bar,50foo")).unwrap();
    let res = f
        .queries
        .all_balances(&AllBalancesRequest {
            address: addr(1).to_string(),
            pagination: PageRequest::with_limit(1),
        })
        .unwrap();
    let json = serde_json::to_value(&res).unwrap();
    assert_eq!(json["balances"][0]["amount"], "30");
    assert_eq!(json["pagination"]["next_key"], "Zm9v");
}
