//! Query request and response shapes.
//!
//! Addresses and denoms arrive as plain strings and are validated by the
//! service, so a malformed request surfaces as `InvalidArgument` rather than
//! a deserialization failure.

use serde::{Deserialize, Serialize};

use bank_types::{Coin, Coins, DenomMetadata, Params};

use crate::pagination::{PageRequest, PageResponse};

// ── Balances ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BalanceRequest {
    pub address: String,
    pub denom: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: Coin,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AllBalancesRequest {
    pub address: String,
    #[serde(default)]
    pub pagination: PageRequest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllBalancesResponse {
    pub balances: Coins,
    pub pagination: PageResponse,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SpendableBalancesRequest {
    pub address: String,
    #[serde(default)]
    pub pagination: PageRequest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendableBalancesResponse {
    pub balances: Coins,
    pub pagination: PageResponse,
}

// ── Supply ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TotalSupplyRequest {
    #[serde(default)]
    pub pagination: PageRequest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalSupplyResponse {
    pub supply: Coins,
    pub pagination: PageResponse,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SupplyOfRequest {
    pub denom: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyOfResponse {
    pub amount: Coin,
}

// ── Metadata ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DenomsMetadataRequest {
    #[serde(default)]
    pub pagination: PageRequest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomsMetadataResponse {
    pub metadatas: Vec<DenomMetadata>,
    pub pagination: PageResponse,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DenomMetadataRequest {
    pub denom: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomMetadataResponse {
    pub metadata: DenomMetadata,
}

// ── Params ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsResponse {
    pub params: Params,
}
