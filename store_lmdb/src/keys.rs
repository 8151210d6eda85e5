//! Binary key layouts.
//!
//! Balance keys are `len(account) ++ account ++ denom`. The one-byte length
//! prefix keeps a prefix scan for one account from matching a longer account
//! that happens to start with the same bytes.

use bank_types::{AccountId, Amount, Coin, Denom};

use crate::LmdbError;

pub(crate) fn account_prefix(account: &AccountId) -> Vec<u8> {
    let bytes = account.as_bytes();
    let mut key = Vec::with_capacity(1 + bytes.len());
    // AccountId::MAX_LEN is 255, so the length always fits.
    key.push(bytes.len() as u8);
    key.extend_from_slice(bytes);
    key
}

pub(crate) fn balance_key(account: &AccountId, denom: &Denom) -> Vec<u8> {
    let mut key = account_prefix(account);
    key.extend_from_slice(denom.as_bytes());
    key
}

/// Split a balance key back into its account and denom.
pub(crate) fn split_balance_key(key: &[u8]) -> Result<(AccountId, Denom), LmdbError> {
    let (&len, rest) = key
        .split_first()
        .ok_or_else(|| LmdbError::Corruption("empty balance key".into()))?;
    let len = len as usize;
    if rest.len() <= len {
        return Err(LmdbError::Corruption("truncated balance key".into()));
    }
    let account =
        AccountId::new(&rest[..len]).map_err(|e| LmdbError::Corruption(e.to_string()))?;
    let denom = decode_denom(&rest[len..])?;
    Ok((account, denom))
}

pub(crate) fn decode_denom(bytes: &[u8]) -> Result<Denom, LmdbError> {
    Denom::from_key_bytes(bytes).map_err(|e| LmdbError::Corruption(e.to_string()))
}

pub(crate) fn decode_amount(bytes: &[u8]) -> Result<Amount, LmdbError> {
    Amount::from_be_bytes(bytes).map_err(|e| LmdbError::Corruption(e.to_string()))
}

pub(crate) fn decode_coin(denom: &[u8], amount: &[u8]) -> Result<Coin, LmdbError> {
    Ok(Coin::new(decode_denom(denom)?, decode_amount(amount)?))
}

/// Smallest key greater than every key starting with `prefix`.
///
/// Returns `false` when no such key exists (the prefix is all `0xFF`), in
/// which case the scan is unbounded above.
pub(crate) fn increment_prefix(prefix: &mut Vec<u8>) -> bool {
    while let Some(last) = prefix.pop() {
        if last < u8::MAX {
            prefix.push(last + 1);
            return true;
        }
    }
    false
}
