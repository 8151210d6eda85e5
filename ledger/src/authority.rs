//! Minting authority: who may mint which denom.

use std::collections::HashMap;

use bank_types::{AccountId, Denom, FactoryDenom};

/// Decides whether a module account may mint a denom.
pub trait MintAuthority: Send + Sync {
    fn is_authorized(&self, module: &AccountId, denom: &Denom) -> bool;
}

/// Any module may mint anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct PermitAll;

impl MintAuthority for PermitAll {
    fn is_authorized(&self, _module: &AccountId, _denom: &Denom) -> bool {
        true
    }
}

/// A table of restricted denoms.
///
/// A denom listed in the table may only be minted by its owner. A token
/// factory denom `factory/<creator>/<subdenom>` is owned by the account whose
/// hex form is `<creator>`. Every other denom is unrestricted.
#[derive(Clone, Debug, Default)]
pub struct AuthorityTable {
    owners: HashMap<Denom, AccountId>,
}

impl AuthorityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict `denom` to `module`.
    pub fn restrict(&mut self, denom: Denom, module: AccountId) -> &mut Self {
        self.owners.insert(denom, module);
        self
    }

    pub fn owner_of(&self, denom: &Denom) -> Option<&AccountId> {
        self.owners.get(denom)
    }
}

impl MintAuthority for AuthorityTable {
    fn is_authorized(&self, module: &AccountId, denom: &Denom) -> bool {
        if let Some(owner) = self.owners.get(denom) {
            return owner == module;
        }
        match FactoryDenom::parse(denom.as_str()) {
            Ok(factory) => factory.creator == module.to_hex(),
            Err(_) => true,
        }
    }
}

impl<T: MintAuthority + ?Sized> MintAuthority for std::sync::Arc<T> {
    fn is_authorized(&self, module: &AccountId, denom: &Denom) -> bool {
        (**self).is_authorized(module, denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(b: u8) -> AccountId {
        AccountId::new(vec![b; 20]).unwrap()
    }

    #[test]
    fn unrestricted_denoms_are_open() {
        let table = AuthorityTable::new();
        assert!(table.is_authorized(&account(1), &Denom::new("stake").unwrap()));
    }

    #[test]
    fn restricted_denom_only_for_owner() {
        let mut table = AuthorityTable::new();
        table.restrict(Denom::new("stake").unwrap(), account(1));
        assert!(table.is_authorized(&account(1), &Denom::new("stake").unwrap()));
        assert!(!table.is_authorized(&account(2), &Denom::new("stake").unwrap()));
    }

    #[test]
    fn factory_denom_owned_by_creator() {
        let table = AuthorityTable::new();
        let creator = account(0xab);
        let denom = Denom::new(format!("factory/{}/NEWCOIN", creator.to_hex())).unwrap();
        assert!(table.is_authorized(&creator, &denom));
        assert!(!table.is_authorized(&account(1), &denom));
    }
}
