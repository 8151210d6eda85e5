//! Denomination metadata records.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::denom::validate_denom;
use crate::TypesError;

/// One unit of a denomination, e.g. `atom` = 10^6 `uatom`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomUnit {
    pub denom: String,
    /// Power of ten relative to the base unit.
    pub exponent: u32,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Descriptive record for a denomination, keyed by `base`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomMetadata {
    #[serde(default)]
    pub description: String,
    pub denom_units: Vec<DenomUnit>,
    pub base: String,
    pub display: String,
}

impl DenomMetadata {
    /// Check the record is internally consistent.
    ///
    /// - `base` and `display` are valid denoms;
    /// - the first unit is the base unit with exponent 0;
    /// - exponents strictly increase;
    /// - unit denoms are valid and unique, aliases non-blank and unique;
    /// - `display` names one of the units.
    pub fn validate(&self) -> Result<(), TypesError> {
        validate_denom(&self.base)
            .map_err(|e| TypesError::InvalidMetadata(format!("base: {e}")))?;
        validate_denom(&self.display)
            .map_err(|e| TypesError::InvalidMetadata(format!("display: {e}")))?;

        let first = self
            .denom_units
            .first()
            .ok_or_else(|| TypesError::InvalidMetadata("no denom units".into()))?;
        if first.denom != self.base {
            return Err(TypesError::InvalidMetadata(format!(
                "first denom unit {} must be the base denom {}",
                first.denom, self.base
            )));
        }
        if first.exponent != 0 {
            return Err(TypesError::InvalidMetadata(format!(
                "base denom unit {} must have exponent 0",
                first.denom
            )));
        }

        let mut seen_units = HashSet::new();
        let mut has_display = false;
        let mut previous: Option<u32> = None;
        for unit in &self.denom_units {
            if previous.is_some_and(|p| unit.exponent <= p) {
                return Err(TypesError::InvalidMetadata(format!(
                    "denom units must be sorted by strictly ascending exponent (at {})",
                    unit.denom
                )));
            }
            previous = Some(unit.exponent);

            validate_denom(&unit.denom)
                .map_err(|e| TypesError::InvalidMetadata(format!("unit: {e}")))?;
            if !seen_units.insert(unit.denom.as_str()) {
                return Err(TypesError::InvalidMetadata(format!(
                    "duplicate denom unit {}",
                    unit.denom
                )));
            }
            has_display |= unit.denom == self.display;

            let mut seen_aliases = HashSet::new();
            for alias in &unit.aliases {
                if alias.trim().is_empty() {
                    return Err(TypesError::InvalidMetadata(format!(
                        "blank alias for denom unit {}",
                        unit.denom
                    )));
                }
                if !seen_aliases.insert(alias.as_str()) {
                    return Err(TypesError::InvalidMetadata(format!(
                        "duplicate alias {alias} for denom unit {}",
                        unit.denom
                    )));
                }
            }
        }

        if !has_display {
            return Err(TypesError::InvalidMetadata(format!(
                "display denom {} is not among the denom units",
                self.display
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom() -> DenomMetadata {
        DenomMetadata {
            description: "The native staking token of the Cosmos Hub.".into(),
            denom_units: vec![
                DenomUnit {
                    denom: "uatom".into(),
                    exponent: 0,
                    aliases: vec!["microatom".into()],
                },
                DenomUnit {
                    denom: "atom".into(),
                    exponent: 6,
                    aliases: vec!["ATOM".into()],
                },
            ],
            base: "uatom".into(),
            display: "atom".into(),
        }
    }

    #[test]
    fn valid_record() {
        atom().validate().unwrap();
    }

    #[test]
    fn single_unit_alias_may_repeat_denom() {
        let denom = "factory/sei1gxskuzvhr4s8/NEWCOIN".to_string();
        let md = DenomMetadata {
            description: "Token factory custom token".into(),
            denom_units: vec![DenomUnit {
                denom: denom.clone(),
                exponent: 0,
                aliases: vec![denom.clone()],
            }],
            base: denom.clone(),
            display: denom,
        };
        md.validate().unwrap();
    }

    #[test]
    fn rejects_empty_base_and_display() {
        let mut md = atom();
        md.base.clear();
        assert!(md.validate().is_err());

        let mut md = atom();
        md.display.clear();
        assert!(md.validate().is_err());
    }

    #[test]
    fn rejects_non_ascending_exponents() {
        let mut md = atom();
        md.denom_units[1].exponent = 0;
        assert!(md.validate().is_err());
    }

    #[test]
    fn rejects_first_unit_not_base() {
        let mut md = atom();
        md.denom_units.swap(0, 1);
        assert!(md.validate().is_err());
    }

    #[test]
    fn rejects_missing_display_unit() {
        let mut md = atom();
        md.display = "matom".into();
        assert!(md.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_alias() {
        let mut md = atom();
        md.denom_units[1].aliases = vec!["ATOM".into(), "ATOM".into()];
        assert!(md.validate().is_err());
    }
}
