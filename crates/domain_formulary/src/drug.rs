//! Drug catalog entries

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{DrugId, Money, Ndc};

use crate::error::FormularyError;

/// Cost-sharing tier
///
/// Tier 1 carries the lowest member cost-share, tier 4 the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    One,
    Two,
    Three,
    Four,
}

impl Tier {
    /// Base member copay implied by the tier when neither the drug nor an
    /// override sets an explicit amount
    pub fn base_copay(&self) -> Money {
        match self {
            Tier::One => Money::from_cents(1_000),
            Tier::Two => Money::from_cents(2_500),
            Tier::Three => Money::from_cents(5_000),
            Tier::Four => Money::from_cents(10_000),
        }
    }

    /// Numeric tier level (1..=4)
    pub fn level(&self) -> u8 {
        match self {
            Tier::One => 1,
            Tier::Two => 2,
            Tier::Three => 3,
            Tier::Four => 4,
        }
    }

    /// Parses a numeric tier level
    pub fn from_level(level: u8) -> Result<Self, FormularyError> {
        match level {
            1 => Ok(Tier::One),
            2 => Ok(Tier::Two),
            3 => Ok(Tier::Three),
            4 => Ok(Tier::Four),
            other => Err(FormularyError::InvalidTier(other)),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.level())
    }
}

/// A drug on the formulary
///
/// Reference data owned by the drug catalog system; read-only to adjudication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drug {
    /// Unique identifier
    pub id: DrugId,
    /// National Drug Code
    pub ndc: Ndc,
    /// Product name as listed
    pub name: String,
    /// Cost-sharing tier
    pub tier: Tier,
    /// Whether dispensing requires an approved prior authorization
    pub prior_auth_required: bool,
    /// Maximum units per fill before the over-limit penalty applies
    pub quantity_limit: Option<Decimal>,
    /// Drug-level copay, overriding the tier base amount when set
    pub copay: Option<Money>,
}

impl Drug {
    /// Creates a catalog entry, validating the quantity limit
    pub fn new(
        id: DrugId,
        ndc: Ndc,
        name: impl Into<String>,
        tier: Tier,
        prior_auth_required: bool,
        quantity_limit: Option<Decimal>,
        copay: Option<Money>,
    ) -> Result<Self, FormularyError> {
        if let Some(limit) = quantity_limit {
            if limit <= Decimal::ZERO {
                return Err(FormularyError::InvalidQuantityLimit(limit));
            }
        }
        Ok(Self {
            id,
            ndc,
            name: name.into(),
            tier,
            prior_auth_required,
            quantity_limit,
            copay,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tier_base_copays() {
        assert_eq!(Tier::One.base_copay().amount(), dec!(10.00));
        assert_eq!(Tier::Two.base_copay().amount(), dec!(25.00));
        assert_eq!(Tier::Three.base_copay().amount(), dec!(50.00));
        assert_eq!(Tier::Four.base_copay().amount(), dec!(100.00));
    }

    #[test]
    fn test_tier_level_round_trip() {
        for level in 1..=4u8 {
            assert_eq!(Tier::from_level(level).unwrap().level(), level);
        }
        assert!(Tier::from_level(0).is_err());
        assert!(Tier::from_level(5).is_err());
    }

    #[test]
    fn test_non_positive_quantity_limit_rejected() {
        let result = Drug::new(
            DrugId::new_v7(),
            "00093-0058-01".parse().unwrap(),
            "Atorvastatin 20mg",
            Tier::One,
            false,
            Some(dec!(0)),
            None,
        );
        assert!(matches!(
            result,
            Err(FormularyError::InvalidQuantityLimit(_))
        ));
    }
}
