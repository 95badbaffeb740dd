//! Benefit resolution
//!
//! Resolution merges a drug's base attributes with the override active on the
//! service date. An override field participates only when explicitly set;
//! otherwise the drug's value applies. The copay falls back through
//! override, drug-level copay, then the base amount of the *resolved* tier,
//! so a tier override changes which base copay applies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::drug::{Drug, Tier};
use crate::overrides::FormularyOverride;

/// The effective benefit terms for a (plan, drug, date) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBenefit {
    pub tier: Tier,
    pub copay: Money,
    pub requires_prior_auth: bool,
    pub quantity_limit: Option<Decimal>,
}

/// Resolves the effective benefit for a drug under an optional active override
pub fn resolve(drug: &Drug, active: Option<&FormularyOverride>) -> ResolvedBenefit {
    let tier = active
        .and_then(|o| o.tier_override)
        .unwrap_or(drug.tier);

    let copay = active
        .and_then(|o| o.copay_amount)
        .or(drug.copay)
        .unwrap_or_else(|| tier.base_copay());

    let requires_prior_auth = active
        .and_then(|o| o.prior_auth_override)
        .unwrap_or(drug.prior_auth_required);

    let quantity_limit = active
        .and_then(|o| o.quantity_limit_override)
        .or(drug.quantity_limit);

    ResolvedBenefit {
        tier,
        copay,
        requires_prior_auth,
        quantity_limit,
    }
}
