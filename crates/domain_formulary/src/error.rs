//! Formulary domain errors

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{DrugId, PlanId};

/// Errors that can occur in the formulary domain
#[derive(Debug, Error)]
pub enum FormularyError {
    #[error(
        "{count} overrides active for plan {plan_id}, drug {drug_id} on {date}; \
         validity windows must not overlap"
    )]
    OverlappingOverrides {
        plan_id: PlanId,
        drug_id: DrugId,
        date: NaiveDate,
        count: usize,
    },

    #[error("Quantity limit must be positive, got {0}")]
    InvalidQuantityLimit(Decimal),

    #[error("Invalid tier level: {0}")]
    InvalidTier(u8),

    #[error("Drug not found: {0}")]
    DrugNotFound(String),
}
