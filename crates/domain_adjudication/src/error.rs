//! Adjudication errors
//!
//! These are failures, not outcomes: none of them leaves a persisted
//! decision behind. Business rejections (E001, P001) are not errors — they
//! come back as successfully persisted rejected decisions.

use thiserror::Error;

use core_kernel::{Money, MoneyError};

use crate::ports::PortError;

/// Errors that abort an adjudication call
#[derive(Debug, Error)]
pub enum AdjudicationError {
    /// Malformed or out-of-range input; correct and resubmit
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced member, drug, or pharmacy does not exist
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Reference data violates an invariant (e.g. overlapping overrides)
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// The computed copay exceeds the claim total; clamping is not permitted
    #[error("Computation error: member copay {copay} exceeds claim total {total}")]
    Computation { copay: Money, total: Money },

    /// The persistence layer failed; the caller may retry the whole request
    #[error("Claim store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl From<PortError> for AdjudicationError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::NotFound { entity_type, id } => {
                AdjudicationError::NotFound { entity_type, id }
            }
            PortError::Integrity(message) => AdjudicationError::DataIntegrity(message),
            PortError::Unavailable(message) => AdjudicationError::StoreUnavailable(message),
        }
    }
}
