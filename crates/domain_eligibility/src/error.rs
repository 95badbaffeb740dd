//! Eligibility domain errors

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in the eligibility domain
#[derive(Debug, Error)]
pub enum EligibilityError {
    #[error("Termination date {termination} precedes effective date {effective}")]
    TerminationBeforeEffective {
        effective: NaiveDate,
        termination: NaiveDate,
    },

    #[error("Member not found: {0}")]
    MemberNotFound(String),
}
