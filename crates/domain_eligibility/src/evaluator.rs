//! Service-date eligibility evaluation
//!
//! Eligibility is a pure function of the member snapshot and the service
//! date: the same inputs always produce the same outcome.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::member::{EligibilityStatus, Member};

/// Outcome of an eligibility evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EligibilityOutcome {
    /// Member may receive service on the date
    Eligible,
    /// Enrollment status is not active
    NotActive(EligibilityStatus),
    /// Service date precedes the coverage effective date
    BeforeEffective,
    /// Service date is past the coverage termination date
    AfterTermination,
}

impl EligibilityOutcome {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityOutcome::Eligible)
    }

    /// Human-readable reason recorded on rejected claims
    pub fn description(&self) -> String {
        match self {
            EligibilityOutcome::Eligible => "eligible".to_string(),
            EligibilityOutcome::NotActive(status) => format!("status: {status}"),
            EligibilityOutcome::BeforeEffective => "before effective date".to_string(),
            EligibilityOutcome::AfterTermination => "after termination".to_string(),
        }
    }
}

/// Evaluates whether a member may receive service on the given date
///
/// Rules apply in order, first match wins:
/// 1. Enrollment status must be active.
/// 2. The service date must not precede the effective date.
/// 3. The service date must not follow the termination date (when present;
///    the termination date itself is still covered).
pub fn evaluate(member: &Member, service_date: NaiveDate) -> EligibilityOutcome {
    if member.eligibility_status != EligibilityStatus::Active {
        return EligibilityOutcome::NotActive(member.eligibility_status);
    }
    if service_date < member.effective_date {
        return EligibilityOutcome::BeforeEffective;
    }
    if let Some(termination) = member.termination_date {
        if service_date > termination {
            return EligibilityOutcome::AfterTermination;
        }
    }
    EligibilityOutcome::Eligible
}
