//! Membership records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{MemberId, PlanId};

use crate::error::EligibilityError;

/// Enrollment status of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Active,
    Inactive,
    Suspended,
    Terminated,
}

impl fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EligibilityStatus::Active => "active",
            EligibilityStatus::Inactive => "inactive",
            EligibilityStatus::Suspended => "suspended",
            EligibilityStatus::Terminated => "terminated",
        };
        write!(f, "{s}")
    }
}

/// A plan member
///
/// Reference data owned by the enrollment system; read-only to adjudication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier
    pub id: MemberId,
    /// External member number as it appears on the card (e.g. "M000123")
    pub member_number: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// The benefit plan the member is enrolled in
    pub plan_id: PlanId,
    /// Enrollment status
    pub eligibility_status: EligibilityStatus,
    /// First date of coverage (inclusive)
    pub effective_date: NaiveDate,
    /// Last date of coverage (inclusive), if enrollment has ended
    pub termination_date: Option<NaiveDate>,
}

impl Member {
    /// Creates a member record, validating the enrollment dates
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: MemberId,
        member_number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        plan_id: PlanId,
        eligibility_status: EligibilityStatus,
        effective_date: NaiveDate,
        termination_date: Option<NaiveDate>,
    ) -> Result<Self, EligibilityError> {
        if let Some(termination) = termination_date {
            if termination < effective_date {
                return Err(EligibilityError::TerminationBeforeEffective {
                    effective: effective_date,
                    termination,
                });
            }
        }
        Ok(Self {
            id,
            member_number: member_number.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            plan_id,
            eligibility_status,
            effective_date,
            termination_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_member_creation() {
        let member = Member::new(
            MemberId::new_v7(),
            "M000001",
            "Jane",
            "Doe",
            PlanId::new_v7(),
            EligibilityStatus::Active,
            d(2024, 1, 1),
            None,
        )
        .unwrap();

        assert_eq!(member.member_number, "M000001");
        assert!(member.termination_date.is_none());
    }

    #[test]
    fn test_termination_before_effective_rejected() {
        let result = Member::new(
            MemberId::new_v7(),
            "M000002",
            "John",
            "Doe",
            PlanId::new_v7(),
            EligibilityStatus::Terminated,
            d(2024, 6, 1),
            Some(d(2024, 1, 1)),
        );

        assert!(matches!(
            result,
            Err(EligibilityError::TerminationBeforeEffective { .. })
        ));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&EligibilityStatus::Suspended).unwrap();
        assert_eq!(json, "\"suspended\"");
    }
}
