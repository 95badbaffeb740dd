//! Prior authorization records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{DrugId, MemberId, PriorAuthId};

use crate::error::PriorAuthError;

/// Review status of an authorization request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    Pending,
    Approved,
    Denied,
    Expired,
}

/// A prior authorization for one (member, drug) pair
///
/// Reference data owned by the utilization-management system; read-only to
/// adjudication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorAuthorization {
    /// Unique identifier
    pub id: PriorAuthId,
    /// Member the authorization covers
    pub member_id: MemberId,
    /// Drug the authorization covers
    pub drug_id: DrugId,
    /// Review status
    pub status: AuthorizationStatus,
    /// Date approval was granted; required when status is approved
    pub approved_date: Option<NaiveDate>,
    /// Last service date the approval covers (inclusive); None means no expiry
    pub expiration_date: Option<NaiveDate>,
}

impl PriorAuthorization {
    /// Creates an authorization record, enforcing the approval-date invariant
    pub fn new(
        id: PriorAuthId,
        member_id: MemberId,
        drug_id: DrugId,
        status: AuthorizationStatus,
        approved_date: Option<NaiveDate>,
        expiration_date: Option<NaiveDate>,
    ) -> Result<Self, PriorAuthError> {
        if status == AuthorizationStatus::Approved && approved_date.is_none() {
            return Err(PriorAuthError::MissingApprovalDate(id));
        }
        Ok(Self {
            id,
            member_id,
            drug_id,
            status,
            approved_date,
            expiration_date,
        })
    }

    /// Convenience constructor for an approved authorization
    pub fn approved(
        member_id: MemberId,
        drug_id: DrugId,
        approved_date: NaiveDate,
        expiration_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: PriorAuthId::new_v7(),
            member_id,
            drug_id,
            status: AuthorizationStatus::Approved,
            approved_date: Some(approved_date),
            expiration_date,
        }
    }

    /// Returns true if this authorization covers service on the given date
    ///
    /// Only approved records cover anything; an expiration date bounds the
    /// covered range inclusively.
    pub fn covers(&self, service_date: NaiveDate) -> bool {
        self.status == AuthorizationStatus::Approved
            && self.expiration_date.map_or(true, |exp| exp >= service_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_approved_requires_approval_date() {
        let result = PriorAuthorization::new(
            PriorAuthId::new_v7(),
            MemberId::new_v7(),
            DrugId::new_v7(),
            AuthorizationStatus::Approved,
            None,
            None,
        );
        assert!(matches!(
            result,
            Err(PriorAuthError::MissingApprovalDate(_))
        ));
    }

    #[test]
    fn test_pending_does_not_cover() {
        let auth = PriorAuthorization::new(
            PriorAuthId::new_v7(),
            MemberId::new_v7(),
            DrugId::new_v7(),
            AuthorizationStatus::Pending,
            None,
            None,
        )
        .unwrap();

        assert!(!auth.covers(d(2024, 6, 1)));
    }

    #[test]
    fn test_expiration_is_inclusive() {
        let auth = PriorAuthorization::approved(
            MemberId::new_v7(),
            DrugId::new_v7(),
            d(2024, 1, 1),
            Some(d(2024, 6, 30)),
        );

        assert!(auth.covers(d(2024, 6, 30)));
        assert!(!auth.covers(d(2024, 7, 1)));
    }

    #[test]
    fn test_no_expiration_covers_any_date() {
        let auth = PriorAuthorization::approved(
            MemberId::new_v7(),
            DrugId::new_v7(),
            d(2024, 1, 1),
            None,
        );

        assert!(auth.covers(d(2030, 12, 31)));
    }
}
