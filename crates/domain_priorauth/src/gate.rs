//! The prior authorization gate
//!
//! Answers one question: does an approved, unexpired authorization exist for
//! this (member, drug) pair on the service date? The gate only reads;
//! authorizations are never consumed or decremented here, so a single
//! approval satisfies any number of claims. Intended reuse limits are an
//! open product question tracked in DESIGN.md.

use chrono::NaiveDate;

use core_kernel::{DrugId, MemberId};

use crate::authorization::PriorAuthorization;

/// Returns true if any record authorizes the (member, drug) pair on the date
pub fn authorized(
    records: &[PriorAuthorization],
    member_id: MemberId,
    drug_id: DrugId,
    service_date: NaiveDate,
) -> bool {
    records
        .iter()
        .filter(|a| a.member_id == member_id && a.drug_id == drug_id)
        .any(|a| a.covers(service_date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorization::AuthorizationStatus;
    use core_kernel::PriorAuthId;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_no_records_means_unauthorized() {
        assert!(!authorized(
            &[],
            MemberId::new_v7(),
            DrugId::new_v7(),
            d(2024, 6, 1)
        ));
    }

    #[test]
    fn test_approval_for_other_member_does_not_count() {
        let member = MemberId::new_v7();
        let drug = DrugId::new_v7();
        let other =
            PriorAuthorization::approved(MemberId::new_v7(), drug, d(2024, 1, 1), None);

        assert!(!authorized(&[other], member, drug, d(2024, 6, 1)));
    }

    #[test]
    fn test_denied_then_approved_still_authorizes() {
        let member = MemberId::new_v7();
        let drug = DrugId::new_v7();
        let denied = PriorAuthorization::new(
            PriorAuthId::new_v7(),
            member,
            drug,
            AuthorizationStatus::Denied,
            None,
            None,
        )
        .unwrap();
        let approved = PriorAuthorization::approved(member, drug, d(2024, 1, 1), None);

        assert!(authorized(&[denied, approved], member, drug, d(2024, 6, 1)));
    }

    #[test]
    fn test_gate_does_not_mutate_records() {
        let member = MemberId::new_v7();
        let drug = DrugId::new_v7();
        let records = vec![PriorAuthorization::approved(
            member,
            drug,
            d(2024, 1, 1),
            None,
        )];

        // Two claims against the same approval both pass.
        assert!(authorized(&records, member, drug, d(2024, 6, 1)));
        assert!(authorized(&records, member, drug, d(2024, 6, 2)));
    }
}
