//! Comprehensive tests for domain_priorauth

use chrono::NaiveDate;

use core_kernel::{DrugId, MemberId, PriorAuthId};
use domain_priorauth::{authorized, AuthorizationStatus, PriorAuthorization};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn only_approved_status_authorizes() {
    let member = MemberId::new_v7();
    let drug = DrugId::new_v7();

    for status in [
        AuthorizationStatus::Pending,
        AuthorizationStatus::Denied,
        AuthorizationStatus::Expired,
    ] {
        let record = PriorAuthorization::new(
            PriorAuthId::new_v7(),
            member,
            drug,
            status,
            None,
            None,
        )
        .unwrap();
        assert!(
            !authorized(&[record], member, drug, d(2024, 6, 1)),
            "{status:?} must not authorize"
        );
    }
}

#[test]
fn expired_approval_does_not_authorize_later_fills() {
    let member = MemberId::new_v7();
    let drug = DrugId::new_v7();
    let record =
        PriorAuthorization::approved(member, drug, d(2024, 1, 1), Some(d(2024, 3, 31)));

    assert!(authorized(std::slice::from_ref(&record), member, drug, d(2024, 3, 31)));
    assert!(!authorized(&[record], member, drug, d(2024, 4, 1)));
}

#[test]
fn approval_scoped_to_drug() {
    let member = MemberId::new_v7();
    let approved_drug = DrugId::new_v7();
    let requested_drug = DrugId::new_v7();
    let record = PriorAuthorization::approved(member, approved_drug, d(2024, 1, 1), None);

    assert!(!authorized(&[record], member, requested_drug, d(2024, 6, 1)));
}

#[test]
fn status_serialization_matches_feed_vocabulary() {
    let json = serde_json::to_string(&AuthorizationStatus::Approved).unwrap();
    assert_eq!(json, "\"approved\"");
    let back: AuthorizationStatus = serde_json::from_str("\"expired\"").unwrap();
    assert_eq!(back, AuthorizationStatus::Expired);
}
