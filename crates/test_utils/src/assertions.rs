//! Assertion helpers for decision invariants

use domain_adjudication::{ClaimDecision, ClaimStatus};

/// Asserts the financial split never exceeds the claim total
pub fn assert_split_within_total(decision: &ClaimDecision) {
    let split = decision
        .member_copay
        .checked_add(&decision.plan_paid_amount)
        .and_then(|s| s.checked_add(&decision.deductible_amount))
        .expect("split overflow");
    assert!(
        split <= decision.total_amount,
        "split {split} exceeds total {} for claim {}",
        decision.total_amount,
        decision.claim_id
    );
}

/// Asserts the rejection code/description appear iff the claim is rejected
pub fn assert_rejection_pairing(decision: &ClaimDecision) {
    let rejected = decision.claim_status == ClaimStatus::Rejected;
    assert_eq!(
        rejected,
        decision.rejection_code.is_some(),
        "rejection_code pairing broken for claim {}",
        decision.claim_id
    );
    assert_eq!(
        rejected,
        decision.rejection_description.is_some(),
        "rejection_description pairing broken for claim {}",
        decision.claim_id
    );
}

/// Asserts a rejected decision carries zeroed amounts
pub fn assert_zeroed_amounts(decision: &ClaimDecision) {
    assert!(decision.member_copay.is_zero());
    assert!(decision.plan_paid_amount.is_zero());
}
