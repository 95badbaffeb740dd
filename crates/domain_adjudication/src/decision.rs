//! Claim decisions
//!
//! Every adjudication attempt — paid or rejected — becomes exactly one
//! immutable `ClaimDecision`. The `Disposition` variant type is the single
//! source of the status/code/description triple, so a rejection code can
//! never appear on a processed claim or go missing from a rejected one.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimId, DrugId, MemberId, Money, Npi, PharmacyId};
use domain_eligibility::EligibilityOutcome;

use crate::request::{AdjudicationRequest, ScreeningNote};

/// Terminal claim status produced by the engine
///
/// Reversal and void are lifecycle operations owned elsewhere; they act on an
/// already-persisted decision and never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Processed,
    Rejected,
}

/// Closed enumeration of rejection codes
///
/// New codes are added here, never as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionCode {
    /// Member not eligible on the fill date
    E001,
    /// Missing or expired prior authorization
    P001,
}

impl RejectionCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionCode::E001 => "E001",
            RejectionCode::P001 => "P001",
        }
    }
}

impl fmt::Display for RejectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of one adjudication run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Claim is payable with the computed split
    Accepted { member_copay: Money, plan_paid: Money },
    /// Member failed the eligibility rules
    RejectedEligibility(EligibilityOutcome),
    /// Required prior authorization is missing or expired
    RejectedPriorAuth,
}

impl Disposition {
    /// The rejection code and description, when this is a rejection
    pub fn rejection(&self) -> Option<(RejectionCode, String)> {
        match self {
            Disposition::Accepted { .. } => None,
            Disposition::RejectedEligibility(outcome) => {
                Some((RejectionCode::E001, outcome.description()))
            }
            Disposition::RejectedPriorAuth => Some((
                RejectionCode::P001,
                "Prior authorization required".to_string(),
            )),
        }
    }
}

/// One immutable adjudication record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimDecision {
    /// Unique, time-ordered identifier
    pub claim_id: ClaimId,
    pub member_id: MemberId,
    pub drug_id: DrugId,
    pub pharmacy_id: PharmacyId,
    pub prescription_number: String,
    pub date_prescribed: NaiveDate,
    pub date_filled: NaiveDate,
    pub days_supply: u16,
    pub quantity_dispensed: Decimal,
    pub prescriber_npi: Npi,
    pub ingredient_cost: Money,
    pub dispensing_fee: Money,
    /// Recorded when supplied; not part of the split computation
    pub sales_tax: Option<Money>,
    pub total_amount: Money,
    /// Recorded for downstream accumulators; the engine does not apply it
    pub deductible_amount: Money,
    pub member_copay: Money,
    pub plan_paid_amount: Money,
    pub claim_status: ClaimStatus,
    pub rejection_code: Option<RejectionCode>,
    pub rejection_description: Option<String>,
    /// Advisory screening notes for downstream review
    pub review_notes: Vec<ScreeningNote>,
    pub created_at: DateTime<Utc>,
}

impl ClaimDecision {
    /// Builds the record for a request and its disposition
    ///
    /// Rejected dispositions zero both sides of the split; the code and
    /// description come from the disposition itself.
    pub fn record(
        request: &AdjudicationRequest,
        total_amount: Money,
        disposition: Disposition,
        review_notes: Vec<ScreeningNote>,
    ) -> Self {
        let (claim_status, member_copay, plan_paid_amount) = match &disposition {
            Disposition::Accepted {
                member_copay,
                plan_paid,
            } => (ClaimStatus::Processed, *member_copay, *plan_paid),
            Disposition::RejectedEligibility(_) | Disposition::RejectedPriorAuth => {
                (ClaimStatus::Rejected, Money::zero(), Money::zero())
            }
        };
        let (rejection_code, rejection_description) = match disposition.rejection() {
            Some((code, description)) => (Some(code), Some(description)),
            None => (None, None),
        };

        Self {
            claim_id: ClaimId::new_v7(),
            member_id: request.member_id,
            drug_id: request.drug_id,
            pharmacy_id: request.pharmacy_id,
            prescription_number: request.prescription_number.clone(),
            date_prescribed: request.date_prescribed,
            date_filled: request.date_filled,
            days_supply: request.days_supply,
            quantity_dispensed: request.quantity_dispensed,
            prescriber_npi: request.prescriber_npi.clone(),
            ingredient_cost: request.ingredient_cost,
            dispensing_fee: request.dispensing_fee,
            sales_tax: request.sales_tax,
            total_amount,
            deductible_amount: Money::zero(),
            member_copay,
            plan_paid_amount,
            claim_status,
            rejection_code,
            rejection_description,
            review_notes,
            created_at: Utc::now(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.claim_status == ClaimStatus::Rejected
    }
}

/// Aggregated claim activity for one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub claim_status: ClaimStatus,
    pub claim_count: u64,
    pub total_amount: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_eligibility::EligibilityStatus;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn request() -> AdjudicationRequest {
        AdjudicationRequest {
            member_id: MemberId::new_v7(),
            drug_id: DrugId::new_v7(),
            pharmacy_id: PharmacyId::new_v7(),
            prescription_number: "RX123456".to_string(),
            date_prescribed: d(2024, 3, 10),
            date_filled: d(2024, 3, 15),
            days_supply: 30,
            quantity_dispensed: dec!(30),
            prescriber_npi: "9876543210".parse().unwrap(),
            ingredient_cost: Money::new(dec!(15.75)),
            dispensing_fee: Money::new(dec!(1.75)),
            sales_tax: None,
        }
    }

    #[test]
    fn test_accepted_record_has_no_rejection_fields() {
        let r = request();
        let total = r.total_amount().unwrap();
        let decision = ClaimDecision::record(
            &r,
            total,
            Disposition::Accepted {
                member_copay: Money::new(dec!(10.00)),
                plan_paid: Money::new(dec!(7.50)),
            },
            vec![],
        );

        assert_eq!(decision.claim_status, ClaimStatus::Processed);
        assert!(decision.rejection_code.is_none());
        assert!(decision.rejection_description.is_none());
    }

    #[test]
    fn test_eligibility_rejection_pairs_code_and_reason() {
        let r = request();
        let total = r.total_amount().unwrap();
        let decision = ClaimDecision::record(
            &r,
            total,
            Disposition::RejectedEligibility(EligibilityOutcome::NotActive(
                EligibilityStatus::Inactive,
            )),
            vec![],
        );

        assert_eq!(decision.claim_status, ClaimStatus::Rejected);
        assert_eq!(decision.rejection_code, Some(RejectionCode::E001));
        assert_eq!(
            decision.rejection_description.as_deref(),
            Some("status: inactive")
        );
        assert!(decision.member_copay.is_zero());
        assert!(decision.plan_paid_amount.is_zero());
    }

    #[test]
    fn test_prior_auth_rejection_uses_fixed_description() {
        let r = request();
        let total = r.total_amount().unwrap();
        let decision =
            ClaimDecision::record(&r, total, Disposition::RejectedPriorAuth, vec![]);

        assert_eq!(decision.rejection_code, Some(RejectionCode::P001));
        assert_eq!(
            decision.rejection_description.as_deref(),
            Some("Prior authorization required")
        );
    }

    #[test]
    fn test_code_present_iff_rejected() {
        let r = request();
        let total = r.total_amount().unwrap();
        let dispositions = [
            Disposition::Accepted {
                member_copay: Money::new(dec!(10.00)),
                plan_paid: Money::new(dec!(7.50)),
            },
            Disposition::RejectedEligibility(EligibilityOutcome::BeforeEffective),
            Disposition::RejectedPriorAuth,
        ];

        for disposition in dispositions {
            let decision = ClaimDecision::record(&r, total, disposition, vec![]);
            assert_eq!(decision.is_rejected(), decision.rejection_code.is_some());
            assert_eq!(decision.is_rejected(), decision.rejection_description.is_some());
        }
    }

    #[test]
    fn test_each_record_gets_a_fresh_claim_id() {
        let r = request();
        let total = r.total_amount().unwrap();
        let first = ClaimDecision::record(&r, total, Disposition::RejectedPriorAuth, vec![]);
        let second = ClaimDecision::record(&r, total, Disposition::RejectedPriorAuth, vec![]);

        assert_ne!(first.claim_id, second.claim_id);
    }
}
