//! Claims DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Money;
use domain_adjudication::{AdjudicationRequest, ClaimDecision, StatusSummary};

use crate::error::ApiError;

/// Inbound adjudication request
#[derive(Debug, Deserialize, Validate)]
pub struct AdjudicateClaimRequest {
    pub member_id: Uuid,
    pub drug_id: Uuid,
    pub pharmacy_id: Uuid,
    #[validate(length(min = 1, max = 30))]
    pub prescription_number: String,
    pub date_prescribed: NaiveDate,
    pub date_filled: NaiveDate,
    #[validate(range(min = 1, max = 365))]
    pub days_supply: u16,
    pub quantity_dispensed: Decimal,
    #[validate(length(equal = 10))]
    pub prescriber_npi: String,
    pub ingredient_cost: Decimal,
    pub dispensing_fee: Decimal,
    pub sales_tax: Option<Decimal>,
}

impl AdjudicateClaimRequest {
    /// Converts the validated DTO into a domain request
    pub fn into_domain(self) -> Result<AdjudicationRequest, ApiError> {
        let prescriber_npi = self
            .prescriber_npi
            .parse()
            .map_err(|e| ApiError::Validation(format!("{e}")))?;

        Ok(AdjudicationRequest {
            member_id: self.member_id.into(),
            drug_id: self.drug_id.into(),
            pharmacy_id: self.pharmacy_id.into(),
            prescription_number: self.prescription_number,
            date_prescribed: self.date_prescribed,
            date_filled: self.date_filled,
            days_supply: self.days_supply,
            quantity_dispensed: self.quantity_dispensed,
            prescriber_npi,
            ingredient_cost: Money::new(self.ingredient_cost),
            dispensing_fee: Money::new(self.dispensing_fee),
            sales_tax: self.sales_tax.map(Money::new),
        })
    }
}

/// Outbound claim decision
#[derive(Debug, Serialize)]
pub struct ClaimDecisionResponse {
    pub claim_id: Uuid,
    pub claim_status: String,
    pub member_copay: Decimal,
    pub plan_paid_amount: Decimal,
    pub total_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub review_notes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ClaimDecision> for ClaimDecisionResponse {
    fn from(decision: ClaimDecision) -> Self {
        Self {
            claim_id: *decision.claim_id.as_uuid(),
            claim_status: match decision.claim_status {
                domain_adjudication::ClaimStatus::Processed => "processed".to_string(),
                domain_adjudication::ClaimStatus::Rejected => "rejected".to_string(),
            },
            member_copay: decision.member_copay.amount(),
            plan_paid_amount: decision.plan_paid_amount.amount(),
            total_amount: decision.total_amount.amount(),
            rejection_code: decision.rejection_code.map(|c| c.as_str().to_string()),
            rejection_description: decision.rejection_description,
            review_notes: decision
                .review_notes
                .iter()
                .map(|n| n.description().to_string())
                .collect(),
            created_at: decision.created_at,
        }
    }
}

/// Query parameters for the claims summary
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Earliest fill date included; defaults to the configured window
    pub since: Option<NaiveDate>,
}

/// One summary bucket
#[derive(Debug, Serialize)]
pub struct StatusSummaryResponse {
    pub claim_status: String,
    pub claim_count: u64,
    pub total_amount: Decimal,
}

impl From<StatusSummary> for StatusSummaryResponse {
    fn from(summary: StatusSummary) -> Self {
        Self {
            claim_status: match summary.claim_status {
                domain_adjudication::ClaimStatus::Processed => "processed".to_string(),
                domain_adjudication::ClaimStatus::Rejected => "rejected".to_string(),
            },
            claim_count: summary.claim_count,
            total_amount: summary.total_amount.amount(),
        }
    }
}

/// Claims activity summary
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub since: NaiveDate,
    pub buckets: Vec<StatusSummaryResponse>,
}
