//! Inbound claim requests
//!
//! Validation runs before any business rule: a malformed request fails
//! without touching reference data and without persisting anything.
//! Screening is the advisory tier used on incoming claim feeds: notes flag
//! unusual claims for downstream review but never block adjudication.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{DrugId, MemberId, Money, MoneyError, Npi, PharmacyId};

use crate::error::AdjudicationError;

/// A request to adjudicate one pharmacy claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjudicationRequest {
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
    /// Sales tax when the pharmacy reports it; recorded on the decision but
    /// not part of the copay/plan-paid computation
    pub sales_tax: Option<Money>,
}

impl AdjudicationRequest {
    /// Validates the request against hard preconditions
    ///
    /// `today` is passed explicitly so the engine never reads ambient clock
    /// state; the caller decides what "today" means.
    pub fn validate(&self, today: NaiveDate) -> Result<(), AdjudicationError> {
        if self.days_supply == 0 || self.days_supply > 365 {
            return Err(AdjudicationError::Validation(format!(
                "days_supply must be within 1..=365, got {}",
                self.days_supply
            )));
        }
        if self.quantity_dispensed <= Decimal::ZERO {
            return Err(AdjudicationError::Validation(format!(
                "quantity_dispensed must be positive, got {}",
                self.quantity_dispensed
            )));
        }
        if self.ingredient_cost.is_negative() {
            return Err(AdjudicationError::Validation(
                "ingredient_cost cannot be negative".to_string(),
            ));
        }
        if self.dispensing_fee.is_negative() {
            return Err(AdjudicationError::Validation(
                "dispensing_fee cannot be negative".to_string(),
            ));
        }
        if self.prescription_number.trim().is_empty() {
            return Err(AdjudicationError::Validation(
                "prescription_number is required".to_string(),
            ));
        }
        if self.date_filled < self.date_prescribed {
            return Err(AdjudicationError::Validation(format!(
                "date_filled {} precedes date_prescribed {}",
                self.date_filled, self.date_prescribed
            )));
        }
        if self.date_filled > today {
            return Err(AdjudicationError::Validation(format!(
                "date_filled {} is in the future",
                self.date_filled
            )));
        }
        Ok(())
    }

    /// The claim total: ingredient cost plus dispensing fee
    pub fn total_amount(&self) -> Result<Money, MoneyError> {
        self.ingredient_cost.checked_add(&self.dispensing_fee)
    }

    /// Produces advisory review notes for unusual but valid claims
    pub fn screen(&self, today: NaiveDate) -> Vec<ScreeningNote> {
        let mut notes = Vec::new();

        if (today - self.date_filled).num_days() > 365 {
            notes.push(ScreeningNote::StaleFillDate);
        }
        if self.quantity_dispensed > dec!(1000) {
            notes.push(ScreeningNote::HighQuantity);
        }
        if let Ok(total) = self.total_amount() {
            if total.amount() > dec!(50000) {
                notes.push(ScreeningNote::HighCost);
            }
        }

        notes
    }
}

/// Advisory note attached to a decision for downstream review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningNote {
    /// Fill date is more than one year old
    StaleFillDate,
    /// Unusually high quantity dispensed
    HighQuantity,
    /// Unusually high cost, potential specialty drug
    HighCost,
}

impl ScreeningNote {
    pub fn description(&self) -> &'static str {
        match self {
            ScreeningNote::StaleFillDate => "Fill date is more than 1 year old",
            ScreeningNote::HighQuantity => "Unusually high quantity dispensed",
            ScreeningNote::HighCost => "Unusually high cost - potential specialty drug",
        }
    }
}
