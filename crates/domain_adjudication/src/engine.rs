//! The adjudication engine
//!
//! Orchestrates eligibility, formulary resolution, the prior-auth gate, and
//! the financial split, then persists exactly one decision per call. The
//! adjudication date is an explicit argument; the engine holds no ambient
//! state, so the same request against the same snapshot always produces the
//! same decision.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use domain_eligibility::evaluate;
use domain_formulary::resolve;

use crate::decision::{ClaimDecision, Disposition};
use crate::error::AdjudicationError;
use crate::ports::{
    ClaimStore, DrugCatalog, FormularyStore, MemberDirectory, PharmacyDirectory,
    PriorAuthRegistry,
};
use crate::request::AdjudicationRequest;

/// Orchestrates one adjudication call against a consistent snapshot
///
/// Callers that need transactional atomicity hand the engine ports that all
/// read from (and write to) the same transaction; the in-memory adapters
/// satisfy the same contract trivially.
pub struct AdjudicationEngine {
    members: Arc<dyn MemberDirectory>,
    drugs: Arc<dyn DrugCatalog>,
    pharmacies: Arc<dyn PharmacyDirectory>,
    formulary: Arc<dyn FormularyStore>,
    prior_auth: Arc<dyn PriorAuthRegistry>,
    claims: Arc<dyn ClaimStore>,
}

impl AdjudicationEngine {
    pub fn new(
        members: Arc<dyn MemberDirectory>,
        drugs: Arc<dyn DrugCatalog>,
        pharmacies: Arc<dyn PharmacyDirectory>,
        formulary: Arc<dyn FormularyStore>,
        prior_auth: Arc<dyn PriorAuthRegistry>,
        claims: Arc<dyn ClaimStore>,
    ) -> Self {
        Self {
            members,
            drugs,
            pharmacies,
            formulary,
            prior_auth,
            claims,
        }
    }

    /// Adjudicates one claim as of `today`
    ///
    /// Returns the persisted decision, which may be a rejection. Errors mean
    /// nothing was persisted.
    pub async fn adjudicate(
        &self,
        request: AdjudicationRequest,
        today: NaiveDate,
    ) -> Result<ClaimDecision, AdjudicationError> {
        request.validate(today)?;
        let review_notes = request.screen(today);
        if !review_notes.is_empty() {
            info!(
                prescription = %request.prescription_number,
                notes = review_notes.len(),
                "claim flagged for review"
            );
        }

        let member = self.members.get(request.member_id).await?;
        let drug = self.drugs.get(request.drug_id).await?;
        // Resolve the pharmacy even though pricing is external; an unknown
        // pharmacy is a NotFound failure, not a rejection.
        let _pharmacy = self.pharmacies.get(request.pharmacy_id).await?;

        let total = request.total_amount()?;

        let outcome = evaluate(&member, request.date_filled);
        if !outcome.is_eligible() {
            warn!(
                member = %request.member_id,
                reason = %outcome.description(),
                "claim rejected: eligibility"
            );
            let decision = ClaimDecision::record(
                &request,
                total,
                Disposition::RejectedEligibility(outcome),
                review_notes,
            );
            self.claims.insert(&decision).await?;
            return Ok(decision);
        }

        let active = self
            .formulary
            .active_override(member.plan_id, drug.id, request.date_filled)
            .await?;
        let resolved = resolve(&drug, active.as_ref());

        let mut copay = resolved.copay;
        if let Some(limit) = resolved.quantity_limit {
            if request.quantity_dispensed > limit {
                copay = copay.doubled();
                info!(
                    drug = %drug.id,
                    limit = %limit,
                    dispensed = %request.quantity_dispensed,
                    "over-limit copay penalty applied"
                );
            }
        }

        if resolved.requires_prior_auth {
            let approved = self
                .prior_auth
                .approved_for(request.member_id, request.drug_id, request.date_filled)
                .await?;
            if !approved {
                warn!(
                    member = %request.member_id,
                    drug = %request.drug_id,
                    "claim rejected: prior authorization"
                );
                let decision = ClaimDecision::record(
                    &request,
                    total,
                    Disposition::RejectedPriorAuth,
                    review_notes,
                );
                self.claims.insert(&decision).await?;
                return Ok(decision);
            }
        }

        let plan_paid = total.checked_sub(&copay)?;
        if plan_paid.is_negative() {
            // A copay above the claim total means the formulary data is
            // wrong for this claim; surfacing beats silently clamping.
            return Err(AdjudicationError::Computation { copay, total });
        }

        let decision = ClaimDecision::record(
            &request,
            total,
            Disposition::Accepted {
                member_copay: copay,
                plan_paid,
            },
            review_notes,
        );
        self.claims.insert(&decision).await?;
        info!(
            claim = %decision.claim_id,
            copay = %decision.member_copay,
            plan_paid = %decision.plan_paid_amount,
            "claim processed"
        );
        Ok(decision)
    }
}
