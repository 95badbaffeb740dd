//! In-memory port adapters
//!
//! Back the engine with plain collections for tests, demos, and local runs.
//! The formulary adapter routes lookups through `FormularyIndex`, so the
//! overlap invariant is enforced exactly as it is against the database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{ClaimId, DrugId, MemberId, Money, PharmacyId, PlanId};
use domain_eligibility::Member;
use domain_formulary::{Drug, FormularyIndex, FormularyOverride};
use domain_priorauth::{authorized, PriorAuthorization};

use crate::decision::{ClaimDecision, ClaimStatus, StatusSummary};
use crate::pharmacy::Pharmacy;
use crate::ports::{
    ClaimStore, DrugCatalog, FormularyStore, MemberDirectory, PharmacyDirectory, PortError,
    PriorAuthRegistry,
};

/// Reference data held in memory
#[derive(Debug, Default)]
pub struct InMemoryBenefitData {
    members: HashMap<MemberId, Member>,
    drugs: HashMap<DrugId, Drug>,
    pharmacies: HashMap<PharmacyId, Pharmacy>,
    formulary: FormularyIndex,
    authorizations: Vec<PriorAuthorization>,
}

impl InMemoryBenefitData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.insert(member.id, member);
        self
    }

    pub fn with_drug(mut self, drug: Drug) -> Self {
        self.drugs.insert(drug.id, drug);
        self
    }

    pub fn with_pharmacy(mut self, pharmacy: Pharmacy) -> Self {
        self.pharmacies.insert(pharmacy.id, pharmacy);
        self
    }

    pub fn with_override(mut self, record: FormularyOverride) -> Self {
        self.formulary.insert(record);
        self
    }

    pub fn with_authorization(mut self, record: PriorAuthorization) -> Self {
        self.authorizations.push(record);
        self
    }
}

#[async_trait]
impl MemberDirectory for InMemoryBenefitData {
    async fn get(&self, id: MemberId) -> Result<Member, PortError> {
        self.members
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Member", id))
    }
}

#[async_trait]
impl DrugCatalog for InMemoryBenefitData {
    async fn get(&self, id: DrugId) -> Result<Drug, PortError> {
        self.drugs
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Drug", id))
    }
}

#[async_trait]
impl PharmacyDirectory for InMemoryBenefitData {
    async fn get(&self, id: PharmacyId) -> Result<Pharmacy, PortError> {
        self.pharmacies
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Pharmacy", id))
    }
}

#[async_trait]
impl FormularyStore for InMemoryBenefitData {
    async fn active_override(
        &self,
        plan_id: PlanId,
        drug_id: DrugId,
        date: NaiveDate,
    ) -> Result<Option<FormularyOverride>, PortError> {
        self.formulary
            .active_at(plan_id, drug_id, date)
            .map(|found| found.cloned())
            .map_err(|e| PortError::integrity(e.to_string()))
    }
}

#[async_trait]
impl PriorAuthRegistry for InMemoryBenefitData {
    async fn approved_for(
        &self,
        member_id: MemberId,
        drug_id: DrugId,
        service_date: NaiveDate,
    ) -> Result<bool, PortError> {
        Ok(authorized(
            &self.authorizations,
            member_id,
            drug_id,
            service_date,
        ))
    }
}

/// Append-only decision ledger held in memory
#[derive(Debug, Default)]
pub struct InMemoryClaimStore {
    records: Mutex<Vec<ClaimDecision>>,
}

impl InMemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded decisions, in insertion order
    pub fn all(&self) -> Vec<ClaimDecision> {
        self.records.lock().expect("claim store poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("claim store poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn insert(&self, decision: &ClaimDecision) -> Result<(), PortError> {
        self.records
            .lock()
            .map_err(|_| PortError::unavailable("claim store poisoned"))?
            .push(decision.clone());
        Ok(())
    }

    async fn get(&self, id: ClaimId) -> Result<ClaimDecision, PortError> {
        self.records
            .lock()
            .map_err(|_| PortError::unavailable("claim store poisoned"))?
            .iter()
            .find(|d| d.claim_id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("ClaimDecision", id))
    }

    async fn summary_since(&self, since: NaiveDate) -> Result<Vec<StatusSummary>, PortError> {
        let records = self
            .records
            .lock()
            .map_err(|_| PortError::unavailable("claim store poisoned"))?;

        let mut processed = StatusSummary {
            claim_status: ClaimStatus::Processed,
            claim_count: 0,
            total_amount: Money::zero(),
        };
        let mut rejected = StatusSummary {
            claim_status: ClaimStatus::Rejected,
            claim_count: 0,
            total_amount: Money::zero(),
        };

        for record in records.iter().filter(|d| d.date_filled >= since) {
            let bucket = match record.claim_status {
                ClaimStatus::Processed => &mut processed,
                ClaimStatus::Rejected => &mut rejected,
            };
            bucket.claim_count += 1;
            bucket.total_amount = bucket
                .total_amount
                .checked_add(&record.total_amount)
                .map_err(|e| PortError::unavailable(e.to_string()))?;
        }

        Ok([processed, rejected]
            .into_iter()
            .filter(|s| s.claim_count > 0)
            .collect())
    }
}
