//! Collaborator ports
//!
//! The engine reads reference data and writes decisions through these traits.
//! Adapters implement them against PostgreSQL (infra_db) or in memory
//! (crate::memory); the engine never knows which.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use core_kernel::{ClaimId, DrugId, MemberId, PharmacyId, PlanId};
use domain_eligibility::Member;
use domain_formulary::{Drug, FormularyOverride};

use crate::decision::{ClaimDecision, StatusSummary};
use crate::pharmacy::Pharmacy;

/// Error type shared by all port implementations
#[derive(Debug, Error)]
pub enum PortError {
    /// The referenced entity does not exist
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Stored data violates an invariant the engine depends on
    #[error("Data integrity violation: {0}")]
    Integrity(String),

    /// The underlying store failed; the whole operation should abort
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl PortError {
    pub fn not_found(entity_type: &'static str, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn integrity(message: impl Into<String>) -> Self {
        PortError::Integrity(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        PortError::Unavailable(message.into())
    }
}

/// Membership lookups
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    async fn get(&self, id: MemberId) -> Result<Member, PortError>;
}

/// Drug catalog lookups
#[async_trait]
pub trait DrugCatalog: Send + Sync {
    async fn get(&self, id: DrugId) -> Result<Drug, PortError>;
}

/// Pharmacy lookups
#[async_trait]
pub trait PharmacyDirectory: Send + Sync {
    async fn get(&self, id: PharmacyId) -> Result<Pharmacy, PortError>;
}

/// Formulary override lookups
#[async_trait]
pub trait FormularyStore: Send + Sync {
    /// The override active for (plan, drug) on the date, if any
    ///
    /// Implementations must verify the at-most-one invariant and report a
    /// violation as `PortError::Integrity` rather than picking a row.
    async fn active_override(
        &self,
        plan_id: PlanId,
        drug_id: DrugId,
        date: NaiveDate,
    ) -> Result<Option<FormularyOverride>, PortError>;
}

/// Prior authorization lookups
#[async_trait]
pub trait PriorAuthRegistry: Send + Sync {
    /// Whether an approved, unexpired authorization exists for the pair
    async fn approved_for(
        &self,
        member_id: MemberId,
        drug_id: DrugId,
        service_date: NaiveDate,
    ) -> Result<bool, PortError>;
}

/// The claim decision ledger
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Appends one decision; decisions are never updated or deleted
    async fn insert(&self, decision: &ClaimDecision) -> Result<(), PortError>;

    /// Fetches a decision by id
    async fn get(&self, id: ClaimId) -> Result<ClaimDecision, PortError>;

    /// Aggregates decisions filled on or after `since` by status
    async fn summary_since(&self, since: NaiveDate) -> Result<Vec<StatusSummary>, PortError>;
}
