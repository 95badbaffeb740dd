//! Transactional adjudication gateway
//!
//! One adjudication call must see one consistent snapshot: the eligibility,
//! formulary, and prior-auth reads plus the decision insert all run inside a
//! single repeatable-read transaction. The gateway implements every engine
//! port over that transaction; nothing is visible until `commit`, and
//! dropping the gateway uncommitted rolls everything back.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::Mutex;
use tracing::debug;

use core_kernel::{ClaimId, DrugId, MemberId, PharmacyId, PlanId};
use domain_adjudication::{
    ClaimDecision, ClaimStore, DrugCatalog, FormularyStore, MemberDirectory, Pharmacy,
    PharmacyDirectory, PortError, PriorAuthRegistry, StatusSummary,
};
use domain_eligibility::Member;
use domain_formulary::{Drug, FormularyOverride};

use crate::error::DatabaseError;
use crate::repositories::{claims, drugs, formulary, members, pharmacies, prior_auth};

/// A single-use, transaction-scoped implementation of the adjudication ports
pub struct PgAdjudicationGateway {
    tx: Mutex<Option<Transaction<'static, Postgres>>>,
}

impl PgAdjudicationGateway {
    /// Opens a repeatable-read transaction for one adjudication call
    pub async fn begin(pool: &PgPool) -> Result<Self, DatabaseError> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;
        debug!("adjudication transaction opened");
        Ok(Self {
            tx: Mutex::new(Some(tx)),
        })
    }

    /// Commits the transaction, making the persisted decision visible
    pub async fn commit(&self) -> Result<(), DatabaseError> {
        let tx = self
            .tx
            .lock()
            .await
            .take()
            .ok_or_else(|| DatabaseError::TransactionFailed("already completed".to_string()))?;
        tx.commit()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
        debug!("adjudication transaction committed");
        Ok(())
    }

    /// Rolls the transaction back explicitly
    ///
    /// Dropping the gateway has the same effect; this exists for callers
    /// that want the error surfaced.
    pub async fn rollback(&self) -> Result<(), DatabaseError> {
        let tx = self
            .tx
            .lock()
            .await
            .take()
            .ok_or_else(|| DatabaseError::TransactionFailed("already completed".to_string()))?;
        tx.rollback()
            .await
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
    }
}

fn completed() -> PortError {
    PortError::unavailable("adjudication transaction already completed")
}

#[async_trait]
impl MemberDirectory for PgAdjudicationGateway {
    async fn get(&self, id: MemberId) -> Result<Member, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(completed)?;
        members::fetch_member(&mut **tx, id)
            .await
            .map_err(PortError::from)?
            .ok_or_else(|| PortError::not_found("Member", id))
    }
}

#[async_trait]
impl DrugCatalog for PgAdjudicationGateway {
    async fn get(&self, id: DrugId) -> Result<Drug, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(completed)?;
        drugs::fetch_drug(&mut **tx, id)
            .await
            .map_err(PortError::from)?
            .ok_or_else(|| PortError::not_found("Drug", id))
    }
}

#[async_trait]
impl PharmacyDirectory for PgAdjudicationGateway {
    async fn get(&self, id: PharmacyId) -> Result<Pharmacy, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(completed)?;
        pharmacies::fetch_pharmacy(&mut **tx, id)
            .await
            .map_err(PortError::from)?
            .ok_or_else(|| PortError::not_found("Pharmacy", id))
    }
}

#[async_trait]
impl FormularyStore for PgAdjudicationGateway {
    async fn active_override(
        &self,
        plan_id: PlanId,
        drug_id: DrugId,
        date: NaiveDate,
    ) -> Result<Option<FormularyOverride>, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(completed)?;
        formulary::fetch_active_override(&mut **tx, plan_id, drug_id, date)
            .await
            .map_err(PortError::from)
    }
}

#[async_trait]
impl PriorAuthRegistry for PgAdjudicationGateway {
    async fn approved_for(
        &self,
        member_id: MemberId,
        drug_id: DrugId,
        service_date: NaiveDate,
    ) -> Result<bool, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(completed)?;
        prior_auth::approved_exists(&mut **tx, member_id, drug_id, service_date)
            .await
            .map_err(PortError::from)
    }
}

#[async_trait]
impl ClaimStore for PgAdjudicationGateway {
    async fn insert(&self, decision: &ClaimDecision) -> Result<(), PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(completed)?;
        claims::insert_claim(&mut **tx, decision)
            .await
            .map_err(PortError::from)
    }

    async fn get(&self, id: ClaimId) -> Result<ClaimDecision, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(completed)?;
        claims::fetch_claim(&mut **tx, id)
            .await
            .map_err(PortError::from)?
            .ok_or_else(|| PortError::not_found("ClaimDecision", id))
    }

    async fn summary_since(&self, since: NaiveDate) -> Result<Vec<StatusSummary>, PortError> {
        let mut guard = self.tx.lock().await;
        let tx = guard.as_mut().ok_or_else(completed)?;
        claims::summary_since(&mut **tx, since)
            .await
            .map_err(PortError::from)
    }
}
