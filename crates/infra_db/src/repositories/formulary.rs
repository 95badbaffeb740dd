//! Formulary override repository
//!
//! The active-override query re-checks the non-overlap invariant on every
//! read: if the window predicate matches more than one row the data is
//! corrupt and the lookup fails instead of picking one.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgExecutor;
use uuid::Uuid;

use core_kernel::{CoverageWindow, DrugId, Money, OverrideId, PlanId};
use domain_formulary::{FormularyOverride, Tier};

use crate::error::DatabaseError;

/// Database row for a formulary override
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OverrideRow {
    pub override_id: Uuid,
    pub plan_id: Uuid,
    pub drug_id: Uuid,
    pub tier_override: Option<i16>,
    pub copay_amount: Option<Decimal>,
    pub prior_auth_override: Option<bool>,
    pub quantity_limit_override: Option<Decimal>,
    pub effective_date: NaiveDate,
    pub termination_date: Option<NaiveDate>,
}

impl OverrideRow {
    pub fn into_domain(self) -> Result<FormularyOverride, DatabaseError> {
        let tier_override = self
            .tier_override
            .map(|level| {
                u8::try_from(level)
                    .ok()
                    .and_then(|l| Tier::from_level(l).ok())
                    .ok_or_else(|| DatabaseError::Decode(format!("unknown tier '{level}'")))
            })
            .transpose()?;
        let window = CoverageWindow::new(self.effective_date, self.termination_date)
            .map_err(|e| DatabaseError::Decode(e.to_string()))?;

        Ok(FormularyOverride {
            id: OverrideId::from(self.override_id),
            plan_id: self.plan_id.into(),
            drug_id: self.drug_id.into(),
            tier_override,
            copay_amount: self.copay_amount.map(Money::new),
            prior_auth_override: self.prior_auth_override,
            quantity_limit_override: self.quantity_limit_override,
            window,
        })
    }
}

const SELECT_ACTIVE_OVERRIDES: &str = r#"
SELECT
    override_id,
    plan_id,
    drug_id,
    tier_override,
    copay_amount,
    prior_auth_override,
    quantity_limit_override,
    effective_date,
    termination_date
FROM formulary_overrides
WHERE plan_id = $1
  AND drug_id = $2
  AND effective_date <= $3
  AND (termination_date IS NULL OR termination_date > $3)
"#;

/// Fetches the override active for (plan, drug) on the given date
///
/// Fails with `TemporalOverlap` if more than one row matches.
pub async fn fetch_active_override<'e, E>(
    executor: E,
    plan_id: PlanId,
    drug_id: DrugId,
    date: NaiveDate,
) -> Result<Option<FormularyOverride>, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let rows: Vec<OverrideRow> = sqlx::query_as(SELECT_ACTIVE_OVERRIDES)
        .bind(*plan_id.as_uuid())
        .bind(*drug_id.as_uuid())
        .bind(date)
        .fetch_all(executor)
        .await?;

    if rows.len() > 1 {
        return Err(DatabaseError::TemporalOverlap(format!(
            "{} overrides active for plan {plan_id}, drug {drug_id} on {date}",
            rows.len()
        )));
    }

    rows.into_iter().next().map(OverrideRow::into_domain).transpose()
}
