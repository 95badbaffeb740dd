//! Claim decision repository
//!
//! Decisions are append-only: there is an insert and there are reads, never
//! an update or delete. Reversal and void operations live outside this
//! system and reference decisions by id.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use core_kernel::{ClaimId, Money};
use domain_adjudication::{ClaimDecision, ClaimStatus, RejectionCode, ScreeningNote, StatusSummary};

use crate::error::DatabaseError;

/// Database row for a claim decision
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: Uuid,
    pub member_id: Uuid,
    pub drug_id: Uuid,
    pub pharmacy_id: Uuid,
    pub prescription_number: String,
    pub date_prescribed: NaiveDate,
    pub date_filled: NaiveDate,
    pub days_supply: i32,
    pub quantity_dispensed: Decimal,
    pub prescriber_npi: String,
    pub ingredient_cost: Decimal,
    pub dispensing_fee: Decimal,
    pub sales_tax: Option<Decimal>,
    pub total_amount: Decimal,
    pub deductible_amount: Decimal,
    pub member_copay: Decimal,
    pub plan_paid_amount: Decimal,
    pub claim_status: String,
    pub rejection_code: Option<String>,
    pub rejection_description: Option<String>,
    pub review_notes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ClaimRow {
    pub fn into_domain(self) -> Result<ClaimDecision, DatabaseError> {
        let claim_status = parse_status(&self.claim_status)?;
        let rejection_code = self
            .rejection_code
            .as_deref()
            .map(parse_rejection_code)
            .transpose()?;
        let prescriber_npi = self
            .prescriber_npi
            .parse()
            .map_err(|e| DatabaseError::Decode(format!("{e}")))?;
        let days_supply = u16::try_from(self.days_supply)
            .map_err(|_| DatabaseError::Decode(format!("days_supply '{}'", self.days_supply)))?;
        let review_notes = self
            .review_notes
            .iter()
            .map(|s| parse_note(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClaimDecision {
            claim_id: ClaimId::from(self.claim_id),
            member_id: self.member_id.into(),
            drug_id: self.drug_id.into(),
            pharmacy_id: self.pharmacy_id.into(),
            prescription_number: self.prescription_number,
            date_prescribed: self.date_prescribed,
            date_filled: self.date_filled,
            days_supply,
            quantity_dispensed: self.quantity_dispensed,
            prescriber_npi,
            ingredient_cost: Money::new(self.ingredient_cost),
            dispensing_fee: Money::new(self.dispensing_fee),
            sales_tax: self.sales_tax.map(Money::new),
            total_amount: Money::new(self.total_amount),
            deductible_amount: Money::new(self.deductible_amount),
            member_copay: Money::new(self.member_copay),
            plan_paid_amount: Money::new(self.plan_paid_amount),
            claim_status,
            rejection_code,
            rejection_description: self.rejection_description,
            review_notes,
            created_at: self.created_at,
        })
    }
}

fn parse_status(s: &str) -> Result<ClaimStatus, DatabaseError> {
    match s {
        "processed" => Ok(ClaimStatus::Processed),
        "rejected" => Ok(ClaimStatus::Rejected),
        other => Err(DatabaseError::Decode(format!(
            "unknown claim_status '{other}'"
        ))),
    }
}

fn status_str(status: ClaimStatus) -> &'static str {
    match status {
        ClaimStatus::Processed => "processed",
        ClaimStatus::Rejected => "rejected",
    }
}

fn parse_rejection_code(s: &str) -> Result<RejectionCode, DatabaseError> {
    match s {
        "E001" => Ok(RejectionCode::E001),
        "P001" => Ok(RejectionCode::P001),
        other => Err(DatabaseError::Decode(format!(
            "unknown rejection_code '{other}'"
        ))),
    }
}

fn note_str(note: ScreeningNote) -> &'static str {
    match note {
        ScreeningNote::StaleFillDate => "stale_fill_date",
        ScreeningNote::HighQuantity => "high_quantity",
        ScreeningNote::HighCost => "high_cost",
    }
}

fn parse_note(s: &str) -> Result<ScreeningNote, DatabaseError> {
    match s {
        "stale_fill_date" => Ok(ScreeningNote::StaleFillDate),
        "high_quantity" => Ok(ScreeningNote::HighQuantity),
        "high_cost" => Ok(ScreeningNote::HighCost),
        other => Err(DatabaseError::Decode(format!(
            "unknown review note '{other}'"
        ))),
    }
}

const INSERT_CLAIM: &str = r#"
INSERT INTO claims (
    claim_id, member_id, drug_id, pharmacy_id, prescription_number,
    date_prescribed, date_filled, days_supply, quantity_dispensed,
    prescriber_npi, ingredient_cost, dispensing_fee, sales_tax,
    total_amount, deductible_amount, member_copay, plan_paid_amount,
    claim_status, rejection_code, rejection_description, review_notes,
    created_at
) VALUES (
    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
    $14, $15, $16, $17, $18, $19, $20, $21, $22
)
"#;

/// Appends one decision to the ledger
pub async fn insert_claim<'e, E>(
    executor: E,
    decision: &ClaimDecision,
) -> Result<(), DatabaseError>
where
    E: PgExecutor<'e>,
{
    let review_notes: Vec<String> = decision
        .review_notes
        .iter()
        .map(|n| note_str(*n).to_string())
        .collect();

    sqlx::query(INSERT_CLAIM)
        .bind(*decision.claim_id.as_uuid())
        .bind(*decision.member_id.as_uuid())
        .bind(*decision.drug_id.as_uuid())
        .bind(*decision.pharmacy_id.as_uuid())
        .bind(&decision.prescription_number)
        .bind(decision.date_prescribed)
        .bind(decision.date_filled)
        .bind(i32::from(decision.days_supply))
        .bind(decision.quantity_dispensed)
        .bind(decision.prescriber_npi.as_str())
        .bind(decision.ingredient_cost.amount())
        .bind(decision.dispensing_fee.amount())
        .bind(decision.sales_tax.map(|m| m.amount()))
        .bind(decision.total_amount.amount())
        .bind(decision.deductible_amount.amount())
        .bind(decision.member_copay.amount())
        .bind(decision.plan_paid_amount.amount())
        .bind(status_str(decision.claim_status))
        .bind(decision.rejection_code.map(|c| c.as_str()))
        .bind(&decision.rejection_description)
        .bind(&review_notes)
        .bind(decision.created_at)
        .execute(executor)
        .await?;

    Ok(())
}

const SELECT_CLAIM: &str = r#"
SELECT
    claim_id, member_id, drug_id, pharmacy_id, prescription_number,
    date_prescribed, date_filled, days_supply, quantity_dispensed,
    prescriber_npi, ingredient_cost, dispensing_fee, sales_tax,
    total_amount, deductible_amount, member_copay, plan_paid_amount,
    claim_status, rejection_code, rejection_description, review_notes,
    created_at
FROM claims
WHERE claim_id = $1
"#;

/// Fetches a decision by id
pub async fn fetch_claim<'e, E>(
    executor: E,
    id: ClaimId,
) -> Result<Option<ClaimDecision>, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let row: Option<ClaimRow> = sqlx::query_as(SELECT_CLAIM)
        .bind(*id.as_uuid())
        .fetch_optional(executor)
        .await?;

    row.map(ClaimRow::into_domain).transpose()
}

const SUMMARY_SINCE: &str = r#"
SELECT
    claim_status,
    COUNT(*) AS claim_count,
    COALESCE(SUM(total_amount), 0) AS total_amount
FROM claims
WHERE date_filled >= $1
GROUP BY claim_status
ORDER BY claim_status
"#;

/// Aggregates decisions filled on or after `since` by status
pub async fn summary_since<'e, E>(
    executor: E,
    since: NaiveDate,
) -> Result<Vec<StatusSummary>, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let rows: Vec<(String, i64, Decimal)> = sqlx::query_as(SUMMARY_SINCE)
        .bind(since)
        .fetch_all(executor)
        .await?;

    rows.into_iter()
        .map(|(status, count, total)| {
            Ok(StatusSummary {
                claim_status: parse_status(&status)?,
                claim_count: count.max(0) as u64,
                total_amount: Money::new(total),
            })
        })
        .collect()
}

/// Pool-backed repository for read-side claim queries
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches a decision by id
    pub async fn get(&self, id: ClaimId) -> Result<Option<ClaimDecision>, DatabaseError> {
        fetch_claim(&self.pool, id).await
    }

    /// Recent claim activity grouped by status
    pub async fn summary_since(&self, since: NaiveDate) -> Result<Vec<StatusSummary>, DatabaseError> {
        summary_since(&self.pool, since).await
    }
}
