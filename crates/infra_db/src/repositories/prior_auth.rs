//! Prior authorization repository

use chrono::NaiveDate;
use sqlx::PgExecutor;

use core_kernel::{DrugId, MemberId};

use crate::error::DatabaseError;

const APPROVED_EXISTS: &str = r#"
SELECT EXISTS (
    SELECT 1
    FROM prior_authorizations
    WHERE member_id = $1
      AND drug_id = $2
      AND status = 'approved'
      AND (expiration_date IS NULL OR expiration_date >= $3)
) AS "exists"
"#;

/// Returns true if an approved, unexpired authorization covers the pair
pub async fn approved_exists<'e, E>(
    executor: E,
    member_id: MemberId,
    drug_id: DrugId,
    service_date: NaiveDate,
) -> Result<bool, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let (exists,): (bool,) = sqlx::query_as(APPROVED_EXISTS)
        .bind(*member_id.as_uuid())
        .bind(*drug_id.as_uuid())
        .bind(service_date)
        .fetch_one(executor)
        .await?;

    Ok(exists)
}
