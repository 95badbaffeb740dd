//! Pharmacy repository

use sqlx::PgExecutor;
use uuid::Uuid;

use core_kernel::PharmacyId;
use domain_adjudication::Pharmacy;

use crate::error::DatabaseError;

/// Database row for a pharmacy
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PharmacyRow {
    pub pharmacy_id: Uuid,
    pub npi: String,
    pub pharmacy_name: String,
    pub pbm_network: bool,
}

impl PharmacyRow {
    pub fn into_domain(self) -> Result<Pharmacy, DatabaseError> {
        let npi = self
            .npi
            .parse()
            .map_err(|e| DatabaseError::Decode(format!("{e}")))?;
        Ok(Pharmacy {
            id: PharmacyId::from(self.pharmacy_id),
            npi,
            name: self.pharmacy_name,
            in_network: self.pbm_network,
        })
    }
}

const SELECT_PHARMACY: &str = r#"
SELECT
    pharmacy_id,
    npi,
    pharmacy_name,
    pbm_network
FROM pharmacies
WHERE pharmacy_id = $1
"#;

/// Fetches a pharmacy by id
pub async fn fetch_pharmacy<'e, E>(
    executor: E,
    id: PharmacyId,
) -> Result<Option<Pharmacy>, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let row: Option<PharmacyRow> = sqlx::query_as(SELECT_PHARMACY)
        .bind(*id.as_uuid())
        .fetch_optional(executor)
        .await?;

    row.map(PharmacyRow::into_domain).transpose()
}
