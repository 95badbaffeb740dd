//! Drug catalog repository

use rust_decimal::Decimal;
use sqlx::PgExecutor;
use uuid::Uuid;

use core_kernel::{DrugId, Money};
use domain_formulary::{Drug, Tier};

use crate::error::DatabaseError;

/// Database row for a drug
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DrugRow {
    pub drug_id: Uuid,
    pub ndc_code: String,
    pub drug_name: String,
    pub tier: i16,
    pub prior_auth_required: bool,
    pub quantity_limit: Option<Decimal>,
    pub copay: Option<Decimal>,
}

impl DrugRow {
    pub fn into_domain(self) -> Result<Drug, DatabaseError> {
        let tier = u8::try_from(self.tier)
            .ok()
            .and_then(|level| Tier::from_level(level).ok())
            .ok_or_else(|| DatabaseError::Decode(format!("unknown tier '{}'", self.tier)))?;
        let ndc = self
            .ndc_code
            .parse()
            .map_err(|e| DatabaseError::Decode(format!("{e}")))?;

        Drug::new(
            DrugId::from(self.drug_id),
            ndc,
            self.drug_name,
            tier,
            self.prior_auth_required,
            self.quantity_limit,
            self.copay.map(Money::new),
        )
        .map_err(|e| DatabaseError::Decode(e.to_string()))
    }
}

const SELECT_DRUG: &str = r#"
SELECT
    drug_id,
    ndc_code,
    drug_name,
    tier,
    prior_auth_required,
    quantity_limit,
    copay
FROM drugs
WHERE drug_id = $1
"#;

/// Fetches a drug by id
pub async fn fetch_drug<'e, E>(executor: E, id: DrugId) -> Result<Option<Drug>, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let row: Option<DrugRow> = sqlx::query_as(SELECT_DRUG)
        .bind(*id.as_uuid())
        .fetch_optional(executor)
        .await?;

    row.map(DrugRow::into_domain).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_row_decodes_to_domain() {
        let row = DrugRow {
            drug_id: Uuid::new_v4(),
            ndc_code: "00093-0058-01".to_string(),
            drug_name: "Atorvastatin 20mg".to_string(),
            tier: 2,
            prior_auth_required: false,
            quantity_limit: Some(dec!(30)),
            copay: None,
        };

        let drug = row.into_domain().unwrap();
        assert_eq!(drug.tier, Tier::Two);
        assert_eq!(drug.quantity_limit, Some(dec!(30)));
    }

    #[test]
    fn test_out_of_range_tier_is_a_decode_error() {
        let row = DrugRow {
            drug_id: Uuid::new_v4(),
            ndc_code: "00093-0058-01".to_string(),
            drug_name: "Atorvastatin 20mg".to_string(),
            tier: 9,
            prior_auth_required: false,
            quantity_limit: None,
            copay: None,
        };

        assert!(matches!(row.into_domain(), Err(DatabaseError::Decode(_))));
    }
}
