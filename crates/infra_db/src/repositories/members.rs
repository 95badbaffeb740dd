//! Member repository

use chrono::NaiveDate;
use sqlx::PgExecutor;
use uuid::Uuid;

use core_kernel::MemberId;
use domain_eligibility::{EligibilityStatus, Member};

use crate::error::DatabaseError;

/// Database row for a member
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberRow {
    pub member_id: Uuid,
    pub member_number: String,
    pub first_name: String,
    pub last_name: String,
    pub plan_id: Uuid,
    pub eligibility_status: String,
    pub effective_date: NaiveDate,
    pub termination_date: Option<NaiveDate>,
}

impl MemberRow {
    pub fn into_domain(self) -> Result<Member, DatabaseError> {
        let status = parse_status(&self.eligibility_status)?;
        Member::new(
            MemberId::from(self.member_id),
            self.member_number,
            self.first_name,
            self.last_name,
            self.plan_id.into(),
            status,
            self.effective_date,
            self.termination_date,
        )
        .map_err(|e| DatabaseError::Decode(e.to_string()))
    }
}

fn parse_status(s: &str) -> Result<EligibilityStatus, DatabaseError> {
    match s {
        "active" => Ok(EligibilityStatus::Active),
        "inactive" => Ok(EligibilityStatus::Inactive),
        "suspended" => Ok(EligibilityStatus::Suspended),
        "terminated" => Ok(EligibilityStatus::Terminated),
        other => Err(DatabaseError::Decode(format!(
            "unknown eligibility_status '{other}'"
        ))),
    }
}

const SELECT_MEMBER: &str = r#"
SELECT
    member_id,
    member_number,
    first_name,
    last_name,
    plan_id,
    eligibility_status,
    effective_date,
    termination_date
FROM members
WHERE member_id = $1
"#;

/// Fetches a member by id
pub async fn fetch_member<'e, E>(
    executor: E,
    id: MemberId,
) -> Result<Option<Member>, DatabaseError>
where
    E: PgExecutor<'e>,
{
    let row: Option<MemberRow> = sqlx::query_as(SELECT_MEMBER)
        .bind(*id.as_uuid())
        .fetch_optional(executor)
        .await?;

    row.map(MemberRow::into_domain).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_decodes_to_domain() {
        let row = MemberRow {
            member_id: Uuid::new_v4(),
            member_number: "M000001".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Rivera".to_string(),
            plan_id: Uuid::new_v4(),
            eligibility_status: "active".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            termination_date: None,
        };

        let member = row.into_domain().unwrap();
        assert_eq!(member.eligibility_status, EligibilityStatus::Active);
    }

    #[test]
    fn test_unknown_status_is_a_decode_error() {
        let row = MemberRow {
            member_id: Uuid::new_v4(),
            member_number: "M000001".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Rivera".to_string(),
            plan_id: Uuid::new_v4(),
            eligibility_status: "retired".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            termination_date: None,
        };

        assert!(matches!(row.into_domain(), Err(DatabaseError::Decode(_))));
    }
}
