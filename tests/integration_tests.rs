//! Integration Tests for OpenRx Core
//!
//! These tests verify cross-domain workflows and end-to-end scenarios that
//! involve multiple crates working together: eligibility, formulary
//! resolution, the prior-auth gate, and the decision ledger.

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{CoverageWindow, Money, PlanId};
use domain_adjudication::memory::{InMemoryBenefitData, InMemoryClaimStore};
use domain_adjudication::{AdjudicationEngine, ClaimStatus, RejectionCode};
use domain_eligibility::EligibilityStatus;
use domain_formulary::Tier;
use test_utils::assertions::{
    assert_rejection_pairing, assert_split_within_total, assert_zeroed_amounts,
};
use test_utils::builders::pharmacy;
use test_utils::fixtures::{date, TemporalFixtures};
use test_utils::{AuthorizationBuilder, DrugBuilder, MemberBuilder, OverrideBuilder, RequestBuilder};

fn engine_over(data: InMemoryBenefitData) -> (AdjudicationEngine, Arc<InMemoryClaimStore>) {
    let data = Arc::new(data);
    let store = Arc::new(InMemoryClaimStore::new());
    let engine = AdjudicationEngine::new(
        data.clone(),
        data.clone(),
        data.clone(),
        data.clone(),
        data,
        store.clone(),
    );
    (engine, store)
}

mod full_adjudication_workflow {
    use super::*;

    /// A gated specialty drug with an approved authorization and a plan
    /// copay override flows through every component and pays.
    #[tokio::test]
    async fn test_specialty_claim_pays_with_override_copay() {
        let plan = PlanId::new_v7();
        let member = MemberBuilder::new().with_plan(plan).build();
        let drug = DrugBuilder::new()
            .with_tier(Tier::Three)
            .requiring_prior_auth()
            .build();
        let pharmacy = pharmacy();

        let authorization = AuthorizationBuilder::for_pair(member.id, drug.id)
            .expiring(date(2024, 12, 31))
            .build();
        let override_75 = OverrideBuilder::for_pair(plan, drug.id)
            .with_copay(Money::new(dec!(75.00)))
            .with_window(CoverageWindow::bounded(date(2024, 1, 1), date(2025, 1, 1)).unwrap())
            .build();

        let request = RequestBuilder::for_claim(&member, &drug, &pharmacy)
            .with_ingredient_cost(Money::new(dec!(5495.00)))
            .with_dispensing_fee(Money::new(dec!(5.00)))
            .build();

        let (engine, store) = engine_over(
            InMemoryBenefitData::new()
                .with_member(member)
                .with_drug(drug)
                .with_pharmacy(pharmacy)
                .with_authorization(authorization)
                .with_override(override_75),
        );

        let decision = engine
            .adjudicate(request, TemporalFixtures::today())
            .await
            .expect("claim should adjudicate");

        assert_eq!(decision.claim_status, ClaimStatus::Processed);
        assert_eq!(decision.member_copay.amount(), dec!(75.00));
        assert_eq!(decision.plan_paid_amount.amount(), dec!(5425.00));
        assert_split_within_total(&decision);
        assert_rejection_pairing(&decision);
        assert_eq!(store.len(), 1);
    }

    /// The same claim a month after the member terminates is rejected, and
    /// the rejection is a persisted ledger entry, not an error.
    #[tokio::test]
    async fn test_terminated_member_rejection_lands_in_ledger() {
        let plan = PlanId::new_v7();
        let member = MemberBuilder::new()
            .with_plan(plan)
            .with_termination_date(date(2024, 2, 29))
            .build();
        let drug = DrugBuilder::new().with_tier(Tier::One).build();
        let pharmacy = pharmacy();
        let request = RequestBuilder::for_claim(&member, &drug, &pharmacy)
            .filled_on(date(2024, 3, 15))
            .build();

        let (engine, store) = engine_over(
            InMemoryBenefitData::new()
                .with_member(member)
                .with_drug(drug)
                .with_pharmacy(pharmacy),
        );

        let decision = engine
            .adjudicate(request, TemporalFixtures::today())
            .await
            .expect("rejections are successful outcomes");

        assert_eq!(decision.claim_status, ClaimStatus::Rejected);
        assert_eq!(decision.rejection_code, Some(RejectionCode::E001));
        assert_eq!(
            decision.rejection_description.as_deref(),
            Some("after termination")
        );
        assert_zeroed_amounts(&decision);
        assert_rejection_pairing(&decision);
        assert_eq!(store.len(), 1);
    }

    /// A suspended member and an unauthorized gated drug produce distinct
    /// codes under the same ledger semantics.
    #[tokio::test]
    async fn test_mixed_outcomes_share_the_ledger() {
        let plan = PlanId::new_v7();
        let suspended = MemberBuilder::new()
            .with_plan(plan)
            .with_status(EligibilityStatus::Suspended)
            .build();
        let active = MemberBuilder::new().with_plan(plan).build();
        let gated = DrugBuilder::new()
            .with_tier(Tier::Four)
            .requiring_prior_auth()
            .build();
        let plain = DrugBuilder::new().with_tier(Tier::Two).build();
        let pharmacy = pharmacy();

        let (engine, store) = engine_over(
            InMemoryBenefitData::new()
                .with_member(suspended.clone())
                .with_member(active.clone())
                .with_drug(gated.clone())
                .with_drug(plain.clone())
                .with_pharmacy(pharmacy.clone()),
        );

        let eligibility_reject = engine
            .adjudicate(
                RequestBuilder::for_claim(&suspended, &plain, &pharmacy).build(),
                TemporalFixtures::today(),
            )
            .await
            .unwrap();
        let auth_reject = engine
            .adjudicate(
                RequestBuilder::for_claim(&active, &gated, &pharmacy).build(),
                TemporalFixtures::today(),
            )
            .await
            .unwrap();
        let paid = engine
            .adjudicate(
                RequestBuilder::for_claim(&active, &plain, &pharmacy)
                    .with_ingredient_cost(Money::new(dec!(120.00)))
                    .build(),
                TemporalFixtures::today(),
            )
            .await
            .unwrap();

        assert_eq!(eligibility_reject.rejection_code, Some(RejectionCode::E001));
        assert_eq!(auth_reject.rejection_code, Some(RejectionCode::P001));
        assert_eq!(paid.claim_status, ClaimStatus::Processed);

        let records = store.all();
        assert_eq!(records.len(), 3);
        for record in &records {
            assert_rejection_pairing(record);
            assert_split_within_total(record);
        }
    }
}

mod concurrency {
    use super::*;

    /// Claims for different members run concurrently without coordination;
    /// every call still lands exactly one ledger entry with a unique id.
    #[tokio::test]
    async fn test_concurrent_claims_each_persist_once() {
        let plan = PlanId::new_v7();
        let pharmacy = pharmacy();
        let drug = DrugBuilder::new().with_tier(Tier::One).build();

        let mut data = InMemoryBenefitData::new()
            .with_drug(drug.clone())
            .with_pharmacy(pharmacy.clone());
        let mut requests = Vec::new();
        for _ in 0..8 {
            let member = MemberBuilder::new().with_plan(plan).build();
            requests.push(RequestBuilder::for_claim(&member, &drug, &pharmacy).build());
            data = data.with_member(member);
        }

        let (engine, store) = engine_over(data);
        let engine = Arc::new(engine);

        let mut handles = Vec::new();
        for request in requests {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                engine.adjudicate(request, TemporalFixtures::today()).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let records = store.all();
        assert_eq!(records.len(), 8);

        let mut ids: Vec<_> = records.iter().map(|r| *r.claim_id.as_uuid()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8, "claim ids must be unique");
    }
}

mod summary_reporting {
    use super::*;
    use domain_adjudication::ClaimStore;

    #[tokio::test]
    async fn test_summary_reflects_recent_activity_only() {
        let plan = PlanId::new_v7();
        let member = MemberBuilder::new().with_plan(plan).build();
        let drug = DrugBuilder::new().with_tier(Tier::One).build();
        let pharmacy = pharmacy();

        let (engine, store) = engine_over(
            InMemoryBenefitData::new()
                .with_member(member.clone())
                .with_drug(drug.clone())
                .with_pharmacy(pharmacy.clone()),
        );

        engine
            .adjudicate(
                RequestBuilder::for_claim(&member, &drug, &pharmacy)
                    .prescribed_on(date(2024, 1, 5))
                    .filled_on(date(2024, 1, 10))
                    .build(),
                TemporalFixtures::today(),
            )
            .await
            .unwrap();
        engine
            .adjudicate(
                RequestBuilder::for_claim(&member, &drug, &pharmacy)
                    .filled_on(date(2024, 3, 15))
                    .build(),
                TemporalFixtures::today(),
            )
            .await
            .unwrap();

        let all = store.summary_since(date(2024, 1, 1)).await.unwrap();
        assert_eq!(all.iter().map(|b| b.claim_count).sum::<u64>(), 2);

        let recent = store.summary_since(date(2024, 3, 1)).await.unwrap();
        assert_eq!(recent.iter().map(|b| b.claim_count).sum::<u64>(), 1);
    }
}
