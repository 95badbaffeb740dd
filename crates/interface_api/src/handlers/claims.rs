//! Claims handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Days, Utc};
use uuid::Uuid;
use validator::Validate;

use domain_adjudication::AdjudicationEngine;
use infra_db::{ClaimsRepository, PgAdjudicationGateway};

use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Adjudicates one claim
///
/// The whole call runs in a single repeatable-read transaction; the decision
/// becomes visible only on commit, and any engine error rolls it back.
pub async fn adjudicate_claim(
    State(state): State<AppState>,
    Json(request): Json<AdjudicateClaimRequest>,
) -> Result<Json<ClaimDecisionResponse>, ApiError> {
    request.validate()?;
    let request = request.into_domain()?;
    let today = Utc::now().date_naive();

    let gateway = Arc::new(PgAdjudicationGateway::begin(&state.pool).await?);
    let engine = AdjudicationEngine::new(
        gateway.clone(),
        gateway.clone(),
        gateway.clone(),
        gateway.clone(),
        gateway.clone(),
        gateway.clone(),
    );

    match engine.adjudicate(request, today).await {
        Ok(decision) => {
            gateway.commit().await?;
            Ok(Json(decision.into()))
        }
        Err(err) => {
            // Nothing may remain visible from a failed call.
            let _ = gateway.rollback().await;
            Err(err.into())
        }
    }
}

/// Gets a claim decision by id
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimDecisionResponse>, ApiError> {
    let repository = ClaimsRepository::new(state.pool.clone());
    let decision = repository
        .get(id.into())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Claim {id} not found")))?;

    Ok(Json(decision.into()))
}

/// Recent claim activity grouped by status
pub async fn claims_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let since = match query.since {
        Some(since) => since,
        None => Utc::now()
            .date_naive()
            .checked_sub_days(Days::new(u64::from(state.config.summary_window_days)))
            .ok_or_else(|| ApiError::BadRequest("summary window out of range".to_string()))?,
    };

    let repository = ClaimsRepository::new(state.pool.clone());
    let buckets = repository
        .summary_since(since)
        .await?
        .into_iter()
        .map(StatusSummaryResponse::from)
        .collect();

    Ok(Json(SummaryResponse { since, buckets }))
}
