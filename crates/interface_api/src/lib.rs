//! HTTP API Layer
//!
//! REST surface for the adjudication engine using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one module per resource
//! - **DTOs**: request/response types with validation at the edge
//! - **Error Handling**: consistent JSON error responses
//!
//! Authentication, row-level access filtering, and PHI masking are owned by
//! the surrounding platform; this layer assumes it sits behind them.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(pool, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{claims, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
}

/// Creates the main API router
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let state = AppState { pool, config };

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let claims_routes = Router::new()
        .route("/", post(claims::adjudicate_claim))
        .route("/summary", get(claims::claims_summary))
        .route("/:id", get(claims::get_claim));

    let api_routes = Router::new().nest("/claims", claims_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
