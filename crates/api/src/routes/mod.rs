//! API route definitions

pub mod clients;
pub mod onchain;
pub mod staking;
pub mod tabs;

use crate::{ApiDoc, state::ApiState};
use api_types::HealthResponse;
use axum::{Json, Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Health check handler returning `{ "status": "ok" }`.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_owned() })
}

/// Build the router with all API endpoints.
pub fn router(state: ApiState) -> Router {
    let api_routes = Router::new()
        .route("/clients/info", get(clients::client_info))
        .route("/clients/hosting", get(clients::hosting))
        .route("/clients/first-proposals", get(clients::first_proposals))
        .route("/clients/proposals", get(clients::proposals))
        .route("/clients/performance", get(clients::performance))
        .route("/clients/performance/quartiles", get(clients::performance_quartiles))
        .route("/staking/overview", get(staking::overview))
        .route("/staking/validator-signups", get(staking::validator_signups))
        .route("/staking/depositor-signups", get(staking::depositor_signups))
        .route("/staking/depositors", get(staking::depositors))
        .route("/staking/performance", get(staking::performance))
        .route("/staking/performance/quartiles", get(staking::performance_quartiles))
        .route("/staking/diversity", get(staking::diversity))
        .route("/onchain/block-stats", get(onchain::block_stats))
        .route("/tabs/:tab", get(tabs::tab));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(api_routes)
        .with_state(state)
}
