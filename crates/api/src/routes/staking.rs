//! Staking endpoints

use crate::{
    helpers::{
        AprStatistic, ValidatorCount, apr_quartiles, depositor_trends, reader_error,
        staking_diversity, summarize_apr,
    },
    state::ApiState,
};
use api_types::{
    DepositorPerformanceItem, DepositorPerformanceResponse, DepositorQuartileItem,
    DepositorQuartilesResponse, DepositorSignupsResponse, DepositorStakingResponse,
    ErrorResponse, StakingDiversityResponse, StakingOverviewResponse, ValidatorSignupsResponse,
};
use axum::{Json, extract::State};
use primitives::ConsensusClient;

pub(crate) async fn overview_data(
    state: &ApiState,
) -> Result<StakingOverviewResponse, ErrorResponse> {
    let rows = state.staking_overview().await.map_err(reader_error)?;
    Ok(StakingOverviewResponse { overview: rows.first().cloned() })
}

pub(crate) async fn validator_signups_data(
    state: &ApiState,
) -> Result<ValidatorSignupsResponse, ErrorResponse> {
    let rows = state.validator_signups().await.map_err(reader_error)?;
    Ok(ValidatorSignupsResponse { weeks: rows.to_vec() })
}

pub(crate) async fn depositor_signups_data(
    state: &ApiState,
) -> Result<DepositorSignupsResponse, ErrorResponse> {
    let rows = state.depositor_signups().await.map_err(reader_error)?;
    Ok(DepositorSignupsResponse { weeks: rows.to_vec() })
}

pub(crate) async fn depositors_data(
    state: &ApiState,
) -> Result<DepositorStakingResponse, ErrorResponse> {
    let rows = state.depositor_staking().await.map_err(reader_error)?;
    let trends = depositor_trends(&rows);
    Ok(DepositorStakingResponse {
        depositors: trends.depositors,
        top_by_recent_deposits: trends.top_by_recent_deposits,
        top_by_growth: trends.top_by_growth,
    })
}

pub(crate) async fn performance_data(
    state: &ApiState,
) -> Result<DepositorPerformanceResponse, ErrorResponse> {
    let rows = state.depositor_performance().await.map_err(reader_error)?;
    let depositors = summarize_apr(&rows, AprStatistic::Mean, ValidatorCount::KnownApr)
        .into_iter()
        .map(|s| DepositorPerformanceItem {
            depositor_label: s.entity,
            num_validators: s.num_validators,
            avg_apr: s.apr,
        })
        .collect();
    Ok(DepositorPerformanceResponse { depositors })
}

pub(crate) async fn performance_quartiles_data(
    state: &ApiState,
) -> Result<DepositorQuartilesResponse, ErrorResponse> {
    let rows = state.depositor_performance().await.map_err(reader_error)?;
    let quartiles = apr_quartiles(&rows)
        .into_iter()
        .map(|q| DepositorQuartileItem { depositor: q.entity, name: q.name.to_owned(), apr: q.apr })
        .collect();
    Ok(DepositorQuartilesResponse { quartiles })
}

pub(crate) async fn diversity_data(
    state: &ApiState,
) -> Result<StakingDiversityResponse, ErrorResponse> {
    let rows = state.staking_client_distribution().await.map_err(reader_error)?;
    Ok(StakingDiversityResponse {
        clients: ConsensusClient::ALL.to_vec(),
        entities: staking_diversity(&rows),
    })
}

#[utoipa::path(
    get,
    path = "/staking/overview",
    responses(
        (status = 200, description = "Headline staking figures", body = StakingOverviewResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "staking"
)]
/// Get total depositors, validators and ETH deposited with 30 day changes
pub async fn overview(
    State(state): State<ApiState>,
) -> Result<Json<StakingOverviewResponse>, ErrorResponse> {
    overview_data(&state).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/staking/validator-signups",
    responses(
        (status = 200, description = "Weekly validator signups", body = ValidatorSignupsResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "staking"
)]
/// Get validators signed up per week of first deposit
pub async fn validator_signups(
    State(state): State<ApiState>,
) -> Result<Json<ValidatorSignupsResponse>, ErrorResponse> {
    validator_signups_data(&state).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/staking/depositor-signups",
    responses(
        (status = 200, description = "Weekly depositor signups", body = DepositorSignupsResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "staking"
)]
/// Get new depositors per week
pub async fn depositor_signups(
    State(state): State<ApiState>,
) -> Result<Json<DepositorSignupsResponse>, ErrorResponse> {
    depositor_signups_data(&state).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/staking/depositors",
    responses(
        (status = 200, description = "ETH deposited per depositor and trending depositors", body = DepositorStakingResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "staking"
)]
/// Get ETH deposited per depositor with the top recent and growing depositors
pub async fn depositors(
    State(state): State<ApiState>,
) -> Result<Json<DepositorStakingResponse>, ErrorResponse> {
    depositors_data(&state).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/staking/performance",
    operation_id = "depositor_performance",
    responses(
        (status = 200, description = "Average APR per depositor", body = DepositorPerformanceResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "staking"
)]
/// Get validator count and average APR per depositor
pub async fn performance(
    State(state): State<ApiState>,
) -> Result<Json<DepositorPerformanceResponse>, ErrorResponse> {
    performance_data(&state).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/staking/performance/quartiles",
    operation_id = "depositor_performance_quartiles",
    responses(
        (status = 200, description = "APR quartiles per depositor", body = DepositorQuartilesResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "staking"
)]
/// Get min, max, median and quartile APR per depositor
pub async fn performance_quartiles(
    State(state): State<ApiState>,
) -> Result<Json<DepositorQuartilesResponse>, ErrorResponse> {
    performance_quartiles_data(&state).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/staking/diversity",
    responses(
        (status = 200, description = "Client diversity per staking entity", body = StakingDiversityResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "staking"
)]
/// Get validators per consensus client and a Gini diversity coefficient per staking entity
pub async fn diversity(
    State(state): State<ApiState>,
) -> Result<Json<StakingDiversityResponse>, ErrorResponse> {
    diversity_data(&state).await.map(Json)
}
