//! Client diversity endpoints

use crate::{
    helpers::{
        AprStatistic, ValidatorCount, apr_quartiles, client_totals, collapse_hosting,
        consensus_distribution, last_updated, oldest_update, reader_error, summarize_apr,
        unique_hosting_providers,
    },
    state::ApiState,
};
use api_types::{
    ClientInfoResponse, ClientPerformanceItem, ClientPerformanceResponse, ClientQuartileItem,
    ClientQuartilesResponse, ErrorResponse, FirstProposalsResponse, HostingDiversityResponse,
    ProposalsByClientResponse,
};
use axum::{Json, extract::State};

pub(crate) async fn client_info_data(
    state: &ApiState,
) -> Result<ClientInfoResponse, ErrorResponse> {
    let rows = state.client_info().await.map_err(reader_error)?;
    let totals = client_totals(&rows);
    let pairings = rows.iter().filter(|r| !r.execution_client.is_empty()).cloned().collect();

    Ok(ClientInfoResponse {
        total_nodes: totals.total_nodes,
        matched_nodes: totals.matched_nodes,
        last_updated: last_updated(totals.last_updated),
        consensus_clients: consensus_distribution(&rows),
        pairings,
    })
}

pub(crate) async fn hosting_data(
    state: &ApiState,
) -> Result<HostingDiversityResponse, ErrorResponse> {
    let rows = state.hosting_diversity().await.map_err(reader_error)?;
    Ok(HostingDiversityResponse {
        unique_providers: unique_hosting_providers(&rows),
        last_updated: last_updated(oldest_update(rows.iter().map(|r| r.last_updated))),
        providers: collapse_hosting(&rows),
    })
}

pub(crate) async fn first_proposals_data(
    state: &ApiState,
) -> Result<FirstProposalsResponse, ErrorResponse> {
    let rows = state.first_proposals().await.map_err(reader_error)?;
    Ok(FirstProposalsResponse {
        last_updated: last_updated(oldest_update(rows.iter().map(|r| r.last_updated))),
        months: rows.to_vec(),
    })
}

pub(crate) async fn proposals_data(
    state: &ApiState,
) -> Result<ProposalsByClientResponse, ErrorResponse> {
    let rows = state.proposals_by_client().await.map_err(reader_error)?;
    Ok(ProposalsByClientResponse { months: rows.to_vec() })
}

pub(crate) async fn performance_data(
    state: &ApiState,
) -> Result<ClientPerformanceResponse, ErrorResponse> {
    let rows = state.client_performance().await.map_err(reader_error)?;
    let clients = summarize_apr(&rows, AprStatistic::Median, ValidatorCount::AllRows)
        .into_iter()
        .map(|s| ClientPerformanceItem {
            client: s.entity,
            num_validators: s.num_validators,
            median_apr: s.apr,
        })
        .collect();
    Ok(ClientPerformanceResponse { clients })
}

pub(crate) async fn performance_quartiles_data(
    state: &ApiState,
) -> Result<ClientQuartilesResponse, ErrorResponse> {
    let rows = state.client_performance().await.map_err(reader_error)?;
    let quartiles = apr_quartiles(&rows)
        .into_iter()
        .map(|q| ClientQuartileItem { client: q.entity, name: q.name.to_owned(), apr: q.apr })
        .collect();
    Ok(ClientQuartilesResponse { quartiles })
}

#[utoipa::path(
    get,
    path = "/clients/info",
    responses(
        (status = 200, description = "Consensus node counts and execution client pairings", body = ClientInfoResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "clients"
)]
/// Get node counts per consensus client and execution x consensus pairings
pub async fn client_info(
    State(state): State<ApiState>,
) -> Result<Json<ClientInfoResponse>, ErrorResponse> {
    client_info_data(&state).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/clients/hosting",
    responses(
        (status = 200, description = "Hosting providers per consensus client", body = HostingDiversityResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "clients"
)]
/// Get hosting providers per consensus client, small providers merged into "Others"
pub async fn hosting(
    State(state): State<ApiState>,
) -> Result<Json<HostingDiversityResponse>, ErrorResponse> {
    hosting_data(&state).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/clients/first-proposals",
    responses(
        (status = 200, description = "Validators by month of first proposal", body = FirstProposalsResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "clients"
)]
/// Get validators grouped by the month of their first proposal and predicted client
pub async fn first_proposals(
    State(state): State<ApiState>,
) -> Result<Json<FirstProposalsResponse>, ErrorResponse> {
    first_proposals_data(&state).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/clients/proposals",
    responses(
        (status = 200, description = "Monthly proposals per predicted client", body = ProposalsByClientResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "clients"
)]
/// Get monthly block proposals per predicted client
pub async fn proposals(
    State(state): State<ApiState>,
) -> Result<Json<ProposalsByClientResponse>, ErrorResponse> {
    proposals_data(&state).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/clients/performance",
    operation_id = "client_performance",
    responses(
        (status = 200, description = "Median APR per client", body = ClientPerformanceResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "clients"
)]
/// Get validator count and median APR per client
pub async fn performance(
    State(state): State<ApiState>,
) -> Result<Json<ClientPerformanceResponse>, ErrorResponse> {
    performance_data(&state).await.map(Json)
}

#[utoipa::path(
    get,
    path = "/clients/performance/quartiles",
    operation_id = "client_performance_quartiles",
    responses(
        (status = 200, description = "APR quartiles per client", body = ClientQuartilesResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "clients"
)]
/// Get min, max, median and quartile APR per client
pub async fn performance_quartiles(
    State(state): State<ApiState>,
) -> Result<Json<ClientQuartilesResponse>, ErrorResponse> {
    performance_quartiles_data(&state).await.map(Json)
}
