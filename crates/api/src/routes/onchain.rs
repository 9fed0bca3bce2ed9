//! On-chain statistics endpoints

use crate::{helpers::reader_error, state::ApiState};
use api_types::{BlockStatsResponse, ErrorResponse};
use axum::{Json, extract::State};

pub(crate) async fn block_stats_data(
    state: &ApiState,
) -> Result<BlockStatsResponse, ErrorResponse> {
    let rows = state.block_stats().await.map_err(reader_error)?;
    Ok(BlockStatsResponse { days: rows.to_vec() })
}

#[utoipa::path(
    get,
    path = "/onchain/block-stats",
    responses(
        (status = 200, description = "Daily empty blocks and missed slots", body = BlockStatsResponse),
        (status = 500, description = "Database error", body = ErrorResponse),
        (status = 503, description = "Data source unavailable", body = ErrorResponse)
    ),
    tag = "onchain"
)]
/// Get empty blocks and missed slots per day
pub async fn block_stats(
    State(state): State<ApiState>,
) -> Result<Json<BlockStatsResponse>, ErrorResponse> {
    block_stats_data(&state).await.map(Json)
}
