//! Data types for the ethmetrics API.
//!
//! These structs define the JSON responses returned by the API server. They
//! are provided in a separate crate so that consumers such as the dashboard can
//! depend on them without pulling in the rest of the server implementation.

#![allow(missing_docs)]

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clickhouse_lib::{
    BlockStatsRow, ClientInfoRow, DepositorSignupRow, FirstProposalRow, HostingRow,
    ProposalsByClientRow, StakingOverviewRow, ValidatorSignupRow,
};
use primitives::ConsensusClient;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Problem details returned for every failed request.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(
        r#type: impl Into<String>,
        title: impl Into<String>,
        status: StatusCode,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            r#type: r#type.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }

    pub fn database_error() -> Self {
        Self::new(
            "database-error",
            "Database error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "The data source rejected the query",
        )
    }

    pub fn unavailable() -> Self {
        Self::new(
            "data-source-unavailable",
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
            "The data source could not be reached",
        )
    }

    pub fn schema_mismatch(detail: impl Into<String>) -> Self {
        Self::new("schema-mismatch", "Schema mismatch", StatusCode::INTERNAL_SERVER_ERROR, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new("not-found", "Not Found", StatusCode::NOT_FOUND, detail)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

/// Outcome of a single dashboard slot.
///
/// Slots fail independently: an error in one never hides the others.
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SlotResult {
    Ok {
        #[schema(value_type = Object)]
        data: serde_json::Value,
    },
    Error {
        error: ErrorResponse,
    },
}

impl SlotResult {
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SlotItem {
    pub name: String,
    #[serde(flatten)]
    pub result: SlotResult,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TabResponse {
    pub tab: String,
    pub slots: Vec<SlotItem>,
}

// Client tab

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ConsensusShareItem {
    pub consensus_client: String,
    pub total_nodes: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientInfoResponse {
    /// Consensus nodes found by the crawler
    pub total_nodes: u64,
    /// Nodes whose IP matched an execution client
    pub matched_nodes: u64,
    pub last_updated: Option<String>,
    /// Node count per consensus client
    pub consensus_clients: Vec<ConsensusShareItem>,
    /// Execution x consensus pairings, matched nodes only
    pub pairings: Vec<ClientInfoRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HostingDiversityResponse {
    /// Distinct providers before small providers are collapsed
    pub unique_providers: u64,
    pub last_updated: Option<String>,
    pub providers: Vec<HostingRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FirstProposalsResponse {
    pub last_updated: Option<String>,
    pub months: Vec<FirstProposalRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProposalsByClientResponse {
    pub months: Vec<ProposalsByClientRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientPerformanceItem {
    pub client: String,
    pub num_validators: u64,
    /// `null` when no validator of the client has a known APR
    pub median_apr: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientPerformanceResponse {
    pub clients: Vec<ClientPerformanceItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientQuartileItem {
    pub client: String,
    pub name: String,
    pub apr: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientQuartilesResponse {
    pub quartiles: Vec<ClientQuartileItem>,
}

// Staking tab

#[derive(Debug, Serialize, ToSchema)]
pub struct StakingOverviewResponse {
    pub overview: Option<StakingOverviewRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidatorSignupsResponse {
    pub weeks: Vec<ValidatorSignupRow>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositorSignupsResponse {
    pub weeks: Vec<DepositorSignupRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DepositorTrendItem {
    pub depositor_label: String,
    pub depositor_type: Option<String>,
    pub total_eth_deposited: f64,
    pub eth_deposited_last_30days: f64,
    /// Share of the total deposited in the last 30 days
    pub change_pct: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositorStakingResponse {
    /// Every depositor, for the distribution chart
    pub depositors: Vec<DepositorTrendItem>,
    /// Top depositors by ETH deposited in the last 30 days
    pub top_by_recent_deposits: Vec<DepositorTrendItem>,
    /// Top depositors by relative growth in the last 30 days
    pub top_by_growth: Vec<DepositorTrendItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositorPerformanceItem {
    pub depositor_label: String,
    pub num_validators: u64,
    /// `null` when no validator of the depositor has a known APR
    pub avg_apr: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositorPerformanceResponse {
    pub depositors: Vec<DepositorPerformanceItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositorQuartileItem {
    pub depositor: String,
    pub name: String,
    pub apr: Option<f64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositorQuartilesResponse {
    pub quartiles: Vec<DepositorQuartileItem>,
}

/// One row of the staking entity x client pivot.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StakingDiversityItem {
    pub staking_entity: String,
    /// Gini coefficient over the known clients, `null` when the entity runs
    /// no validators on any of them
    pub diversity_coefficient: Option<f64>,
    pub lighthouse: u64,
    pub lodestar: u64,
    pub nimbus: u64,
    pub prysm: u64,
    pub teku: u64,
    /// Validators on clients outside the known set
    pub other: u64,
    pub total_validators: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StakingDiversityResponse {
    /// Known clients, in the order of the per-client columns
    pub clients: Vec<ConsensusClient>,
    pub entities: Vec<StakingDiversityItem>,
}

// On chain tab

#[derive(Debug, Serialize, ToSchema)]
pub struct BlockStatsResponse {
    pub days: Vec<BlockStatsRow>,
}
