//! Thin HTTP API over the ethmetrics query catalog and its derived tables

/// Query result cache
pub mod cache;
/// Helper functions for derived tables and error mapping
pub mod helpers;
/// Route handlers and router
pub mod routes;
/// Shared handler state
pub mod state;

use api_types::*;
use clickhouse_lib::{
    BlockStatsRow, ClientInfoRow, DepositorSignupRow, FirstProposalRow, HostingRow,
    ProposalsByClientRow, StakingOverviewRow, ValidatorSignupRow,
};
use primitives::ConsensusClient;
use routes::{clients, onchain, staking, tabs};
use utoipa::OpenApi;

pub use cache::{DEFAULT_CACHE_TTL, QueryCache};
pub use routes::router;
pub use state::ApiState;

/// `OpenAPI` documentation structure
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        clients::client_info,
        clients::hosting,
        clients::first_proposals,
        clients::proposals,
        clients::performance,
        clients::performance_quartiles,
        staking::overview,
        staking::validator_signups,
        staking::depositor_signups,
        staking::depositors,
        staking::performance,
        staking::performance_quartiles,
        staking::diversity,
        onchain::block_stats,
        tabs::tab
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            SlotResult,
            SlotItem,
            TabResponse,
            ConsensusShareItem,
            ClientInfoRow,
            ClientInfoResponse,
            HostingRow,
            HostingDiversityResponse,
            FirstProposalRow,
            FirstProposalsResponse,
            ProposalsByClientRow,
            ProposalsByClientResponse,
            ClientPerformanceItem,
            ClientPerformanceResponse,
            ClientQuartileItem,
            ClientQuartilesResponse,
            StakingOverviewRow,
            StakingOverviewResponse,
            ValidatorSignupRow,
            ValidatorSignupsResponse,
            DepositorSignupRow,
            DepositorSignupsResponse,
            DepositorTrendItem,
            DepositorStakingResponse,
            DepositorPerformanceItem,
            DepositorPerformanceResponse,
            DepositorQuartileItem,
            DepositorQuartilesResponse,
            ConsensusClient,
            StakingDiversityItem,
            StakingDiversityResponse,
            BlockStatsRow,
            BlockStatsResponse
        )
    ),
    tags(
        (name = "clients", description = "Consensus and execution client diversity"),
        (name = "staking", description = "Deposits, depositors and validator performance"),
        (name = "onchain", description = "Block production statistics"),
        (name = "tabs", description = "Every slot of a dashboard tab in one request")
    ),
    info(
        title = "ethmetrics API",
        version = "v1",
        description = "Read-only analytics over Ethereum network telemetry"
    ),
    servers(
        (url = "/v1", description = "API v1")
    )
)]
pub struct ApiDoc;
