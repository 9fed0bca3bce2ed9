//! Rows returned by the query catalog.
//!
//! Timestamps and time buckets are unix seconds. Column names match the
//! aliases in the SQL of [`ClickhouseReader`](crate::ClickhouseReader);
//! downstream code relies on names, not positions.

use clickhouse::Row;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Consensus nodes grouped by execution x consensus client pairing
#[derive(Clone, Debug, Row, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ClientInfoRow {
    /// Consensus client name reported by the crawler
    pub consensus_client: String,
    /// Execution client matched by IP, empty when no match was found
    pub execution_client: String,
    /// Number of nodes running this pairing
    pub total_nodes: u64,
    /// Oldest crawl timestamp in the group
    pub last_updated: u64,
}

/// Consensus nodes grouped by client and hosting provider
#[derive(Clone, Debug, Row, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct HostingRow {
    /// Consensus client name
    pub consensus_client: String,
    /// Hosting provider display name, or `Others` once collapsed
    pub hosting_provider_name: String,
    /// Provider identity before any collapsing
    pub asn: String,
    /// Number of nodes
    pub total_nodes: u64,
    /// Oldest crawl timestamp in the group
    pub last_updated: u64,
}

/// Validators grouped by month of their first proposal
#[derive(Clone, Debug, Row, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct FirstProposalRow {
    /// Start of the month
    pub first_proposal_month: u64,
    /// Client predicted from block fingerprints
    pub predicted_client: String,
    /// Validators whose first proposal fell in this month
    pub total_validators: u64,
    /// Last refresh of the source table
    pub last_updated: u64,
}

/// Block proposals grouped by month and predicted client
#[derive(Clone, Debug, Row, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ProposalsByClientRow {
    /// Start of the month
    pub proposal_month: u64,
    /// Client predicted from block fingerprints
    pub predicted_client: String,
    /// Blocks proposed
    pub total_proposals: u64,
}

/// APR of a single validator keyed by its consensus client
#[derive(Clone, Debug, Row, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClientPerformanceRow {
    /// Consensus client
    pub client: String,
    /// Validator index
    pub validator: u64,
    /// Annualised return over the last 31 days, as a fraction
    pub apr: f64,
}

/// APR of a single validator keyed by its depositor
#[derive(Clone, Debug, Row, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct DepositorPerformanceRow {
    /// Depositor label
    pub depositor_label: String,
    /// Validator index
    pub validator: u64,
    /// Annualised return over the last 31 days, as a fraction
    pub apr: f64,
}

/// Validators run by a staking entity with a given client
#[derive(Clone, Debug, Row, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct StakingClientRow {
    /// Staking entity
    pub staking_entity: String,
    /// Consensus client name as stored
    pub client: String,
    /// Number of validators
    pub tot_validators: u64,
}

/// ETH deposited by a depositor
#[derive(Clone, Debug, Row, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct DepositorStakingRow {
    /// Depositor label
    pub depositor_label: String,
    /// Depositor category, unknown for unlabelled depositors
    pub depositor_type: Option<String>,
    /// Total ETH deposited
    pub total_eth_deposited: f64,
    /// ETH deposited in the last 30 days
    pub eth_deposited_last_30days: f64,
}

/// Network-wide staking totals and their relative change
#[derive(Clone, Debug, Row, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct StakingOverviewRow {
    /// Distinct depositors
    pub total_depositors: u64,
    /// Active validators
    pub num_validators: u64,
    /// Total ETH deposited
    pub eth_deposited: f64,
    /// Relative change in depositors, as a fraction
    pub depositor_change: f64,
    /// Relative change in validators, as a fraction
    pub validator_change: f64,
}

/// Validators signed up in a week
#[derive(Clone, Debug, Row, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ValidatorSignupRow {
    /// Start of the week
    pub first_deposit_week: u64,
    /// Validators whose first deposit fell in this week
    pub validators_signed_up: u64,
}

/// Depositors signed up in a week
#[derive(Clone, Debug, Row, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct DepositorSignupRow {
    /// Start of the week
    pub week: u64,
    /// New depositors in this week
    pub depositor_count: u64,
}

/// Empty blocks and missed slots in a day
#[derive(Clone, Debug, Row, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct BlockStatsRow {
    /// Start of the day
    pub day: u64,
    /// Blocks without transactions
    pub empty_blocks: u64,
    /// Slots without a block
    pub missed_slots: u64,
}
