//! `ClickHouse` reader for the dashboard query catalog.
//! Handles read-only, parameterless aggregation queries.

use std::time::{Duration, Instant};

use clickhouse::{Client, Row, sql::Identifier};
use derive_more::Debug;
use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

use crate::{
    error::ReaderError,
    http::pooled_client,
    models::{
        BlockStatsRow, ClientInfoRow, ClientPerformanceRow, DepositorPerformanceRow,
        DepositorSignupRow, DepositorStakingRow, FirstProposalRow, HostingRow,
        ProposalsByClientRow, StakingClientRow, StakingOverviewRow, ValidatorSignupRow,
    },
    query::QueryKind,
};

/// `ClickHouse` reader client (read-only operations)
#[derive(Clone, Debug)]
pub struct ClickhouseReader {
    /// Base client
    #[debug(skip)]
    base: Client,
    /// Database name
    db_name: String,
}

impl ClickhouseReader {
    /// Create a new `ClickHouse` reader client.
    ///
    /// Pooled connections idle for longer than `pool_idle_timeout` are
    /// recycled.
    pub fn new(
        url: Url,
        db_name: String,
        username: String,
        password: String,
        pool_idle_timeout: Duration,
    ) -> Self {
        let client = pooled_client(pool_idle_timeout)
            .with_url(url)
            .with_user(username)
            .with_password(password);

        Self { base: client, db_name }
    }

    /// Run one catalog query. `sql` must reference the database as `?`.
    async fn fetch<R>(&self, kind: QueryKind, sql: &str) -> Result<Vec<R>, ReaderError>
    where
        R: Row + for<'b> Deserialize<'b>,
    {
        let start = Instant::now();
        let result = self.base.query(sql).bind(Identifier(&self.db_name)).fetch_all::<R>().await;

        let duration_ms = start.elapsed().as_millis();
        match &result {
            Ok(rows) => {
                debug!(query = %kind, duration_ms, rows = rows.len(), "ClickHouse query executed")
            }
            Err(e) => error!(query = %kind, duration_ms, error = %e, "ClickHouse query failed"),
        }
        result.map_err(|e| ReaderError::classify(kind, e))
    }

    /// Get consensus node counts per execution x consensus client pairing.
    /// Nodes without an execution client match carry an empty name.
    pub async fn get_client_info(&self) -> Result<Vec<ClientInfoRow>, ReaderError> {
        let kind = QueryKind::ClientInfo;
        let sql = format!(
            "SELECT toString(ci.consensus_client) AS consensus_client, \
                          toString(ifNull(ci.execution_client, '')) AS execution_client, \
                          toUInt64(sum(ci.total_nodes)) AS total_nodes, \
                          toUInt64(toUnixTimestamp(min(ci.last_updated))) AS last_updated \
                   FROM ?.{table} AS ci \
                   GROUP BY consensus_client, execution_client \
                   ORDER BY total_nodes DESC, consensus_client ASC, execution_client ASC",
            table = kind.table()
        );
        self.fetch(kind, &sql).await
    }

    /// Get consensus node counts per client and hosting provider.
    ///
    /// Rows are returned uncollapsed; small providers are folded into
    /// `Others` by the caller.
    pub async fn get_hosting_diversity(&self) -> Result<Vec<HostingRow>, ReaderError> {
        let kind = QueryKind::HostingDiversity;
        let sql = format!(
            "SELECT toString(h.consensus_client) AS consensus_client, \
                          toString(assumeNotNull(h.hosting_provider_name)) \
                            AS hosting_provider_name, \
                          toString(assumeNotNull(h.hosting_provider_name)) AS asn, \
                          toUInt64(sum(h.total_nodes)) AS total_nodes, \
                          toUInt64(toUnixTimestamp(min(h.last_updated))) AS last_updated \
                   FROM ?.{table} AS h \
                   WHERE h.hosting_provider_name IS NOT NULL \
                   GROUP BY consensus_client, hosting_provider_name, asn \
                   ORDER BY consensus_client ASC, total_nodes DESC, hosting_provider_name ASC",
            table = kind.table()
        );
        self.fetch(kind, &sql).await
    }

    /// Get validators per predicted client by month of first proposal.
    pub async fn get_first_proposals(&self) -> Result<Vec<FirstProposalRow>, ReaderError> {
        let kind = QueryKind::FirstProposals;
        let sql = format!(
            "SELECT toUInt64(toUnixTimestamp(toDateTime(fp.first_proposal_month))) \
                            AS first_proposal_month, \
                          toString(fp.predicted_client) AS predicted_client, \
                          toUInt64(fp.total_validators) AS total_validators, \
                          toUInt64(toUnixTimestamp(fp.last_updated)) AS last_updated \
                   FROM ?.{table} AS fp \
                   ORDER BY first_proposal_month ASC, predicted_client ASC",
            table = kind.table()
        );
        self.fetch(kind, &sql).await
    }

    /// Get monthly block proposals per predicted client.
    pub async fn get_proposals_by_client(
        &self,
    ) -> Result<Vec<ProposalsByClientRow>, ReaderError> {
        let kind = QueryKind::ProposalsByClient;
        let sql = format!(
            "SELECT toUInt64(toUnixTimestamp(toDateTime(p.proposal_month))) \
                            AS proposal_month, \
                          toString(p.predicted_client) AS predicted_client, \
                          toUInt64(p.total_proposals) AS total_proposals \
                   FROM ?.{table} AS p \
                   ORDER BY proposal_month ASC, predicted_client ASC",
            table = kind.table()
        );
        self.fetch(kind, &sql).await
    }

    /// Get per-validator APR keyed by consensus client.
    pub async fn get_client_performance(
        &self,
    ) -> Result<Vec<ClientPerformanceRow>, ReaderError> {
        let kind = QueryKind::ClientPerformance;
        let sql = format!(
            "SELECT toString(cp.client) AS client, \
                          toUInt64(cp.validator) AS validator, \
                          toFloat64(cp.apr) AS apr \
                   FROM ?.{table} AS cp",
            table = kind.table()
        );
        self.fetch(kind, &sql).await
    }

    /// Get per-validator APR keyed by depositor.
    pub async fn get_depositor_performance(
        &self,
    ) -> Result<Vec<DepositorPerformanceRow>, ReaderError> {
        let kind = QueryKind::DepositorPerformance;
        let sql = format!(
            "SELECT toString(dp.depositor_label) AS depositor_label, \
                          toUInt64(dp.validator) AS validator, \
                          toFloat64(dp.apr) AS apr \
                   FROM ?.{table} AS dp",
            table = kind.table()
        );
        self.fetch(kind, &sql).await
    }

    /// Get validator counts per staking entity and client.
    pub async fn get_staking_client_distribution(
        &self,
    ) -> Result<Vec<StakingClientRow>, ReaderError> {
        let kind = QueryKind::StakingClientDistribution;
        let sql = format!(
            "SELECT toString(s.staking_entity) AS staking_entity, \
                          toString(s.client) AS client, \
                          toUInt64(s.tot_validators) AS tot_validators \
                   FROM ?.{table} AS s",
            table = kind.table()
        );
        self.fetch(kind, &sql).await
    }

    /// Get ETH deposited per depositor.
    pub async fn get_depositor_staking(&self) -> Result<Vec<DepositorStakingRow>, ReaderError> {
        let kind = QueryKind::DepositorStaking;
        let sql = format!(
            "SELECT toString(d.depositor_label) AS depositor_label, \
                          CAST(d.depositor_type AS Nullable(String)) AS depositor_type, \
                          toFloat64(d.total_eth_deposited) AS total_eth_deposited, \
                          toFloat64(d.eth_deposited_last_30days) AS eth_deposited_last_30days \
                   FROM ?.{table} AS d \
                   ORDER BY total_eth_deposited DESC, depositor_label ASC",
            table = kind.table()
        );
        self.fetch(kind, &sql).await
    }

    /// Get network-wide staking totals. The table holds a single row.
    pub async fn get_staking_overview(&self) -> Result<Vec<StakingOverviewRow>, ReaderError> {
        let kind = QueryKind::StakingOverview;
        let sql = format!(
            "SELECT toUInt64(o.total_depositors) AS total_depositors, \
                          toUInt64(o.num_validators) AS num_validators, \
                          toFloat64(o.eth_deposited) AS eth_deposited, \
                          toFloat64(o.depositor_change) AS depositor_change, \
                          toFloat64(o.validator_change) AS validator_change \
                   FROM ?.{table} AS o \
                   LIMIT 1",
            table = kind.table()
        );
        self.fetch(kind, &sql).await
    }

    /// Get weekly validator signups.
    pub async fn get_weekly_validator_signups(
        &self,
    ) -> Result<Vec<ValidatorSignupRow>, ReaderError> {
        let kind = QueryKind::ValidatorSignupsWeekly;
        let sql = format!(
            "SELECT toUInt64(toUnixTimestamp(toDateTime(v.first_deposit_week))) \
                            AS first_deposit_week, \
                          toUInt64(v.validators_signed_up) AS validators_signed_up \
                   FROM ?.{table} AS v \
                   ORDER BY first_deposit_week ASC",
            table = kind.table()
        );
        self.fetch(kind, &sql).await
    }

    /// Get weekly depositor signups.
    pub async fn get_weekly_depositor_signups(
        &self,
    ) -> Result<Vec<DepositorSignupRow>, ReaderError> {
        let kind = QueryKind::DepositorSignupsWeekly;
        let sql = format!(
            "SELECT toUInt64(toUnixTimestamp(toDateTime(d.week))) AS week, \
                          toUInt64(d.depositor_count) AS depositor_count \
                   FROM ?.{table} AS d \
                   ORDER BY week ASC",
            table = kind.table()
        );
        self.fetch(kind, &sql).await
    }

    /// Get daily empty block and missed slot counts.
    pub async fn get_block_stats(&self) -> Result<Vec<BlockStatsRow>, ReaderError> {
        let kind = QueryKind::BlockStatsDaily;
        let sql = format!(
            "SELECT toUInt64(toUnixTimestamp(toDateTime(b.day))) AS day, \
                          toUInt64(b.empty_blocks) AS empty_blocks, \
                          toUInt64(b.missed_slots) AS missed_slots \
                   FROM ?.{table} AS b \
                   ORDER BY day ASC",
            table = kind.table()
        );
        self.fetch(kind, &sql).await
    }
}

#[cfg(test)]
mod tests;
