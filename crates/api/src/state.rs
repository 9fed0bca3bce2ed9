//! Shared state for API handlers

use std::{sync::Arc, time::Duration};

use clickhouse_lib::{
    BlockStatsRow, ClickhouseReader, ClientInfoRow, ClientPerformanceRow, DepositorPerformanceRow,
    DepositorSignupRow, DepositorStakingRow, FirstProposalRow, HostingRow, ProposalsByClientRow,
    QueryKind, ReaderError, StakingClientRow, StakingOverviewRow, ValidatorSignupRow,
};

use crate::cache::QueryCache;

/// Result of a cached catalog query.
pub type CachedRows<T> = Result<Arc<Vec<T>>, ReaderError>;

/// Shared state for API handlers.
///
/// Cloning is cheap and every clone shares the same [`QueryCache`].
#[derive(Clone)]
pub struct ApiState {
    reader: ClickhouseReader,
    cache: Arc<QueryCache>,
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState").finish_non_exhaustive()
    }
}

impl ApiState {
    /// Create a new [`ApiState`] whose query results live for `cache_ttl`.
    pub fn new(reader: ClickhouseReader, cache_ttl: Duration) -> Self {
        Self { reader, cache: Arc::new(QueryCache::new(cache_ttl)) }
    }

    pub(crate) async fn client_info(&self) -> CachedRows<ClientInfoRow> {
        self.cache.get_or_fetch(QueryKind::ClientInfo, || self.reader.get_client_info()).await
    }

    pub(crate) async fn hosting_diversity(&self) -> CachedRows<HostingRow> {
        self.cache
            .get_or_fetch(QueryKind::HostingDiversity, || self.reader.get_hosting_diversity())
            .await
    }

    pub(crate) async fn first_proposals(&self) -> CachedRows<FirstProposalRow> {
        self.cache
            .get_or_fetch(QueryKind::FirstProposals, || self.reader.get_first_proposals())
            .await
    }

    pub(crate) async fn proposals_by_client(&self) -> CachedRows<ProposalsByClientRow> {
        self.cache
            .get_or_fetch(QueryKind::ProposalsByClient, || self.reader.get_proposals_by_client())
            .await
    }

    pub(crate) async fn client_performance(&self) -> CachedRows<ClientPerformanceRow> {
        self.cache
            .get_or_fetch(QueryKind::ClientPerformance, || self.reader.get_client_performance())
            .await
    }

    pub(crate) async fn depositor_performance(&self) -> CachedRows<DepositorPerformanceRow> {
        self.cache
            .get_or_fetch(QueryKind::DepositorPerformance, || {
                self.reader.get_depositor_performance()
            })
            .await
    }

    pub(crate) async fn staking_client_distribution(&self) -> CachedRows<StakingClientRow> {
        self.cache
            .get_or_fetch(QueryKind::StakingClientDistribution, || {
                self.reader.get_staking_client_distribution()
            })
            .await
    }

    pub(crate) async fn depositor_staking(&self) -> CachedRows<DepositorStakingRow> {
        self.cache
            .get_or_fetch(QueryKind::DepositorStaking, || self.reader.get_depositor_staking())
            .await
    }

    pub(crate) async fn staking_overview(&self) -> CachedRows<StakingOverviewRow> {
        self.cache
            .get_or_fetch(QueryKind::StakingOverview, || self.reader.get_staking_overview())
            .await
    }

    pub(crate) async fn validator_signups(&self) -> CachedRows<ValidatorSignupRow> {
        self.cache
            .get_or_fetch(QueryKind::ValidatorSignupsWeekly, || {
                self.reader.get_weekly_validator_signups()
            })
            .await
    }

    pub(crate) async fn depositor_signups(&self) -> CachedRows<DepositorSignupRow> {
        self.cache
            .get_or_fetch(QueryKind::DepositorSignupsWeekly, || {
                self.reader.get_weekly_depositor_signups()
            })
            .await
    }

    pub(crate) async fn block_stats(&self) -> CachedRows<BlockStatsRow> {
        self.cache.get_or_fetch(QueryKind::BlockStatsDaily, || self.reader.get_block_stats()).await
    }
}
