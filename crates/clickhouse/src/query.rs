use std::fmt;

/// Identity of a query in the fixed catalog served by
/// [`ClickhouseReader`](crate::ClickhouseReader).
///
/// Every query is parameterless, so the variant alone identifies a result
/// table. It doubles as the cache key and as the `query` field in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QueryKind {
    /// Node counts per execution x consensus client pairing
    ClientInfo,
    /// Node counts per consensus client x hosting provider
    HostingDiversity,
    /// Validators per predicted client, by month of first proposal
    FirstProposals,
    /// Block proposals per predicted client, by month
    ProposalsByClient,
    /// Per-validator APR keyed by consensus client
    ClientPerformance,
    /// Per-validator APR keyed by depositor
    DepositorPerformance,
    /// Validators per staking entity x client
    StakingClientDistribution,
    /// ETH deposited per depositor
    DepositorStaking,
    /// Network-wide staking totals
    StakingOverview,
    /// Validator signups per week
    ValidatorSignupsWeekly,
    /// Depositor signups per week
    DepositorSignupsWeekly,
    /// Empty blocks and missed slots per day
    BlockStatsDaily,
}

impl QueryKind {
    /// Every query in the catalog.
    pub const ALL: [Self; 12] = [
        Self::ClientInfo,
        Self::HostingDiversity,
        Self::FirstProposals,
        Self::ProposalsByClient,
        Self::ClientPerformance,
        Self::DepositorPerformance,
        Self::StakingClientDistribution,
        Self::DepositorStaking,
        Self::StakingOverview,
        Self::ValidatorSignupsWeekly,
        Self::DepositorSignupsWeekly,
        Self::BlockStatsDaily,
    ];

    /// Stable snake case name of the query.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ClientInfo => "client_info",
            Self::HostingDiversity => "hosting_diversity",
            Self::FirstProposals => "first_proposals",
            Self::ProposalsByClient => "proposals_by_client",
            Self::ClientPerformance => "client_performance",
            Self::DepositorPerformance => "depositor_performance",
            Self::StakingClientDistribution => "staking_client_distribution",
            Self::DepositorStaking => "depositor_staking",
            Self::StakingOverview => "staking_overview",
            Self::ValidatorSignupsWeekly => "validator_signups_weekly",
            Self::DepositorSignupsWeekly => "depositor_signups_weekly",
            Self::BlockStatsDaily => "block_stats_daily",
        }
    }

    /// Source table the query reads from.
    pub const fn table(&self) -> &'static str {
        match self {
            Self::ClientInfo => "ui_client_info",
            Self::HostingDiversity => "ui_consensus_hosting_info",
            Self::FirstProposals => "ui_validator_first_proposals",
            Self::ProposalsByClient => "ui_proposals_by_client",
            Self::ClientPerformance => "ui_client_performance",
            Self::DepositorPerformance => "ui_depositor_performance",
            Self::StakingClientDistribution => "ui_staking_client_distribution",
            Self::DepositorStaking => "ui_depositor_staking",
            Self::StakingOverview => "ui_staking_overview",
            Self::ValidatorSignupsWeekly => "dn_validators_signup_weekly",
            Self::DepositorSignupsWeekly => "dn_depositors_signup_weekly",
            Self::BlockStatsDaily => "dn_block_stats_empty_missed",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::QueryKind;
    use std::collections::BTreeSet;

    #[test]
    fn names_and_tables_are_unique() {
        let names: BTreeSet<_> = QueryKind::ALL.iter().map(QueryKind::as_str).collect();
        let tables: BTreeSet<_> = QueryKind::ALL.iter().map(QueryKind::table).collect();
        assert_eq!(names.len(), QueryKind::ALL.len());
        assert_eq!(tables.len(), QueryKind::ALL.len());
    }

    #[test]
    fn display_uses_snake_case_name() {
        assert_eq!(QueryKind::StakingClientDistribution.to_string(), "staking_client_distribution");
    }
}
