//! Derived statistics computed from catalog query results.
//!
//! Every function here is pure and total: empty input yields empty output.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
};

use api_types::{ConsensusShareItem, DepositorTrendItem, StakingDiversityItem};
use clickhouse_lib::{
    ClientInfoRow, ClientPerformanceRow, DepositorPerformanceRow, DepositorStakingRow, HostingRow,
    StakingClientRow,
};
use primitives::{
    ConsensusClient,
    stats::{self, quantile_sorted},
};

/// Label that replaces hosting providers below [`HOSTING_COLLAPSE_THRESHOLD`].
pub const OTHERS_BUCKET: &str = "Others";

/// Providers hosting fewer nodes than this for a client are merged into
/// [`OTHERS_BUCKET`].
pub const HOSTING_COLLAPSE_THRESHOLD: u64 = 10;

/// Number of rows in each depositor trend table.
pub const TRENDING_LIMIT: usize = 5;

/// Names of the quartile statistics, in output order.
pub const QUARTILE_NAMES: [&str; 5] =
    ["min_apr", "max_apr", "median_apr", "apr_25pct", "apr_75pct"];

/// A validator's APR attributed to an entity.
pub trait AprSample {
    /// Entity the validator belongs to (a client or a depositor).
    fn entity(&self) -> &str;
    /// Annual percentage rate, may be negative.
    fn apr(&self) -> f64;
}

impl AprSample for ClientPerformanceRow {
    fn entity(&self) -> &str {
        &self.client
    }

    fn apr(&self) -> f64 {
        self.apr
    }
}

impl AprSample for DepositorPerformanceRow {
    fn entity(&self) -> &str {
        &self.depositor_label
    }

    fn apr(&self) -> f64 {
        self.apr
    }
}

/// Statistic used to summarise the APRs of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AprStatistic {
    /// Arithmetic mean
    Mean,
    /// 0.5 quantile
    Median,
}

impl AprStatistic {
    fn apply(self, values: &[f64]) -> Option<f64> {
        match self {
            Self::Mean => stats::mean(values),
            Self::Median => stats::median(values),
        }
    }
}

/// Which rows count towards an entity's validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorCount {
    /// Every row, whether or not its APR is known
    AllRows,
    /// Only rows with a known (non-`NaN`) APR
    KnownApr,
}

/// Validator count and summary APR of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityAprSummary {
    /// Entity label
    pub entity: String,
    /// Number of validators, counted per [`ValidatorCount`]
    pub num_validators: u64,
    /// Summary APR, `None` when no row of the entity has a known APR
    pub apr: Option<f64>,
}

/// One row of the long-format quartile table.
#[derive(Debug, Clone, PartialEq)]
pub struct AprQuartileRow {
    /// Entity label
    pub entity: String,
    /// One of [`QUARTILE_NAMES`]
    pub name: &'static str,
    /// Statistic value, `None` when the entity has no known APR
    pub apr: Option<f64>,
}

#[derive(Default)]
struct AprGroup {
    rows: u64,
    known: Vec<f64>,
}

/// Group APR samples by entity. Every entity gets a group; `NaN` APRs are
/// counted as rows but left out of the known values.
fn group_aprs<S: AprSample>(rows: &[S]) -> BTreeMap<&str, AprGroup> {
    let mut groups: BTreeMap<&str, AprGroup> = BTreeMap::new();
    for row in rows {
        let group = groups.entry(row.entity()).or_default();
        group.rows += 1;
        if !row.apr().is_nan() {
            group.known.push(row.apr());
        }
    }
    groups
}

/// Per-entity validator count and APR statistic.
///
/// Produces one row per distinct entity. Sorted by the statistic descending,
/// entities without a known APR last, ties by entity ascending.
pub fn summarize_apr<S: AprSample>(
    rows: &[S],
    statistic: AprStatistic,
    count: ValidatorCount,
) -> Vec<EntityAprSummary> {
    let mut summary: Vec<EntityAprSummary> = group_aprs(rows)
        .into_iter()
        .map(|(entity, group)| EntityAprSummary {
            entity: entity.to_owned(),
            num_validators: match count {
                ValidatorCount::AllRows => group.rows,
                ValidatorCount::KnownApr => group.known.len() as u64,
            },
            apr: statistic.apply(&group.known),
        })
        .collect();

    summary.sort_by(|a, b| {
        let by_apr = match (a.apr, b.apr) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            _ => cmp_none_last(a.apr, b.apr),
        };
        by_apr.then_with(|| a.entity.cmp(&b.entity))
    });
    summary
}

/// Min, max, median and quartiles of APR per entity in long format.
///
/// Emits five rows per entity in [`QUARTILE_NAMES`] order, entities ascending.
pub fn apr_quartiles<S: AprSample>(rows: &[S]) -> Vec<AprQuartileRow> {
    let groups = group_aprs(rows);
    let mut out = Vec::with_capacity(groups.len() * QUARTILE_NAMES.len());

    for (entity, mut group) in groups {
        group.known.sort_by(f64::total_cmp);
        let values = [0.0, 1.0, 0.5, 0.25, 0.75].map(|q| quantile_sorted(&group.known, q));
        for (name, apr) in QUARTILE_NAMES.into_iter().zip(values) {
            out.push(AprQuartileRow { entity: entity.to_owned(), name, apr });
        }
    }

    out
}

/// Collapse small hosting providers into [`OTHERS_BUCKET`].
///
/// Rows are grouped by consensus client and provider. Groups hosting fewer
/// than [`HOSTING_COLLAPSE_THRESHOLD`] nodes are relabelled, then merged by
/// summing node counts and keeping the oldest `last_updated`. Output is
/// sorted by client, then node count descending, then provider. Applying the
/// collapse twice gives the same result as applying it once.
pub fn collapse_hosting(rows: &[HostingRow]) -> Vec<HostingRow> {
    let mut grouped: BTreeMap<(&str, &str), HostingRow> = BTreeMap::new();
    for row in rows {
        grouped
            .entry((row.consensus_client.as_str(), row.hosting_provider_name.as_str()))
            .and_modify(|acc| merge_hosting(acc, row))
            .or_insert_with(|| row.clone());
    }

    let mut collapsed: BTreeMap<(String, String), HostingRow> = BTreeMap::new();
    for mut row in grouped.into_values() {
        if row.total_nodes < HOSTING_COLLAPSE_THRESHOLD {
            row.hosting_provider_name = OTHERS_BUCKET.to_owned();
        }
        // a merged bucket has no single ASN
        if row.hosting_provider_name == OTHERS_BUCKET {
            row.asn = OTHERS_BUCKET.to_owned();
        }
        let key = (row.consensus_client.clone(), row.hosting_provider_name.clone());
        match collapsed.get_mut(&key) {
            Some(acc) => merge_hosting(acc, &row),
            None => {
                collapsed.insert(key, row);
            }
        }
    }

    let mut out: Vec<HostingRow> = collapsed.into_values().collect();
    out.sort_by(|a, b| {
        a.consensus_client
            .cmp(&b.consensus_client)
            .then_with(|| b.total_nodes.cmp(&a.total_nodes))
            .then_with(|| a.hosting_provider_name.cmp(&b.hosting_provider_name))
    });
    out
}

fn merge_hosting(acc: &mut HostingRow, row: &HostingRow) {
    acc.total_nodes += row.total_nodes;
    acc.last_updated = oldest_timestamp(acc.last_updated, row.last_updated);
}

/// Oldest of two unix timestamps, treating `0` as unknown.
const fn oldest_timestamp(a: u64, b: u64) -> u64 {
    match (a, b) {
        (0, x) | (x, 0) => x,
        (a, b) if a < b => a,
        (_, b) => b,
    }
}

/// Oldest known `last_updated` across `timestamps`, `0` when none is known.
pub fn oldest_update(timestamps: impl IntoIterator<Item = u64>) -> u64 {
    timestamps.into_iter().fold(0, oldest_timestamp)
}

/// Number of distinct providers (by ASN) before collapsing.
pub fn unique_hosting_providers(rows: &[HostingRow]) -> u64 {
    rows.iter().map(|r| r.asn.as_str()).collect::<BTreeSet<_>>().len() as u64
}

/// Headline node counts of the client tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientTotals {
    /// Every consensus node found
    pub total_nodes: u64,
    /// Nodes whose IP also hosts a known execution client
    pub matched_nodes: u64,
    /// Oldest `last_updated` of the rows, `0` when unknown
    pub last_updated: u64,
}

/// Sum node counts, separating nodes with an execution client match.
pub fn client_totals(rows: &[ClientInfoRow]) -> ClientTotals {
    rows.iter().fold(ClientTotals::default(), |mut acc, row| {
        acc.total_nodes += row.total_nodes;
        if !row.execution_client.is_empty() {
            acc.matched_nodes += row.total_nodes;
        }
        acc.last_updated = oldest_timestamp(acc.last_updated, row.last_updated);
        acc
    })
}

/// Node count per consensus client, largest first.
pub fn consensus_distribution(rows: &[ClientInfoRow]) -> Vec<ConsensusShareItem> {
    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.consensus_client.as_str()).or_default() += row.total_nodes;
    }

    let mut out: Vec<ConsensusShareItem> = totals
        .into_iter()
        .map(|(client, total_nodes)| ConsensusShareItem {
            consensus_client: client.to_owned(),
            total_nodes,
        })
        .collect();
    out.sort_by(|a, b| b.total_nodes.cmp(&a.total_nodes));
    out
}

/// Pivot validator counts per staking entity into one column per known
/// client and score each entity's client diversity.
///
/// Clients outside [`ConsensusClient`] land in `other`, which counts towards
/// `total_validators` but not the coefficient. Sorted by coefficient
/// ascending (most diverse first), undefined coefficients last, ties by
/// entity.
pub fn staking_diversity(rows: &[StakingClientRow]) -> Vec<StakingDiversityItem> {
    let mut pivot: BTreeMap<&str, ([u64; 5], u64)> = BTreeMap::new();
    for row in rows {
        let (known, other) = pivot.entry(row.staking_entity.as_str()).or_default();
        match row.client.parse::<ConsensusClient>() {
            Ok(client) => known[client.index()] += row.tot_validators,
            Err(_) => *other += row.tot_validators,
        }
    }

    let mut out: Vec<StakingDiversityItem> = pivot
        .into_iter()
        .map(|(entity, (known, other))| {
            let [lighthouse, lodestar, nimbus, prysm, teku] = known;
            StakingDiversityItem {
                staking_entity: entity.to_owned(),
                diversity_coefficient: stats::gini(&known),
                lighthouse,
                lodestar,
                nimbus,
                prysm,
                teku,
                other,
                total_validators: known.iter().sum::<u64>() + other,
            }
        })
        .collect();

    out.sort_by(|a, b| {
        cmp_none_last(a.diversity_coefficient, b.diversity_coefficient)
            .then_with(|| a.staking_entity.cmp(&b.staking_entity))
    });
    out
}

/// Ascending order with `None` after every value.
fn cmp_none_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Depositor trend tables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DepositorTrends {
    /// Every depositor in input order
    pub depositors: Vec<DepositorTrendItem>,
    /// Largest deposits in the last 30 days
    pub top_by_recent_deposits: Vec<DepositorTrendItem>,
    /// Largest share of the total deposited in the last 30 days
    pub top_by_growth: Vec<DepositorTrendItem>,
}

/// Truncate ETH amounts to whole ETH, compute each depositor's recent share
/// and rank typed depositors.
///
/// Depositors without a type appear in `depositors` only.
pub fn depositor_trends(rows: &[DepositorStakingRow]) -> DepositorTrends {
    let depositors: Vec<DepositorTrendItem> = rows
        .iter()
        .map(|row| {
            let total = row.total_eth_deposited.trunc();
            let recent = row.eth_deposited_last_30days.trunc();
            DepositorTrendItem {
                depositor_label: row.depositor_label.clone(),
                depositor_type: row.depositor_type.clone(),
                total_eth_deposited: total,
                eth_deposited_last_30days: recent,
                change_pct: (total != 0.0).then(|| recent / total),
            }
        })
        .collect();

    let typed: Vec<&DepositorTrendItem> =
        depositors.iter().filter(|d| d.depositor_type.is_some()).collect();
    let top_by_recent_deposits =
        top_depositors(&typed, |d| Some(d.eth_deposited_last_30days));
    let top_by_growth = top_depositors(&typed, |d| d.change_pct);

    DepositorTrends { depositors, top_by_recent_deposits, top_by_growth }
}

fn top_depositors(
    items: &[&DepositorTrendItem],
    key: impl Fn(&DepositorTrendItem) -> Option<f64>,
) -> Vec<DepositorTrendItem> {
    let mut ranked: Vec<(f64, &DepositorTrendItem)> =
        items.iter().filter_map(|&d| key(d).map(|k| (k, d))).collect();
    ranked.sort_by(|(ka, a), (kb, b)| {
        kb.total_cmp(ka).then_with(|| a.depositor_label.cmp(&b.depositor_label))
    });
    ranked.into_iter().take(TRENDING_LIMIT).map(|(_, d)| d.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn perf(client: &str, apr: f64) -> ClientPerformanceRow {
        ClientPerformanceRow { client: client.to_owned(), validator: 0, apr }
    }

    fn hosting(client: &str, provider: &str, nodes: u64, updated: u64) -> HostingRow {
        HostingRow {
            consensus_client: client.to_owned(),
            hosting_provider_name: provider.to_owned(),
            asn: format!("AS-{provider}"),
            total_nodes: nodes,
            last_updated: updated,
        }
    }

    fn staking(entity: &str, client: &str, n: u64) -> StakingClientRow {
        StakingClientRow {
            staking_entity: entity.to_owned(),
            client: client.to_owned(),
            tot_validators: n,
        }
    }

    fn deposit(label: &str, kind: Option<&str>, total: f64, recent: f64) -> DepositorStakingRow {
        DepositorStakingRow {
            depositor_label: label.to_owned(),
            depositor_type: kind.map(str::to_owned),
            total_eth_deposited: total,
            eth_deposited_last_30days: recent,
        }
    }

    fn approx(value: Option<f64>, expected: f64) -> bool {
        value.is_some_and(|v| (v - expected).abs() < EPS)
    }

    fn depositor(label: &str, apr: f64) -> DepositorPerformanceRow {
        DepositorPerformanceRow { depositor_label: label.to_owned(), validator: 0, apr }
    }

    #[test]
    fn median_summary_per_client() {
        let rows = vec![perf("A", 0.05), perf("A", 0.07), perf("B", -0.02)];
        let summary = summarize_apr(&rows, AprStatistic::Median, ValidatorCount::AllRows);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].entity, "A");
        assert_eq!(summary[0].num_validators, 2);
        assert!(approx(summary[0].apr, 0.06));
        assert_eq!(summary[1].entity, "B");
        assert_eq!(summary[1].num_validators, 1);
        assert!(approx(summary[1].apr, -0.02));
    }

    #[test]
    fn mean_summary_for_depositors() {
        let rows = vec![depositor("Lido", 0.01), depositor("Lido", 0.02), depositor("Lido", 0.06)];
        let summary = summarize_apr(&rows, AprStatistic::Mean, ValidatorCount::KnownApr);
        assert_eq!(summary.len(), 1);
        assert!(approx(summary[0].apr, 0.03));
    }

    #[test]
    fn summary_ties_break_by_entity() {
        let rows = vec![perf("teku", 0.04), perf("nimbus", 0.04), perf("prysm", 0.05)];
        let entities: Vec<_> = summarize_apr(&rows, AprStatistic::Median, ValidatorCount::AllRows)
            .into_iter()
            .map(|s| s.entity)
            .collect();
        assert_eq!(entities, ["prysm", "nimbus", "teku"]);
    }

    #[test]
    fn summary_keeps_entities_without_known_apr() {
        let rows =
            vec![perf("A", f64::NAN), perf("B", 0.01), perf("C", f64::NAN), perf("C", 0.2)];
        let summary = summarize_apr(&rows, AprStatistic::Median, ValidatorCount::AllRows);

        let entities: Vec<_> = summary.iter().map(|s| s.entity.as_str()).collect();
        assert_eq!(entities, ["C", "B", "A"]);
        assert_eq!(summary[0].num_validators, 2);
        assert!(approx(summary[0].apr, 0.2));
        assert_eq!(summary[2].num_validators, 1);
        assert_eq!(summary[2].apr, None);

        let empty: Vec<ClientPerformanceRow> = Vec::new();
        assert!(summarize_apr(&empty, AprStatistic::Mean, ValidatorCount::AllRows).is_empty());
        assert!(apr_quartiles(&empty).is_empty());
    }

    #[test]
    fn depositor_count_skips_unknown_apr() {
        let rows =
            vec![depositor("Lido", f64::NAN), depositor("Lido", 0.02), depositor("Solo", f64::NAN)];
        let summary = summarize_apr(&rows, AprStatistic::Mean, ValidatorCount::KnownApr);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].entity, "Lido");
        assert_eq!(summary[0].num_validators, 1);
        assert!(approx(summary[0].apr, 0.02));
        assert_eq!(summary[1].entity, "Solo");
        assert_eq!(summary[1].num_validators, 0);
        assert_eq!(summary[1].apr, None);
    }

    #[test]
    fn quartiles_are_ordered_and_long_format() {
        let rows = vec![
            perf("b", 0.04),
            perf("a", 0.01),
            perf("a", 0.02),
            perf("a", 0.03),
            perf("a", 0.04),
            perf("a", 0.05),
        ];
        let quartiles = apr_quartiles(&rows);
        assert_eq!(quartiles.len(), 10);

        let a: Vec<_> = quartiles.iter().filter(|q| q.entity == "a").collect();
        let names: Vec<_> = a.iter().map(|q| q.name).collect();
        assert_eq!(names, QUARTILE_NAMES);
        let [min, max, median, p25, p75] =
            [a[0].apr, a[1].apr, a[2].apr, a[3].apr, a[4].apr].map(Option::unwrap);
        assert!((min - 0.01).abs() < EPS);
        assert!((max - 0.05).abs() < EPS);
        assert!((median - 0.03).abs() < EPS);
        assert!((p25 - 0.02).abs() < EPS);
        assert!((p75 - 0.04).abs() < EPS);
        assert!(min <= p25 && p25 <= median && median <= p75 && p75 <= max);

        assert_eq!(quartiles[0].entity, "a");
        assert!(quartiles[5..].iter().all(|q| q.entity == "b" && approx(q.apr, 0.04)));
    }

    #[test]
    fn quartiles_interpolate_between_ranks() {
        let rows = vec![perf("x", 1.0), perf("x", 2.0)];
        let quartiles = apr_quartiles(&rows);
        let p25 = quartiles.iter().find(|q| q.name == "apr_25pct").unwrap();
        assert!(approx(p25.apr, 1.25));
    }

    #[test]
    fn quartiles_stay_ordered_with_infinite_apr() {
        let rows = vec![perf("A", 0.01), perf("A", f64::INFINITY)];
        let values: Vec<f64> = apr_quartiles(&rows).iter().map(|q| q.apr.unwrap()).collect();
        let [min, max, median, p25, p75] = [values[0], values[1], values[2], values[3], values[4]];

        assert_eq!(max, f64::INFINITY);
        assert!(min <= p25 && p25 <= median && median <= p75 && p75 <= max);
    }

    #[test]
    fn quartiles_of_unknown_apr_are_null() {
        let quartiles = apr_quartiles(&[perf("A", f64::NAN)]);
        assert_eq!(quartiles.len(), QUARTILE_NAMES.len());
        assert!(quartiles.iter().all(|q| q.entity == "A" && q.apr.is_none()));
    }

    #[test]
    fn small_providers_collapse_into_others() {
        let rows = vec![
            hosting("lighthouse", "providerA", 50, 100),
            hosting("lighthouse", "providerB", 3, 90),
            hosting("lighthouse", "providerC", 2, 95),
        ];
        let collapsed = collapse_hosting(&rows);

        assert_eq!(collapsed.len(), 2);
        assert_eq!(collapsed[0].hosting_provider_name, "providerA");
        assert_eq!(collapsed[0].total_nodes, 50);
        assert_eq!(collapsed[1].hosting_provider_name, OTHERS_BUCKET);
        assert_eq!(collapsed[1].asn, OTHERS_BUCKET);
        assert_eq!(collapsed[1].total_nodes, 5);
        assert_eq!(collapsed[1].last_updated, 90);
    }

    #[test]
    fn collapse_groups_before_thresholding() {
        let rows = vec![
            hosting("prysm", "aws", 6, 10),
            hosting("prysm", "aws", 6, 20),
            hosting("teku", "aws", 6, 10),
        ];
        let collapsed = collapse_hosting(&rows);

        assert_eq!(collapsed[0].consensus_client, "prysm");
        assert_eq!(collapsed[0].hosting_provider_name, "aws");
        assert_eq!(collapsed[0].total_nodes, 12);
        assert_eq!(collapsed[1].consensus_client, "teku");
        assert_eq!(collapsed[1].hosting_provider_name, OTHERS_BUCKET);
    }

    #[test]
    fn collapse_is_idempotent() {
        let rows = vec![
            hosting("lighthouse", "a", 50, 1),
            hosting("lighthouse", "b", 9, 2),
            hosting("lighthouse", "c", 1, 3),
            hosting("nimbus", "a", 10, 4),
            hosting("nimbus", "d", 4, 0),
        ];
        let once = collapse_hosting(&rows);
        let twice = collapse_hosting(&once);
        assert_eq!(once, twice);
        assert!(collapse_hosting(&[]).is_empty());
    }

    #[test]
    fn provider_named_others_merges_with_bucket() {
        let rows = vec![
            hosting("lighthouse", OTHERS_BUCKET, 12, 5),
            hosting("lighthouse", "small", 2, 7),
            hosting("lighthouse", "tiny", 1, 3),
        ];
        let once = collapse_hosting(&rows);

        assert_eq!(once.len(), 1);
        assert_eq!(once[0].hosting_provider_name, OTHERS_BUCKET);
        assert_eq!(once[0].asn, OTHERS_BUCKET);
        assert_eq!(once[0].total_nodes, 15);
        assert_eq!(once[0].last_updated, 3);
        assert_eq!(collapse_hosting(&once), once);
    }

    #[test]
    fn unique_providers_count_asns_before_collapse() {
        let rows = vec![
            hosting("lighthouse", "a", 50, 1),
            hosting("prysm", "a", 1, 1),
            hosting("prysm", "b", 1, 1),
        ];
        assert_eq!(unique_hosting_providers(&rows), 2);
    }

    #[test]
    fn client_totals_separate_matched_nodes() {
        let row = |el: &str, cl: &str, n, t| ClientInfoRow {
            consensus_client: cl.to_owned(),
            execution_client: el.to_owned(),
            total_nodes: n,
            last_updated: t,
        };
        let rows = vec![
            row("geth", "lighthouse", 10, 200),
            row("", "prysm", 5, 0),
            row("", "lighthouse", 1, 150),
        ];

        let totals = client_totals(&rows);
        assert_eq!(totals, ClientTotals { total_nodes: 16, matched_nodes: 10, last_updated: 150 });

        let shares = consensus_distribution(&rows);
        assert_eq!(shares[0].consensus_client, "lighthouse");
        assert_eq!(shares[0].total_nodes, 11);
        assert_eq!(shares[1].total_nodes, 5);
    }

    #[test]
    fn diversity_pivots_known_clients_and_other() {
        let rows = vec![
            staking("solo", "Lighthouse", 500),
            staking("pool", "lighthouse", 100),
            staking("pool", "Lodestar", 100),
            staking("pool", "nimbus", 100),
            staking("pool", "prysm", 100),
            staking("pool", "teku", 100),
            staking("pool", "grandine", 7),
            staking("ghost", "grandine", 3),
        ];
        let table = staking_diversity(&rows);
        let entities: Vec<_> = table.iter().map(|e| e.staking_entity.as_str()).collect();
        assert_eq!(entities, ["pool", "solo", "ghost"]);

        let pool = &table[0];
        assert!(pool.diversity_coefficient.unwrap().abs() < EPS);
        assert_eq!(pool.other, 7);
        assert_eq!(pool.total_validators, 507);

        let solo = &table[1];
        assert_eq!(solo.lighthouse, 500);
        assert!((solo.diversity_coefficient.unwrap() - 0.8).abs() < EPS);

        let ghost = &table[2];
        assert_eq!(ghost.diversity_coefficient, None);
        assert_eq!(ghost.total_validators, 3);
    }

    #[test]
    fn depositor_trends_rank_typed_depositors() {
        let rows = vec![
            deposit("a", Some("pool"), 1000.9, 100.4),
            deposit("b", Some("cex"), 100.0, 50.0),
            deposit("c", None, 5000.0, 4000.0),
            deposit("d", Some("solo"), 0.0, 0.0),
            deposit("e", Some("pool"), 200.0, 100.0),
        ];
        let trends = depositor_trends(&rows);

        assert_eq!(trends.depositors.len(), 5);
        assert_eq!(trends.depositors[0].total_eth_deposited, 1000.0);
        assert_eq!(trends.depositors[0].eth_deposited_last_30days, 100.0);
        assert_eq!(trends.depositors[3].change_pct, None);

        let recent: Vec<_> =
            trends.top_by_recent_deposits.iter().map(|d| d.depositor_label.as_str()).collect();
        assert_eq!(recent, ["a", "e", "b", "d"]);

        let growth: Vec<_> =
            trends.top_by_growth.iter().map(|d| d.depositor_label.as_str()).collect();
        assert_eq!(growth, ["b", "e", "a"]);
    }

    #[test]
    fn trend_tables_are_capped() {
        let rows: Vec<_> = (0..8)
            .map(|i| deposit(&format!("d{i}"), Some("pool"), 100.0, f64::from(i)))
            .collect();
        let trends = depositor_trends(&rows);
        assert_eq!(trends.top_by_recent_deposits.len(), TRENDING_LIMIT);
        assert_eq!(trends.top_by_recent_deposits[0].depositor_label, "d7");
    }

    #[test]
    fn oldest_update_ignores_unknown() {
        assert_eq!(oldest_update([0, 30, 20, 0]), 20);
        assert_eq!(oldest_update([]), 0);
    }
}
