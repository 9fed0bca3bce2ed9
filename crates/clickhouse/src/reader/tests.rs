use super::*;
use crate::{DEFAULT_POOL_IDLE_TIMEOUT, ReaderError};
use clickhouse::{
    Row,
    test::{Mock, handlers, status},
};
use serde::Serialize;

fn reader(url: &str) -> ClickhouseReader {
    let url = Url::parse(url).unwrap();
    ClickhouseReader::new(
        url,
        "db".to_owned(),
        "user".into(),
        "pass".into(),
        DEFAULT_POOL_IDLE_TIMEOUT,
    )
}

#[tokio::test]
async fn client_info_returns_expected_rows() {
    let mock = Mock::new();
    let rows = vec![
        ClientInfoRow {
            consensus_client: "Lighthouse".to_owned(),
            execution_client: "Geth".to_owned(),
            total_nodes: 1200,
            last_updated: 1_666_742_400,
        },
        ClientInfoRow {
            consensus_client: "Prysm".to_owned(),
            execution_client: String::new(),
            total_nodes: 300,
            last_updated: 1_666_742_400,
        },
    ];
    mock.add(handlers::provide(rows.clone()));

    let result = reader(mock.url()).get_client_info().await.unwrap();

    assert_eq!(result, rows);
}

#[tokio::test]
async fn performance_rows_keep_negative_apr() {
    let mock = Mock::new();
    let rows = vec![
        ClientPerformanceRow { client: "Teku".to_owned(), validator: 1, apr: 0.051 },
        ClientPerformanceRow { client: "Teku".to_owned(), validator: 2, apr: -0.004 },
    ];
    mock.add(handlers::provide(rows.clone()));

    let result = reader(mock.url()).get_client_performance().await.unwrap();

    assert_eq!(result, rows);
}

#[tokio::test]
async fn depositor_staking_decodes_null_type() {
    let mock = Mock::new();
    let rows = vec![DepositorStakingRow {
        depositor_label: "0xabc".to_owned(),
        depositor_type: None,
        total_eth_deposited: 64.0,
        eth_deposited_last_30days: 32.0,
    }];
    mock.add(handlers::provide(rows.clone()));

    let result = reader(mock.url()).get_depositor_staking().await.unwrap();

    assert_eq!(result, rows);
}

#[tokio::test]
async fn empty_result_is_not_an_error() {
    let mock = Mock::new();
    mock.add(handlers::provide(Vec::<BlockStatsRow>::new()));

    let result = reader(mock.url()).get_block_stats().await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn rejected_query_propagates() {
    let mock = Mock::new();
    mock.add(handlers::failure(status::INTERNAL_SERVER_ERROR));

    let err = reader(mock.url()).get_staking_overview().await.unwrap_err();

    assert!(matches!(err, ReaderError::Rejected { query: QueryKind::StakingOverview, .. }));
}

#[derive(Row, Serialize)]
struct TruncatedRow {
    staking_entity: String,
}

#[tokio::test]
async fn short_rows_are_schema_mismatch() {
    let mock = Mock::new();
    mock.add(handlers::provide(vec![TruncatedRow { staking_entity: "Lido".to_owned() }]));

    let err = reader(mock.url()).get_staking_client_distribution().await.unwrap_err();

    assert!(matches!(
        err,
        ReaderError::SchemaMismatch { query: QueryKind::StakingClientDistribution, .. }
    ));
}

#[tokio::test]
async fn unreachable_store_is_unavailable() {
    // nothing listens on the discard port in the test environment
    let err = reader("http://127.0.0.1:9").get_client_info().await.unwrap_err();

    assert!(matches!(err, ReaderError::Unavailable { query: QueryKind::ClientInfo, .. }));
}

#[tokio::test]
async fn queries_read_from_their_catalog_table() {
    let mock = Mock::new();
    let recording = mock.add(handlers::record_ddl());

    let _ = reader(mock.url()).get_block_stats().await;

    let sql = recording.query().await;
    assert!(sql.contains(QueryKind::BlockStatsDaily.table()), "unexpected query: {sql}");
}
