use std::time::Duration;

use clickhouse::Client;
use hyper_tls::HttpsConnector;
use hyper_util::{
    client::legacy::Client as HyperClient,
    rt::{TokioExecutor, TokioTimer},
};

/// Idle time after which pooled connections are dropped and re-opened.
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(3600);

/// Build a `ClickHouse` client on top of a pooled hyper client.
///
/// Connections that sit idle in the pool for longer than `idle_timeout` are
/// closed, so long-lived servers do not reuse connections the store has
/// already dropped.
pub fn pooled_client(idle_timeout: Duration) -> Client {
    let connector = HttpsConnector::new();
    let http = HyperClient::builder(TokioExecutor::new())
        .pool_idle_timeout(idle_timeout)
        .pool_timer(TokioTimer::new())
        .build(connector);

    Client::with_http_client(http)
}
