//! API server binary

use std::net::SocketAddr;

use clap::Parser;
use clickhouse_lib::ClickhouseReader;
use config::Opts;
use dotenvy::dotenv;
use server::run;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        db = %opts.clickhouse.db,
        pool_idle_timeout_secs = opts.cache.pool_idle_timeout_secs,
        "Connecting to ClickHouse at {}",
        opts.clickhouse.url
    );
    let client = ClickhouseReader::new(
        opts.clickhouse.url,
        opts.clickhouse.db,
        opts.clickhouse.username,
        opts.clickhouse.password,
        opts.cache.pool_idle_timeout(),
    );

    let addr: SocketAddr = format!("{}:{}", opts.api.host, opts.api.port).parse()?;
    run(addr, client, opts.cache.cache_ttl(), opts.api.allowed_origins).await
}
