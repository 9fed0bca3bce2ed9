//! Ethmetrics configuration
use std::time::Duration;

use clap::Parser;
use url::Url;

/// Origins allowed to call the API by default (comma separated).
pub const DEFAULT_ALLOWED_ORIGINS: &str =
    "https://ethmetrics.twigblock.com,https://dashboard.twigblock.com";

/// Clickhouse database configuration options
#[derive(Debug, Clone, Parser)]
pub struct ClickhouseOpts {
    /// Clickhouse URL
    #[clap(long, env = "CLICKHOUSE_URL")]
    pub url: Url,
    /// Clickhouse database
    #[clap(long, env = "CLICKHOUSE_DB")]
    pub db: String,
    /// Clickhouse username
    #[clap(long, env = "CLICKHOUSE_USERNAME")]
    pub username: String,
    /// Clickhouse password
    #[clap(long, env = "CLICKHOUSE_PASSWORD")]
    pub password: String,
}

/// API server configuration options
#[derive(Debug, Clone, Parser)]
pub struct ApiOpts {
    /// Interface to bind the API server to
    #[clap(long = "api-host", env = "API_HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Port to bind the API server to
    #[clap(long = "api-port", env = "API_PORT", default_value = "3000")]
    pub port: u16,
    /// Origins allowed by CORS in addition to localhost
    #[clap(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = DEFAULT_ALLOWED_ORIGINS
    )]
    pub allowed_origins: Vec<String>,
}

/// Query cache and connection pool options
#[derive(Debug, Clone, Parser)]
pub struct CacheOpts {
    /// How long a query result is served from cache, in seconds
    #[clap(long, env = "CACHE_TTL_SECS", default_value = "86400")]
    pub cache_ttl_secs: u64,
    /// Idle time after which pooled store connections are recycled, in seconds
    #[clap(long, env = "POOL_IDLE_TIMEOUT_SECS", default_value = "3600")]
    pub pool_idle_timeout_secs: u64,
}

impl CacheOpts {
    /// Cache time-to-live as a [`Duration`].
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Connection pool idle timeout as a [`Duration`].
    pub const fn pool_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.pool_idle_timeout_secs)
    }
}

/// CLI options for the ethmetrics API server
#[derive(Debug, Clone, Parser)]
pub struct Opts {
    /// Clickhouse database configuration
    #[clap(flatten)]
    pub clickhouse: ClickhouseOpts,

    /// API server configuration
    #[clap(flatten)]
    pub api: ApiOpts,

    /// Cache configuration
    #[clap(flatten)]
    pub cache: CacheOpts,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Opts {
        let mut args = vec![
            "api-server",
            "--url",
            "http://localhost:8123",
            "--db",
            "eth",
            "--username",
            "reader",
            "--password",
            "secret",
        ];
        args.extend_from_slice(extra);
        Opts::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Opts::command().debug_assert()
    }

    #[test]
    fn defaults_match_observed_deployment() {
        let opts = parse(&[]);
        assert_eq!(opts.cache.cache_ttl(), Duration::from_secs(86_400));
        assert_eq!(opts.cache.pool_idle_timeout(), Duration::from_secs(3_600));
        assert_eq!(opts.api.port, 3000);
        assert_eq!(opts.api.allowed_origins.join(","), DEFAULT_ALLOWED_ORIGINS);
    }

    #[test]
    fn allowed_origins_are_comma_separated() {
        let opts = parse(&["--allowed-origins", "https://a.example,https://b.example"]);
        assert_eq!(opts.api.allowed_origins, vec!["https://a.example", "https://b.example"]);
    }
}
