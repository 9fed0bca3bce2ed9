//! Helper utilities to launch the ethmetrics API server.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use api::{self, ApiState};
use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use clickhouse_lib::ClickhouseReader;
use eyre::Result;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info};

mod shutdown;

/// Version prefix for all API routes.
pub const API_VERSION: &str = "v1";

/// Whether browsers served from `origin` may call the API.
///
/// Local dev servers on any port are always accepted.
fn origin_allowed(allowed: &[String], origin: &str) -> bool {
    allowed.iter().any(|o| o == origin)
        || origin.starts_with("http://localhost:")
        || origin.starts_with("http://127.0.0.1:")
}

/// Build the API router with CORS and tracing layers.
pub fn router(state: ApiState, allowed_origins: Vec<String>) -> Router {
    let allowed = Arc::new(allowed_origins);
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin.to_str().is_ok_and(|origin| origin_allowed(&allowed, origin))
        }))
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .expose_headers(Any);
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(api::routes::health))
        .nest_service(&format!("/{API_VERSION}"), api::router(state))
        .layer(cors)
        .layer(trace)
}

/// Run the API server on the given address until SIGINT or SIGTERM.
pub async fn run(
    addr: SocketAddr,
    client: ClickhouseReader,
    cache_ttl: Duration,
    allowed_origins: Vec<String>,
) -> Result<()> {
    let state = ApiState::new(client, cache_ttl);
    let app = router(state, allowed_origins);

    info!(cache_ttl_secs = cache_ttl.as_secs(), "Starting API server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown::signal())
        .await?;
    info!("API server stopped");
    Ok(())
}
