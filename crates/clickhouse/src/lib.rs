//! Read-only `ClickHouse` access for the ethmetrics dashboard.
//!
//! Exposes the fixed query catalog ([`QueryKind`]), the row types each query
//! returns, and the error taxonomy used by everything downstream.

/// Timestamp conversion helpers
pub mod conversions;
/// Reader error taxonomy
pub mod error;
/// Pooled HTTP client construction
pub mod http;
/// Row models returned by the reader
pub mod models;
/// Query catalog identities
pub mod query;
/// Read-only query client
pub mod reader;

pub use conversions::*;
pub use error::ReaderError;
pub use http::{DEFAULT_POOL_IDLE_TIMEOUT, pooled_client};
pub use models::*;
pub use query::QueryKind;
pub use reader::ClickhouseReader;
