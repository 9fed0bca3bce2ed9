//! Common helper functions used across API endpoints

use api_types::ErrorResponse;
use clickhouse_lib::{ReaderError, unix_to_rfc3339};

/// Log a reader failure and map it to the HTTP problem it surfaces as.
pub fn reader_error(err: ReaderError) -> ErrorResponse {
    tracing::error!(query = %err.query(), error = %err, "Query failed");
    match err {
        ReaderError::Unavailable { .. } => ErrorResponse::unavailable(),
        ReaderError::Rejected { .. } => ErrorResponse::database_error(),
        ReaderError::SchemaMismatch { query, .. } => ErrorResponse::schema_mismatch(format!(
            "Result of {query} does not match the expected columns"
        )),
    }
}

/// Format a unix timestamp for a "last updated" caption, `None` when unknown.
pub fn last_updated(secs: u64) -> Option<String> {
    unix_to_rfc3339(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use clickhouse::error::Error as ClickhouseError;
    use clickhouse_lib::QueryKind;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        let unavailable = reader_error(ReaderError::classify(
            QueryKind::ClientInfo,
            ClickhouseError::TimedOut,
        ));
        assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(unavailable.r#type, "data-source-unavailable");

        let rejected = reader_error(ReaderError::classify(
            QueryKind::ClientInfo,
            ClickhouseError::BadResponse("Code: 60. Table does not exist".to_owned()),
        ));
        assert_eq!(rejected.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(rejected.r#type, "database-error");

        let mismatch = reader_error(ReaderError::classify(
            QueryKind::BlockStatsDaily,
            ClickhouseError::NotEnoughData,
        ));
        assert_eq!(mismatch.r#type, "schema-mismatch");
        assert!(mismatch.detail.contains("block_stats_daily"));
    }

    #[test]
    fn unknown_timestamp_has_no_caption() {
        assert_eq!(last_updated(0), None);
        assert_eq!(last_updated(86_400).as_deref(), Some("1970-01-02T00:00:00+00:00"));
    }
}
