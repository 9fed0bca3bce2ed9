use clickhouse::error::Error as ClickhouseError;
use thiserror::Error;

use crate::QueryKind;

/// Server-side error names that mean the query referenced a column the
/// table does not have.
const SCHEMA_ERROR_MARKERS: [&str; 3] =
    ["UNKNOWN_IDENTIFIER", "NO_SUCH_COLUMN_IN_TABLE", "Missing columns"];

/// Error returned by every [`ClickhouseReader`](crate::ClickhouseReader) query.
///
/// An empty result set is not an error: queries return an empty `Vec`.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The store could not be reached or did not answer in time.
    #[error("data source unavailable for {query}: {source}")]
    Unavailable {
        /// Query that was running
        query: QueryKind,
        /// Underlying client error
        #[source]
        source: ClickhouseError,
    },
    /// The store answered but rejected the query.
    #[error("data source rejected {query}: {source}")]
    Rejected {
        /// Query that was running
        query: QueryKind,
        /// Underlying client error
        #[source]
        source: ClickhouseError,
    },
    /// The result is missing a column, or rows do not decode into the
    /// expected schema.
    #[error("schema mismatch in {query}: {source}")]
    SchemaMismatch {
        /// Query that was running
        query: QueryKind,
        /// Underlying client error
        #[source]
        source: ClickhouseError,
    },
}

impl ReaderError {
    /// Sort a raw client error into the taxonomy.
    pub fn classify(query: QueryKind, source: ClickhouseError) -> Self {
        if is_unavailable(&source) {
            Self::Unavailable { query, source }
        } else if is_schema_mismatch(&source) {
            Self::SchemaMismatch { query, source }
        } else {
            Self::Rejected { query, source }
        }
    }

    /// Query the error originated from.
    pub const fn query(&self) -> QueryKind {
        match self {
            Self::Unavailable { query, .. }
            | Self::Rejected { query, .. }
            | Self::SchemaMismatch { query, .. } => *query,
        }
    }
}

const fn is_unavailable(err: &ClickhouseError) -> bool {
    matches!(err, ClickhouseError::Network(_) | ClickhouseError::TimedOut)
}

fn is_schema_mismatch(err: &ClickhouseError) -> bool {
    match err {
        ClickhouseError::NotEnoughData
        | ClickhouseError::InvalidUtf8Encoding(_)
        | ClickhouseError::InvalidTagEncoding(_)
        | ClickhouseError::SequenceMustHaveLength
        | ClickhouseError::DeserializeAnyNotSupported
        | ClickhouseError::Custom(_) => true,
        ClickhouseError::BadResponse(reason) => {
            SCHEMA_ERROR_MARKERS.iter().any(|marker| reason.contains(marker))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_are_unavailable() {
        let err = ReaderError::classify(QueryKind::ClientInfo, ClickhouseError::TimedOut);
        assert!(matches!(err, ReaderError::Unavailable { query: QueryKind::ClientInfo, .. }));
    }

    #[test]
    fn short_rows_are_schema_mismatch() {
        let err = ReaderError::classify(QueryKind::BlockStatsDaily, ClickhouseError::NotEnoughData);
        assert!(matches!(err, ReaderError::SchemaMismatch { .. }));
        assert_eq!(err.query(), QueryKind::BlockStatsDaily);
    }

    #[test]
    fn unknown_identifier_is_schema_mismatch() {
        let reason = "Code: 47. DB::Exception: Missing columns: 'apr' (UNKNOWN_IDENTIFIER)";
        let err = ReaderError::classify(
            QueryKind::ClientPerformance,
            ClickhouseError::BadResponse(reason.to_owned()),
        );
        assert!(matches!(err, ReaderError::SchemaMismatch { .. }));
    }

    #[test]
    fn other_bad_responses_are_rejected() {
        let reason = "Code: 60. DB::Exception: Table eth.ui_client_info does not exist";
        let err = ReaderError::classify(
            QueryKind::ClientInfo,
            ClickhouseError::BadResponse(reason.to_owned()),
        );
        assert!(matches!(err, ReaderError::Rejected { .. }));
        assert!(err.to_string().starts_with("data source rejected client_info"));
    }
}
