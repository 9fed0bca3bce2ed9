//! Process-wide cache of query results with a fixed time-to-live.

use std::{any::Any, future::Future, sync::Arc, time::Duration};

use clickhouse_lib::{QueryKind, ReaderError};
use dashmap::DashMap;
use tokio::{sync::Mutex, time::Instant};
use tracing::{debug, warn};

/// Default time-to-live of a cached query result (24 hours).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(86_400);

type Table = Arc<dyn Any + Send + Sync>;

struct CachedTable {
    table: Table,
    fetched_at: Instant,
}

/// Query result cache keyed by [`QueryKind`].
///
/// Entries expire purely by age, checked on read. There is no explicit
/// invalidation. Refreshes of the same key are serialised, so within one TTL
/// window the store is hit at most once per query. Failed fetches are never
/// stored.
pub struct QueryCache {
    ttl: Duration,
    entries: DashMap<QueryKind, Arc<Mutex<Option<CachedTable>>>>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl QueryCache {
    /// Create an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: DashMap::new() }
    }

    /// Return the cached table for `kind`, or run `fetch` and cache its rows
    /// when the entry is missing or older than the TTL.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        kind: QueryKind,
        fetch: F,
    ) -> Result<Arc<Vec<T>>, ReaderError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, ReaderError>>,
    {
        let slot = Arc::clone(self.entries.entry(kind).or_default().value());
        let mut entry = slot.lock().await;

        if let Some(cached) = entry.as_ref() {
            let age = cached.fetched_at.elapsed();
            if age < self.ttl {
                match Arc::clone(&cached.table).downcast::<Vec<T>>() {
                    Ok(table) => {
                        debug!(query = %kind, age_secs = age.as_secs(), "Query cache hit");
                        return Ok(table);
                    }
                    Err(_) => warn!(query = %kind, "Cached table has unexpected type, refetching"),
                }
            }
        }

        let table = Arc::new(fetch().await?);
        let cached: Table = Arc::clone(&table) as Table;
        *entry = Some(CachedTable { table: cached, fetched_at: Instant::now() });
        debug!(query = %kind, rows = table.len(), "Query cache refreshed");
        Ok(table)
    }
}
