//! The query client: cache storage, freshness and invalidation.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::time::Instant;
use tracing::debug;

use crate::key::QueryKey;

/// Default freshness window: data is stale as soon as it is stored, so every
/// fetch goes to the server unless a longer window is configured.
pub const DEFAULT_STALE_TIME: Duration = Duration::ZERO;

#[derive(Debug)]
struct CacheEntry {
    data: Value,
    updated_at: Instant,
    invalidated: bool,
}

impl CacheEntry {
    fn is_fresh(&self, stale_time: Duration) -> bool {
        !self.invalidated && self.updated_at.elapsed() < stale_time
    }
}

/// Shared, cloneable cache of query results.
///
/// Clones share the same storage. The internal lock is only held for map
/// operations, never across a fetcher's `.await`, so two concurrent fetches of
/// the same stale key both hit the server.
#[derive(Clone)]
pub struct QueryClient {
    entries: Arc<Mutex<HashMap<QueryKey, CacheEntry>>>,
    stale_time: Duration,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryClient {
    /// Creates an empty client using [`DEFAULT_STALE_TIME`].
    pub fn new() -> Self {
        Self::with_stale_time(DEFAULT_STALE_TIME)
    }

    /// Creates an empty client whose entries stay fresh for `stale_time`.
    pub fn with_stale_time(stale_time: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            stale_time,
        }
    }

    /// Returns the configured freshness window.
    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    /// Returns cached data for `key` if it is fresh; otherwise runs `fetcher`,
    /// stores its result and returns it.
    ///
    /// Fetch errors are returned as-is and leave any previous entry untouched.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error, or a JSON error converted into `E` if the
    /// value cannot be stored or read back as `T`.
    pub async fn fetch_query<T, E, F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<serde_json::Error>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(data) = self.fresh_data(key) {
            debug!(%key, "query cache hit");
            return Ok(serde_json::from_value(data)?);
        }

        debug!(%key, "query cache miss, fetching");
        let value = fetcher().await?;
        self.set_query_data(key, &value)?;
        Ok(value)
    }

    /// Runs a mutation and, if it succeeds, invalidates every key in `invalidates`.
    pub async fn mutate<T, E, F, Fut>(&self, invalidates: &[QueryKey], mutation: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let result = mutation().await?;
        for key in invalidates {
            self.invalidate_queries(key);
        }
        Ok(result)
    }

    /// Returns the cached data for `key` regardless of freshness.
    pub fn get_query_data<T: DeserializeOwned>(
        &self,
        key: &QueryKey,
    ) -> Result<Option<T>, serde_json::Error> {
        let data = self.lock().get(key).map(|entry| entry.data.clone());
        data.map(serde_json::from_value).transpose()
    }

    /// Stores `data` under `key` as a fresh entry.
    pub fn set_query_data<T: Serialize + ?Sized>(
        &self,
        key: &QueryKey,
        data: &T,
    ) -> Result<(), serde_json::Error> {
        let data = serde_json::to_value(data)?;
        self.lock().insert(
            key.clone(),
            CacheEntry {
                data,
                updated_at: Instant::now(),
                invalidated: false,
            },
        );
        Ok(())
    }

    /// Marks every entry whose key starts with `prefix` as stale.
    ///
    /// Data stays readable through [`get_query_data`](Self::get_query_data)
    /// until it is refetched. Returns how many entries were marked.
    pub fn invalidate_queries(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.lock();
        let mut count = 0;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                count += 1;
            }
        }
        debug!(%prefix, count, "invalidated queries");
        count
    }

    /// Drops every entry whose key starts with `prefix`. Returns how many were removed.
    pub fn remove_queries(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    /// Returns true if `key` has no entry or its entry is stale.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.lock()
            .get(key)
            .map_or(true, |entry| !entry.is_fresh(self.stale_time))
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops all entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn fresh_data(&self, key: &QueryKey) -> Option<Value> {
        self.lock()
            .get(key)
            .filter(|entry| entry.is_fresh(self.stale_time))
            .map(|entry| entry.data.clone())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        // Entries are plain data; a panic mid-insert cannot leave them inconsistent.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryClient")
            .field("entries", &self.len())
            .field("stale_time", &self.stale_time)
            .finish()
    }
}
