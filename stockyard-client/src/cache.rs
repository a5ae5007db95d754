//! Injectable reference-data cache
//!
//! Cross-page lookup data (supplier list, product list, ...) is fetched once
//! and shared through this cache instead of ambient global state. Staleness
//! policy: manual invalidation only, no TTL - list pages invalidate their key
//! after a mutation.

use crate::error::{ClientError, ClientResult};
use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Warn when the cache grows past this many keys; reference data is a handful
/// of lookup tables, anything more suggests a key leak.
const CACHE_WARN_THRESHOLD: usize = 64;

/// Keyed cache for fetched reference data
///
/// Values are stored as JSON so one cache instance can hold heterogeneous
/// lookup tables. Pass the cache as an explicit dependency.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    entries: DashMap<String, Value>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, fetching and caching it on a miss
    ///
    /// The fetch closure only runs when the key is absent; concurrent callers
    /// of a missing key may race and both fetch, last write wins (acceptable
    /// for read-only lookup tables).
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, fetch: F) -> ClientResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        if let Some(entry) = self.entries.get(key) {
            return serde_json::from_value(entry.value().clone()).map_err(ClientError::Decode);
        }

        let fetched = fetch().await?;
        self.insert(key, &fetched)?;
        Ok(fetched)
    }

    /// Cached value for `key`, if present and decodable
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.entries.get(key)?;
        serde_json::from_value(entry.value().clone()).ok()
    }

    /// Store a value under `key`, replacing any previous one
    pub fn insert<T: Serialize>(&self, key: &str, value: &T) -> ClientResult<()> {
        self.entries
            .insert(key.to_string(), serde_json::to_value(value)?);
        if self.entries.len() > CACHE_WARN_THRESHOLD {
            tracing::warn!(
                cache_size = self.entries.len(),
                "Reference cache exceeds threshold, possible key leak"
            );
        }
        Ok(())
    }

    /// Drop the cached value for `key`; returns whether a value was present
    pub fn invalidate(&self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            tracing::debug!(key = %key, "Reference cache invalidated");
        }
        removed
    }

    /// Drop every cached value
    pub fn invalidate_all(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
