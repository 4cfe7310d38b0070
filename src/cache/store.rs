//! In-memory cache store for API responses
//!
//! Provides a `CacheStore` that keeps serializable data in memory with
//! expiry timestamps, keyed by endpoint plus request parameters.

use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A single cached payload with its expiry bookkeeping
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached data, stored as decoded JSON
    payload: Value,
    /// When the data was cached
    cached_at: DateTime<Utc>,
    /// When the cache entry expires
    expires_at: DateTime<Utc>,
}

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was originally cached
    #[allow(dead_code)]
    pub cached_at: DateTime<Utc>,
    /// Whether the cache entry has expired
    pub is_expired: bool,
}

/// Manages reading and writing cached API responses
///
/// Entries are keyed by a string derived from the endpoint and its request
/// parameters. An entry older than its TTL is reported with
/// `is_expired = true` and callers treat it as absent, which triggers a
/// re-fetch. The store lives for the lifetime of the process only.
#[derive(Debug, Clone, Default)]
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
}

impl CacheStore {
    /// Creates an empty CacheStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes data to the cache with a specified TTL (time-to-live) in seconds
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the cache entry (e.g., "standings_PL")
    /// * `data` - The data to cache (must implement Serialize)
    /// * `ttl_secs` - How long the cache entry should be considered fresh
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if the data cannot be represented as JSON
    pub fn write<T: Serialize>(
        &mut self,
        key: &str,
        data: &T,
        ttl_secs: u64,
    ) -> Result<(), serde_json::Error> {
        let now = Utc::now();
        let entry = CacheEntry {
            payload: serde_json::to_value(data)?,
            cached_at: now,
            expires_at: now + Duration::seconds(ttl_secs as i64),
        };

        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    /// Reads data from the cache
    ///
    /// Returns `None` if the cache entry doesn't exist or cannot be decoded
    /// into the requested type. Returns `Some(CachedData)` with
    /// `is_expired = true` if the entry exists but has outlived its TTL.
    ///
    /// # Arguments
    /// * `key` - The cache key to read
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CachedData<T>> {
        let entry = self.entries.get(key)?;
        let data: T = serde_json::from_value(entry.payload.clone()).ok()?;

        let now = Utc::now();
        let is_expired = now > entry.expires_at;

        Some(CachedData {
            data,
            cached_at: entry.cached_at,
            is_expired,
        })
    }

    /// Removes an entry from the cache
    ///
    /// No-op if the key is not present.
    #[allow(dead_code)]
    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
