//! Response cache for football-data.org API calls
//!
//! This module provides an in-memory store that keeps decoded API responses
//! with configurable TTL (time-to-live) values. Nothing is persisted across
//! runs; the cache exists to keep repeat requests under the API's per-minute
//! call quota, not for performance.

mod store;

pub use store::{CacheStore, CachedData};
