//! Caching infrastructure for the service layer.
//!
//! This module provides the cache store abstraction, its Redis
//! implementation, and canonical key construction.

mod cache_keys;
mod cache_store;
mod redis_cache;

pub use cache_keys::{CacheKeyBuilder, CACHE_PREFIX};
pub use cache_store::{CacheExt, CacheStore};
pub use redis_cache::{RedisCacheStore, RedisCacheStoreParameters};
