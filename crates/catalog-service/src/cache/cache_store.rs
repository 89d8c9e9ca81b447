//! Cache store trait for the cache-aside read path.

use async_trait::async_trait;
use catalog_core::CatalogResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shaku::Interface;
use std::time::Duration;

/// Key/value store with TTL holding scalar and ordered-list entries.
///
/// Values are JSON strings so the trait stays dyn-compatible; [`CacheExt`]
/// layers typed access on top.
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Get a scalar entry.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>>;

    /// Set a scalar entry with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()>;

    /// Get an ordered-list entry.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_list(&self, key: &str) -> CatalogResult<Option<Vec<String>>>;

    /// Atomically replace an ordered-list entry and set its TTL.
    async fn replace_list(&self, key: &str, values: &[String], ttl: Duration) -> CatalogResult<()>;

    /// Check that the store is reachable.
    async fn ping(&self) -> CatalogResult<()>;

    /// Release pooled connections.
    async fn close(&self);

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Typed access to a [`CacheStore`].
#[async_trait]
pub trait CacheExt: CacheStore {
    /// Get a typed scalar entry.
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> CatalogResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Set a typed scalar entry.
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> CatalogResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }

    /// Get a typed list entry, preserving order.
    async fn get_all<T: DeserializeOwned + Send>(&self, key: &str) -> CatalogResult<Option<Vec<T>>> {
        match self.get_list(key).await? {
            Some(items) => {
                let values = items
                    .iter()
                    .map(|json| serde_json::from_str(json))
                    .collect::<Result<Vec<T>, _>>()?;
                Ok(Some(values))
            }
            None => Ok(None),
        }
    }

    /// Replace a typed list entry, preserving order.
    async fn set_all<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        values: &[T],
        ttl: Duration,
    ) -> CatalogResult<()> {
        let items = values
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        self.replace_list(key, &items, ttl).await
    }
}

impl<T: CacheStore + ?Sized> CacheExt for T {}
