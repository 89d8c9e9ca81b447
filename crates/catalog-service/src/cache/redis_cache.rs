//! Redis-based cache store.

use super::CacheStore;
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult};
use deadpool_redis::Pool;
use redis::AsyncCommands;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-based cache store.
#[derive(Component)]
#[shaku(interface = CacheStore)]
pub struct RedisCacheStore {
    /// Redis connection pool; `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheStore {
    /// Create a new Redis cache store.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache store (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Creates the connection pool for `url`.
    pub fn create_pool(url: &str, max_size: usize) -> CatalogResult<Pool> {
        let mut redis_cfg = deadpool_redis::Config::from_url(url);
        redis_cfg.pool = Some(deadpool_redis::PoolConfig::new(max_size));
        redis_cfg
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .map_err(|e| CatalogError::Configuration(format!("Failed to create Redis pool: {}", e)))
    }

    async fn get_conn(&self) -> CatalogResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                CatalogError::cache_unavailable(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(CatalogError::cache_unavailable("Cache is disabled")),
        }
    }
}

fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            CatalogError::cache_unavailable(format!("Failed to get key '{}': {}", key, e))
        })?;

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CatalogResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl_secs(ttl);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
            CatalogError::cache_unavailable(format!("Failed to set key '{}': {}", key, e))
        })?;

        debug!(key, ttl_secs, "Cached scalar entry");
        Ok(())
    }

    async fn get_list(&self, key: &str) -> CatalogResult<Option<Vec<String>>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let items: Vec<String> = conn.lrange(key, 0, -1).await.map_err(|e| {
            CatalogError::cache_unavailable(format!("Failed to read list '{}': {}", key, e))
        })?;

        // LRANGE answers an empty list for a missing key; empty lists are never stored.
        Ok(if items.is_empty() { None } else { Some(items) })
    }

    async fn replace_list(&self, key: &str, values: &[String], ttl: Duration) -> CatalogResult<()> {
        if !self.is_enabled() || values.is_empty() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl_secs(ttl);
        let expiry = i64::try_from(ttl_secs).unwrap_or(i64::MAX);

        let _: () = redis::pipe()
            .atomic()
            .del(key)
            .ignore()
            .rpush(key, values)
            .ignore()
            .expire(key, expiry)
            .ignore()
            .query_async(&mut *conn)
            .await
            .map_err(|e| {
                CatalogError::cache_unavailable(format!("Failed to replace list '{}': {}", key, e))
            })?;

        debug!(key, ttl_secs, len = values.len(), "Cached list entry");
        Ok(())
    }

    async fn ping(&self) -> CatalogResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| CatalogError::cache_unavailable(format!("PING failed: {}", e)))?;
        Ok(())
    }

    async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close();
            info!("Redis pool closed");
        }
    }
}
