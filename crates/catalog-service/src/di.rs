//! Dependency injection module using Shaku.
//!
//! `CatalogModule` holds the two infrastructure components (the Redis cache
//! store and the Elasticsearch index); [`CatalogServices`] resolves them and
//! builds one [`ResourceService`] per record kind.

use crate::cache::{CacheStore, RedisCacheStore, RedisCacheStoreParameters};
use crate::resource_service::{ResourceService, ServiceSettings};
use catalog_config::{AppConfig, RedisConfig};
use catalog_core::{CatalogResult, Film, Genre, Lookup, Person, PersonId};
use catalog_search::{ElasticSearchIndex, ElasticSearchIndexParameters, Paging, SearchIndex};
use deadpool_redis::Pool;
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::{info, warn};

module! {
    pub CatalogModule {
        components = [
            RedisCacheStore,
            ElasticSearchIndex,
        ],
        providers = [],
    }
}

/// Builds the catalog module from configuration.
///
/// No connection is opened here: the Redis pool connects lazily and the
/// HTTP client on first request.
pub fn build_catalog_module(config: &AppConfig) -> CatalogResult<Arc<CatalogModule>> {
    let cache_pool = create_cache_pool(&config.redis)?;
    let client = ElasticSearchIndex::build_client(&config.search)?;

    let module = CatalogModule::builder()
        .with_component_parameters::<RedisCacheStore>(RedisCacheStoreParameters {
            pool: cache_pool,
        })
        .with_component_parameters::<ElasticSearchIndex>(ElasticSearchIndexParameters {
            client,
            base_url: config.search.url.trim_end_matches('/').to_string(),
        })
        .build();

    Ok(Arc::new(module))
}

fn create_cache_pool(redis_config: &RedisConfig) -> CatalogResult<Option<Arc<Pool>>> {
    if !redis_config.enabled {
        info!("Redis disabled, caching is off");
        return Ok(None);
    }

    let max_size = usize::try_from(redis_config.pool_size).unwrap_or(usize::MAX);
    let pool = RedisCacheStore::create_pool(&redis_config.url, max_size)?;
    Ok(Some(Arc::new(pool)))
}

/// Trait for resolving infrastructure components from a module.
pub trait InfrastructureResolver {
    /// Resolves the cache store from the module.
    fn cache(&self) -> Arc<dyn CacheStore>;

    /// Resolves the search index from the module.
    fn search_index(&self) -> Arc<dyn SearchIndex>;
}

impl InfrastructureResolver for CatalogModule {
    fn cache(&self) -> Arc<dyn CacheStore> {
        self.resolve()
    }

    fn search_index(&self) -> Arc<dyn SearchIndex> {
        self.resolve()
    }
}

/// The three resource services plus the shared infrastructure they use.
pub struct CatalogServices {
    pub films: Arc<ResourceService<Film>>,
    pub genres: Arc<ResourceService<Genre>>,
    pub persons: Arc<ResourceService<Person>>,
    cache: Arc<dyn CacheStore>,
    index: Arc<dyn SearchIndex>,
}

impl CatalogServices {
    /// Builds the services over explicit infrastructure.
    pub fn new(
        cache: Arc<dyn CacheStore>,
        index: Arc<dyn SearchIndex>,
        settings: &ServiceSettings,
    ) -> Self {
        Self {
            films: Arc::new(ResourceService::new(cache.clone(), index.clone(), settings.clone())),
            genres: Arc::new(ResourceService::new(cache.clone(), index.clone(), settings.clone())),
            persons: Arc::new(ResourceService::new(cache.clone(), index.clone(), settings.clone())),
            cache,
            index,
        }
    }

    /// Builds the services from any module providing the infrastructure.
    pub fn from_module<M: InfrastructureResolver>(module: &M, settings: &ServiceSettings) -> Self {
        Self::new(module.cache(), module.search_index(), settings)
    }

    /// Startup hook: wires the module and checks the backends.
    ///
    /// An unreachable search index fails startup; an unreachable cache only
    /// logs, since every request degrades to the index without it.
    pub async fn connect(config: &AppConfig) -> CatalogResult<Self> {
        let module = build_catalog_module(config)?;
        let services = Self::from_module(module.as_ref(), &ServiceSettings::from_config(config));

        services.index.ping().await?;
        info!(url = %config.search.url, "Search index reachable");

        if services.cache.is_enabled() {
            match services.cache.ping().await {
                Ok(()) => info!("Cache store reachable"),
                Err(e) => warn!(error = %e, "Cache store unreachable, serving from index only"),
            }
        }

        Ok(services)
    }

    /// Shutdown hook: releases pooled cache connections.
    pub async fn shutdown(&self) {
        self.cache.close().await;
        info!("Catalog services shut down");
    }

    /// Films credited to a person, through the person and film caches.
    pub async fn films_by_person(
        &self,
        person_id: PersonId,
        page: i64,
        size: i64,
    ) -> CatalogResult<Lookup<Vec<Film>>> {
        Paging::new(page, size).validate()?;

        let person = match self.persons.get_by_id(person_id).await? {
            Lookup::Found(person) => person,
            Lookup::NotFound => return Ok(Lookup::NotFound),
        };
        if person.film_ids.is_empty() {
            return Ok(Lookup::NotFound);
        }

        self.films.get_by_ids(&person.film_ids, page, size).await
    }

    /// Readiness of both backends.
    pub async fn ping(&self) -> CatalogResult<()> {
        self.index.ping().await?;
        self.cache.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_with_cache_disabled() {
        let mut config = AppConfig::default();
        config.redis.enabled = false;

        let module = build_catalog_module(&config).unwrap();
        assert!(!module.cache().is_enabled());
    }

    #[tokio::test]
    async fn test_module_with_lazy_redis_pool() {
        let module = build_catalog_module(&AppConfig::default()).unwrap();
        let cache = module.cache();
        assert!(cache.is_enabled());
        cache.close().await;
    }
}
