//! Generic cache-aside service over one record kind.

use crate::cache::{CacheExt, CacheKeyBuilder, CacheStore};
use catalog_config::AppConfig;
use catalog_core::{CatalogError, CatalogResult, Lookup, Record};
use catalog_resilience::{with_timeout, RetryPolicy};
use catalog_search::{
    ListingParams, Paging, QueryDoc, QueryParams, QueryTranslator, SearchHits, SearchIndex,
};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Tunables shared by every resource service.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Lifetime of populated cache entries.
    pub ttl: Duration,
    /// Bound for a single cache command.
    pub cache_timeout: Duration,
    /// Bound for a single backend attempt.
    pub backend_timeout: Duration,
    /// Retry policy for transient backend failures.
    pub retry: RetryPolicy,
}

impl ServiceSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            ttl: config.cache.ttl(),
            cache_timeout: config.redis.op_timeout(),
            backend_timeout: config.search.request_timeout(),
            retry: RetryPolicy::from(&config.retry),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// Outcome of a cache read.
enum CacheRead<T> {
    Hit(T),
    /// Nothing usable cached; the result may be written back.
    Miss,
    /// The store failed; skip write-back for this request.
    Unavailable,
}

/// Read-through service for records of type `R`.
pub struct ResourceService<R: Record> {
    cache: Arc<dyn CacheStore>,
    index: Arc<dyn SearchIndex>,
    settings: ServiceSettings,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> ResourceService<R> {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        index: Arc<dyn SearchIndex>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            cache,
            index,
            settings,
            _record: PhantomData,
        }
    }

    /// Fetches one record by identifier.
    pub async fn get_by_id(&self, id: R::Id) -> CatalogResult<Lookup<R>> {
        let params = QueryParams::ById { id: id.into() };
        let query = QueryTranslator::translate(R::KIND, &params)?;
        let key = CacheKeyBuilder::for_query(R::KIND, &params);

        let writable = match self.read_cache(&key, self.cache.get::<R>(&key)).await {
            CacheRead::Hit(record) => return Ok(Lookup::Found(record)),
            CacheRead::Miss => true,
            CacheRead::Unavailable => false,
        };

        let hits = self.query_backend(&query).await?;
        let Some(record) = decode_hits::<R>(hits)?.into_iter().next() else {
            debug!(kind = %R::KIND, %id, "No document");
            return Ok(Lookup::NotFound);
        };

        if writable {
            self.write_cache(&key, self.cache.set(&key, &record, self.settings.ttl))
                .await;
        }
        Ok(Lookup::Found(record))
    }

    /// Fetches a page of the records whose identifiers are in `ids`.
    pub async fn get_by_ids(
        &self,
        ids: &[R::Id],
        page: i64,
        size: i64,
    ) -> CatalogResult<Lookup<Vec<R>>> {
        let params = QueryParams::ByIdSet {
            ids: ids.iter().map(|id| (*id).into()).collect(),
            paging: Paging::new(page, size),
        };
        self.fetch_list(params).await
    }

    /// Relevance-ranked keyword search.
    pub async fn search(&self, term: &str, page: i64, size: i64) -> CatalogResult<Lookup<Vec<R>>> {
        let params = QueryParams::Search {
            term: term.to_string(),
            paging: Paging::new(page, size),
        };
        self.fetch_list(params).await
    }

    /// Sorted, filtered listing with an optional relevance term.
    pub async fn list(&self, listing: ListingParams) -> CatalogResult<Lookup<Vec<R>>> {
        self.fetch_list(QueryParams::Listing(listing)).await
    }

    async fn fetch_list(&self, params: QueryParams) -> CatalogResult<Lookup<Vec<R>>> {
        let query = QueryTranslator::translate(R::KIND, &params)?;
        let key = CacheKeyBuilder::for_query(R::KIND, &params);

        let writable = match self.read_cache(&key, self.cache.get_all::<R>(&key)).await {
            CacheRead::Hit(records) => return Ok(Lookup::Found(records)),
            CacheRead::Miss => true,
            CacheRead::Unavailable => false,
        };

        let hits = self.query_backend(&query).await?;
        let total = hits.total;
        let records = decode_hits::<R>(hits)?;
        debug!(kind = %R::KIND, total, returned = records.len(), "Index answered");
        if records.is_empty() {
            debug!(kind = %R::KIND, operation = %params.operation(), "No documents");
            return Ok(Lookup::NotFound);
        }

        if writable {
            self.write_cache(&key, self.cache.set_all(&key, records.as_slice(), self.settings.ttl))
                .await;
        }
        Ok(Lookup::Found(records))
    }

    async fn read_cache<T>(
        &self,
        key: &str,
        read: impl std::future::Future<Output = CatalogResult<Option<T>>>,
    ) -> CacheRead<T> {
        match with_timeout(self.settings.cache_timeout, "cache read", read).await {
            Ok(Some(value)) => {
                debug!(key, "Cache hit");
                CacheRead::Hit(value)
            }
            Ok(None) => {
                debug!(key, "Cache miss");
                CacheRead::Miss
            }
            Err(CatalogError::Serialization(message)) => {
                warn!(key, error = %message, "Undecodable cache entry, treating as miss");
                CacheRead::Miss
            }
            Err(e) => {
                warn!(key, error = %e, "Cache unavailable, falling back to index");
                CacheRead::Unavailable
            }
        }
    }

    async fn write_cache(
        &self,
        key: &str,
        write: impl std::future::Future<Output = CatalogResult<()>>,
    ) {
        if let Err(e) = with_timeout(self.settings.cache_timeout, "cache write", write).await {
            warn!(key, error = %e, "Failed to populate cache");
        }
    }

    async fn query_backend(&self, query: &QueryDoc) -> CatalogResult<SearchHits> {
        let collection = R::KIND.collection();
        let timeout = self.settings.backend_timeout;

        self.settings
            .retry
            .execute_if(
                || with_timeout(timeout, "index query", self.index.execute(collection, query)),
                CatalogError::is_retriable,
            )
            .await
            .map_err(|e| {
                if e.is_retriable() {
                    error!(collection, error = %e, "Search backend unavailable");
                }
                e.into_backend_failure()
            })
    }
}

fn decode_hits<R: Record>(hits: SearchHits) -> CatalogResult<Vec<R>> {
    hits.documents
        .into_iter()
        .map(serde_json::from_value::<R>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            CatalogError::BackendRejected(format!("Undecodable {} document: {}", R::KIND, e))
                .into_backend_failure()
        })
}
