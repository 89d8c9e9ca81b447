//! Shared test doubles and fixtures for service tests.

#![allow(dead_code)]

use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, ResourceKind};
use catalog_resilience::RetryPolicy;
use catalog_search::{SearchBody, SearchHits, SearchIndex};
use catalog_service::{CacheStore, CatalogServices, ServiceSettings};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

pub const FILM_1: Uuid = Uuid::from_u128(0x0001);
pub const FILM_2: Uuid = Uuid::from_u128(0x0002);
pub const GENRE_1: Uuid = Uuid::from_u128(0x0101);
pub const PERSON_1: Uuid = Uuid::from_u128(0x0201);
pub const PERSON_2: Uuid = Uuid::from_u128(0x0202);

/// In-memory cache store with call counters, a failure switch and an
/// optional delay on every command.
#[derive(Default)]
pub struct MockCacheStore {
    scalars: Mutex<HashMap<String, String>>,
    lists: Mutex<HashMap<String, Vec<String>>>,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub closed: AtomicBool,
}

impl MockCacheStore {
    pub fn failing() -> Self {
        let cache = Self::default();
        cache.failing.store(true, Ordering::SeqCst);
        cache
    }

    /// Every command stalls for `delay` before answering.
    pub fn hanging(delay: Duration) -> Self {
        let cache = Self::default();
        *cache.delay.lock().unwrap() = Some(delay);
        cache
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.scalars.lock().unwrap().keys().cloned().collect();
        keys.extend(self.lists.lock().unwrap().keys().cloned());
        keys.sort();
        keys
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.scalars.lock().unwrap().insert(key.to_string(), value.to_string());
    }

    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.lists.lock().unwrap().get(key).cloned()
    }

    async fn check(&self) -> CatalogResult<()> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::cache_unavailable("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheStore for MockCacheStore {
    async fn get_raw(&self, key: &str) -> CatalogResult<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check().await?;
        Ok(self.scalars.lock().unwrap().get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: &str, _ttl: Duration) -> CatalogResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check().await?;
        self.put_raw(key, value);
        Ok(())
    }

    async fn get_list(&self, key: &str) -> CatalogResult<Option<Vec<String>>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check().await?;
        Ok(self.list(key))
    }

    async fn replace_list(&self, key: &str, values: &[String], _ttl: Duration) -> CatalogResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check().await?;
        self.lists
            .lock()
            .unwrap()
            .insert(key.to_string(), values.to_vec());
        Ok(())
    }

    async fn ping(&self) -> CatalogResult<()> {
        self.check().await
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// In-memory search index serving fixed documents per collection.
///
/// `search` ignores the query and answers every document of the collection
/// in insertion order; the received bodies are recorded for inspection.
#[derive(Default)]
pub struct MockSearchIndex {
    documents: Mutex<HashMap<String, Vec<Value>>>,
    failures: Mutex<VecDeque<CatalogError>>,
    delay: Mutex<Option<Duration>>,
    pub calls: AtomicUsize,
    pub bodies: Mutex<Vec<SearchBody>>,
}

impl MockSearchIndex {
    pub fn with_documents(kind: ResourceKind, documents: Vec<Value>) -> Self {
        let index = Self::default();
        index.insert(kind, documents);
        index
    }

    pub fn insert(&self, kind: ResourceKind, documents: Vec<Value>) {
        self.documents
            .lock()
            .unwrap()
            .entry(kind.collection().to_string())
            .or_default()
            .extend(documents);
    }

    /// Queues failures returned by the next calls, in order.
    pub fn fail_next(&self, errors: Vec<CatalogError>) {
        self.failures.lock().unwrap().extend(errors);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<SearchBody> {
        self.bodies.lock().unwrap().last().cloned()
    }

    async fn begin_call(&self) -> CatalogResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn collection(&self, collection: &str) -> Vec<Value> {
        self.documents
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl SearchIndex for MockSearchIndex {
    async fn get(&self, collection: &str, id: &str) -> CatalogResult<Option<Value>> {
        self.begin_call().await?;
        Ok(self
            .collection(collection)
            .into_iter()
            .find(|doc| doc["id"] == id))
    }

    async fn search(&self, collection: &str, body: &SearchBody) -> CatalogResult<SearchHits> {
        self.begin_call().await?;
        self.bodies.lock().unwrap().push(body.clone());
        let documents = self.collection(collection);
        Ok(SearchHits {
            total: documents.len() as u64,
            documents,
        })
    }

    async fn ping(&self) -> CatalogResult<()> {
        Ok(())
    }
}

pub fn film_doc(id: Uuid, title: &str, rating: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{} description", title),
        "imdb_rating": rating,
        "genre": [{ "id": GENRE_1, "name": "Action" }],
        "actors": [{ "id": PERSON_1, "name": "Keanu Reeves" }],
        "writers": [],
        "directors": [],
        "genres_names": "Action",
        "actors_names": ["Keanu Reeves"],
        "writers_names": null,
        "directors_names": []
    })
}

pub fn genre_doc(id: Uuid, name: &str) -> Value {
    json!({ "id": id, "name": name, "description": null })
}

pub fn person_doc(id: Uuid, full_name: &str, film_ids: &[Uuid]) -> Value {
    json!({
        "id": id,
        "full_name": full_name,
        "role": ["actor"],
        "film_ids": film_ids
    })
}

/// Settings with fast, deterministic retries.
pub fn test_settings() -> ServiceSettings {
    ServiceSettings {
        ttl: Duration::from_secs(300),
        cache_timeout: Duration::from_millis(200),
        backend_timeout: Duration::from_millis(200),
        retry: RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            multiplier: 2.0,
            jitter: false,
        },
    }
}

pub struct TestCatalog {
    pub cache: Arc<MockCacheStore>,
    pub index: Arc<MockSearchIndex>,
    pub services: CatalogServices,
}

impl TestCatalog {
    pub fn new(cache: MockCacheStore, index: MockSearchIndex) -> Self {
        let cache = Arc::new(cache);
        let index = Arc::new(index);
        let services = CatalogServices::new(cache.clone(), index.clone(), &test_settings());
        Self {
            cache,
            index,
            services,
        }
    }
}
