//! Search index interface.

use crate::query::{QueryDoc, SearchBody};
use async_trait::async_trait;
use catalog_core::CatalogResult;
use serde_json::Value;
use shaku::Interface;

/// Ranked documents returned by the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    /// Total number of matching documents, which may exceed `documents.len()`.
    pub total: u64,
    /// Document sources in rank order.
    pub documents: Vec<Value>,
}

impl SearchHits {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total: 0,
            documents: Vec::new(),
        }
    }

    #[must_use]
    pub fn single(document: Value) -> Self {
        Self {
            total: 1,
            documents: vec![document],
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Document search backend operating over named collections.
///
/// A missing document or missing collection is not an error: `get` returns
/// `None` and `search` returns no hits.
#[async_trait]
pub trait SearchIndex: Interface + Send + Sync {
    /// Fetches one document source by identifier.
    async fn get(&self, collection: &str, id: &str) -> CatalogResult<Option<Value>>;

    /// Runs a body query.
    async fn search(&self, collection: &str, body: &SearchBody) -> CatalogResult<SearchHits>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> CatalogResult<()>;

    /// Runs a translated query of either shape.
    async fn execute(&self, collection: &str, query: &QueryDoc) -> CatalogResult<SearchHits> {
        match query {
            QueryDoc::Get { id } => Ok(self
                .get(collection, id)
                .await?
                .map_or_else(SearchHits::empty, SearchHits::single)),
            QueryDoc::Search(body) => self.search(collection, body).await,
        }
    }
}
