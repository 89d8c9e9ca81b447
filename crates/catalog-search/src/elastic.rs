//! Elasticsearch adapter over the HTTP/JSON API.

use crate::index::{SearchHits, SearchIndex};
use crate::query::SearchBody;
use async_trait::async_trait;
use catalog_config::SearchConfig;
use catalog_core::{CatalogError, CatalogResult};
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use shaku::Component;
use tracing::debug;

/// Elasticsearch-backed search index.
#[derive(Component)]
#[shaku(interface = SearchIndex)]
pub struct ElasticSearchIndex {
    /// Pooled HTTP client.
    client: Client,
    /// Cluster base URL, without trailing slash.
    base_url: String,
}

impl ElasticSearchIndex {
    /// Creates an index client from configuration.
    pub fn new(config: &SearchConfig) -> CatalogResult<Self> {
        let client = Self::build_client(config)?;
        Ok(Self::with_client(client, &config.url))
    }

    /// Creates an index client around an existing HTTP client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds the pooled HTTP client used by the adapter.
    pub fn build_client(config: &SearchConfig) -> CatalogResult<Client> {
        Client::builder()
            .timeout(config.request_timeout())
            .pool_idle_timeout(config.pool_idle_timeout())
            .build()
            .map_err(|e| CatalogError::Configuration(format!("Failed to create HTTP client: {}", e)))
    }

    fn url(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            CatalogError::Configuration(format!("Invalid search URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                CatalogError::Configuration(format!("Search URL '{}' cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(default)]
    found: bool,
    #[serde(rename = "_source")]
    source: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    total: Option<HitsTotal>,
    #[serde(default)]
    hits: Vec<Hit>,
}

/// `hits.total` is an object since Elasticsearch 7 and a bare number before.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HitsTotal {
    Count(u64),
    Object { value: u64 },
}

impl HitsTotal {
    const fn value(&self) -> u64 {
        match self {
            Self::Count(value) | Self::Object { value } => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: Value,
}

#[async_trait]
impl SearchIndex for ElasticSearchIndex {
    async fn get(&self, collection: &str, id: &str) -> CatalogResult<Option<Value>> {
        let url = self.url(&[collection, "_doc", id])?;
        debug!(collection, id, "Index point lookup");

        let response = self.client.get(url).send().await.map_err(map_transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document: GetResponse = decode(response).await?;
        Ok(document.source.filter(|_| document.found))
    }

    async fn search(&self, collection: &str, body: &SearchBody) -> CatalogResult<SearchHits> {
        let url = self.url(&[collection, "_search"])?;
        debug!(collection, from = body.from, size = body.size, "Index search");

        let response = self
            .client
            .post(url)
            .json(&body.to_json())
            .send()
            .await
            .map_err(map_transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(SearchHits::empty());
        }

        let result: SearchResponse = decode(response).await?;
        let documents: Vec<Value> = result.hits.hits.into_iter().map(|hit| hit.source).collect();
        let total = result
            .hits
            .total
            .map_or(documents.len() as u64, |total| total.value());

        Ok(SearchHits { total, documents })
    }

    async fn ping(&self) -> CatalogResult<()> {
        let url = self.url(&[])?;
        let response = self.client.get(url).send().await.map_err(map_transport_error)?;
        check_status(response.status(), "ping")?;
        Ok(())
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> CatalogResult<T> {
    check_status(response.status(), response.url().path())?;
    response
        .json::<T>()
        .await
        .map_err(|e| CatalogError::Serialization(format!("Malformed search response: {}", e)))
}

/// Server errors and throttling are transient; any other failure status is
/// a rejection of the request itself.
fn check_status(status: StatusCode, context: &str) -> CatalogResult<()> {
    if status.is_success() {
        return Ok(());
    }
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        return Err(CatalogError::backend_unavailable(format!(
            "{} returned {}",
            context, status
        )));
    }
    Err(CatalogError::BackendRejected(format!(
        "{} returned {}",
        context, status
    )))
}

fn map_transport_error(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() {
        CatalogError::Timeout(format!("Search request timed out: {}", err))
    } else {
        CatalogError::backend_unavailable(format!("Search request failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(base_url: &str) -> ElasticSearchIndex {
        ElasticSearchIndex::with_client(Client::new(), base_url)
    }

    #[test]
    fn test_url_building() {
        let index = index("http://localhost:9200/");
        let url = index.url(&["movies", "_doc", "abc"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9200/movies/_doc/abc");
    }

    #[test]
    fn test_url_escapes_segments() {
        let index = index("http://localhost:9200");
        let url = index.url(&["movies", "_doc", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9200/movies/_doc/a%2Fb");
    }

    #[test]
    fn test_status_classification() {
        assert!(check_status(StatusCode::OK, "get").is_ok());
        assert!(matches!(
            check_status(StatusCode::SERVICE_UNAVAILABLE, "get"),
            Err(CatalogError::BackendUnavailable(_))
        ));
        assert!(matches!(
            check_status(StatusCode::TOO_MANY_REQUESTS, "get"),
            Err(CatalogError::BackendUnavailable(_))
        ));
        assert!(matches!(
            check_status(StatusCode::BAD_REQUEST, "get"),
            Err(CatalogError::BackendRejected(_))
        ));
    }

    #[test]
    fn test_hits_total_shapes() {
        let legacy: HitsEnvelope = serde_json::from_str(r#"{"total": 7, "hits": []}"#).unwrap();
        assert_eq!(legacy.total.map(|t| t.value()), Some(7));

        let current: HitsEnvelope =
            serde_json::from_str(r#"{"total": {"value": 9, "relation": "eq"}, "hits": []}"#)
                .unwrap();
        assert_eq!(current.total.map(|t| t.value()), Some(9));
    }
}
