//! Timeout wrapper for async operations.

use catalog_core::CatalogError;
use std::future::Future;
use std::time::Duration;

/// Bounds an async operation by `duration`.
///
/// On expiry the inner future is dropped, which cancels the in-flight call,
/// and [`CatalogError::Timeout`] names the operation.
pub async fn with_timeout<Fut, T>(
    duration: Duration,
    operation: &str,
    fut: Fut,
) -> Result<T, CatalogError>
where
    Fut: Future<Output = Result<T, CatalogError>>,
{
    tokio::time::timeout(duration, fut).await.map_err(|_| {
        CatalogError::Timeout(format!("{} timed out after {:?}", operation, duration))
    })?
}
