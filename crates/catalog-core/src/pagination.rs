//! Pagination types for list operations.

use crate::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};

/// A validated request for a page of results.
///
/// Pages are 1-indexed. Instances only exist for `page >= 1` and
/// `size >= 1`; out-of-domain input is rejected rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: u32,
    /// The number of items per page.
    pub size: u32,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: u32 = 50;

    /// Validates raw pagination input.
    pub fn try_new(page: i64, size: i64) -> CatalogResult<Self> {
        let page = Self::positive("page", page)?;
        let size = Self::positive("size", size)?;
        Ok(Self { page, size })
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            size: Self::DEFAULT_SIZE,
        }
    }

    /// Returns the offset for backend queries: `(page - 1) * size`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64).saturating_sub(1) * self.size as u64
    }

    /// Returns the limit for backend queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.size as u64
    }

    fn positive(name: &'static str, value: i64) -> CatalogResult<u32> {
        if value < 1 {
            return Err(CatalogError::invalid_parameter(
                name,
                format!("must be >= 1, got {}", value),
            ));
        }
        u32::try_from(value).map_err(|_| {
            CatalogError::invalid_parameter(name, format!("must be <= {}, got {}", u32::MAX, value))
        })
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}
