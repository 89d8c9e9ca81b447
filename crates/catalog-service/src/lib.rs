//! # Catalog Service
//!
//! Cache-aside read path for the movies catalog.
//! Each [`ResourceService`] checks the cache, falls back to the search
//! index on a miss, and writes non-empty results back with a TTL.

pub mod cache;
pub mod di;
pub mod resource_service;

pub use cache::*;
pub use di::*;
pub use resource_service::*;
