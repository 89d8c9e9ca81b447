//! # Catalog Resilience
//!
//! Resilience patterns for the movies catalog.
//! Provides retry with exponential backoff and timeouts for backend calls.

pub mod retry;
pub mod timeout;

pub use retry::*;
pub use timeout::*;
