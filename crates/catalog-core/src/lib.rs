//! # Catalog Core
//!
//! Core types, records, and error definitions for the movies catalog.
//! This crate provides the foundational abstractions shared by the search,
//! cache, and service layers of the read-only catalog.

pub mod domain;
pub mod error;
pub mod id;
pub mod kind;
pub mod pagination;
pub mod result;
pub mod telemetry;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use kind::*;
pub use pagination::*;
pub use result::*;
