//! # Catalog Search
//!
//! Search backend abstraction for the movies catalog: the [`SearchIndex`]
//! trait, the backend query model, the per-kind search profiles, the pure
//! [`QueryTranslator`], and the Elasticsearch adapter.

pub mod elastic;
pub mod index;
pub mod profile;
pub mod query;
pub mod translator;

pub use elastic::*;
pub use index::*;
pub use profile::*;
pub use query::*;
pub use translator::*;
