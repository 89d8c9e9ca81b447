//! Canonical cache keys.
//!
//! Keys have the shape `catalog:{kind}:{operation}:{name=value}:...` with
//! parameters in name order, so equal requests always map to equal keys.

use catalog_core::ResourceKind;
use catalog_search::{Operation, QueryParams, SortSpec};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Prefix for all cache keys to namespace them.
pub const CACHE_PREFIX: &str = "catalog";

/// Builds one cache key.
#[derive(Debug, Clone)]
pub struct CacheKeyBuilder {
    kind: ResourceKind,
    operation: Operation,
    params: BTreeMap<&'static str, String>,
}

impl CacheKeyBuilder {
    #[must_use]
    pub fn new(kind: ResourceKind, operation: Operation) -> Self {
        Self {
            kind,
            operation,
            params: BTreeMap::new(),
        }
    }

    /// Adds a parameter; a repeated name keeps the last value.
    #[must_use]
    pub fn param(mut self, name: &'static str, value: impl Display) -> Self {
        self.params.insert(name, value.to_string());
        self
    }

    /// Adds a parameter when present.
    #[must_use]
    pub fn param_opt(self, name: &'static str, value: Option<impl Display>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    #[must_use]
    pub fn build(&self) -> String {
        let mut key = format!("{}:{}:{}", CACHE_PREFIX, self.kind, self.operation);
        for (name, value) in &self.params {
            key.push(':');
            key.push_str(name);
            key.push('=');
            key.push_str(&escape(value));
        }
        key
    }

    /// Key for a lookup of `kind` with `params`.
    ///
    /// Sort strings are reduced to field and direction, id sets are sorted
    /// and de-duplicated, and blank listing terms are dropped.
    #[must_use]
    pub fn for_query(kind: ResourceKind, params: &QueryParams) -> String {
        let builder = Self::new(kind, params.operation());

        let builder = match params {
            QueryParams::ById { id } => builder.param("id", id),
            QueryParams::ByIdSet { ids, paging } => {
                let ids: Vec<String> = QueryParams::canonical_ids(ids)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                builder
                    .param("ids", ids.join(","))
                    .param("page", paging.page)
                    .param("size", paging.size)
            }
            QueryParams::Search { term, paging } => builder
                .param("query", term.trim())
                .param("page", paging.page)
                .param("size", paging.size),
            QueryParams::Listing(listing) => {
                let builder = match listing.sort.as_deref() {
                    Some(raw) => match SortSpec::parse(raw) {
                        Ok(sort) => builder
                            .param("sort", sort.field)
                            .param("order", sort.order.as_str()),
                        Err(_) => builder.param("sort", raw),
                    },
                    None => builder,
                };
                builder
                    .param_opt("genre", listing.genre)
                    .param_opt("query", listing.effective_term())
                    .param("page", listing.paging.page)
                    .param("size", listing.paging.size)
            }
        };

        builder.build()
    }
}

/// Escapes the separators so a value can never forge another pair.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            ':' => escaped.push_str("%3A"),
            '=' => escaped.push_str("%3D"),
            _ => escaped.push(c),
        }
    }
    escaped
}
