//! Translation of typed request parameters into backend queries.
//!
//! [`QueryTranslator::translate`] is pure: it performs every parameter
//! check up front, so a request that fails here never reaches the cache or
//! the search backend.

use crate::profile::SearchProfile;
use crate::query::{BoolQuery, Clause, QueryDoc, SearchBody, SortOrder, SortSpec};
use catalog_core::{CatalogError, CatalogResult, GenreId, PageRequest, ResourceKind};
use std::collections::BTreeSet;
use std::fmt::{self, Display};
use uuid::Uuid;

/// The four lookup shapes served by a resource service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ById,
    ByIdSet,
    Search,
    Listing,
}

impl Operation {
    /// Returns the operation name used in cache keys and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ById => "by_id",
            Self::ByIdSet => "by_ids",
            Self::Search => "search",
            Self::Listing => "list",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw pagination input, validated during translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page: i64,
    pub size: i64,
}

impl Paging {
    #[must_use]
    pub const fn new(page: i64, size: i64) -> Self {
        Self { page, size }
    }

    /// Validates the input into a [`PageRequest`].
    pub fn validate(self) -> CatalogResult<PageRequest> {
        PageRequest::try_new(self.page, self.size)
    }
}

/// Parameters of a parametric listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingParams {
    /// Sort field, descending when prefixed with `-`.
    pub sort: Option<String>,
    /// Restrict to records related to this genre.
    pub genre: Option<GenreId>,
    /// Optional relevance term merged with the filter.
    pub term: Option<String>,
    pub paging: Paging,
}

impl ListingParams {
    /// A listing of everything, unsorted.
    #[must_use]
    pub const fn new(page: i64, size: i64) -> Self {
        Self {
            sort: None,
            genre: None,
            term: None,
            paging: Paging::new(page, size),
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    #[must_use]
    pub fn with_genre(mut self, genre: GenreId) -> Self {
        self.genre = Some(genre);
        self
    }

    #[must_use]
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    /// The term, if it is not blank.
    #[must_use]
    pub fn effective_term(&self) -> Option<&str> {
        self.term.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Parameters of exactly one lookup mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryParams {
    ById { id: Uuid },
    ByIdSet { ids: Vec<Uuid>, paging: Paging },
    Search { term: String, paging: Paging },
    Listing(ListingParams),
}

impl QueryParams {
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::ById { .. } => Operation::ById,
            Self::ByIdSet { .. } => Operation::ByIdSet,
            Self::Search { .. } => Operation::Search,
            Self::Listing(_) => Operation::Listing,
        }
    }

    /// Returns the id set sorted and without duplicates.
    #[must_use]
    pub fn canonical_ids(ids: &[Uuid]) -> BTreeSet<Uuid> {
        ids.iter().copied().collect()
    }
}

impl SortSpec {
    /// Parses `field` or `-field`.
    pub fn parse(raw: &str) -> CatalogResult<Self> {
        let raw = raw.trim();
        let (field, order) = match raw.strip_prefix('-') {
            Some(field) => (field, SortOrder::Desc),
            None => (raw, SortOrder::Asc),
        };

        if field.is_empty() {
            return Err(CatalogError::invalid_parameter("sort", "field name is empty"));
        }
        if !field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            return Err(CatalogError::invalid_parameter(
                "sort",
                format!("unsupported field '{}'", field),
            ));
        }

        Ok(Self {
            field: field.to_string(),
            order,
        })
    }
}

/// Builds backend queries for one resource kind.
pub struct QueryTranslator;

impl QueryTranslator {
    /// Translates `params` into a query against the collection of `kind`.
    pub fn translate(kind: ResourceKind, params: &QueryParams) -> CatalogResult<QueryDoc> {
        let profile = SearchProfile::for_kind(kind);

        match params {
            QueryParams::ById { id } => Ok(QueryDoc::Get { id: id.to_string() }),
            QueryParams::ByIdSet { ids, paging } => Self::by_id_set(&profile, ids, *paging),
            QueryParams::Search { term, paging } => Self::search(&profile, term, *paging),
            QueryParams::Listing(listing) => Self::listing(&profile, listing),
        }
    }

    fn by_id_set(profile: &SearchProfile, ids: &[Uuid], paging: Paging) -> CatalogResult<QueryDoc> {
        let page = paging.validate()?;
        let ids = QueryParams::canonical_ids(ids);

        let clause = if ids.is_empty() {
            Clause::MatchNone
        } else {
            Clause::AnyOf {
                field: profile.id_field.to_string(),
                values: ids.iter().map(ToString::to_string).collect(),
            }
        };

        Ok(QueryDoc::Search(SearchBody {
            from: page.offset(),
            size: page.limit(),
            sort: None,
            query: BoolQuery {
                must: vec![clause],
                filter: Vec::new(),
            },
        }))
    }

    fn search(profile: &SearchProfile, term: &str, paging: Paging) -> CatalogResult<QueryDoc> {
        let page = paging.validate()?;
        let term = term.trim();
        if term.is_empty() {
            return Err(CatalogError::invalid_parameter("query", "search term is empty"));
        }

        Ok(QueryDoc::Search(SearchBody {
            from: page.offset(),
            size: page.limit(),
            sort: None,
            query: BoolQuery {
                must: vec![Self::relevance(profile, term)],
                filter: Vec::new(),
            },
        }))
    }

    fn listing(profile: &SearchProfile, listing: &ListingParams) -> CatalogResult<QueryDoc> {
        let page = listing.paging.validate()?;
        let sort = listing.sort.as_deref().map(SortSpec::parse).transpose()?;

        let mut query = BoolQuery::default();

        if let Some(genre) = listing.genre {
            let nested = profile.genre_filter.ok_or_else(|| {
                CatalogError::invalid_parameter(
                    "genre",
                    format!("{} records cannot be filtered by genre", profile.kind),
                )
            })?;
            query.filter.push(Clause::Nested {
                path: nested.path.to_string(),
                field: nested.field.to_string(),
                value: genre.to_string(),
            });
        }

        if let Some(term) = listing.effective_term() {
            query.must.push(Self::relevance(profile, term));
        }

        Ok(QueryDoc::Search(SearchBody {
            from: page.offset(),
            size: page.limit(),
            sort,
            query,
        }))
    }

    fn relevance(profile: &SearchProfile, term: &str) -> Clause {
        Clause::MultiMatch {
            query: term.to_string(),
            fields: profile.search_fields.to_vec(),
            fuzzy: profile.fuzzy,
        }
    }
}
