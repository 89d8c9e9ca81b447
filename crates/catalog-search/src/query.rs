//! Backend query documents.
//!
//! A [`QueryDoc`] is built per request by the translator and rendered to the
//! search backend's JSON query DSL by [`SearchBody::to_json`].

use serde_json::{json, Map, Value};
use std::fmt::{self, Display};

/// A field and its relevance weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBoost {
    pub field: &'static str,
    pub boost: u32,
}

impl FieldBoost {
    #[must_use]
    pub const fn new(field: &'static str, boost: u32) -> Self {
        Self { field, boost }
    }
}

impl Display for FieldBoost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}^{}", self.field, self.boost)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Sort on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
}

/// One query constraint or relevance clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Matches no documents.
    MatchNone,
    /// `field` equals at least one of `values` exactly.
    AnyOf { field: String, values: Vec<String> },
    /// Relevance-scored match of `query` over weighted fields.
    MultiMatch {
        query: String,
        fields: Vec<FieldBoost>,
        fuzzy: bool,
    },
    /// Some element of the relation array at `path` has `field == value`.
    Nested {
        path: String,
        field: String,
        value: String,
    },
}

impl Clause {
    /// Renders the clause as query DSL.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::MatchNone => json!({ "match_none": {} }),
            Self::AnyOf { field, values } => json!({
                "bool": {
                    "should": [{ "terms": { field.as_str(): values } }],
                    "minimum_should_match": 1
                }
            }),
            Self::MultiMatch {
                query,
                fields,
                fuzzy,
            } => {
                let mut multi_match = Map::new();
                multi_match.insert("query".into(), json!(query));
                multi_match.insert("type".into(), json!("best_fields"));
                multi_match.insert(
                    "fields".into(),
                    fields.iter().map(ToString::to_string).collect::<Vec<_>>().into(),
                );
                if *fuzzy {
                    multi_match.insert("fuzziness".into(), json!("AUTO"));
                }
                json!({ "multi_match": multi_match })
            }
            Self::Nested { path, field, value } => json!({
                "nested": {
                    "path": path,
                    "query": {
                        "bool": {
                            "must": [{ "match": { field.as_str(): value } }]
                        }
                    }
                }
            }),
        }
    }
}

/// A boolean query: `must` clauses contribute to scoring, `filter` clauses
/// are hard constraints that do not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<Clause>,
    pub filter: Vec<Clause>,
}

impl BoolQuery {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.filter.is_empty()
    }

    /// Renders the query as DSL; an empty query matches everything.
    #[must_use]
    pub fn to_json(&self) -> Value {
        if self.is_empty() {
            return json!({ "match_all": {} });
        }

        let mut bool_query = Map::new();
        if !self.must.is_empty() {
            bool_query.insert(
                "must".into(),
                self.must.iter().map(Clause::to_json).collect::<Vec<_>>().into(),
            );
        }
        if !self.filter.is_empty() {
            bool_query.insert(
                "filter".into(),
                self.filter.iter().map(Clause::to_json).collect::<Vec<_>>().into(),
            );
        }
        json!({ "bool": bool_query })
    }
}

/// Body of a paginated search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBody {
    /// Offset of the first hit.
    pub from: u64,
    /// Maximum number of hits.
    pub size: u64,
    pub sort: Option<SortSpec>,
    pub query: BoolQuery,
}

impl SearchBody {
    /// Renders the body as DSL.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("from".into(), json!(self.from));
        body.insert("size".into(), json!(self.size));
        if let Some(sort) = &self.sort {
            body.insert(
                "sort".into(),
                json!([{ sort.field.as_str(): { "order": sort.order.as_str() } }]),
            );
        }
        body.insert("query".into(), self.query.to_json());
        Value::Object(body)
    }
}

/// A translated request, ready to run against one collection.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryDoc {
    /// Point lookup by document identifier.
    Get { id: String },
    /// Body query.
    Search(SearchBody),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bool_matches_all() {
        assert_eq!(BoolQuery::default().to_json(), json!({ "match_all": {} }));
    }

    #[test]
    fn test_any_of_is_exact_disjunction() {
        let clause = Clause::AnyOf {
            field: "id".to_string(),
            values: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            clause.to_json(),
            json!({
                "bool": {
                    "should": [{ "terms": { "id": ["a", "b"] } }],
                    "minimum_should_match": 1
                }
            })
        );
    }

    #[test]
    fn test_multi_match_without_fuzziness() {
        let clause = Clause::MultiMatch {
            query: "star".to_string(),
            fields: vec![FieldBoost::new("name", 1)],
            fuzzy: false,
        };
        let value = clause.to_json();
        assert_eq!(value["multi_match"]["fields"], json!(["name^1"]));
        assert!(value["multi_match"].get("fuzziness").is_none());
    }

    #[test]
    fn test_search_body_layout() {
        let body = SearchBody {
            from: 20,
            size: 10,
            sort: Some(SortSpec {
                field: "rating".to_string(),
                order: SortOrder::Desc,
            }),
            query: BoolQuery::default(),
        };

        assert_eq!(
            body.to_json(),
            json!({
                "from": 20,
                "size": 10,
                "sort": [{ "rating": { "order": "desc" } }],
                "query": { "match_all": {} }
            })
        );
    }
}
