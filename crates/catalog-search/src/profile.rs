//! Per-kind search profiles.

use crate::query::FieldBoost;
use catalog_core::ResourceKind;

/// Relevance table for film keyword search.
pub const FILM_SEARCH_FIELDS: [FieldBoost; 6] = [
    FieldBoost::new("title", 5),
    FieldBoost::new("description", 4),
    FieldBoost::new("genres_names", 3),
    FieldBoost::new("actors_names", 3),
    FieldBoost::new("writers_names", 2),
    FieldBoost::new("directors_names", 1),
];

const GENRE_SEARCH_FIELDS: [FieldBoost; 1] = [FieldBoost::new("name", 1)];

const PERSON_SEARCH_FIELDS: [FieldBoost; 1] = [FieldBoost::new("full_name", 1)];

/// Location of an array-valued relation and the element field to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedPath {
    pub path: &'static str,
    pub field: &'static str,
}

/// How records of one kind are looked up and searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProfile {
    pub kind: ResourceKind,
    /// Field holding the record identifier.
    pub id_field: &'static str,
    /// Weighted fields for keyword search.
    pub search_fields: &'static [FieldBoost],
    /// Whether keyword search tolerates small edit distances.
    pub fuzzy: bool,
    /// Relation used by the genre filter, when the kind has one.
    pub genre_filter: Option<NestedPath>,
}

impl SearchProfile {
    pub const FILM: Self = Self {
        kind: ResourceKind::Film,
        id_field: "id",
        search_fields: &FILM_SEARCH_FIELDS,
        fuzzy: true,
        genre_filter: Some(NestedPath {
            path: "genres",
            field: "genres.id",
        }),
    };

    pub const GENRE: Self = Self {
        kind: ResourceKind::Genre,
        id_field: "id",
        search_fields: &GENRE_SEARCH_FIELDS,
        fuzzy: true,
        genre_filter: None,
    };

    pub const PERSON: Self = Self {
        kind: ResourceKind::Person,
        id_field: "id",
        search_fields: &PERSON_SEARCH_FIELDS,
        fuzzy: true,
        genre_filter: None,
    };

    /// Returns the profile for `kind`.
    #[must_use]
    pub const fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Film => Self::FILM,
            ResourceKind::Genre => Self::GENRE,
            ResourceKind::Person => Self::PERSON,
        }
    }

    /// Collection the kind lives in.
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        self.kind.collection()
    }
}
