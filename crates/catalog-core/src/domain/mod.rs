//! Catalog records as stored in the search index.
//!
//! Records are only ever deserialized from backend documents or cache
//! entries; this layer never builds or mutates them.

mod film;
mod genre;
mod person;

pub use film::*;
pub use genre::*;
pub use person::*;

use crate::ResourceKind;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::hash::Hash;
use uuid::Uuid;

/// A record type served by the catalog.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The typed identifier of the record.
    type Id: Copy + Display + Eq + Hash + Into<Uuid> + Send + Sync + 'static;

    /// The kind this record belongs to.
    const KIND: ResourceKind;

    /// Returns the record's identifier.
    fn id(&self) -> Self::Id;
}

/// Any catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogRecord {
    Film(Film),
    Genre(Genre),
    Person(Person),
}

impl CatalogRecord {
    /// Returns the kind of the wrapped record.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Film(_) => ResourceKind::Film,
            Self::Genre(_) => ResourceKind::Genre,
            Self::Person(_) => ResourceKind::Person,
        }
    }

    /// Returns the untyped identifier of the wrapped record.
    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        match self {
            Self::Film(film) => film.id.0,
            Self::Genre(genre) => genre.id.0,
            Self::Person(person) => person.id.0,
        }
    }
}

impl From<Film> for CatalogRecord {
    fn from(film: Film) -> Self {
        Self::Film(film)
    }
}

impl From<Genre> for CatalogRecord {
    fn from(genre: Genre) -> Self {
        Self::Genre(genre)
    }
}

impl From<Person> for CatalogRecord {
    fn from(person: Person) -> Self {
        Self::Person(person)
    }
}

/// Accepts `null`, a single string, or a list of strings.
///
/// The ETL writes the derived `*_names` search fields in either shape.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}

/// Accepts an RFC 3339 timestamp, a naive datetime, or a plain date.
///
/// Offsets are normalised to UTC and plain dates map to midnight. Any other
/// value decodes as `None` so one odd document cannot fail a whole page.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(|raw| parse_datetime(raw.trim())))
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok())
        .or_else(|| {
            raw.parse::<NaiveDate>()
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_catalog_record_is_tagged() {
        let genre: Genre = serde_json::from_value(json!({
            "id": "6a0a479b-cfec-41ac-b520-41b2b007b611",
            "name": "Comedy"
        }))
        .unwrap();

        let record = CatalogRecord::from(genre.clone());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["kind"], "genre");
        assert_eq!(value["name"], "Comedy");
        assert_eq!(record.kind(), ResourceKind::Genre);
        assert_eq!(record.uuid(), genre.id.0);

        let back: CatalogRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
