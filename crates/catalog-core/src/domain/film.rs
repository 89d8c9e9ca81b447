use crate::{FilmId, GenreId, PersonId, Record, ResourceKind};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A person credited on a film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    pub id: PersonId,
    #[serde(alias = "full_name")]
    pub name: String,
}

/// A genre a film belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRef {
    pub id: GenreId,
    pub name: String,
}

/// A film document from the `movies` collection.
///
/// Decoded through [`FilmDocument`], which accepts the legacy index field
/// names; cache entries are written in this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FilmDocument")]
pub struct Film {
    pub id: FilmId,
    pub title: String,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub creation_date: Option<NaiveDateTime>,
    /// Minimum viewer age.
    pub restriction: Option<u8>,
    pub file_link: Option<String>,
    #[serde(rename = "type")]
    pub film_type: Option<String>,
    pub directors: Vec<PersonRef>,
    pub actors: Vec<PersonRef>,
    pub writers: Vec<PersonRef>,
    pub genres: Vec<GenreRef>,

    // Derived full-text fields, only used for relevance search.
    pub genres_names: Vec<String>,
    pub actors_names: Vec<String>,
    pub writers_names: Vec<String>,
    pub directors_names: Vec<String>,
}

/// Wire shape of a film as found in the index or the cache.
#[derive(Deserialize)]
struct FilmDocument {
    id: FilmId,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    imdb_rating: Option<f64>,
    #[serde(default, deserialize_with = "super::lenient_datetime")]
    creation_date: Option<NaiveDateTime>,
    #[serde(default)]
    restriction: Option<u8>,
    #[serde(default)]
    file_link: Option<String>,
    #[serde(default, rename = "type")]
    film_type: Option<String>,
    #[serde(default)]
    directors: Vec<PersonRef>,
    #[serde(default)]
    actors: Vec<PersonRef>,
    #[serde(default)]
    writers: Vec<PersonRef>,
    #[serde(default, alias = "genre")]
    genres: Vec<GenreRef>,
    #[serde(default, deserialize_with = "super::one_or_many")]
    genres_names: Vec<String>,
    #[serde(default, deserialize_with = "super::one_or_many")]
    actors_names: Vec<String>,
    #[serde(default, deserialize_with = "super::one_or_many")]
    writers_names: Vec<String>,
    #[serde(default, deserialize_with = "super::one_or_many")]
    directors_names: Vec<String>,
}

impl From<FilmDocument> for Film {
    fn from(doc: FilmDocument) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            description: doc.description,
            rating: doc.rating.or(doc.imdb_rating),
            creation_date: doc.creation_date,
            restriction: doc.restriction,
            file_link: doc.file_link,
            film_type: doc.film_type,
            directors: doc.directors,
            actors: doc.actors,
            writers: doc.writers,
            genres: doc.genres,
            genres_names: doc.genres_names,
            actors_names: doc.actors_names,
            writers_names: doc.writers_names,
            directors_names: doc.directors_names,
        }
    }
}

impl Record for Film {
    type Id = FilmId;
    const KIND: ResourceKind = ResourceKind::Film;

    fn id(&self) -> FilmId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn midnight(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(|date| date.and_hms_opt(0, 0, 0))
    }

    #[test]
    fn test_film_from_index_document() {
        let film: Film = serde_json::from_value(json!({
            "id": "3d825f60-9fff-4dfe-b294-1a45fa1e115d",
            "imdb_rating": 8.6,
            "title": "Star Wars: Episode IV - A New Hope",
            "description": "The Imperial Forces hold Princess Leia hostage.",
            "creation_date": "1977-05-25",
            "type": "movie",
            "genre": [{"id": "120a21cf-9097-479e-904a-13dd7198c1dd", "name": "Adventure"}],
            "directors": [{"id": "a5a8f573-3cee-4ccc-8a2b-91cb9f55250a", "full_name": "George Lucas"}],
            "actors": [{"id": "26e83050-29ef-4163-a99d-b546cac208f8", "name": "Mark Hamill"}],
            "genres_names": "Adventure",
            "actors_names": ["Mark Hamill", "Harrison Ford"],
            "directors_names": null
        }))
        .unwrap();

        assert_eq!(film.rating, Some(8.6));
        assert_eq!(film.film_type.as_deref(), Some("movie"));
        assert_eq!(film.creation_date, midnight(1977, 5, 25));
        assert_eq!(film.genres.len(), 1);
        assert_eq!(film.directors[0].name, "George Lucas");
        assert_eq!(film.genres_names, vec!["Adventure"]);
        assert_eq!(film.actors_names.len(), 2);
        assert!(film.directors_names.is_empty());
        assert!(film.writers.is_empty());
    }

    #[test]
    fn test_film_minimal_document() {
        let film: Film = serde_json::from_value(json!({
            "id": "3d825f60-9fff-4dfe-b294-1a45fa1e115d",
            "title": "Untitled"
        }))
        .unwrap();

        assert_eq!(film.rating, None);
        assert_eq!(film.description, None);
        assert!(film.genres.is_empty());
    }

    #[test]
    fn test_film_cache_round_trip_is_lossless() {
        let film: Film = serde_json::from_value(json!({
            "id": "3d825f60-9fff-4dfe-b294-1a45fa1e115d",
            "title": "Star Wars",
            "rating": 8.6,
            "genres": [{"id": "120a21cf-9097-479e-904a-13dd7198c1dd", "name": "Adventure"}],
            "writers_names": ["George Lucas"]
        }))
        .unwrap();

        let cached = serde_json::to_string(&film).unwrap();
        let restored: Film = serde_json::from_str(&cached).unwrap();
        assert_eq!(restored, film);
    }

    #[test]
    fn test_film_with_datetime_creation_date() {
        let film: Film = serde_json::from_value(json!({
            "id": "3d825f60-9fff-4dfe-b294-1a45fa1e115d",
            "title": "Dune",
            "creation_date": "2021-06-16T20:14:09.221838"
        }))
        .unwrap();

        let expected = NaiveDate::from_ymd_opt(2021, 6, 16)
            .and_then(|date| date.and_hms_micro_opt(20, 14, 9, 221_838));
        assert_eq!(film.creation_date, expected);

        let cached = serde_json::to_string(&film).unwrap();
        let restored: Film = serde_json::from_str(&cached).unwrap();
        assert_eq!(restored.creation_date, expected);
    }

    #[test]
    fn test_film_with_offset_creation_date() {
        let film: Film = serde_json::from_value(json!({
            "id": "3d825f60-9fff-4dfe-b294-1a45fa1e115d",
            "title": "Dune",
            "creation_date": "2021-06-16T22:14:09+02:00"
        }))
        .unwrap();

        let expected = NaiveDate::from_ymd_opt(2021, 6, 16).and_then(|date| date.and_hms_opt(20, 14, 9));
        assert_eq!(film.creation_date, expected);
    }

    #[test]
    fn test_film_with_unrecognised_creation_date() {
        let film: Film = serde_json::from_value(json!({
            "id": "3d825f60-9fff-4dfe-b294-1a45fa1e115d",
            "title": "Dune",
            "creation_date": "sometime in 2021"
        }))
        .unwrap();

        assert_eq!(film.creation_date, None);
    }

    #[test]
    fn test_film_with_both_rating_fields() {
        let film: Film = serde_json::from_value(json!({
            "id": "3d825f60-9fff-4dfe-b294-1a45fa1e115d",
            "title": "Dune",
            "rating": 8.1,
            "imdb_rating": 7.9
        }))
        .unwrap();

        assert_eq!(film.rating, Some(8.1));

        let value = serde_json::to_value(&film).unwrap();
        assert_eq!(value["rating"], json!(8.1));
        assert!(value.get("imdb_rating").is_none());
    }

    #[test]
    fn test_film_falls_back_to_legacy_rating() {
        let film: Film = serde_json::from_value(json!({
            "id": "3d825f60-9fff-4dfe-b294-1a45fa1e115d",
            "title": "Dune",
            "imdb_rating": 7.9
        }))
        .unwrap();

        assert_eq!(film.rating, Some(7.9));
    }
}
