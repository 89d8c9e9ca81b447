use crate::{FilmId, PersonId, Record, ResourceKind};
use serde::{Deserialize, Serialize};

/// A person credited on films.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub full_name: String,
    /// Role tags such as "actor" or "director".
    #[serde(default, alias = "role")]
    pub roles: Vec<String>,
    #[serde(default, deserialize_with = "nullable_ids")]
    pub film_ids: Vec<FilmId>,
}

impl Record for Person {
    type Id = PersonId;
    const KIND: ResourceKind = ResourceKind::Person;

    fn id(&self) -> PersonId {
        self.id
    }
}

fn nullable_ids<'de, D>(deserializer: D) -> Result<Vec<FilmId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<FilmId>>::deserialize(deserializer)?.unwrap_or_default())
}
