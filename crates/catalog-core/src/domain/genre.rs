use crate::{GenreId, Record, ResourceKind};
use serde::{Deserialize, Serialize};

/// A film genre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Record for Genre {
    type Id = GenreId;
    const KIND: ResourceKind = ResourceKind::Genre;

    fn id(&self) -> GenreId {
        self.id
    }
}
