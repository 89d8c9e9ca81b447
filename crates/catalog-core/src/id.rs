//! Typed ID wrappers for catalog records.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates an ID from a UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parses an ID from a string.
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

catalog_id!(
    /// A strongly-typed wrapper for film IDs.
    FilmId
);

catalog_id!(
    /// A strongly-typed wrapper for genre IDs.
    GenreId
);

catalog_id!(
    /// A strongly-typed wrapper for person IDs.
    PersonId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_film_id_parsing() {
        let uuid_str = "3d825f60-9fff-4dfe-b294-1a45fa1e115d";
        let id = FilmId::parse(uuid_str).unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn test_invalid_id_parsing() {
        assert!(GenreId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_id_serializes_transparently() {
        let uuid = Uuid::parse_str("6a0a479b-cfec-41ac-b520-41b2b007b611").unwrap();
        let id = PersonId::from(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"6a0a479b-cfec-41ac-b520-41b2b007b611\"");
        assert_eq!(Uuid::from(id), uuid);
    }
}
