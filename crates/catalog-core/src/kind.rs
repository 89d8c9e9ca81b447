//! Resource kinds served by the catalog.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// The kinds of record the catalog serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Film,
    Genre,
    Person,
}

impl ResourceKind {
    /// All kinds, in a fixed order.
    pub const ALL: [Self; 3] = [Self::Film, Self::Genre, Self::Person];

    /// Returns the kind name used in cache keys and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Film => "film",
            Self::Genre => "genre",
            Self::Person => "person",
        }
    }

    /// Returns the search index collection holding this kind.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Film => "movies",
            Self::Genre => "genres",
            Self::Person => "persons",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collections() {
        assert_eq!(ResourceKind::Film.collection(), "movies");
        assert_eq!(ResourceKind::Genre.collection(), "genres");
        assert_eq!(ResourceKind::Person.collection(), "persons");
    }

    #[test]
    fn test_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            ResourceKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), 3);
    }
}
