//! Result type aliases for catalog operations.

use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// A specialized `Result` type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Outcome of a successful lookup.
///
/// "No matching documents" is a normal answer, not a failure, so it lives
/// beside the found value instead of inside [`CatalogError`]. Infrastructure
/// failures travel in the `Err` side of [`CatalogResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Lookup<T> {
    /// The backend (or the cache) produced a value.
    Found(T),
    /// The backend has no matching documents.
    NotFound,
}

impl<T> Lookup<T> {
    /// Returns true if a value was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns true if nothing matched.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Converts into an `Option`, discarding the distinction from errors.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    /// Borrows the found value.
    #[must_use]
    pub const fn as_found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    /// Maps the found value.
    #[must_use]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::NotFound => Lookup::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_from_option() {
        assert_eq!(Lookup::from(Some(3)), Lookup::Found(3));
        assert_eq!(Lookup::<i32>::from(None), Lookup::NotFound);
    }

    #[test]
    fn test_lookup_accessors() {
        let found = Lookup::Found("film");
        assert!(found.is_found());
        assert_eq!(found.as_found(), Some(&"film"));
        assert_eq!(found.map(str::len), Lookup::Found(4));

        let missing: Lookup<&str> = Lookup::NotFound;
        assert!(missing.is_not_found());
        assert_eq!(missing.found(), None);
    }
}
