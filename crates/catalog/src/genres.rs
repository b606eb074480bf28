//! Genre normalization.
//!
//! The catalog sends the same logical field in two shapes: full `{id, name}`
//! objects from detail lookups, bare ids from list/search/discover endpoints.
//! This module is the one place that reconciles them.

use crate::types::{Genre, GenreId};

/// The genre field of one upstream record, resolved to a single shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreField {
    /// Full genre objects with real names
    Resolved(Vec<Genre>),
    /// Only ids were sent
    Ids(Vec<GenreId>),
    /// Neither field was populated
    Missing,
}

impl GenreField {
    /// Pick the shape to trust.
    ///
    /// A non-empty object list wins over any id list; an empty list counts as missing.
    pub fn from_parts(genres: Option<Vec<Genre>>, genre_ids: Option<Vec<GenreId>>) -> Self {
        match (genres, genre_ids) {
            (Some(genres), _) if !genres.is_empty() => GenreField::Resolved(genres),
            (_, Some(ids)) if !ids.is_empty() => GenreField::Ids(ids),
            _ => GenreField::Missing,
        }
    }

    pub fn into_genres(self) -> Vec<Genre> {
        match self {
            GenreField::Resolved(genres) => genres,
            GenreField::Ids(ids) => ids.into_iter().map(Genre::unresolved).collect(),
            GenreField::Missing => Vec::new(),
        }
    }
}

/// Normalize the two upstream genre shapes into one list.
///
/// Never returns an absent value; a record without genre info yields an empty list.
pub fn normalize(genres: Option<Vec<Genre>>, genre_ids: Option<Vec<GenreId>>) -> Vec<Genre> {
    GenreField::from_parts(genres, genre_ids).into_genres()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNRESOLVED_GENRE_NAME;

    #[test]
    fn test_full_objects_win_over_ids() {
        let full = vec![Genre::new(18, "Drama"), Genre::new(80, "Crime")];
        let result = normalize(Some(full.clone()), Some(vec![1, 2, 3]));
        assert_eq!(result, full);
    }

    #[test]
    fn test_ids_only_get_placeholder_names() {
        let result = normalize(None, Some(vec![28, 12, 28]));

        assert_eq!(result.len(), 3);
        assert_eq!(result.iter().map(|g| g.id).collect::<Vec<_>>(), vec![28, 12, 28]);
        assert!(result.iter().all(|g| g.name == UNRESOLVED_GENRE_NAME));
    }

    #[test]
    fn test_empty_object_list_falls_through_to_ids() {
        let result = normalize(Some(vec![]), Some(vec![35]));
        assert_eq!(result, vec![Genre::unresolved(35)]);
    }

    #[test]
    fn test_nothing_populated_is_empty_not_absent() {
        assert!(normalize(None, None).is_empty());
        assert!(normalize(Some(vec![]), Some(vec![])).is_empty());
        assert_eq!(GenreField::from_parts(None, Some(vec![])), GenreField::Missing);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let dupes = vec![Genre::new(18, "Drama"), Genre::new(18, "Drama")];
        assert_eq!(normalize(Some(dupes), None).len(), 2);
    }
}
