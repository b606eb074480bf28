//! Core domain types for the movie catalog.
//!
//! Two groups of types live here:
//! - the public entities handed to callers (`Movie`, `Genre`)
//! - the upstream wire shapes they are built from (`RawMovie`, `Page`, `GenreList`)
//!
//! The wire shapes are deliberately loose (almost everything is optional) because the
//! catalog omits or nulls fields depending on the endpoint. Conversion into `Movie`
//! fills the gaps so a `Movie` is always fully populated.

use serde::{Deserialize, Serialize};

use crate::genres::normalize;

// =============================================================================
// Type Aliases
// =============================================================================

/// Catalog-assigned movie identifier
pub type MovieId = u32;

/// Catalog-assigned genre identifier
pub type GenreId = u32;

/// Name given to a genre when only its id was available upstream
pub const UNRESOLVED_GENRE_NAME: &str = "unknown";

/// Public image host prefix for poster paths (w500 rendition)
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

// =============================================================================
// Public Entities
// =============================================================================

/// A movie genre.
///
/// A genre built from a bare id carries [`UNRESOLVED_GENRE_NAME`] as its name;
/// check [`Genre::is_resolved`] before showing the name to anyone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

impl Genre {
    pub fn new(id: GenreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Genre known only by id
    pub fn unresolved(id: GenreId) -> Self {
        Self::new(id, UNRESOLVED_GENRE_NAME)
    }

    pub fn is_resolved(&self) -> bool {
        self.name != UNRESOLVED_GENRE_NAME
    }
}

/// A movie as returned to callers.
///
/// Serialized with camelCase keys (`releaseDate`, `voteAverage`, `posterPath`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// ISO-8601 date (`YYYY-MM-DD`), empty when the catalog has none
    pub release_date: String,
    /// Average user rating in `[0.0, 10.0]`
    pub vote_average: f64,
    /// Relative poster path (e.g. `/abc.jpg`), empty when missing
    pub poster_path: String,
    pub overview: String,
    /// Always present, possibly empty. Duplicates from upstream are kept.
    pub genres: Vec<Genre>,
}

impl Movie {
    /// Full poster URL, or `None` when the movie has no poster
    pub fn poster_url(&self) -> Option<String> {
        if self.poster_path.is_empty() {
            None
        } else {
            Some(format!("{}{}", POSTER_BASE_URL, self.poster_path))
        }
    }

    /// Year part of the release date
    pub fn release_year(&self) -> Option<u16> {
        self.release_date.get(..4)?.parse().ok()
    }
}

// =============================================================================
// Upstream Wire Types
// =============================================================================

/// A movie-shaped object as the catalog sends it.
///
/// Detail lookups carry `genres` (full objects); list, search and discover
/// endpoints carry `genre_ids`. Either may be missing or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovie {
    pub id: MovieId,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
    pub genres: Option<Vec<Genre>>,
    pub genre_ids: Option<Vec<GenreId>>,
}

impl From<RawMovie> for Movie {
    fn from(raw: RawMovie) -> Self {
        Movie {
            id: raw.id,
            title: raw.title.unwrap_or_default(),
            release_date: raw.release_date.unwrap_or_default(),
            vote_average: raw.vote_average.unwrap_or_default(),
            poster_path: raw.poster_path.unwrap_or_default(),
            overview: raw.overview.unwrap_or_default(),
            genres: normalize(raw.genres, raw.genre_ids),
        }
    }
}

/// Paged result envelope: `{page, results, total_pages, total_results}`
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

impl Page<RawMovie> {
    /// Convert every record on the page, keeping upstream order
    pub fn into_movies(self) -> Vec<Movie> {
        self.results.into_iter().map(Movie::from).collect()
    }
}

/// Response of the genre list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_record_keeps_full_genres() {
        let raw: RawMovie = serde_json::from_str(
            r#"{
                "id": 603,
                "title": "The Matrix",
                "overview": "A hacker learns the truth.",
                "release_date": "1999-03-30",
                "poster_path": "/matrix.jpg",
                "vote_average": 8.2,
                "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]
            }"#,
        )
        .unwrap();

        let movie = Movie::from(raw);
        assert_eq!(movie.id, 603);
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.release_year(), Some(1999));
        assert_eq!(
            movie.genres,
            vec![Genre::new(28, "Action"), Genre::new(878, "Science Fiction")]
        );
    }

    #[test]
    fn test_list_record_gets_placeholder_genres() {
        let raw: RawMovie = serde_json::from_str(
            r#"{"id": 27205, "title": "Inception", "genre_ids": [28, 878, 12]}"#,
        )
        .unwrap();

        let movie = Movie::from(raw);
        assert_eq!(movie.genres.len(), 3);
        assert!(movie.genres.iter().all(|g| !g.is_resolved()));
        assert_eq!(movie.genres[2].id, 12);
    }

    #[test]
    fn test_nulls_become_empty_fields() {
        let raw: RawMovie = serde_json::from_str(
            r#"{"id": 1, "title": "Untitled", "poster_path": null, "release_date": null, "genres": null}"#,
        )
        .unwrap();

        let movie = Movie::from(raw);
        assert_eq!(movie.poster_path, "");
        assert_eq!(movie.poster_url(), None);
        assert_eq!(movie.release_year(), None);
        assert_eq!(movie.vote_average, 0.0);
        assert!(movie.genres.is_empty());
    }

    #[test]
    fn test_poster_url() {
        let movie = Movie::from(RawMovie {
            id: 1,
            poster_path: Some("/abc.jpg".to_string()),
            ..Default::default()
        });
        assert_eq!(
            movie.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
    }

    #[test]
    fn test_page_envelope_and_missing_results() {
        let page: Page<RawMovie> = serde_json::from_str(
            r#"{"page": 1, "results": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}], "total_pages": 3, "total_results": 41}"#,
        )
        .unwrap();
        assert_eq!(page.total_results, 41);
        let movies = page.into_movies();
        assert_eq!(movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);

        let empty: Page<RawMovie> = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert!(empty.into_movies().is_empty());
    }

    #[test]
    fn test_movie_serializes_camel_case() {
        let movie = Movie::from(RawMovie {
            id: 7,
            title: Some("Seven".to_string()),
            release_date: Some("1995-09-22".to_string()),
            ..Default::default()
        });
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["releaseDate"], "1995-09-22");
        assert!(json.get("voteAverage").is_some());
        assert!(json["genres"].as_array().unwrap().is_empty());
    }
}
