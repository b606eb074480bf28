//! # Catalog Crate
//!
//! Read-only access to the third-party movie catalog (TMDB v3).
//!
//! ## Main Components
//!
//! - **types**: Public entities (`Movie`, `Genre`) and the upstream wire shapes
//! - **genres**: Reconciles the two upstream genre shapes into one list
//! - **client**: `CatalogClient`, one async GET per operation
//! - **error**: `CatalogError`, the single upstream-failure type
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogClient, CatalogConfig};
//!
//! let client = CatalogClient::new(CatalogConfig::new(api_key))?;
//!
//! let popular = client.popular().await?;
//! let matrix = client.search_first("The Matrix").await?;
//! let details = client.details(603).await?; // None when the id is unknown
//! ```

pub mod client;
pub mod error;
pub mod genres;
pub mod types;

pub use client::{CatalogClient, CatalogConfig};
pub use error::{CatalogError, Result};
pub use genres::{normalize, GenreField};
pub use types::{
    Genre, GenreId, GenreList, Movie, MovieId, Page, RawMovie, POSTER_BASE_URL,
    UNRESOLVED_GENRE_NAME,
};
