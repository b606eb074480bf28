//! Seams between the aggregator and its upstream services.
//!
//! The aggregator only talks to these traits, so the real HTTP clients can be
//! swapped for in-memory fakes in tests.

use ai_client::{BestEffort, RecommenderClient};
use async_trait::async_trait;
use catalog::{CatalogClient, Genre, GenreId, Movie, MovieId, Result};

/// Read-only movie catalog.
///
/// `Send + Sync` so one instance can be shared behind an `Arc` across tasks.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn popular(&self) -> Result<Vec<Movie>>;

    async fn now_playing(&self) -> Result<Vec<Movie>>;

    /// Top-ranked match for `query`, `None` when nothing matches
    async fn search_first(&self, query: &str) -> Result<Option<Movie>>;

    async fn search_all(&self, query: &str) -> Result<Vec<Movie>>;

    async fn by_genre(&self, genre_id: GenreId) -> Result<Vec<Movie>>;

    /// `None` when the id is unknown to the catalog
    async fn details(&self, id: MovieId) -> Result<Option<Movie>>;

    async fn genres(&self) -> Result<Vec<Genre>>;
}

/// Language-model recommendations. Implementations never fail; they degrade.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn titles_from_prompt(&self, prompt: &str) -> BestEffort<Vec<String>>;

    async fn summarize(&self, title: &str, overview: &str) -> BestEffort<String>;
}

#[async_trait]
impl MovieCatalog for CatalogClient {
    async fn popular(&self) -> Result<Vec<Movie>> {
        CatalogClient::popular(self).await
    }

    async fn now_playing(&self) -> Result<Vec<Movie>> {
        CatalogClient::now_playing(self).await
    }

    async fn search_first(&self, query: &str) -> Result<Option<Movie>> {
        CatalogClient::search_first(self, query).await
    }

    async fn search_all(&self, query: &str) -> Result<Vec<Movie>> {
        CatalogClient::search_all(self, query).await
    }

    async fn by_genre(&self, genre_id: GenreId) -> Result<Vec<Movie>> {
        CatalogClient::by_genre(self, genre_id).await
    }

    async fn details(&self, id: MovieId) -> Result<Option<Movie>> {
        CatalogClient::details(self, id).await
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        CatalogClient::genres(self).await
    }
}

#[async_trait]
impl Recommender for RecommenderClient {
    async fn titles_from_prompt(&self, prompt: &str) -> BestEffort<Vec<String>> {
        RecommenderClient::titles_from_prompt(self, prompt).await
    }

    async fn summarize(&self, title: &str, overview: &str) -> BestEffort<String> {
        RecommenderClient::summarize(self, title, overview).await
    }
}
