//! # Movie Aggregator
//!
//! This module composes the catalog and the recommender into the operations
//! callers actually use:
//! 1. Plain catalog queries (popular, now playing, genre, search, details)
//! 2. Details enriched with an AI-written blurb
//! 3. Prompt-driven recommendations: AI titles -> catalog lookups -> verified movies
//!
//! Catalog failures propagate as `CatalogError`. The AI paths never fail because
//! of the AI: the recommender degrades to empty/fallback values, and per-title
//! catalog misses are filtered out.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use ai_client::{BestEffort, RecommenderClient};
use catalog::{CatalogClient, Genre, GenreId, Movie, MovieId};

use crate::config::AppConfig;
use crate::traits::{MovieCatalog, Recommender};

/// A movie paired with an AI-generated summary.
///
/// Only produced by [`MovieAggregator::details_with_recommendation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieWithRecommendation {
    pub movie: Movie,
    pub ai_recommendation: String,
}

/// Main entry point that coordinates the catalog and the recommender
#[derive(Clone)]
pub struct MovieAggregator {
    catalog: Arc<dyn MovieCatalog>,
    recommender: Arc<dyn Recommender>,
}

impl MovieAggregator {
    pub fn new(catalog: Arc<dyn MovieCatalog>, recommender: Arc<dyn Recommender>) -> Self {
        Self {
            catalog,
            recommender,
        }
    }

    /// Build the aggregator over the real HTTP clients
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let catalog =
            CatalogClient::new(config.catalog.clone()).context("Creating catalog client")?;
        let recommender =
            RecommenderClient::new(config.ai.clone()).context("Creating AI client")?;
        Ok(Self::new(Arc::new(catalog), Arc::new(recommender)))
    }

    pub async fn popular_movies(&self) -> catalog::Result<Vec<Movie>> {
        self.catalog.popular().await
    }

    pub async fn now_playing(&self) -> catalog::Result<Vec<Movie>> {
        self.catalog.now_playing().await
    }

    pub async fn movies_by_genre(&self, genre_id: GenreId) -> catalog::Result<Vec<Movie>> {
        self.catalog.by_genre(genre_id).await
    }

    pub async fn search_multi(&self, query: &str) -> catalog::Result<Vec<Movie>> {
        self.catalog.search_all(query).await
    }

    pub async fn movie_details(&self, id: MovieId) -> catalog::Result<Option<Movie>> {
        self.catalog.details(id).await
    }

    pub async fn genres(&self) -> catalog::Result<Vec<Genre>> {
        self.catalog.genres().await
    }

    /// Raw AI title suggestions, without catalog verification
    pub async fn titles_for_prompt(&self, prompt: &str) -> BestEffort<Vec<String>> {
        self.recommender.titles_from_prompt(prompt).await
    }

    /// Movie details plus an AI summary.
    ///
    /// Returns `Ok(None)` for an unknown id without calling the recommender.
    pub async fn details_with_recommendation(
        &self,
        id: MovieId,
    ) -> catalog::Result<Option<MovieWithRecommendation>> {
        let Some(movie) = self.catalog.details(id).await? else {
            debug!("Movie {} not found, skipping AI summary", id);
            return Ok(None);
        };

        let summary = self
            .recommender
            .summarize(&movie.title, &movie.overview)
            .await;
        if summary.is_degraded() {
            warn!("Using fallback summary for movie {}", id);
        }

        Ok(Some(MovieWithRecommendation {
            movie,
            ai_recommendation: summary.into_value(),
        }))
    }

    /// Turn a natural-language prompt into catalog-verified movies.
    ///
    /// Titles the catalog cannot match are dropped. Lookups run concurrently but
    /// the result keeps the AI's title order; a failed lookup only loses its own title.
    pub async fn recommend_by_prompt(&self, prompt: &str) -> Vec<Movie> {
        let start_time = Instant::now();

        let suggestions = self.recommender.titles_from_prompt(prompt).await;
        if let BestEffort::Degraded { cause, .. } = &suggestions {
            warn!("No AI titles for prompt: {:?}", cause);
        }
        let titles = suggestions.into_value();
        info!("AI suggested {} titles", titles.len());

        let lookups = titles.iter().map(|title| self.catalog.search_first(title));
        let results = join_all(lookups).await;

        let movies: Vec<Movie> = titles
            .iter()
            .zip(results)
            .filter_map(|(title, result)| match result {
                Ok(Some(movie)) => Some(movie),
                Ok(None) => {
                    debug!("No catalog match for suggested title '{}'", title);
                    None
                }
                Err(e) => {
                    warn!("Catalog lookup for '{}' failed, dropping it: {}", title, e);
                    None
                }
            })
            .collect();

        info!(
            "Matched {} of {} suggested titles in {:.2?}",
            movies.len(),
            titles.len(),
            start_time.elapsed()
        );
        movies
    }
}
