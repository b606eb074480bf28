//! Simple harness for the movie aggregator.
//!
//! Reads configuration from the environment (or `.env`), then exercises the
//! catalog and the prompt-driven recommendation path once.

use anyhow::{Context, Result};
use tracing::info;

use server::{AppConfig, MovieAggregator};

const SAMPLE_PROMPT: &str = "a mind-bending science fiction thriller about dreams";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,server=debug")),
        )
        .init();

    info!("Starting movie-search harness");

    let config = AppConfig::from_env().context("Loading configuration")?;
    info!(
        "Catalog at {} ({}), AI model {}",
        config.catalog.base_url, config.catalog.language, config.ai.model
    );
    let aggregator = MovieAggregator::from_config(&config)?;

    let popular = aggregator
        .popular_movies()
        .await
        .context("Fetching popular movies")?;
    info!("Received {} popular movies:", popular.len());
    for (i, movie) in popular.iter().take(5).enumerate() {
        info!(
            "{}. {} ({}) - {:.1}/10",
            i + 1,
            movie.title,
            movie
                .release_year()
                .map(|y| y.to_string())
                .unwrap_or_else(|| "????".to_string()),
            movie.vote_average
        );
    }

    info!("Asking for recommendations: {:?}", SAMPLE_PROMPT);
    let recommended = aggregator.recommend_by_prompt(SAMPLE_PROMPT).await;
    for movie in &recommended {
        info!("   {} [id {}]", movie.title, movie.id);
    }

    if let Some(first) = recommended.first() {
        if let Some(enriched) = aggregator.details_with_recommendation(first.id).await? {
            info!("AI on {}: {}", enriched.movie.title, enriched.ai_recommendation);
        }
    }

    Ok(())
}
