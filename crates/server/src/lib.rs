//! Server crate for the movie-search service.
//!
//! This crate contains the aggregator that composes the movie catalog and the
//! AI recommender, plus the configuration that wires them to real endpoints.

pub mod aggregator;
pub mod config;
pub mod traits;

pub use aggregator::{MovieAggregator, MovieWithRecommendation};
pub use config::{AppConfig, ConfigError};
pub use traits::{MovieCatalog, Recommender};
