//! HTTP client for the movie catalog (TMDB v3).
//!
//! Every operation is a single read-only GET. Responses are decoded into the
//! loose wire types and converted into `Movie`/`Genre` on the way out.
//! There is no retry and no caching: each call is a fresh round trip.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::error::{CatalogError, Result};
use crate::types::{Genre, GenreId, GenreList, Movie, MovieId, Page, RawMovie};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "da-DK";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the catalog
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub api_key: String,
    pub base_url: String,
    /// Locale sent as the `language` parameter on every request
    pub language: String,
    pub timeout: Duration,
}

impl CatalogConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the movie catalog.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(CatalogError::ClientSetup)?;
        Ok(Self { http, config })
    }

    /// Movies currently popular on the catalog
    pub async fn popular(&self) -> Result<Vec<Movie>> {
        self.get_movies("/movie/popular", &[]).await
    }

    /// Movies currently in theatres
    pub async fn now_playing(&self) -> Result<Vec<Movie>> {
        self.get_movies("/movie/now_playing", &[]).await
    }

    /// Best-ranked search hit for `query`, or `None` when nothing matches
    pub async fn search_first(&self, query: &str) -> Result<Option<Movie>> {
        let movies = self.search_all(query).await?;
        Ok(movies.into_iter().next())
    }

    /// All search hits for `query` on the first result page
    pub async fn search_all(&self, query: &str) -> Result<Vec<Movie>> {
        self.get_movies("/search/movie", &[("query", query)]).await
    }

    /// Discover movies tagged with the given genre
    pub async fn by_genre(&self, genre_id: GenreId) -> Result<Vec<Movie>> {
        let genre_id = genre_id.to_string();
        self.get_movies("/discover/movie", &[("with_genres", genre_id.as_str())])
            .await
    }

    /// Full details for one movie. A 404 from the catalog is `Ok(None)`.
    pub async fn details(&self, id: MovieId) -> Result<Option<Movie>> {
        let path = format!("/movie/{}", id);
        let raw: Option<RawMovie> = self.get_json(&path, &[]).await?;
        Ok(raw.map(Movie::from))
    }

    /// The catalog's genre list (id + localized name)
    pub async fn genres(&self) -> Result<Vec<Genre>> {
        let path = "/genre/movie/list";
        match self.get_json::<GenreList>(path, &[]).await? {
            Some(list) => Ok(list.genres),
            None => Err(not_found_as_failure(path)),
        }
    }

    /// Fetch a paged movie listing. A 404 here is a failure, not an empty page.
    async fn get_movies(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<Movie>> {
        let start = Instant::now();
        let page: Page<RawMovie> = self
            .get_json(path, params)
            .await?
            .ok_or_else(|| not_found_as_failure(path))?;

        let movies = page.into_movies();
        info!(
            "Fetched {} movies from {} in {:.2?}",
            movies.len(),
            path,
            start.elapsed()
        );
        Ok(movies)
    }

    /// GET `path` with the standard parameters plus `params`.
    ///
    /// Returns `Ok(None)` on 404 so callers decide whether absence is normal.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        debug!("GET {} (language={})", path, self.config.language);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("language", self.config.language.as_str()),
            ])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                let err = CatalogError::transport(path, e);
                error!("{}", err);
                err
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("Catalog has nothing at {}", path);
            return Ok(None);
        }
        if !status.is_success() {
            error!("Catalog returned HTTP {} for {}", status.as_u16(), path);
            return Err(CatalogError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CatalogError::transport(path, e))?;

        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|source| {
                error!("Could not decode catalog response from {}: {}", path, source);
                CatalogError::Malformed {
                    endpoint: path.to_string(),
                    source,
                }
            })
    }
}

fn not_found_as_failure(path: &str) -> CatalogError {
    CatalogError::Status {
        endpoint: path.to_string(),
        status: StatusCode::NOT_FOUND.as_u16(),
    }
}
