//! Error types for the catalog crate.
//!
//! Every variant here is an upstream failure: the request could not be sent,
//! the catalog answered with a non-success status, or the body did not decode.
//! "Not found" is never an error; operations report it as `None` or an empty list.

use thiserror::Error;

/// Errors that can occur while talking to the movie catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The HTTP client could not be constructed
    #[error("Failed to build catalog HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    /// Network-level failure (connect, timeout, body read)
    ///
    /// The request URL is stripped from the inner error because it carries the API key.
    #[error("Catalog request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The catalog answered with a non-success status
    #[error("Catalog returned HTTP {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },

    /// The response body was not the shape we expected
    #[error("Malformed catalog response from {endpoint}: {source}")]
    Malformed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    pub(crate) fn transport(endpoint: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            endpoint: endpoint.to_string(),
            source: source.without_url(),
        }
    }

    /// Endpoint path the failure was observed on, if any
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::ClientSetup(_) => None,
            Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Malformed { endpoint, .. } => Some(endpoint),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
