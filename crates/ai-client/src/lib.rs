//! Recommendation client for the chat-completion service.
//!
//! This crate provides a Rust client for an OpenAI-compatible chat-completion
//! endpoint. It handles:
//! - Building the two prompt templates (title brainstorming, short summaries)
//! - Sending the request and extracting the first completion
//! - Degrading to an empty list or fallback sentence when the service fails
//!
//! The public recommendation operations never return an error. They return a
//! [`BestEffort`] that says whether the value came from the model or is a
//! fallback, and why.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, info, warn};

pub mod chat;

pub use chat::{ChatCompletionResponse, ChatMessage, ChatRequest, Role, parse_titles};

pub const DEFAULT_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const DEFAULT_LANGUAGE: &str = "da-DK";

/// Sentence returned by [`RecommenderClient::summarize`] when no summary could be generated
pub const FALLBACK_SUMMARY: &str = "Could not generate an AI recommendation for this movie.";

/// Summaries are factual, so they run cooler and shorter than title brainstorming
const SUMMARY_TEMPERATURE: f64 = 0.3;
const SUMMARY_MAX_TOKENS: u32 = 100;

/// Errors that can occur when calling the chat-completion service
#[derive(Error, Debug)]
pub enum AiClientError {
    #[error("Failed to build AI HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error("AI request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("AI service returned HTTP {status}")]
    Status { status: u16 },

    #[error("Invalid response from AI service: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}

/// Why a [`BestEffort`] fell back
#[derive(Debug)]
pub enum DegradeCause {
    /// The call succeeded but the model said nothing usable
    EmptyCompletion,
    /// The call itself failed
    Failed(AiClientError),
}

/// Outcome of a recommendation call that must not fail its caller.
#[derive(Debug)]
pub enum BestEffort<T> {
    /// The model produced a usable answer
    Answered(T),
    /// A documented fallback value, with the reason
    Degraded { fallback: T, cause: DegradeCause },
}

impl<T> BestEffort<T> {
    pub fn value(&self) -> &T {
        match self {
            BestEffort::Answered(value) => value,
            BestEffort::Degraded { fallback, .. } => fallback,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            BestEffort::Answered(value) => value,
            BestEffort::Degraded { fallback, .. } => fallback,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, BestEffort::Degraded { .. })
    }

    pub fn cause(&self) -> Option<&DegradeCause> {
        match self {
            BestEffort::Answered(_) => None,
            BestEffort::Degraded { cause, .. } => Some(cause),
        }
    }
}

/// Connection and sampling settings for the chat-completion service
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    /// Full endpoint URL, including the `/chat/completions` path
    pub url: String,
    pub model: String,
    /// Sampling temperature for title generation
    pub temperature: f64,
    /// Token budget for title generation
    pub max_tokens: u32,
    /// Locale the summaries are written in
    pub language: String,
    pub timeout: Duration,
}

impl AiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            url: DEFAULT_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_sampling(mut self, temperature: f64, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
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

/// Client for the chat-completion service.
#[derive(Debug, Clone)]
pub struct RecommenderClient {
    http: reqwest::Client,
    config: AiConfig,
}

impl RecommenderClient {
    pub fn new(config: AiConfig) -> Result<Self, AiClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AiClientError::ClientSetup)?;
        info!("AI client targeting {} with model {}", config.url, config.model);
        Ok(Self { http, config })
    }

    /// Ask the model for 3-5 movie titles matching `prompt`.
    ///
    /// Degrades to an empty list on any failure or an empty completion.
    pub async fn titles_from_prompt(&self, prompt: &str) -> BestEffort<Vec<String>> {
        let request = self.title_request(prompt);

        match self.complete(&request).await {
            Ok(Some(content)) => {
                let titles = parse_titles(&content);
                if titles.is_empty() {
                    warn!("AI completion contained no titles: {:?}", content);
                    BestEffort::Degraded {
                        fallback: Vec::new(),
                        cause: DegradeCause::EmptyCompletion,
                    }
                } else {
                    debug!("AI suggested {} titles: {:?}", titles.len(), titles);
                    BestEffort::Answered(titles)
                }
            }
            Ok(None) => {
                warn!("AI returned an empty completion for title suggestions");
                BestEffort::Degraded {
                    fallback: Vec::new(),
                    cause: DegradeCause::EmptyCompletion,
                }
            }
            Err(e) => {
                warn!("Title suggestion failed, returning no titles: {}", e);
                BestEffort::Degraded {
                    fallback: Vec::new(),
                    cause: DegradeCause::Failed(e),
                }
            }
        }
    }

    /// Write a short (max 50 words) fun-fact blurb for a movie.
    ///
    /// Degrades to [`FALLBACK_SUMMARY`] on any failure or an empty completion.
    pub async fn summarize(&self, title: &str, overview: &str) -> BestEffort<String> {
        let request = self.summary_request(title, overview);

        match self.complete(&request).await {
            Ok(Some(summary)) => BestEffort::Answered(summary),
            Ok(None) => {
                warn!("AI returned an empty summary for '{}'", title);
                BestEffort::Degraded {
                    fallback: FALLBACK_SUMMARY.to_string(),
                    cause: DegradeCause::EmptyCompletion,
                }
            }
            Err(e) => {
                warn!("Summary for '{}' failed, using fallback: {}", title, e);
                BestEffort::Degraded {
                    fallback: FALLBACK_SUMMARY.to_string(),
                    cause: DegradeCause::Failed(e),
                }
            }
        }
    }

    /// Send one chat request and return the first completion text.
    ///
    /// `Ok(None)` means the service answered but with no usable content.
    pub async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, AiClientError> {
        debug!(
            "Sending chat request: model={}, messages={}, temperature={}, max_tokens={}",
            request.model,
            request.messages.len(),
            request.temperature,
            request.max_tokens
        );

        let response = self
            .http
            .post(&self.config.url)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("AI request failed: {}", e);
                AiClientError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("AI service returned HTTP {}", status.as_u16());
            return Err(AiClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(AiClientError::Transport)?;
        let completion: ChatCompletionResponse =
            serde_json::from_slice(&body).map_err(|e| {
                error!("Could not decode AI response: {}", e);
                AiClientError::InvalidResponse(e)
            })?;

        Ok(completion.first_content().map(String::from))
    }

    fn title_request(&self, prompt: &str) -> ChatRequest {
        let instruction = format!(
            "You are a movie recommender. \
             The user wants to watch a movie matching this description: '{}'. \
             Suggest 3-5 movie titles that fit well. \
             Return only the titles, separated by commas, with no other text. \
             Example: 'The Matrix, Inception, Blade Runner 2049'",
            prompt
        );

        ChatRequest::new(&self.config.model)
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .system(instruction)
            .user(prompt)
    }

    fn summary_request(&self, title: &str, overview: &str) -> ChatRequest {
        let instruction = format!(
            "You are a movie recommender. \
             Write a short, catchy text with a fun fact or technical detail about the movie \
             for film enthusiasts, in the language of the locale {}. \
             Focus on its core elements but keep it short (max 50 words).",
            self.config.language
        );

        ChatRequest::new(&self.config.model)
            .temperature(SUMMARY_TEMPERATURE)
            .max_tokens(SUMMARY_MAX_TOKENS)
            .system(instruction)
            .user(format!("Movie title: {}\nOverview: {}", title, overview))
    }

    /// Get the endpoint URL this client talks to.
    pub fn service_url(&self) -> &str {
        &self.config.url
    }
}
