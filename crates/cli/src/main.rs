use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::time::{Duration, Instant};

use ai_client::{AiConfig, BestEffort};
use catalog::{CatalogConfig, Genre, GenreId, Movie, MovieId};
use server::{AppConfig, MovieAggregator, MovieWithRecommendation};

/// movie-search - browse the movie catalog with AI recommendations
#[derive(Parser)]
#[command(name = "movie-search")]
#[command(about = "Query a movie catalog and get AI-powered recommendations", long_about = None)]
struct Cli {
    #[command(flatten)]
    upstream: UpstreamArgs,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct UpstreamArgs {
    /// Catalog (TMDB) API key
    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    tmdb_api_key: String,

    /// Catalog base URL
    #[arg(long, env = "TMDB_BASE_URL", default_value = catalog::client::DEFAULT_BASE_URL)]
    tmdb_base_url: String,

    /// Locale for catalog data and AI summaries
    #[arg(long, env = "TMDB_LANGUAGE", default_value = catalog::client::DEFAULT_LANGUAGE)]
    language: String,

    /// Chat-completion API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    /// Chat-completion endpoint URL
    #[arg(long, env = "OPENAI_URL", default_value = ai_client::DEFAULT_URL)]
    openai_url: String,

    /// Model used for recommendations
    #[arg(long, env = "OPENAI_MODEL", default_value = ai_client::DEFAULT_MODEL)]
    model: String,

    /// Sampling temperature for title suggestions
    #[arg(long, env = "OPENAI_TEMPERATURE", default_value_t = ai_client::DEFAULT_TEMPERATURE)]
    temperature: f64,

    /// Token budget for title suggestions
    #[arg(long, env = "OPENAI_MAX_TOKENS", default_value_t = ai_client::DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Request timeout in seconds for both services
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,
}

impl UpstreamArgs {
    fn into_config(self) -> AppConfig {
        let timeout = Duration::from_secs(self.timeout_secs);
        AppConfig {
            catalog: CatalogConfig::new(self.tmdb_api_key)
                .with_base_url(self.tmdb_base_url)
                .with_language(self.language.clone())
                .with_timeout(timeout),
            ai: AiConfig::new(self.openai_api_key)
                .with_url(self.openai_url)
                .with_model(self.model)
                .with_sampling(self.temperature, self.max_tokens)
                .with_language(self.language)
                .with_timeout(timeout),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show currently popular movies
    Popular,

    /// Show movies now playing in theatres
    NowPlaying,

    /// List the catalog's genres
    Genres,

    /// Show movies in a genre
    ByGenre {
        /// Genre ID (see `genres`)
        #[arg(long)]
        genre_id: GenreId,
    },

    /// Search for movies by title
    Search {
        /// Free-text query
        #[arg(long)]
        query: String,
    },

    /// Show details for one movie
    Details {
        #[arg(long)]
        id: MovieId,
    },

    /// Show details for one movie with an AI-written blurb
    DetailsAi {
        #[arg(long)]
        id: MovieId,
    },

    /// Recommend catalog movies from a natural-language prompt
    Recommend {
        /// What you are in the mood for
        #[arg(long)]
        prompt: String,
    },

    /// Show the raw AI title suggestions for a prompt
    Titles {
        #[arg(long)]
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;
    let aggregator = MovieAggregator::from_config(&cli.upstream.into_config())?;
    let start = Instant::now();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Popular => {
            let movies = aggregator.popular_movies().await.context("Fetching popular movies")?;
            print_movies("Popular movies", &movies, json)?;
        }
        Commands::NowPlaying => {
            let movies = aggregator.now_playing().await.context("Fetching now playing")?;
            print_movies("Now playing", &movies, json)?;
        }
        Commands::Genres => {
            let genres = aggregator.genres().await.context("Fetching genres")?;
            print_genres(&genres, json)?;
        }
        Commands::ByGenre { genre_id } => {
            let movies = aggregator
                .movies_by_genre(genre_id)
                .await
                .with_context(|| format!("Fetching movies for genre {}", genre_id))?;
            print_movies(&format!("Movies in genre {}", genre_id), &movies, json)?;
        }
        Commands::Search { query } => {
            let movies = aggregator
                .search_multi(&query)
                .await
                .with_context(|| format!("Searching for '{}'", query))?;
            print_movies(&format!("Search results for '{}'", query), &movies, json)?;
        }
        Commands::Details { id } => {
            let movie = aggregator
                .movie_details(id)
                .await
                .with_context(|| format!("Fetching details for movie {}", id))?;
            match movie {
                Some(movie) => print_details(&movie, None, json)?,
                None => println!("{}", format!("Movie {} not found", id).yellow()),
            }
        }
        Commands::DetailsAi { id } => {
            let enriched = aggregator
                .details_with_recommendation(id)
                .await
                .with_context(|| format!("Fetching details for movie {}", id))?;
            match enriched {
                Some(enriched) => print_enriched(&enriched, json)?,
                None => println!("{}", format!("Movie {} not found", id).yellow()),
            }
        }
        Commands::Recommend { prompt } => {
            let movies = aggregator.recommend_by_prompt(&prompt).await;
            print_movies(&format!("Recommendations for '{}'", prompt), &movies, json)?;
        }
        Commands::Titles { prompt } => {
            let titles = aggregator.titles_for_prompt(&prompt).await;
            print_titles(titles, json)?;
        }
    }

    if !json {
        println!("{}", format!("({:.2?})", start.elapsed()).dimmed());
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_genres(genres: &[Genre]) -> String {
    genres
        .iter()
        .map(|g| {
            if g.is_resolved() {
                g.name.clone()
            } else {
                format!("#{}", g.id)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print a numbered movie list
fn print_movies(header: &str, movies: &[Movie], json: bool) -> Result<()> {
    if json {
        return print_json(movies);
    }

    println!("{}", header.bold().blue());
    if movies.is_empty() {
        println!("  {}", "No movies found".yellow());
        return Ok(());
    }
    for (i, movie) in movies.iter().enumerate() {
        let year = movie
            .release_year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| "????".to_string());
        println!(
            "{}. {} ({}) [{}] - {:.1}/10  {}",
            (i + 1).to_string().green(),
            movie.title,
            year,
            format_genres(&movie.genres),
            movie.vote_average,
            format!("id {}", movie.id).dimmed()
        );
    }
    Ok(())
}

fn print_genres(genres: &[Genre], json: bool) -> Result<()> {
    if json {
        return print_json(genres);
    }

    println!("{}", "Genres".bold().blue());
    for genre in genres {
        println!("{}{:>6}  {}", "• ".green(), genre.id, genre.name);
    }
    Ok(())
}

fn print_details(movie: &Movie, ai_text: Option<&str>, json: bool) -> Result<()> {
    if json {
        return print_json(movie);
    }

    println!("{}", movie.title.bold().blue());
    println!("{}Released: {}", "• ".green(), movie.release_date);
    println!("{}Rating: {:.1}/10", "• ".green(), movie.vote_average);
    println!("{}Genres: {}", "• ".green(), format_genres(&movie.genres));
    if let Some(url) = movie.poster_url() {
        println!("{}Poster: {}", "• ".green(), url);
    }
    println!();
    println!("{}", movie.overview);
    if let Some(text) = ai_text {
        println!();
        println!("{} {}", "AI:".bold().cyan(), text);
    }
    Ok(())
}

fn print_enriched(enriched: &MovieWithRecommendation, json: bool) -> Result<()> {
    if json {
        return print_json(enriched);
    }
    print_details(&enriched.movie, Some(&enriched.ai_recommendation), false)
}

fn print_titles(titles: BestEffort<Vec<String>>, json: bool) -> Result<()> {
    if let Some(cause) = titles.cause() {
        eprintln!("{}", format!("AI gave no usable answer: {:?}", cause).yellow());
    }
    let titles = titles.into_value();
    if json {
        return print_json(&titles);
    }

    println!("{}", "Suggested titles".bold().blue());
    for title in &titles {
        println!("{}{}", "• ".green(), title);
    }
    Ok(())
}
