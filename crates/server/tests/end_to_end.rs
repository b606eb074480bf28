//! End-to-end tests for the aggregator.
//!
//! These wire the real HTTP clients to mock catalog and AI servers and check
//! that the composed operations behave the same way over the wire.

use std::sync::Arc;

use ai_client::{AiConfig, RecommenderClient};
use catalog::{CatalogClient, CatalogConfig, Genre};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;
use server::MovieAggregator;

fn build_aggregator(catalog_server: &ServerGuard, ai_server: &ServerGuard) -> MovieAggregator {
    let catalog = CatalogClient::new(
        CatalogConfig::new("tmdb-key")
            .with_base_url(catalog_server.url())
            .with_language("en-US"),
    )
    .expect("catalog client");
    let recommender = RecommenderClient::new(
        AiConfig::new("openai-key")
            .with_url(format!("{}/v1/chat/completions", ai_server.url()))
            .with_model("gpt-test")
            .with_sampling(0.7, 150),
    )
    .expect("ai client");

    MovieAggregator::new(Arc::new(catalog), Arc::new(recommender))
}

fn completion(content: &str) -> String {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]}).to_string()
}

async fn mock_search(server: &mut ServerGuard, query: &str, body: serde_json::Value) -> Mock {
    server
        .mock("GET", "/search/movie")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("api_key".into(), "tmdb-key".into()),
            Matcher::UrlEncoded("query".into(), query.into()),
        ]))
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_recommend_by_prompt_over_http() {
    let mut catalog_server = Server::new_async().await;
    let mut ai_server = Server::new_async().await;

    let ai = ai_server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer openai-key")
        .match_body(Matcher::PartialJson(json!({"max_tokens": 150})))
        .with_status(200)
        .with_body(completion("Inception, Made Up Movie, Paprika"))
        .create_async()
        .await;

    let _inception = mock_search(
        &mut catalog_server,
        "Inception",
        json!({"page": 1, "results": [
            {"id": 27205, "title": "Inception", "genre_ids": [28, 878]},
            {"id": 1, "title": "Inception: The Cobol Job", "genre_ids": []}
        ]}),
    )
    .await;
    let _made_up = mock_search(
        &mut catalog_server,
        "Made Up Movie",
        json!({"page": 1, "results": [], "total_pages": 0, "total_results": 0}),
    )
    .await;
    let _paprika = mock_search(
        &mut catalog_server,
        "Paprika",
        json!({"page": 1, "results": [{"id": 4977, "title": "Paprika", "genre_ids": [16]}]}),
    )
    .await;

    let aggregator = build_aggregator(&catalog_server, &ai_server);
    let movies = aggregator.recommend_by_prompt("dream heists").await;

    ai.assert_async().await;
    let ids: Vec<u32> = movies.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![27205, 4977]);
    assert_eq!(movies[0].genres, vec![Genre::unresolved(28), Genre::unresolved(878)]);
}

#[tokio::test]
async fn test_recommend_by_prompt_survives_ai_outage() {
    let catalog_server = Server::new_async().await;
    let mut ai_server = Server::new_async().await;
    let _ai = ai_server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .create_async()
        .await;

    let aggregator = build_aggregator(&catalog_server, &ai_server);
    let movies = aggregator.recommend_by_prompt("anything").await;

    assert!(movies.is_empty());
}

#[tokio::test]
async fn test_details_with_recommendation_over_http() {
    let mut catalog_server = Server::new_async().await;
    let mut ai_server = Server::new_async().await;

    let _details = catalog_server
        .mock("GET", "/movie/348")
        .with_status(200)
        .with_body(
            json!({
                "id": 348, "title": "Alien", "overview": "A crew meets a creature.",
                "release_date": "1979-05-25", "vote_average": 8.1, "poster_path": "/alien.jpg",
                "genres": [{"id": 27, "name": "Horror"}, {"id": 878, "name": "Science Fiction"}]
            })
            .to_string(),
        )
        .create_async()
        .await;
    let summary = ai_server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({"temperature": 0.3, "max_tokens": 100})))
        .with_status(200)
        .with_body(completion("The alien design came from H.R. Giger."))
        .create_async()
        .await;

    let aggregator = build_aggregator(&catalog_server, &ai_server);
    let enriched = aggregator
        .details_with_recommendation(348)
        .await
        .expect("catalog ok")
        .expect("movie exists");

    summary.assert_async().await;
    assert_eq!(enriched.movie.title, "Alien");
    assert!(enriched.movie.genres.iter().all(Genre::is_resolved));
    assert_eq!(enriched.ai_recommendation, "The alien design came from H.R. Giger.");
}

#[tokio::test]
async fn test_details_with_recommendation_unknown_id_never_calls_ai() {
    let mut catalog_server = Server::new_async().await;
    let mut ai_server = Server::new_async().await;

    let _details = catalog_server
        .mock("GET", "/movie/0")
        .with_status(404)
        .create_async()
        .await;
    let ai = ai_server
        .mock("POST", "/v1/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let aggregator = build_aggregator(&catalog_server, &ai_server);
    let result = aggregator.details_with_recommendation(0).await.unwrap();

    assert!(result.is_none());
    ai.assert_async().await;
}

#[tokio::test]
async fn test_catalog_outage_surfaces_on_plain_queries() {
    let mut catalog_server = Server::new_async().await;
    let ai_server = Server::new_async().await;
    let _popular = catalog_server
        .mock("GET", "/movie/popular")
        .with_status(502)
        .create_async()
        .await;

    let aggregator = build_aggregator(&catalog_server, &ai_server);
    let err = aggregator.popular_movies().await.unwrap_err();

    assert!(matches!(err, catalog::CatalogError::Status { status: 502, .. }));
}
