use std::time::Duration;

use cinescope::catalog::{CatalogClient, CatalogError, Query, TmdbClient};
use wiremock::{
    matchers::{header, method, path, query_param, query_param_is_missing},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// A TMDB-shaped list payload with `count` movies.
fn movie_list_body(page: u32, count: usize) -> serde_json::Value {
    let results: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "id": 1000 + i,
                "title": format!("Movie {i}"),
                "poster_path": if i % 2 == 0 { serde_json::Value::String(format!("/poster{i}.jpg")) } else { serde_json::Value::Null },
                "release_date": "1999-03-31",
                "vote_average": 7.5,
                "adult": false,
                "overview": "ignored"
            })
        })
        .collect();
    serde_json::json!({
        "page": page,
        "results": results,
        "total_pages": 42,
        "total_results": 840
    })
}

fn client_for(server: &MockServer) -> TmdbClient {
    TmdbClient::new("test-key".to_string(), Some(server.uri()))
}

// ============================================================================
// Request Shape
// ============================================================================

#[tokio::test]
async fn test_empty_term_lists_latest_without_query_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param_is_missing("query"))
        .and(query_param("page", "1"))
        .and(query_param("include_adult", "false"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_list_body(1, 20)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = client_for(&mock_server)
        .fetch_movies(&Query::latest(1, false))
        .await
        .unwrap();

    assert_eq!(page.page, 1);
    assert_eq!(page.len(), 20);
    assert!(page.has_more());
    assert_eq!(page.movies[0].title, "Movie 0");
    assert_eq!(page.movies[0].release_year(), Some(1999));
    assert_eq!(page.movies[1].poster_path, None);
}

#[tokio::test]
async fn test_search_term_is_url_encoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "fast & furious 7?"))
        .and(query_param("page", "2"))
        .and(query_param("include_adult", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_list_body(2, 4)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = client_for(&mock_server)
        .fetch_movies(&Query::new("fast & furious 7?", 2, true))
        .await
        .unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.len(), 4);
    assert!(!page.has_more());
}

#[tokio::test]
async fn test_next_page_changes_only_page_param() {
    let mock_server = MockServer::start().await;

    for page in [1u32, 2] {
        Mock::given(method("GET"))
            .and(path("/discover/movie"))
            .and(query_param("page", page.to_string()))
            .and(query_param("include_adult", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(movie_list_body(page, 20)))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let client = client_for(&mock_server);
    let first = client.fetch_movies(&Query::latest(1, false)).await.unwrap();
    let second = client.fetch_movies(&Query::latest(2, false)).await.unwrap();
    assert_eq!((first.page, second.page), (1, 2));
}

// ============================================================================
// Error Taxonomy
// ============================================================================

#[tokio::test]
async fn test_non_success_status_is_catalog_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string("Invalid API key: You must be granted a valid key."),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .fetch_movies(&Query::latest(1, false))
        .await;

    match result {
        Err(CatalogError::Catalog(message)) => {
            assert!(message.starts_with("HTTP 401"));
            assert!(message.contains("Invalid API key"));
        }
        other => panic!("expected catalog error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .expect(1) // Exactly one attempt
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .fetch_movies(&Query::new("alien", 1, false))
        .await;

    assert!(matches!(result, Err(CatalogError::Catalog(_))));
}

#[tokio::test]
async fn test_malformed_payload_is_catalog_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"page\": 1, \"results\": \"nope\"}"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .fetch_movies(&Query::latest(1, false))
        .await;

    match result {
        Err(CatalogError::Catalog(message)) => assert!(message.starts_with("malformed payload")),
        other => panic!("expected catalog error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing listens on port 1
    let client = TmdbClient::new("test-key".to_string(), Some("http://127.0.0.1:1".to_string()));

    let result = client.fetch_movies(&Query::latest(1, false)).await;

    assert!(matches!(result, Err(CatalogError::Network(_))));
}

#[tokio::test]
async fn test_transport_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(movie_list_body(1, 1))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server)
        .with_timeout(Duration::from_millis(200))
        .unwrap();
    let result = client.fetch_movies(&Query::latest(1, false)).await;

    assert!(matches!(result, Err(CatalogError::Network(_))));
}
