//! Spotify catalog contract tests.
//!
//! These tests verify the HTTP request shape sent to the Web API and the
//! token endpoint, response decoding with defaults, and error mapping.

use recall_search::spotify::{ClientCredentials, ClientCredentialsProvider, StaticTokenProvider, TokenProvider};
use recall_search::{CatalogSource, MockCatalog, SearchConfig, SearchError, SpotifyCatalog, TrackSearch};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> SearchConfig {
    SearchConfig {
        api_base_url: format!("{}/v1/", server.uri()),
        token_url: format!("{}/api/token", server.uri()),
        mock_latency_ms: (0, 0),
        ..Default::default()
    }
}

fn static_catalog(server: &MockServer) -> SpotifyCatalog<StaticTokenProvider> {
    SpotifyCatalog::new(StaticTokenProvider::new("test-token"), &config_for(server))
        .expect("catalog")
}

fn search_body() -> serde_json::Value {
    json!({
        "tracks": {
            "total": 3,
            "items": [
                {
                    "id": "t-karaoke",
                    "name": "Lemon (Karaoke)",
                    "popularity": 95,
                    "artists": [{"id": "ar1", "name": "Karaoke Stars"}],
                    "album": {"id": "al9", "name": "Karaoke Hits", "images": []}
                },
                {
                    "id": "t-lemon",
                    "name": "Lemon",
                    "popularity": 80,
                    "artists": [{"id": "ar2", "name": "米津玄師"}],
                    "album": {
                        "id": "al1",
                        "name": "Lemon",
                        "images": [{"url": "https://img/lemon.jpg", "width": 640, "height": 640}]
                    }
                },
                {
                    "id": "t-sparse",
                    "name": "Lemon Tree"
                }
            ]
        }
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Request format
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn track_search_sends_expected_query_and_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "lemon"))
        .and(query_param("type", "track"))
        .and(query_param("limit", "20"))
        .and(query_param("market", "US"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let hits = static_catalog(&server)
        .search_tracks("lemon", 20)
        .await
        .expect("search should succeed");
    assert_eq!(hits.len(), 3);
}

#[tokio::test]
async fn artist_top_tracks_uses_encoded_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/artists/ar2/top-tracks"))
        .and(query_param("market", "US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": [{"id": "t-lemon", "name": "Lemon", "popularity": 80}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tracks = static_catalog(&server)
        .artist_top_tracks("ar2")
        .await
        .expect("top tracks");
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].popularity, 80);
}

// ────────────────────────────────────────────────────────────────────────────
// Response decoding
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn sparse_fields_fall_back_to_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&server)
        .await;

    let hits = static_catalog(&server)
        .search_tracks("lemon", 20)
        .await
        .expect("search");
    let lemon = hits.iter().find(|h| h.id == "t-lemon").expect("lemon");
    assert_eq!(lemon.album_art_url.as_deref(), Some("https://img/lemon.jpg"));
    assert_eq!(lemon.primary_artist_id.as_deref(), Some("ar2"));

    let sparse = hits.iter().find(|h| h.id == "t-sparse").expect("sparse");
    assert_eq!(sparse.popularity, 0);
    assert!(sparse.artist_names.is_empty());
    assert_eq!(sparse.album_title, "");
}

#[tokio::test]
async fn missing_tracks_section_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let hits = static_catalog(&server)
        .search_tracks("nothing", 20)
        .await
        .expect("search");
    assert!(hits.is_empty());
}

#[tokio::test]
async fn album_tracks_merge_metadata_and_listing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/albums/al1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "al1",
            "name": "STRAY SHEEP",
            "release_date": "2020-08-05",
            "artists": [{"id": "ar2", "name": "米津玄師"}],
            "images": [{"url": "https://img/stray.jpg"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/albums/al1/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "t1", "name": "カンパネルラ", "artists": [{"id": "ar2", "name": "米津玄師"}]},
                {"id": "t2", "name": "Lemon", "artists": [{"id": "ar2", "name": "米津玄師"}]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let album = static_catalog(&server).album_tracks("al1").await.expect("album");
    assert_eq!(album.album.title, "STRAY SHEEP");
    assert_eq!(album.album.release_date.as_deref(), Some("2020-08-05"));
    assert_eq!(album.tracks.len(), 2);
    assert!(album
        .tracks
        .iter()
        .all(|t| t.album_id.as_deref() == Some("al1")
            && t.album_art_url.as_deref() == Some("https://img/stray.jpg")));
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = static_catalog(&server)
        .search_tracks("lemon", 20)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Parse(_)), "got {err}");
}

// ────────────────────────────────────────────────────────────────────────────
// Error handling and fallback
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn non_success_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = static_catalog(&server)
        .search_tracks("lemon", 20)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Status { status: 429, .. }), "got {err}");
}

#[tokio::test]
async fn service_ranks_live_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let service = TrackSearch::new(static_catalog(&server), config).expect("service");

    let first = service.suggest("Lemon").await.expect("suggest");
    let ids: Vec<&str> = first.iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec!["t-lemon", "t-sparse"]);

    // Second call is served from the cache; the mock expects exactly one hit.
    let second = service.suggest("  lemon ").await.expect("suggest");
    assert_eq!(first, second);
}

#[tokio::test]
async fn failing_catalog_falls_back_to_offline_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let service = TrackSearch::new(static_catalog(&server), config_for(&server)).expect("service");
    let suggestions = service.suggest("pretender").await.expect("fallback");
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].id(), "mock-3");
}

#[tokio::test]
async fn failing_catalog_without_fallback_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = SearchConfig {
        fallback_to_mock: false,
        ..config_for(&server)
    };
    let service = TrackSearch::new(static_catalog(&server), config).expect("service");
    let err = service.suggest("pretender").await.unwrap_err();
    assert!(matches!(err, SearchError::Status { status: 503, .. }));
}

// ────────────────────────────────────────────────────────────────────────────
// Token provider
// ────────────────────────────────────────────────────────────────────────────

fn credentials() -> ClientCredentials {
    ClientCredentials {
        client_id: "client".into(),
        client_secret: "secret".into(),
    }
}

#[tokio::test]
async fn token_is_exchanged_once_and_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header_exists("authorization"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = ClientCredentialsProvider::new(credentials(), &config_for(&server)).expect("provider");
    let first = provider.token().await.expect("token");
    let second = provider.token().await.expect("token");
    assert_eq!(first.value, "fresh-token");
    assert_eq!(first, second);
}

#[tokio::test]
async fn short_lived_token_is_refreshed() {
    let server = MockServer::start().await;

    // Lifetime below the refresh margin: every call exchanges again.
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "short",
            "expires_in": 60
        })))
        .expect(2)
        .mount(&server)
        .await;

    let provider = ClientCredentialsProvider::new(credentials(), &config_for(&server)).expect("provider");
    provider.token().await.expect("token");
    provider.token().await.expect("token");
}

#[tokio::test]
async fn rejected_credentials_are_auth_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = ClientCredentialsProvider::new(credentials(), &config_for(&server)).expect("provider");
    let err = provider.token().await.unwrap_err();
    assert!(matches!(err, SearchError::Auth(_)), "got {err}");
}

#[tokio::test]
async fn catalog_uses_provider_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "issued",
            "expires_in": 3600
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(header("authorization", "Bearer issued"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": {"items": [{"id": "ar-lisa", "name": "LiSA", "followers": {"total": 10}}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let provider = ClientCredentialsProvider::new(credentials(), &config).expect("provider");
    let catalog = SpotifyCatalog::new(provider, &config).expect("catalog");
    let artists = catalog.search_artists("lisa", 5).await.expect("artists");
    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].followers, 10);
}

#[tokio::test]
async fn mock_catalog_needs_no_server() {
    let catalog = MockCatalog::instant();
    let hits = catalog.search_tracks("lemon", 5).await.expect("search");
    assert!(!hits.is_empty());
}
