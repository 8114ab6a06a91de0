//! End-to-end tests driving the HTTP router over in-memory catalogs

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use catalog_search::config::Settings;
use catalog_search::entities::{Catalog, EntityKind, EntityRegistry, HttpSource, MemorySource};
use catalog_search::network::HttpClient;
use catalog_search::web::{create_router, AppState, TITLE_LANGUAGE_HEADER};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATALOG: &str = r#"
anime:
  - id: 1
    slug: naruto
    canonical_title: Naruto
    synopsis: A young ninja seeks recognition.
    poster_image: https://static.example.com/anime/poster_images/000/000/001/original/poster.jpg?1400000000
    episode_count: 220
    episode_length: 23
    show_type: TV
    age_rating: PG
  - id: 2
    slug: naruto-shippuden
    canonical_title: Naruto Shippuden
    poster_image: https://static.example.com/anime/poster_images/000/000/002/original/poster.jpg
    show_type: TV
  - id: 3
    slug: attack-on-titan
    canonical_title: Shingeki no Kyojin
    english_title: Attack on Titan
    romaji_title: Shingeki no Kyojin
    poster_image: https://static.example.com/anime/poster_images/000/000/003/original/poster.jpg
manga:
  - id: 10
    slug: berserk
    canonical_title: Berserk
    poster_image: https://static.example.com/manga/poster_images/000/000/010/original/cover.jpg
    volume_count: 41
users:
  - id: 20
    name: naruto_fan
groups:
  - id: 30
    slug: bebop-crew
    name: Bebop Crew
"#;

fn memory_registry() -> EntityRegistry {
    let catalog = Catalog::from_yaml(CATALOG).unwrap();
    let mut registry = EntityRegistry::new();
    for kind in EntityKind::ALL {
        registry.register_source(Arc::new(MemorySource::from_catalog(kind, &catalog)));
    }
    registry
}

fn app(registry: EntityRegistry) -> Router {
    create_router(AppState::new(Settings::default(), registry).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    get_with_header(app, uri, None).await
}

async fn get_with_header(
    app: &Router,
    uri: &str,
    header: Option<(&str, &str)>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().uri(uri);
    if let Some((name, value)) = header {
        request = request.header(name, value);
    }

    let response = app
        .clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_instant_search_across_all_scopes() {
    let app = app(memory_registry());

    let (status, body) = get(&app, "/search?query=naruto&scope=all&depth=instant").await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0]["type"], "anime");
    assert_eq!(records[0]["title"], "Naruto");
    assert_eq!(records[0]["link"], "naruto");
    assert_eq!(
        records[0]["image"],
        "https://static.example.com/anime/poster_images/000/000/001/small/poster.jpg?1400000000"
    );
    assert_eq!(records[0]["badges"][1]["content"], "220ep \u{2022} 23min");

    // Equal ranks keep scope order: anime before users
    assert_eq!(records[1]["title"], "Naruto Shippuden");
    assert_eq!(records[1]["badges"][1]["content"], "ep \u{2022} min");
    assert_eq!(records[2]["type"], "user");
    assert_eq!(records[2]["link"], "naruto_fan");
}

#[tokio::test]
async fn test_stop_terms_and_fallback() {
    let app = app(memory_registry());

    let (status, body) = get(
        &app,
        "/search.json?query=Attack%20on%20Titan%20Season%203&scope=anime&depth=instant",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Shingeki no Kyojin");
    assert_eq!(body[0]["link"], "attack-on-titan");
}

#[tokio::test]
async fn test_title_language_header() {
    let app = app(memory_registry());

    let (status, body) = get_with_header(
        &app,
        "/search?query=kyojin&scope=anime&depth=full",
        Some((TITLE_LANGUAGE_HEADER, "english")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Attack on Titan");
    assert!(body[0]["image"].as_str().unwrap().contains("/original/"));
}

#[tokio::test]
async fn test_validation_errors() {
    let app = app(memory_registry());

    let (status, body) = get(&app, "/search?scope=all&depth=instant").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "param is missing or the value is empty: query");

    let (status, body) = get(&app, "/search?query=%20%20&scope=all&depth=instant").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "param is missing or the value is empty: query");

    let (status, body) = get(&app, "/search?query=naruto&scope=everything&depth=instant").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid scope");

    let (status, body) = get(&app, "/search?query=naruto&scope=all&depth=deep").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid depth");

    let (status, body) = get(&app, "/search?query=spike&scope=characters&depth=instant").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Invalid scope");
}

#[tokio::test]
async fn test_no_results() {
    let app = app(memory_registry());

    let (status, body) = get(&app, "/search?query=nonexistentxyz&scope=all&depth=instant").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No results");

    let (_, stats) = get(&app, "/stats").await;
    assert_eq!(stats["total_searches"], 1);
    assert_eq!(stats["empty_searches"], 1);
    assert_eq!(stats["fallbacks"], 1);
}

#[tokio::test]
async fn test_legacy_full_type() {
    let app = app(memory_registry());

    let (legacy_status, legacy) = get(&app, "/search?query=naruto&type=full").await;
    let (status, explicit) = get(&app, "/search?query=naruto&scope=all&depth=instant").await;

    assert_eq!(legacy_status, StatusCode::OK);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(legacy, explicit);
}

#[tokio::test]
async fn test_element_depth() {
    let app = app(memory_registry());

    let (status, body) = get(&app, "/search?query=berserk&scope=manga&depth=element").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["slug"], "berserk");
    assert_eq!(body[0]["volume_count"], 41);
    assert!(body[0].get("badges").is_none());
    assert!(body[0]["poster_image"].as_str().unwrap().contains("/original/"));

    let (status, body) = get(&app, "/search?query=nonexistentxyz&scope=anime&depth=element").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));

    let (status, _) = get(&app, "/search?query=bebop&scope=groups&depth=element").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_backend_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut registry = memory_registry();
    let client = HttpClient::new().unwrap();
    registry.register_source(Arc::new(HttpSource::new(
        EntityKind::Group,
        &server.uri(),
        client,
    )));
    let app = app(registry);

    let (status, body) = get(&app, "/search?query=bebop&scope=all&depth=instant").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("group"));

    let (_, stats) = get(&app, "/stats").await;
    assert_eq!(stats["sources"]["group"]["errors"], 1);
}

#[tokio::test]
async fn test_health() {
    let app = app(memory_registry());

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], catalog_search::VERSION);
    assert_eq!(body["sources"].as_array().unwrap().len(), 5);
}
