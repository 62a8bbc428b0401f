//! End-to-end tests for the HTTP client and page session against a local
//! mock of the recommendation API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use movie_finder::card::placeholder_url;
use movie_finder::view::NO_RESULTS_MESSAGE;
use movie_finder::{
    ClientConfig, ClientError, HttpMovieClient, MovieApi, Page, RecommendQuery, RenderOutcome,
    Source, ViewKind,
};

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

/// Serves `router` on an ephemeral port and returns its base URL.
async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn trending_body() -> Value {
    json!([
        {"title": "Dune: Part Two", "genre": "Trending", "year": "2024", "score": 8.27,
         "source": "trending", "poster_url": null, "imdb_url": "https://www.imdb.com/title/tt15239678"},
        {"title": "Wicked", "genre": "Trending", "year": "2024", "score": 7.4,
         "source": "trending", "poster_url": null, "imdb_url": null}
    ])
}

fn recommend_body() -> Value {
    json!([
        {"title": "Arrival", "genre": "science fiction", "director": "Denis Villeneuve",
         "year": 2016.0, "score": 0.8234, "source": "vector"},
        {"title": "Contact", "genre": "science fiction", "year": 1997, "score": null, "source": "graph"},
        {"title": "Close Encounters of the Third Kind", "genre": "sci-fi", "year": 1977,
         "score": 0.7713, "source": "vector"},
        {"title": "E.T. the Extra-Terrestrial", "genre": "family", "year": 1982,
         "score": null, "source": "graph"}
    ])
}

fn api_router(seen: Seen) -> Router {
    Router::new()
        .route(
            "/",
            get(|| async { Json(json!({"message": "Movie Recommendation API is running!"})) }),
        )
        .route("/trending", get(|| async { Json(trending_body()) }))
        .route(
            "/recommend",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let seen = seen.clone();
                async move {
                    let query = params.get("query").cloned().unwrap_or_default();
                    seen.lock().unwrap().push(params);
                    match query.as_str() {
                        "aliens" => Json(json!([])),
                        _ => Json(recommend_body()),
                    }
                }
            }),
        )
}

fn page_for(base: &str) -> Page {
    let config = ClientConfig::new(base);
    Page::new(Arc::new(HttpMovieClient::new(&config).unwrap()), &config)
}

#[tokio::test]
async fn test_trending_feed_renders_grid() {
    let base = spawn(api_router(Seen::default())).await;
    let page = page_for(&base);

    assert_eq!(page.render().await, RenderOutcome::Loading { view: ViewKind::Trending });
    page.mount().await;

    let outcome = page.render().await;
    let cards = outcome.cards();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].title, "Dune: Part Two");
    assert_eq!(cards[0].badge.label, "Trending (Score: 8.3)");
    assert_eq!(cards[0].image_src(), placeholder_url("Dune: Part Two", Source::Trending));
    assert!(cards[0].is_link());
    assert!(!cards[1].is_link());
}

#[tokio::test]
async fn test_trending_server_error() {
    let router = Router::new().route(
        "/trending",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn(router).await;
    let page = page_for(&base);
    page.mount().await;

    let state = page.snapshot().await;
    assert!(!state.trending_loading);
    assert!(state.trending_items.is_empty());
    assert_eq!(state.error_message(), Some("500 Internal Server Error"));

    let outcome = page.render().await;
    assert!(matches!(outcome, RenderOutcome::Error { view: ViewKind::Trending, .. }));
    assert!(outcome.cards().is_empty());
}

#[tokio::test]
async fn test_recommend_sends_query_and_limits() {
    let seen = Seen::default();
    let base = spawn(api_router(seen.clone())).await;
    let page = page_for(&base);

    page.submit("sci-fi movie about AI & rebellion").await;

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["query"], "sci-fi movie about AI & rebellion");
    assert_eq!(seen[0]["vector_limit"], "4");
    assert_eq!(seen[0]["graph_limit"], "4");
}

#[tokio::test]
async fn test_recommend_grid_preserves_order() {
    let base = spawn(api_router(Seen::default())).await;
    let page = page_for(&base);
    page.mount().await;
    page.submit("friendly aliens").await;

    let outcome = page.render().await;
    assert_eq!(outcome.view(), ViewKind::Search);
    let titles: Vec<_> = outcome.cards().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Arrival",
            "Contact",
            "Close Encounters of the Third Kind",
            "E.T. the Extra-Terrestrial"
        ]
    );
    assert_eq!(outcome.cards()[0].badge.label, "Semantic Match (Score: 0.823)");
    assert_eq!(outcome.cards()[0].year, "2016");
    assert_eq!(outcome.cards()[1].badge.label, "Graph Recommendation");
}

#[tokio::test]
async fn test_recommend_empty_shows_no_movies_found() {
    let base = spawn(api_router(Seen::default())).await;
    let page = page_for(&base);
    page.mount().await;
    page.submit("aliens").await;

    let outcome = page.render().await;
    assert_eq!(outcome, RenderOutcome::Empty { view: ViewKind::Search });
    assert_eq!(outcome.message(), Some(NO_RESULTS_MESSAGE));
}

#[tokio::test]
async fn test_recommend_unavailable() {
    let router = Router::new().route(
        "/recommend",
        get(|| async {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"detail": "Recommender is not initialized"})),
            )
        }),
    );
    let base = spawn(router).await;
    let client = HttpMovieClient::new(&ClientConfig::new(&base)).unwrap();

    let err = client.recommend(&RecommendQuery::new("heist")).await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 503, .. }));
    assert_eq!(err.to_string(), "503 Service Unavailable");
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let router = Router::new().route("/trending", get(|| async { "not json" }));
    let base = spawn(router).await;
    let client = HttpMovieClient::new(&ClientConfig::new(&base)).unwrap();

    let err = client.trending().await.unwrap_err();
    assert!(matches!(err, ClientError::Parse(_)));
}

#[tokio::test]
async fn test_unknown_source_is_parse_error() {
    let router = Router::new().route(
        "/trending",
        get(|| async { Json(json!([{"title": "Heat", "source": "popular", "score": 1.0}])) }),
    );
    let base = spawn(router).await;
    let client = HttpMovieClient::new(&ClientConfig::new(&base)).unwrap();
    assert!(matches!(client.trending().await, Err(ClientError::Parse(_))));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let page = page_for(&format!("http://{}", addr));
    page.submit("heist").await;

    let state = page.snapshot().await;
    assert!(!state.search_loading);
    let message = state.search_error.unwrap();
    assert!(message.starts_with("HTTP request failed"), "{}", message);
}

#[tokio::test]
async fn test_health() {
    let base = spawn(api_router(Seen::default())).await;
    let client = HttpMovieClient::new(&ClientConfig::new(&base)).unwrap();
    let message = tokio_test::assert_ok!(client.health().await);
    assert_eq!(message, "Movie Recommendation API is running!");
}

#[tokio::test]
async fn test_base_url_path_prefix() {
    let base = spawn(Router::new().nest("/api", api_router(Seen::default()))).await;
    let page = page_for(&format!("{}/api", base));
    page.mount().await;
    assert_eq!(page.render().await.cards().len(), 2);
}

#[tokio::test]
async fn test_broken_posters_fall_back_to_placeholder() {
    let router = Router::new()
        .route("/posters/ok.jpg", get(|| async { "jpeg bytes" }))
        .route("/posters/gone.jpg", get(|| async { StatusCode::NOT_FOUND }));
    let poster_base = spawn(router).await;

    let body = json!([
        {"title": "Alien", "score": 0.91, "source": "vector",
         "poster_url": format!("{}/posters/ok.jpg", poster_base)},
        {"title": "Aliens", "score": null, "source": "graph",
         "poster_url": format!("{}/posters/gone.jpg", poster_base)}
    ]);
    let api = Router::new().route(
        "/recommend",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    let base = spawn(api).await;
    let page = page_for(&base);
    page.submit("space horror").await;

    assert_eq!(page.check_posters().await, 1);
    let outcome = page.render().await;
    assert_eq!(
        outcome.cards()[0].image_src(),
        format!("{}/posters/ok.jpg", poster_base)
    );
    assert_eq!(
        outcome.cards()[1].image_src(),
        placeholder_url("Aliens", Source::Graph)
    );
}
