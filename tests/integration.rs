//! Smoke tests against a running recommendation API.
//!
//! These tests are marked with `#[ignore]` by default because they require
//! a live backend (with its vector index, graph database and TMDB key) and
//! may be slow.
//!
//! Run with: `MOVIE_FINDER_API_URL=http://127.0.0.1:8000 cargo test --test integration -- --ignored`

use std::sync::Arc;

use movie_finder::{ClientConfig, HttpMovieClient, MovieApi, MovieItem, Page, RecommendQuery, Source};

fn live_client() -> HttpMovieClient {
    let config = ClientConfig::from_env().unwrap();
    HttpMovieClient::new(&config).unwrap()
}

/// Helper to run one query and print what came back.
async fn recommend(query: &str, vector_limit: u32, graph_limit: u32) -> Vec<MovieItem> {
    let client = live_client();
    let query = RecommendQuery::new(query)
        .with_vector_limit(vector_limit)
        .with_graph_limit(graph_limit);
    let items = client.recommend(&query).await.unwrap();
    println!("'{}' returned {} recommendations", query.query, items.len());
    for (i, item) in items.iter().enumerate() {
        println!(
            "  {}. {} | {} | Year: {} [Source: {}]",
            i + 1,
            item.title,
            item.genre_label(),
            item.year_label(),
            item.source
        );
    }
    items
}

#[tokio::test]
#[ignore]
async fn test_live_health() {
    let message = live_client().health().await.unwrap();
    assert!(!message.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_live_trending() {
    let items = live_client().trending().await.unwrap();
    println!("Trending returned {} items", items.len());
    assert!(items.iter().all(|item| item.source == Source::Trending));
}

#[tokio::test]
#[ignore]
async fn test_live_recommend_action_bombay() {
    let items = recommend("an action flick set in bombay", 3, 5).await;
    assert!(!items.is_empty(), "Recommender should return results");
}

#[tokio::test]
#[ignore]
async fn test_live_recommend_vector_first() {
    let items = recommend("period film set in world war 1", 4, 4).await;
    let first = items.first().expect("Recommender should return results");
    assert_eq!(first.source, Source::Vector);
    assert!(first.score.is_some());
}

#[tokio::test]
#[ignore]
async fn test_live_page_session() {
    let config = ClientConfig::from_env().unwrap();
    let page = Page::new(Arc::new(HttpMovieClient::new(&config).unwrap()), &config);
    page.mount().await;
    page.submit("a fun sci-fi movie about aliens visiting earth").await;

    let outcome = page.render().await;
    println!("{}", movie_finder::render::compact(&outcome));
    assert!(page.snapshot().await.searched);
}
