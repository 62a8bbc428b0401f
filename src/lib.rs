//! # movie-finder
//!
//! Client library for a hybrid movie recommendation API.
//!
//! The API combines semantic matches over plot embeddings with knowledge
//! graph expansion and exposes a trending feed. This crate provides:
//!
//! - A typed async client for `/trending`, `/recommend` and the health root
//! - A page session with a one-shot trending fetch and a search controller
//!   that drops out-of-order responses
//! - Render-state selection (loading, error, empty, grid) and card rendering
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use movie_finder::{ClientConfig, HttpMovieClient, Page};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::new("http://127.0.0.1:8000");
//!     let page = Page::new(Arc::new(HttpMovieClient::new(&config)?), &config);
//!
//!     page.mount().await;
//!     page.submit("a fun sci-fi movie about aliens visiting earth").await;
//!
//!     for card in page.render().await.cards() {
//!         println!("{}: {}", card.title, card.badge.label);
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod config;
mod controller;
mod error;
mod item;
mod query;
mod state;

pub mod card;
pub mod render;
pub mod view;

pub use api::{HttpMovieClient, MovieApi};
pub use card::{Badge, BadgeIcon, Card, Link};
pub use config::ClientConfig;
pub use controller::{Page, PendingSearch, SearchController, SearchOutcome, TrendingFetcher};
pub use error::{ClientError, Result};
pub use item::{MovieItem, Source};
pub use query::RecommendQuery;
pub use state::{ViewKind, ViewState};
pub use view::RenderOutcome;
