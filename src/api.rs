//! Recommendation API trait and its reqwest implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::{ClientConfig, ClientError, MovieItem, RecommendQuery, Result};

/// The recommendation backend as seen by the controllers.
///
/// `HttpMovieClient` is the production implementation; tests substitute an
/// in-memory one.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Fetches the trending feed (`GET /trending`).
    async fn trending(&self) -> Result<Vec<MovieItem>>;

    /// Fetches hybrid recommendations (`GET /recommend`).
    async fn recommend(&self, query: &RecommendQuery) -> Result<Vec<MovieItem>>;

    /// Returns the backend's health message (`GET /`).
    async fn health(&self) -> Result<String>;

    /// Reports whether a poster image can be loaded.
    async fn poster_reachable(&self, _url: &str) -> bool {
        true
    }
}

#[derive(Deserialize)]
struct HealthResponse {
    message: String,
}

/// HTTP client for the recommendation API.
pub struct HttpMovieClient {
    client: Client,
    base: Url,
}

impl HttpMovieClient {
    /// Creates a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base: config.base()?,
        })
    }

    /// Creates a client with a custom reqwest client.
    pub fn with_client(client: Client, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client,
            base: config.base()?,
        })
    }

    /// Returns the normalised base URL.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    /// Builds the `/recommend` URL for a query.
    pub fn recommend_url(&self, query: &RecommendQuery) -> Result<Url> {
        let mut url = self.endpoint("recommend")?;
        url.query_pairs_mut().extend_pairs(query.params());
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::from_status(status));
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Parse(e.to_string()))
    }
}

#[async_trait]
impl MovieApi for HttpMovieClient {
    async fn trending(&self) -> Result<Vec<MovieItem>> {
        let items: Vec<MovieItem> = self.get_json(self.endpoint("trending")?).await?;
        debug!("Trending feed returned {} items", items.len());
        Ok(items)
    }

    async fn recommend(&self, query: &RecommendQuery) -> Result<Vec<MovieItem>> {
        if query.is_blank() {
            return Err(ClientError::InvalidQuery("query is blank".to_string()));
        }
        let items: Vec<MovieItem> = self.get_json(self.recommend_url(query)?).await?;
        debug!("Query '{}' returned {} items", query.query, items.len());
        Ok(items)
    }

    async fn health(&self) -> Result<String> {
        let response: HealthResponse = self.get_json(self.endpoint("")?).await?;
        Ok(response.message)
    }

    async fn poster_reachable(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Poster {} failed to load: {}", url, e);
                false
            }
        }
    }
}
