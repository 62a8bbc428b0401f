//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::query::{DEFAULT_GRAPH_LIMIT, DEFAULT_VECTOR_LIMIT};
use crate::{ClientError, Result};

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "MOVIE_FINDER_API_URL";
/// Environment variable holding the vector result limit.
pub const ENV_VECTOR_LIMIT: &str = "MOVIE_FINDER_VECTOR_LIMIT";
/// Environment variable holding the graph result limit.
pub const ENV_GRAPH_LIMIT: &str = "MOVIE_FINDER_GRAPH_LIMIT";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "MOVIE_FINDER_TIMEOUT_SECS";

/// Configuration for the recommendation client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the recommendation API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Number of vector results requested per search.
    #[serde(default = "default_vector_limit")]
    pub vector_limit: u32,
    /// Number of graph results requested per search.
    #[serde(default = "default_graph_limit")]
    pub graph_limit: u32,
    /// Request timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_vector_limit() -> u32 {
    DEFAULT_VECTOR_LIMIT
}

fn default_graph_limit() -> u32 {
    DEFAULT_GRAPH_LIMIT
}

fn default_user_agent() -> String {
    concat!("movie-finder/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            vector_limit: default_vector_limit(),
            graph_limit: default_graph_limit(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration pointing at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Loads defaults overridden by `MOVIE_FINDER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads defaults overridden by values from `lookup`.
    ///
    /// Only numeric values are checked here. Call [`ClientConfig::validate`]
    /// once any later overrides have been applied.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_API_URL) {
            config.base_url = url;
        }
        if let Some(raw) = lookup(ENV_VECTOR_LIMIT) {
            config.vector_limit = parse_number(ENV_VECTOR_LIMIT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_GRAPH_LIMIT) {
            config.graph_limit = parse_number(ENV_GRAPH_LIMIT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = Some(parse_number(ENV_TIMEOUT_SECS, &raw)?);
        }
        Ok(config)
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-search limits.
    pub fn with_limits(mut self, vector_limit: u32, graph_limit: u32) -> Self {
        self.vector_limit = vector_limit;
        self.graph_limit = graph_limit;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Request timeout as a duration.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Parses the base URL, forcing a trailing slash so endpoint joins keep
    /// any path prefix.
    pub fn base(&self) -> Result<Url> {
        let mut url = Url::parse(self.base_url.trim())?;
        if url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "base URL '{}' cannot carry endpoint paths",
                self.base_url
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        self.base()?;
        if self.timeout_secs == Some(0) {
            return Err(ClientError::Config("timeout must be at least one second".into()));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("{} must be a non-negative integer, got '{}'", key, raw)))
}
