//! Recommendation query representation.

use serde::{Deserialize, Serialize};

/// Default number of semantic matches requested.
pub const DEFAULT_VECTOR_LIMIT: u32 = 4;

/// Default number of graph expansions requested per semantic match.
pub const DEFAULT_GRAPH_LIMIT: u32 = 4;

/// A `/recommend` request with all parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendQuery {
    /// Free-text description, sent as typed.
    pub query: String,
    /// Number of vector results.
    pub vector_limit: u32,
    /// Number of graph results per vector result.
    pub graph_limit: u32,
}

impl RecommendQuery {
    /// Creates a new query with default limits.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            vector_limit: DEFAULT_VECTOR_LIMIT,
            graph_limit: DEFAULT_GRAPH_LIMIT,
        }
    }

    /// Sets the vector result limit.
    pub fn with_vector_limit(mut self, limit: u32) -> Self {
        self.vector_limit = limit;
        self
    }

    /// Sets the graph result limit.
    pub fn with_graph_limit(mut self, limit: u32) -> Self {
        self.graph_limit = limit;
        self
    }

    /// Returns whether the query is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Query-string pairs in wire order.
    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("query", self.query.clone()),
            ("vector_limit", self.vector_limit.to_string()),
            ("graph_limit", self.graph_limit.to_string()),
        ]
    }
}
