//! Recommendation item types as delivered by the API.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Label used for any optional field the API left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Which retrieval path produced an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Embedding similarity match.
    Vector,
    /// Knowledge graph expansion.
    Graph,
    /// Popularity feed, independent of any query.
    Trending,
}

impl Source {
    /// Returns the wire name of the source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Vector => "vector",
            Source::Graph => "graph",
            Source::Trending => "trending",
        }
    }

    /// Returns whether items from this source must carry a score.
    pub fn requires_score(&self) -> bool {
        matches!(self, Source::Vector | Source::Trending)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single movie returned by `/trending` or `/recommend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieItem {
    /// Movie title.
    pub title: String,
    /// Genre label.
    #[serde(default)]
    pub genre: Option<String>,
    /// Release year, normalised to text.
    #[serde(default, deserialize_with = "deserialize_year")]
    pub year: Option<String>,
    /// Director, present on vector matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    /// Retrieval path.
    pub source: Source,
    /// Similarity score (vector) or vote average (trending).
    #[serde(default)]
    pub score: Option<f64>,
    /// Poster image URL.
    #[serde(default)]
    pub poster_url: Option<String>,
    /// IMDb page URL.
    #[serde(default)]
    pub imdb_url: Option<String>,
}

impl MovieItem {
    /// Creates a new item with only the required fields set.
    pub fn new(title: impl Into<String>, source: Source) -> Self {
        Self {
            title: title.into(),
            genre: None,
            year: None,
            director: None,
            source,
            score: None,
            poster_url: None,
            imdb_url: None,
        }
    }

    /// Sets the genre.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Sets the year.
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Sets the director.
    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    /// Sets the score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Sets the poster URL.
    pub fn with_poster(mut self, url: impl Into<String>) -> Self {
        self.poster_url = Some(url.into());
        self
    }

    /// Sets the IMDb URL.
    pub fn with_imdb(mut self, url: impl Into<String>) -> Self {
        self.imdb_url = Some(url.into());
        self
    }

    /// Genre for display, `N/A` when absent.
    pub fn genre_label(&self) -> &str {
        non_blank(self.genre.as_deref()).unwrap_or(NOT_AVAILABLE)
    }

    /// Year for display, `N/A` when absent.
    pub fn year_label(&self) -> &str {
        non_blank(self.year.as_deref()).unwrap_or(NOT_AVAILABLE)
    }

    /// Poster URL if one was supplied and is not blank.
    pub fn poster(&self) -> Option<&str> {
        non_blank(self.poster_url.as_deref())
    }

    /// IMDb URL if one was supplied and is not blank.
    pub fn imdb(&self) -> Option<&str> {
        non_blank(self.imdb_url.as_deref())
    }

    /// Score if one was sent and is a finite number.
    pub fn finite_score(&self) -> Option<f64> {
        self.score.filter(|s| s.is_finite())
    }

    /// Returns `false` when the source requires a score and none was sent.
    pub fn has_required_score(&self) -> bool {
        !self.source.requires_score() || self.finite_score().is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Years arrive as strings from the trending feed, integers from the graph
/// and floats such as `2005.0` from the vector index.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawYear {
    Text(String),
    Int(i64),
    Float(f64),
}

fn deserialize_year<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawYear> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|year| match year {
        RawYear::Text(text) => {
            let text = text.trim();
            let text = text.strip_suffix(".0").unwrap_or(text);
            (!text.is_empty()).then(|| text.to_string())
        }
        RawYear::Int(value) => Some(value.to_string()),
        RawYear::Float(value) if value.is_finite() => Some((value.trunc() as i64).to_string()),
        RawYear::Float(_) => None,
    }))
}
