//! Card rendering for a single recommendation item.

use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::item::NOT_AVAILABLE;
use crate::{MovieItem, Source};

/// Placeholder image service, sized to a poster aspect ratio.
pub const PLACEHOLDER_BASE: &str = "https://placehold.co/500x750";

/// Delay between consecutive card reveals.
pub const REVEAL_STEP: Duration = Duration::from_millis(100);

/// Background color of the placeholder image for a source.
pub fn placeholder_color(source: Source) -> &'static str {
    match source {
        Source::Vector => "4F46E5",
        Source::Graph => "059669",
        Source::Trending => "DC2626",
    }
}

/// Deterministic placeholder image URL for a title and source.
pub fn placeholder_url(title: &str, source: Source) -> String {
    let slug = title
        .split(' ')
        .map(|word| urlencoding::encode(word).into_owned())
        .collect::<Vec<_>>()
        .join("+");
    format!(
        "{}/{}/FFFFFF?text={}",
        PLACEHOLDER_BASE,
        placeholder_color(source),
        slug
    )
}

/// Icon shown in a card badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeIcon {
    Semantic,
    Recommendation,
    Trending,
}

impl BadgeIcon {
    /// Terminal glyph for the icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            BadgeIcon::Semantic => "🧠",
            BadgeIcon::Recommendation => "🔗",
            BadgeIcon::Trending => "🔥",
        }
    }
}

/// Source badge: icon plus label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub icon: BadgeIcon,
    pub label: String,
}

impl Badge {
    /// Builds the badge for an item.
    ///
    /// Vector and trending items must carry a score; when the API omits it the
    /// score renders as `N/A` and a warning is logged.
    pub fn for_item(item: &MovieItem) -> Self {
        if !item.has_required_score() {
            warn!(
                "Item '{}' from {} source has no score",
                item.title, item.source
            );
        }
        let score = |precision: usize| match item.finite_score() {
            Some(score) => format!("{:.*}", precision, score),
            None => NOT_AVAILABLE.to_string(),
        };

        match item.source {
            Source::Vector => Self {
                icon: BadgeIcon::Semantic,
                label: format!("Semantic Match (Score: {})", score(3)),
            },
            Source::Graph => Self {
                icon: BadgeIcon::Recommendation,
                label: "Graph Recommendation".to_string(),
            },
            Source::Trending => Self {
                icon: BadgeIcon::Trending,
                label: format!("Trending (Score: {})", score(1)),
            },
        }
    }
}

/// Hyperlink wrapping a whole card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub target: &'static str,
    pub rel: &'static str,
}

impl Link {
    /// Link that opens in a new browsing context without referrer or opener.
    pub fn new_tab(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            target: "_blank",
            rel: "noopener noreferrer",
        }
    }
}

/// A rendered card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    /// Position in the grid, preserved from the response order.
    pub index: usize,
    pub title: String,
    pub genre: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub badge: Badge,
    image_src: String,
    placeholder_src: String,
    /// Present when the item has an IMDb page.
    pub link: Option<Link>,
    #[serde(skip)]
    pub reveal_delay: Duration,
}

impl Card {
    /// Renders the card for an item at a grid position.
    pub fn from_item(item: &MovieItem, index: usize) -> Self {
        let placeholder_src = placeholder_url(&item.title, item.source);
        let image_src = item
            .poster()
            .map(str::to_string)
            .unwrap_or_else(|| placeholder_src.clone());

        Self {
            index,
            title: item.title.clone(),
            genre: item.genre_label().to_string(),
            year: item.year_label().to_string(),
            director: item.director.clone(),
            source: item.source,
            score: item.finite_score(),
            badge: Badge::for_item(item),
            image_src,
            placeholder_src,
            link: item.imdb().map(Link::new_tab),
            reveal_delay: REVEAL_STEP * index as u32,
        }
    }

    /// Current image source.
    pub fn image_src(&self) -> &str {
        &self.image_src
    }

    /// Placeholder image source for this card.
    pub fn placeholder_src(&self) -> &str {
        &self.placeholder_src
    }

    /// Returns whether the placeholder is currently shown.
    pub fn shows_placeholder(&self) -> bool {
        self.image_src == self.placeholder_src
    }

    /// Swaps the image to the placeholder after a load failure.
    pub fn on_image_error(&mut self) {
        if !self.shows_placeholder() {
            self.image_src = self.placeholder_src.clone();
        }
    }

    /// Returns whether the card is a hyperlink.
    pub fn is_link(&self) -> bool {
        self.link.is_some()
    }
}
