//! Render-state selection for the results area.

use serde::Serialize;

use crate::card::Card;
use crate::state::{ViewKind, ViewState};

/// Shown while the trending feed loads.
pub const TRENDING_LOADING_MESSAGE: &str = "Loading trending movies...";
/// Shown while a search is in flight.
pub const SEARCH_LOADING_MESSAGE: &str = "Finding recommendations...";
/// Shown when a search returned nothing.
pub const NO_RESULTS_MESSAGE: &str = "No movies found. Try a different description.";
/// Shown when the trending feed is empty.
pub const NO_TRENDING_MESSAGE: &str = "No trending movies right now.";

/// One of the mutually exclusive outcomes for the active view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum RenderOutcome {
    Loading { view: ViewKind },
    Error { view: ViewKind, message: String },
    Empty { view: ViewKind },
    Grid { view: ViewKind, cards: Vec<Card> },
}

impl RenderOutcome {
    /// The view this outcome belongs to.
    pub fn view(&self) -> ViewKind {
        match self {
            RenderOutcome::Loading { view }
            | RenderOutcome::Error { view, .. }
            | RenderOutcome::Empty { view }
            | RenderOutcome::Grid { view, .. } => *view,
        }
    }

    /// Cards in the grid, empty for every other outcome.
    pub fn cards(&self) -> &[Card] {
        match self {
            RenderOutcome::Grid { cards, .. } => cards,
            _ => &[],
        }
    }

    /// Status line for non-grid outcomes.
    pub fn message(&self) -> Option<&str> {
        match self {
            RenderOutcome::Loading { view: ViewKind::Trending } => Some(TRENDING_LOADING_MESSAGE),
            RenderOutcome::Loading { view: ViewKind::Search } => Some(SEARCH_LOADING_MESSAGE),
            RenderOutcome::Error { message, .. } => Some(message.as_str()),
            RenderOutcome::Empty { view: ViewKind::Trending } => Some(NO_TRENDING_MESSAGE),
            RenderOutcome::Empty { view: ViewKind::Search } => Some(NO_RESULTS_MESSAGE),
            RenderOutcome::Grid { .. } => None,
        }
    }
}

/// Selects the outcome for the active view: loading beats error, error beats
/// empty, and a grid is only produced for a non-empty list.
pub fn select(state: &ViewState) -> RenderOutcome {
    let view = state.active_view();

    if state.is_loading() {
        return RenderOutcome::Loading { view };
    }

    if let Some(message) = state.error_message() {
        return RenderOutcome::Error {
            view,
            message: message.to_string(),
        };
    }

    let items = state.items();
    if items.is_empty() {
        return RenderOutcome::Empty { view };
    }

    let failed = state.failed_images();
    let cards = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut card = Card::from_item(item, index);
            if failed.contains(&index) {
                card.on_image_error();
            }
            card
        })
        .collect();

    RenderOutcome::Grid { view, cards }
}
