//! Client-side view state shared by the controllers.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::MovieItem;

/// Which result list the page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Trending,
    Search,
}

/// View state for one page session. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Text currently in the query box.
    pub query: String,
    pub trending_items: Vec<MovieItem>,
    pub trending_loading: bool,
    pub trending_error: Option<String>,
    pub search_results: Vec<MovieItem>,
    pub search_loading: bool,
    pub search_error: Option<String>,
    /// Set by the first non-blank submission and never cleared.
    pub searched: bool,
    trending_failed_images: BTreeSet<usize>,
    search_failed_images: BTreeSet<usize>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Initial state: trending still loading, nothing searched.
    pub fn new() -> Self {
        Self {
            query: String::new(),
            trending_items: Vec::new(),
            trending_loading: true,
            trending_error: None,
            search_results: Vec::new(),
            search_loading: false,
            search_error: None,
            searched: false,
            trending_failed_images: BTreeSet::new(),
            search_failed_images: BTreeSet::new(),
        }
    }

    /// The view currently on screen.
    pub fn active_view(&self) -> ViewKind {
        if self.searched {
            ViewKind::Search
        } else {
            ViewKind::Trending
        }
    }

    /// Loading flag of the active view.
    pub fn is_loading(&self) -> bool {
        match self.active_view() {
            ViewKind::Trending => self.trending_loading,
            ViewKind::Search => self.search_loading,
        }
    }

    /// Error of the active view.
    pub fn error_message(&self) -> Option<&str> {
        match self.active_view() {
            ViewKind::Trending => self.trending_error.as_deref(),
            ViewKind::Search => self.search_error.as_deref(),
        }
    }

    /// Items of the active view, in response order.
    pub fn items(&self) -> &[MovieItem] {
        match self.active_view() {
            ViewKind::Trending => &self.trending_items,
            ViewKind::Search => &self.search_results,
        }
    }

    /// Card indices of the active view whose poster failed to load.
    pub fn failed_images(&self) -> &BTreeSet<usize> {
        match self.active_view() {
            ViewKind::Trending => &self.trending_failed_images,
            ViewKind::Search => &self.search_failed_images,
        }
    }

    /// Records a poster load failure for a card in the active view.
    pub fn mark_image_failed(&mut self, index: usize) -> bool {
        if index >= self.items().len() {
            return false;
        }
        match self.active_view() {
            ViewKind::Trending => self.trending_failed_images.insert(index),
            ViewKind::Search => self.search_failed_images.insert(index),
        }
    }

    /// Stores a successful trending response.
    pub fn finish_trending(&mut self, items: Vec<MovieItem>) {
        self.trending_items = items;
        self.trending_failed_images.clear();
        self.trending_loading = false;
    }

    /// Stores a failed trending response. Items stay empty.
    pub fn fail_trending(&mut self, message: String) {
        self.trending_error = Some(message);
        self.trending_loading = false;
    }

    /// Enters the search view and resets it for a new request.
    pub fn start_search(&mut self) {
        self.search_loading = true;
        self.search_error = None;
        self.search_results.clear();
        self.search_failed_images.clear();
        self.searched = true;
    }

    /// Stores a successful search response.
    pub fn finish_search(&mut self, items: Vec<MovieItem>) {
        self.search_results = items;
        self.search_failed_images.clear();
        self.search_loading = false;
    }

    /// Stores a failed search response.
    pub fn fail_search(&mut self, message: String) {
        self.search_error = Some(message);
        self.search_loading = false;
    }
}
