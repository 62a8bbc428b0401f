//! Trending and search controllers, composed into a page session.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::view::{self, RenderOutcome};
use crate::{ClientConfig, MovieApi, RecommendQuery, ViewState};

/// State shared between the controllers of one page.
#[derive(Debug)]
struct PageContext {
    state: RwLock<ViewState>,
    mounted: AtomicBool,
}

impl PageContext {
    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }
}

/// Loads the trending feed once per page.
pub struct TrendingFetcher {
    api: Arc<dyn MovieApi>,
    ctx: Arc<PageContext>,
    started: AtomicBool,
}

impl TrendingFetcher {
    /// Fetches the feed and stores it. Returns `false` if the feed was
    /// already requested for this page.
    pub async fn run(&self) -> bool {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("Trending feed already requested");
            return false;
        }

        let outcome = self.api.trending().await;
        if !self.ctx.is_mounted() {
            debug!("Page unmounted, discarding trending response");
            return true;
        }

        let mut state = self.ctx.state.write().await;
        match outcome {
            Ok(items) => state.finish_trending(items),
            Err(e) => {
                warn!("Trending fetch failed: {}", e);
                state.fail_trending(e.to_string());
            }
        }
        true
    }

    /// Returns whether the feed has been requested.
    pub fn has_run(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}

/// A search that has been submitted but not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    token: u64,
    query: RecommendQuery,
}

impl PendingSearch {
    /// Monotonically increasing request token.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// The query being sent.
    pub fn query(&self) -> &RecommendQuery {
        &self.query
    }
}

/// What happened to a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The response was stored.
    Applied,
    /// A newer search was submitted; the response was dropped.
    Stale,
    /// The page was unmounted; the response was dropped.
    Unmounted,
}

/// Submits queries to `/recommend`. Only the latest submission may write
/// its response into the view state.
pub struct SearchController {
    api: Arc<dyn MovieApi>,
    ctx: Arc<PageContext>,
    vector_limit: u32,
    graph_limit: u32,
    latest: AtomicU64,
}

impl SearchController {
    /// Starts a search for `text`.
    ///
    /// Blank input returns `None` and leaves the state untouched. Otherwise
    /// the search view is entered, cleared, and marked loading.
    pub async fn begin(&self, text: &str) -> Option<PendingSearch> {
        let query = RecommendQuery::new(text)
            .with_vector_limit(self.vector_limit)
            .with_graph_limit(self.graph_limit);
        if query.is_blank() {
            debug!("Ignoring blank query");
            return None;
        }

        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.ctx.state.write().await.start_search();
        debug!("Search #{} started for '{}'", token, query.query);
        Some(PendingSearch { token, query })
    }

    /// Issues the request for a pending search and stores the outcome if it
    /// is still the latest submission.
    pub async fn complete(&self, pending: PendingSearch) -> SearchOutcome {
        let outcome = self.api.recommend(&pending.query).await;
        if !self.ctx.is_mounted() {
            debug!("Page unmounted, discarding search #{}", pending.token);
            return SearchOutcome::Unmounted;
        }

        // Checked under the write lock so a concurrent `begin` cannot slip in
        // between the comparison and the store.
        let mut state = self.ctx.state.write().await;
        if self.latest.load(Ordering::SeqCst) != pending.token {
            debug!("Search #{} superseded, discarding response", pending.token);
            return SearchOutcome::Stale;
        }

        match outcome {
            Ok(items) => {
                debug!("Search #{} returned {} items", pending.token, items.len());
                state.finish_search(items);
            }
            Err(e) => {
                warn!("Search #{} failed: {}", pending.token, e);
                state.fail_search(e.to_string());
            }
        }
        SearchOutcome::Applied
    }

    /// Begins and completes a search. `None` for blank input.
    pub async fn submit(&self, text: &str) -> Option<SearchOutcome> {
        let pending = self.begin(text).await?;
        Some(self.complete(pending).await)
    }

    /// Token of the most recent submission, zero before any.
    pub fn latest_token(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// One page session: the query box, both controllers and the results area.
pub struct Page {
    api: Arc<dyn MovieApi>,
    ctx: Arc<PageContext>,
    trending: TrendingFetcher,
    search: SearchController,
}

impl Page {
    /// Creates a page using the limits from `config`.
    pub fn new(api: Arc<dyn MovieApi>, config: &ClientConfig) -> Self {
        let ctx = Arc::new(PageContext {
            state: RwLock::new(ViewState::new()),
            mounted: AtomicBool::new(true),
        });

        Self {
            trending: TrendingFetcher {
                api: Arc::clone(&api),
                ctx: Arc::clone(&ctx),
                started: AtomicBool::new(false),
            },
            search: SearchController {
                api: Arc::clone(&api),
                ctx: Arc::clone(&ctx),
                vector_limit: config.vector_limit,
                graph_limit: config.graph_limit,
                latest: AtomicU64::new(0),
            },
            api,
            ctx,
        }
    }

    /// Runs the one-shot trending fetch.
    pub async fn mount(&self) -> bool {
        self.trending.run().await
    }

    /// Stops any in-flight response from touching the state.
    pub fn unmount(&self) {
        self.ctx.mounted.store(false, Ordering::SeqCst);
    }

    /// Returns whether the page is mounted.
    pub fn is_mounted(&self) -> bool {
        self.ctx.is_mounted()
    }

    /// Returns the trending controller.
    pub fn trending(&self) -> &TrendingFetcher {
        &self.trending
    }

    /// Returns the search controller.
    pub fn search(&self) -> &SearchController {
        &self.search
    }

    /// Replaces the text in the query box.
    pub async fn set_query(&self, text: impl Into<String>) {
        self.ctx.state.write().await.query = text.into();
    }

    /// Submits whatever is in the query box.
    pub async fn submit_current(&self) -> Option<SearchOutcome> {
        let text = self.ctx.state.read().await.query.clone();
        self.search.submit(&text).await
    }

    /// Types `text` into the query box and submits it.
    pub async fn submit(&self, text: impl Into<String>) -> Option<SearchOutcome> {
        self.set_query(text).await;
        self.submit_current().await
    }

    /// Reports that the poster of card `index` in the active view failed to
    /// load.
    pub async fn report_image_error(&self, index: usize) -> bool {
        self.ctx.state.write().await.mark_image_failed(index)
    }

    /// Probes every poster in the active view and falls back to the
    /// placeholder for those that fail. Returns the number of failures.
    pub async fn check_posters(&self) -> usize {
        let posters: Vec<(usize, String)> = {
            let state = self.ctx.state.read().await;
            state
                .items()
                .iter()
                .enumerate()
                .filter(|(index, _)| !state.failed_images().contains(index))
                .filter_map(|(index, item)| item.poster().map(|url| (index, url.to_string())))
                .collect()
        };

        let probes = posters.into_iter().map(|(index, url)| {
            let api = Arc::clone(&self.api);
            async move {
                let reachable = api.poster_reachable(&url).await;
                (index, url, reachable)
            }
        });
        let failed: Vec<_> = join_all(probes)
            .await
            .into_iter()
            .filter(|(_, _, reachable)| !reachable)
            .collect();

        let mut state = self.ctx.state.write().await;
        let mut count = 0;
        for (index, url, _) in failed {
            // The list may have been replaced while probing.
            let unchanged = state.items().get(index).and_then(|item| item.poster()) == Some(url.as_str());
            if unchanged && state.mark_image_failed(index) {
                count += 1;
            }
        }
        count
    }

    /// Copy of the current view state.
    pub async fn snapshot(&self) -> ViewState {
        self.ctx.state.read().await.clone()
    }

    /// Selects the render outcome for the current state.
    pub async fn render(&self) -> RenderOutcome {
        view::select(&*self.ctx.state.read().await)
    }
}
