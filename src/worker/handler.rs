//! Async driver executing fetch plans against a catalog client.
//!
//! [`Browser`] is what a UI layer talks to. It owns the [`ListAggregator`],
//! polls the client's connectivity flag, runs the aggregator's remote plans
//! and routes every failure to the notice sink. All methods take `&mut self`;
//! callers gate on "fetch in flight" themselves.

use crate::app::modes::{BrowsingMode, StreamKind};
use crate::app::sort::SortOption;
use crate::app::state::ListAggregator;
use crate::catalog::client::{CatalogClient, CatalogResult};
use crate::catalog::genres::GenreCatalog;
use crate::catalog::models::RawItemPage;
use crate::details::{DetailResolver, ResolvedDetails};
use crate::domain::error::CatalogError;
use crate::domain::Item;
use crate::worker::messages::{FetchPlan, PageOutcome, PageRequest};
use std::sync::Arc;
use tracing::Instrument;

/// Browsing session over one catalog.
pub struct Browser {
    client: Arc<dyn CatalogClient>,
    aggregator: ListAggregator,
    resolver: DetailResolver,
    genres: GenreCatalog,
}

impl std::fmt::Debug for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Browser")
            .field("aggregator", &self.aggregator)
            .field("genres", &self.genres.len())
            .finish_non_exhaustive()
    }
}

impl Browser {
    /// Creates a browser with an empty genre list.
    ///
    /// Most callers go through [`initialize`](crate::initialize), which
    /// builds the aggregator and resolver from a [`Config`](crate::Config).
    ///
    /// # Parameters
    ///
    /// * `client` - Catalog backend shared with detail lookups
    /// * `aggregator` - List state, usually fresh
    /// * `resolver` - Detail and trailer resolver
    #[must_use]
    pub fn new(
        client: Arc<dyn CatalogClient>,
        aggregator: ListAggregator,
        resolver: DetailResolver,
    ) -> Self {
        Self {
            client,
            aggregator,
            resolver,
            genres: GenreCatalog::new(),
        }
    }

    /// Read access to the underlying list state.
    #[must_use]
    pub const fn aggregator(&self) -> &ListAggregator {
        &self.aggregator
    }

    /// See [`ListAggregator::visible_items`].
    #[must_use]
    pub fn visible_items(&self) -> &[Item] {
        self.aggregator.visible_items()
    }

    /// See [`ListAggregator::can_load_more`].
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.aggregator.can_load_more()
    }

    #[must_use]
    pub const fn mode(&self) -> BrowsingMode {
        self.aggregator.mode()
    }

    #[must_use]
    pub const fn sort_option(&self) -> SortOption {
        self.aggregator.sort_option()
    }

    /// Changes the display order of both streams.
    ///
    /// # Parameters
    ///
    /// * `option` - New sort option; no request is made
    pub fn select_sort_option(&mut self, option: SortOption) {
        self.aggregator.select_sort_option(option);
    }

    /// Starts a search, online or offline depending on current connectivity.
    ///
    /// # Parameters
    ///
    /// * `query` - Search text; an empty string is ignored
    pub fn set_search(&mut self, query: &str) {
        let connected = self.client.is_connected();
        self.aggregator.set_search(query, connected);
    }

    /// Leaves search and shows the popular listing again.
    pub fn cancel_search(&mut self) {
        self.aggregator.cancel_search();
    }

    /// Loads the next page of the active stream, or page 1 on reload.
    ///
    /// Errors are not returned: they reach the notice sink and the outcome is
    /// [`PageOutcome::Failed`].
    ///
    /// # Parameters
    ///
    /// * `with_reload` - Refetch page 1 and replace the stream on success
    ///
    /// # Returns
    ///
    /// - `Appended` once a page (remote or offline filter) was merged
    /// - `Skipped` if the stream is exhausted or past its page cap
    /// - `Stale` if the stream was reset while the request was in flight
    /// - `Failed` if the request failed
    pub async fn get_items(&mut self, with_reload: bool) -> PageOutcome {
        let request = match self.aggregator.begin_fetch(with_reload) {
            FetchPlan::Skip => return PageOutcome::Skipped,
            FetchPlan::Local(outcome) => return outcome,
            FetchPlan::Remote(request) => request,
        };

        let span = tracing::debug_span!(
            "get_items",
            stream = ?request.stream,
            page = request.page,
            with_reload = with_reload,
        );
        if let Some(parent) = request.trace_context.as_ref().and_then(|c| c.to_otel_context()) {
            use tracing_opentelemetry::OpenTelemetrySpanExt;
            span.set_parent(parent);
        }

        let result = Self::fetch_page(self.client.as_ref(), &request)
            .instrument(span)
            .await;
        self.aggregator.complete_fetch(request, result)
    }

    async fn fetch_page(
        client: &dyn CatalogClient,
        request: &PageRequest,
    ) -> CatalogResult<RawItemPage> {
        if !client.is_connected() {
            tracing::debug!("catalog unreachable, skipping request");
            return Err(CatalogError::NoConnection);
        }
        match (request.stream, request.query.as_deref()) {
            (StreamKind::Popular, _) => client.list_popular(request.page).await,
            (StreamKind::Search, Some(query)) => client.search(query, request.page).await,
            (StreamKind::Search, None) => Err(CatalogError::InvalidData(
                "search request without a query".to_string(),
            )),
        }
    }

    /// Resolves details and trailer for the visible item at `index`.
    ///
    /// # Parameters
    ///
    /// * `index` - Position in [`Browser::visible_items`]
    ///
    /// # Returns
    ///
    /// - `Some(details)` with the latest trailer, if any
    /// - `None` if the index is out of range or a request failed; the cause
    ///   goes to the notice sink
    pub async fn get_details(&mut self, index: usize) -> Option<ResolvedDetails> {
        let id = match self.aggregator.item_at(index) {
            Ok(item) => item.id,
            Err(error) => {
                tracing::debug!(index = index, error = %error, "detail lookup out of range");
                self.aggregator.report(error);
                return None;
            }
        };

        let span = tracing::debug_span!("get_details", index = index, id = id);
        let result = self
            .resolver
            .resolve(self.client.as_ref(), id)
            .instrument(span)
            .await;
        match result {
            Ok(resolved) => Some(resolved),
            Err(error) => {
                self.aggregator.report(error.into());
                None
            }
        }
    }

    /// Fetches the genre list used by [`Browser::genre_names`].
    ///
    /// Returns the number of known genres. On failure the previous list is
    /// kept and the error goes to the notice sink.
    pub async fn load_genres(&mut self) -> usize {
        let span = tracing::debug_span!("load_genres");
        match self.client.genres().instrument(span).await {
            Ok(list) => {
                self.genres = GenreCatalog::from(list);
                tracing::debug!(count = self.genres.len(), "genres loaded");
            }
            Err(error) => self.aggregator.report(error.into()),
        }
        self.genres.len()
    }

    /// Genres from the last successful [`Browser::load_genres`].
    #[must_use]
    pub const fn genres(&self) -> &GenreCatalog {
        &self.genres
    }

    /// Display names of an item's genres.
    #[must_use]
    pub fn genre_names<'a>(&'a self, item: &Item) -> Vec<&'a str> {
        self.genres.names_for(item)
    }
}
