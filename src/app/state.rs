//! The list aggregator: the single owner of browsing state.
//!
//! [`ListAggregator`] keeps the popular and search [`Stream`]s, the active
//! [`BrowsingMode`] and [`SortOption`], and decides what to fetch next. It
//! performs no I/O itself: a fetch is split into [`ListAggregator::begin_fetch`],
//! which returns a [`FetchPlan`], and [`ListAggregator::complete_fetch`], which
//! merges the catalog's answer. The async [`Browser`](crate::worker::Browser)
//! drives both halves against a real client.
//!
//! # Flow
//!
//! ```text
//! begin_fetch ──► Skip              (exhausted / past the page cap)
//!             ├─► Local(outcome)    (offline search, already merged)
//!             └─► Remote(request) ──► catalog ──► complete_fetch ──► PageOutcome
//! ```
//!
//! # Stale responses
//!
//! Each request records its stream's generation. Resetting a stream bumps the
//! generation, so a response that lands after `cancel_search`, `set_search`
//! or a reload is dropped without touching the stream.
//!
//! # Example
//!
//! ```rust
//! use cinelist::app::{ListAggregator, LogSink};
//! use cinelist::catalog::{RawItem, RawItemPage};
//! use cinelist::worker::{FetchPlan, PageOutcome};
//! use cinelist::Config;
//!
//! let mut aggregator = ListAggregator::new(&Config::default(), Box::new(LogSink));
//! let FetchPlan::Remote(request) = aggregator.begin_fetch(false) else {
//!     unreachable!("a fresh popular stream always fetches");
//! };
//! assert_eq!(request.page, 1);
//!
//! let page = RawItemPage {
//!     items: vec![serde_json::from_str::<RawItem>(r#"{"id": 1, "title": "Heat"}"#).unwrap()],
//!     total_pages: Some(500),
//! };
//! let outcome = aggregator.complete_fetch(request, Ok(page));
//! assert_eq!(outcome, PageOutcome::Appended { returned: 1, added: 1 });
//! assert_eq!(aggregator.visible_items()[0].title, "Heat");
//! ```

use crate::app::modes::{BrowsingMode, StreamKind};
use crate::app::notices::{Notice, NoticeSink};
use crate::app::sort::SortOption;
use crate::app::stream::Stream;
use crate::catalog::models::RawItemPage;
use crate::domain::error::{CatalogError, CinelistError, Result};
use crate::domain::{ImageBase, Item};
use crate::worker::messages::{FetchPlan, PageOutcome, PageRequest, TraceContext};
use crate::Config;

/// Popular and search streams plus the state that selects between them.
pub struct ListAggregator {
    popular: Stream,
    search: Stream,
    mode: BrowsingMode,
    sort_option: SortOption,
    query: String,
    page_size: usize,
    popular_page_cap: u32,
    search_page_cap: u32,
    images: ImageBase,
    sink: Box<dyn NoticeSink>,
}

impl std::fmt::Debug for ListAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListAggregator")
            .field("mode", &self.mode)
            .field("sort_option", &self.sort_option)
            .field("query", &self.query)
            .field("popular", &self.popular.raw().len())
            .field("search", &self.search.raw().len())
            .finish_non_exhaustive()
    }
}

impl ListAggregator {
    /// Creates an aggregator in [`BrowsingMode::Popular`] with empty streams.
    ///
    /// # Parameters
    ///
    /// * `config` - Page size, page caps and image base
    /// * `sink` - Receiver for connectivity and failure notices
    #[must_use]
    pub fn new(config: &Config, sink: Box<dyn NoticeSink>) -> Self {
        Self {
            popular: Stream::new(config.popular_page_cap),
            search: Stream::new(config.search_page_cap),
            mode: BrowsingMode::default(),
            sort_option: SortOption::default(),
            query: String::new(),
            page_size: config.page_size,
            popular_page_cap: config.popular_page_cap,
            search_page_cap: config.search_page_cap,
            images: ImageBase::new(&config.image_base_url),
            sink,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> BrowsingMode {
        self.mode
    }

    #[must_use]
    pub const fn sort_option(&self) -> SortOption {
        self.sort_option
    }

    /// Current search query; empty outside of search.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn stream(&self, kind: StreamKind) -> &Stream {
        match kind {
            StreamKind::Popular => &self.popular,
            StreamKind::Search => &self.search,
        }
    }

    fn stream_mut(&mut self, kind: StreamKind) -> &mut Stream {
        match kind {
            StreamKind::Popular => &mut self.popular,
            StreamKind::Search => &mut self.search,
        }
    }

    fn active_stream(&self) -> &Stream {
        self.stream(self.mode.stream())
    }

    /// Items the UI should display, in display order.
    #[must_use]
    pub fn visible_items(&self) -> &[Item] {
        self.active_stream().visible(self.sort_option)
    }

    /// `false` once the active stream has returned an empty page.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        !self.active_stream().pagination().has_reached_end()
    }

    /// Item at `index` in [`ListAggregator::visible_items`].
    ///
    /// # Errors
    ///
    /// Returns [`CinelistError::NotFound`] when `index` is out of bounds.
    pub fn item_at(&self, index: usize) -> Result<&Item> {
        let items = self.visible_items();
        items.get(index).ok_or(CinelistError::NotFound {
            index,
            len: items.len(),
        })
    }

    /// Switches the sort option and resorts both streams from their raw order.
    pub fn select_sort_option(&mut self, option: SortOption) {
        let _span = tracing::debug_span!("select_sort_option", option = %option).entered();

        self.sort_option = option;
        self.popular.resort(option);
        self.search.resort(option);
    }

    /// Starts a search for `query`.
    ///
    /// An empty query is ignored. The sort option returns to the default and
    /// the search stream is cleared. Without connectivity the search runs
    /// offline, and entering offline mode emits one
    /// [`Notice::ConnectivityLost`].
    ///
    /// # Parameters
    ///
    /// * `query` - Search text, sent to the catalog as given
    /// * `connected` - Current connectivity of the catalog client
    pub fn set_search(&mut self, query: &str, connected: bool) {
        if query.is_empty() {
            tracing::debug!("ignoring empty search query");
            return;
        }

        let _span =
            tracing::debug_span!("set_search", query = %query, connected = connected).entered();

        self.query = query.to_string();
        self.sort_option = SortOption::default();
        self.search.reset(self.search_page_cap);

        let previous = self.mode;
        self.mode = previous.on_search(connected);
        if self.mode == BrowsingMode::OfflineSearch && previous != BrowsingMode::OfflineSearch {
            self.sink.notify(Notice::ConnectivityLost);
        }

        tracing::debug!(from = ?previous, to = ?self.mode, "browsing mode changed");
    }

    /// Leaves search and returns to the popular listing.
    pub fn cancel_search(&mut self) {
        let _span = tracing::debug_span!("cancel_search", query = %self.query).entered();

        self.query.clear();
        self.search.reset(self.search_page_cap);
        self.mode = self.mode.on_cancel();
    }

    /// Plans the next fetch for the active stream.
    ///
    /// A reload always plans page 1. Otherwise nothing is planned once the
    /// stream is exhausted or the next page is past its cap. Offline search
    /// is resolved immediately by filtering the loaded popular items.
    pub fn begin_fetch(&mut self, with_reload: bool) -> FetchPlan {
        let kind = self.mode.stream();
        let _span = tracing::debug_span!(
            "begin_fetch",
            mode = ?self.mode,
            with_reload = with_reload
        )
        .entered();

        let pagination = self.stream(kind).pagination();
        if !with_reload && pagination.has_reached_end() {
            tracing::debug!("stream exhausted");
            return FetchPlan::Skip;
        }

        if self.mode == BrowsingMode::OfflineSearch {
            return FetchPlan::Local(self.filter_offline());
        }

        let page = pagination.next_page(with_reload, self.page_size);
        if !with_reload && !pagination.is_within_cap(page) {
            tracing::debug!(page = page, cap = pagination.page_cap(), "page past cap");
            return FetchPlan::Skip;
        }

        let stream = self.stream_mut(kind);
        if with_reload {
            stream.bump_generation();
        }
        let generation = stream.generation();

        let query = (kind == StreamKind::Search).then(|| self.query.clone());
        tracing::debug!(page = page, generation = generation, "planned remote fetch");

        FetchPlan::Remote(PageRequest {
            stream: kind,
            page,
            query,
            with_reload,
            generation,
            trace_context: TraceContext::from_current(),
        })
    }

    /// Merges the result of a planned fetch.
    ///
    /// Failures leave the stream untouched and go to the notice sink. A
    /// connectivity failure during a remote search also switches to offline
    /// search, so the next fetch filters locally.
    pub fn complete_fetch(
        &mut self,
        request: PageRequest,
        result: std::result::Result<RawItemPage, CatalogError>,
    ) -> PageOutcome {
        let _span = tracing::debug_span!(
            "complete_fetch",
            stream = ?request.stream,
            page = request.page,
        )
        .entered();

        if self.is_stale(&request) {
            tracing::debug!(generation = request.generation, "dropping stale response");
            return PageOutcome::Stale;
        }

        match result {
            Ok(page) => {
                let total_pages = page.total_pages;
                let items: Vec<Item> = page
                    .items
                    .into_iter()
                    .map(|raw| Item::from_raw(raw, &self.images))
                    .collect();
                let returned = items.len();
                let option = self.sort_option;

                let stream = self.stream_mut(request.stream);
                let added = stream.append_page(items, option, request.with_reload);
                if request.stream == StreamKind::Search {
                    stream.pagination_mut().narrow_cap(total_pages);
                }

                tracing::debug!(returned = returned, added = added, "page merged");
                PageOutcome::Appended { returned, added }
            }
            Err(error) => {
                tracing::debug!(error = %error, "fetch failed");
                if error.is_no_connection() && request.stream == StreamKind::Search {
                    self.on_connection_lost();
                }
                self.report(error.into());
                PageOutcome::Failed
            }
        }
    }

    /// Sends a failure notice to the sink.
    pub fn report(&mut self, error: CinelistError) {
        self.sink.notify(Notice::Failed(error));
    }

    fn is_stale(&self, request: &PageRequest) -> bool {
        if request.generation != self.stream(request.stream).generation() {
            return true;
        }
        match request.stream {
            StreamKind::Popular => false,
            StreamKind::Search => {
                self.mode != BrowsingMode::Search
                    || request.query.as_deref() != Some(self.query.as_str())
            }
        }
    }

    fn on_connection_lost(&mut self) {
        let previous = self.mode;
        self.mode = previous.on_connection_lost();
        if self.mode == BrowsingMode::OfflineSearch && previous != BrowsingMode::OfflineSearch {
            // Online results may have exhausted the stream.
            self.search.reset(self.search_page_cap);
            self.sink.notify(Notice::ConnectivityLost);
            tracing::debug!(query = %self.query, "search degraded to offline");
        }
    }

    fn filter_offline(&mut self) -> PageOutcome {
        let lowered = self.query.to_lowercase();
        let matches: Vec<Item> = self
            .popular
            .raw()
            .iter()
            .filter(|item| item.title_contains(&lowered))
            .cloned()
            .collect();
        let returned = matches.len();

        self.search.replace(matches, self.sort_option);
        let added = self.search.raw().len();

        tracing::debug!(query = %self.query, matches = returned, "offline search filtered");
        PageOutcome::Appended { returned, added }
    }
}
