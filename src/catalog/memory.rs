//! In-memory catalog backend.
//!
//! [`MemoryCatalog`] serves fixture payloads from memory. It backs UI previews
//! and the test suite: connectivity can be toggled, failures injected, and
//! every request is logged so callers can assert which page was asked for.
//!
//! # Fixture Format
//!
//! ```json
//! {
//!   "popular": [ { "results": [ ... ], "total_pages": 500 } ],
//!   "searches": { "batman": [ { "results": [ ... ], "total_pages": 5 } ] },
//!   "details": { "268": { "id": 268, "title": "Batman", ... } },
//!   "media": { "268": { "results": [ ... ] } },
//!   "genres": { "genres": [ { "id": 28, "name": "Action" } ] }
//! }
//! ```

use crate::catalog::client::{CatalogClient, CatalogResult};
use crate::catalog::models::{RawGenreList, RawItemDetails, RawItemPage, RawMediaList};
use crate::catalog::request::{classify_status, CatalogRequest};
use crate::domain::error::{CatalogError, CinelistError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Serialized fixture contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FixtureData {
    #[serde(default)]
    popular: Vec<RawItemPage>,

    /// Search pages keyed by exact query text.
    #[serde(default)]
    searches: HashMap<String, Vec<RawItemPage>>,

    #[serde(default)]
    details: HashMap<u64, RawItemDetails>,

    #[serde(default)]
    media: HashMap<u64, RawMediaList>,

    #[serde(default)]
    genres: RawGenreList,
}

/// Fixture-backed [`CatalogClient`].
///
/// Pages are 1-based. A page index past the configured pages yields an empty
/// page, which is how the real catalog signals the end of a listing. Unknown
/// detail or media ids fail like an HTTP 404 would.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    data: FixtureData,
    disconnected: AtomicBool,
    failures: Mutex<VecDeque<CatalogError>>,
    requests: Mutex<Vec<CatalogRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryCatalog {
    /// Creates an empty, connected catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads fixture data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid fixture.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading catalog fixture");

        let contents = std::fs::read_to_string(path)?;
        let data: FixtureData = serde_json::from_str(&contents)
            .map_err(|e| CinelistError::Config(format!("invalid catalog fixture: {e}")))?;

        tracing::debug!(
            popular_pages = data.popular.len(),
            searches = data.searches.len(),
            details = data.details.len(),
            "catalog fixture loaded"
        );

        Ok(Self {
            data,
            ..Self::default()
        })
    }

    /// Replaces the popular listing.
    #[must_use]
    pub fn with_popular_pages(mut self, pages: Vec<RawItemPage>) -> Self {
        self.data.popular = pages;
        self
    }

    /// Registers search pages for an exact query.
    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>, pages: Vec<RawItemPage>) -> Self {
        self.data.searches.insert(query.into(), pages);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: RawItemDetails) -> Self {
        self.data.details.insert(details.id, details);
        self
    }

    #[must_use]
    pub fn with_media(mut self, id: u64, media: RawMediaList) -> Self {
        self.data.media.insert(id, media);
        self
    }

    #[must_use]
    pub fn with_genres(mut self, genres: RawGenreList) -> Self {
        self.data.genres = genres;
        self
    }

    /// Toggles the connectivity flag. While disconnected every call fails with
    /// [`CatalogError::NoConnection`].
    pub fn set_connected(&self, connected: bool) {
        self.disconnected.store(!connected, Ordering::SeqCst);
    }

    /// Makes the next call fail with `error`. Queued failures are consumed in order.
    pub fn fail_next(&self, error: CatalogError) {
        lock(&self.failures).push_back(error);
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<CatalogRequest> {
        lock(&self.requests).clone()
    }

    /// Logs the request and applies connectivity and injected failures.
    fn admit(&self, request: CatalogRequest) -> CatalogResult<()> {
        tracing::trace!(path = %request.path(), "memory catalog request");
        lock(&self.requests).push(request);

        if !self.is_connected() {
            return Err(CatalogError::NoConnection);
        }
        match lock(&self.failures).pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn page_of(pages: &[RawItemPage], page: u32) -> RawItemPage {
        let index = usize::try_from(page).unwrap_or(usize::MAX).saturating_sub(1);
        pages.get(index).cloned().unwrap_or_else(|| RawItemPage {
            items: Vec::new(),
            total_pages: u32::try_from(pages.len()).ok(),
        })
    }

    fn not_found() -> CatalogError {
        classify_status(404).unwrap_or(CatalogError::NoData)
    }
}

#[async_trait]
impl CatalogClient for MemoryCatalog {
    fn is_connected(&self) -> bool {
        !self.disconnected.load(Ordering::SeqCst)
    }

    async fn list_popular(&self, page: u32) -> CatalogResult<RawItemPage> {
        self.admit(CatalogRequest::Popular { page })?;
        Ok(Self::page_of(&self.data.popular, page))
    }

    async fn search(&self, query: &str, page: u32) -> CatalogResult<RawItemPage> {
        self.admit(CatalogRequest::Search {
            query: query.to_string(),
            page,
        })?;
        let pages = self.data.searches.get(query).map_or(&[][..], Vec::as_slice);
        Ok(Self::page_of(pages, page))
    }

    async fn details(&self, id: u64) -> CatalogResult<RawItemDetails> {
        self.admit(CatalogRequest::Details { id })?;
        self.data.details.get(&id).cloned().ok_or_else(Self::not_found)
    }

    async fn media(&self, id: u64) -> CatalogResult<RawMediaList> {
        self.admit(CatalogRequest::Media { id })?;
        self.data.media.get(&id).cloned().ok_or_else(Self::not_found)
    }

    async fn genres(&self) -> CatalogResult<RawGenreList> {
        self.admit(CatalogRequest::Genres)?;
        Ok(self.data.genres.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::io::Write;

    #[test]
    fn pages_past_the_end_are_empty() {
        let catalog = MemoryCatalog::new().with_popular_pages(vec![RawItemPage {
            items: vec![],
            total_pages: Some(1),
        }]);

        let page = block_on(catalog.list_popular(4)).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, Some(1));
        assert_eq!(catalog.requests(), vec![CatalogRequest::Popular { page: 4 }]);
    }

    #[test]
    fn disconnected_catalog_refuses_requests() {
        let catalog = MemoryCatalog::new();
        catalog.set_connected(false);
        assert!(!catalog.is_connected());
        assert_eq!(block_on(catalog.genres()), Err(CatalogError::NoConnection));

        catalog.set_connected(true);
        assert!(block_on(catalog.genres()).is_ok());
    }

    #[test]
    fn injected_failures_are_consumed_in_order() {
        let catalog = MemoryCatalog::new();
        catalog.fail_next(CatalogError::Unauthorized);
        catalog.fail_next(CatalogError::NoData);

        assert_eq!(block_on(catalog.search("x", 1)), Err(CatalogError::Unauthorized));
        assert_eq!(block_on(catalog.search("x", 1)), Err(CatalogError::NoData));
        assert!(block_on(catalog.search("x", 1)).is_ok());
    }

    #[test]
    fn unknown_details_fail_like_a_missing_resource() {
        let catalog = MemoryCatalog::new();
        assert!(matches!(
            block_on(catalog.details(1)),
            Err(CatalogError::RequestFailed(_))
        ));
    }

    #[test]
    fn loads_fixture_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "popular": [{{"results": [{{"id": 1, "title": "Heat"}}], "total_pages": 500}}],
                "searches": {{"heat": [{{"results": [{{"id": 1, "title": "Heat"}}], "total_pages": 1}}]}},
                "details": {{"1": {{"id": 1, "title": "Heat"}}}}
            }}"#
        )
        .unwrap();

        let catalog = MemoryCatalog::from_file(file.path()).unwrap();
        assert_eq!(block_on(catalog.list_popular(1)).unwrap().items[0].title, "Heat");
        assert_eq!(block_on(catalog.search("heat", 1)).unwrap().total_pages, Some(1));
        assert_eq!(block_on(catalog.details(1)).unwrap().title, "Heat");
    }

    #[test]
    fn rejects_malformed_fixtures() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"popular\": 7}}").unwrap();
        assert!(matches!(
            MemoryCatalog::from_file(file.path()),
            Err(CinelistError::Config(_))
        ));
    }
}
