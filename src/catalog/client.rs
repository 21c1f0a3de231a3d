//! Catalog client abstraction.
//!
//! This module defines the [`CatalogClient`] trait, the seam between the
//! aggregation core and whatever actually talks to the remote catalog. The
//! HTTP transport and the reachability signal live behind it; the core only
//! sees typed payloads or a classified [`CatalogError`].
//!
//! # Design
//!
//! The trait mirrors the catalog's endpoints one-to-one.
//! Paging is expressed by a 1-based page index; the server's page size
//! is fixed (see [`Config::page_size`](crate::Config::page_size)).

use crate::catalog::models::{RawGenreList, RawItemDetails, RawItemPage, RawMediaList};
use crate::domain::error::CatalogError;
use async_trait::async_trait;

/// Result type returned by every catalog operation.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Remote catalog operations consumed by the aggregator and detail resolver.
///
/// Implementations must be shareable across tasks. Each call is single-fire:
/// the returned future resolves exactly once with a payload or an error.
///
/// # Implementations
///
/// - [`MemoryCatalog`](crate::catalog::MemoryCatalog): in-memory fixture catalog
///
/// # Example
///
/// ```no_run
/// use cinelist::catalog::{CatalogClient, MemoryCatalog};
///
/// # async fn run() -> Result<(), cinelist::CatalogError> {
/// let catalog = MemoryCatalog::new();
/// let page = catalog.list_popular(1).await?;
/// println!("{} items, {:?} pages", page.items.len(), page.total_pages);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Point-in-time connectivity flag, polled before each fetch.
    fn is_connected(&self) -> bool;

    /// Lists popular items.
    ///
    /// # Errors
    ///
    /// Returns the classified transport or decoding failure.
    async fn list_popular(&self, page: u32) -> CatalogResult<RawItemPage>;

    /// Searches items by free text.
    ///
    /// # Errors
    ///
    /// Returns the classified transport or decoding failure.
    async fn search(&self, query: &str, page: u32) -> CatalogResult<RawItemPage>;

    /// Fetches one item's full details.
    ///
    /// # Errors
    ///
    /// Returns the classified transport or decoding failure.
    async fn details(&self, id: u64) -> CatalogResult<RawItemDetails>;

    /// Fetches one item's extended media entries (trailers, teasers, ...).
    ///
    /// # Errors
    ///
    /// Returns the classified transport or decoding failure.
    async fn media(&self, id: u64) -> CatalogResult<RawMediaList>;

    /// Fetches the list of known genres.
    ///
    /// # Errors
    ///
    /// Returns the classified transport or decoding failure.
    async fn genres(&self) -> CatalogResult<RawGenreList>;
}
