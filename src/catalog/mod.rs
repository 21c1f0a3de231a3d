//! Catalog access layer.
//!
//! Everything that touches the remote movie catalog sits behind this module:
//! the [`CatalogClient`] trait, the raw wire payloads, endpoint descriptions
//! for transport implementors, the genre lookup and an in-memory backend.
//!
//! # Organization
//!
//! - [`client`]: The [`CatalogClient`] trait
//! - [`models`]: Raw `serde` payloads using the catalog's field names
//! - [`request`]: Endpoint paths, query parameters and response helpers
//! - [`genres`]: Genre id to name lookup
//! - [`memory`]: Fixture-backed [`MemoryCatalog`]

pub mod client;
pub mod genres;
pub mod memory;
pub mod models;
pub mod request;

pub use client::{CatalogClient, CatalogResult};
pub use genres::GenreCatalog;
pub use memory::MemoryCatalog;
pub use models::{
    RawCountry, RawGenre, RawGenreList, RawItem, RawItemDetails, RawItemPage, RawMediaEntry,
    RawMediaList,
};
pub use request::{classify_status, decode_body, CatalogRequest};
