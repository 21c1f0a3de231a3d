//! Domain layer for cinelist.
//!
//! Core value types independent of any transport or UI: the list [`Item`], the
//! on-demand [`ItemDetails`], image URL construction and the error types.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Item and item-details models, year extraction
//! - [`image`]: Image size tiers and URL joining

pub mod error;
pub mod image;
pub mod item;

pub use error::{CatalogError, CinelistError, Result};
pub use image::{ImageBase, ImageSize};
pub use item::{extract_year, Genre, Item, ItemDetails};
